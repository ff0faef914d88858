use glam::{Mat4, Vec3};

use super::first_person::{FirstPersonCamera, Projection};

/// One face of a cube map, in texture layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    /// Layer 0.
    PositiveX,
    /// Layer 1.
    NegativeX,
    /// Layer 2.
    PositiveY,
    /// Layer 3.
    NegativeY,
    /// Layer 4.
    PositiveZ,
    /// Layer 5.
    NegativeZ,
}

impl CubeFace {
    /// All faces in layer order.
    pub const ALL: [Self; 6] = [
        Self::PositiveX,
        Self::NegativeX,
        Self::PositiveY,
        Self::NegativeY,
        Self::PositiveZ,
        Self::NegativeZ,
    ];

    /// Texture array layer of this face.
    #[must_use]
    pub fn layer(self) -> u32 {
        self as u32
    }

    /// Direction a probe looks along to render this face.
    #[must_use]
    pub fn direction(self) -> Vec3 {
        match self {
            Self::PositiveX => Vec3::X,
            Self::NegativeX => Vec3::NEG_X,
            Self::PositiveY => Vec3::Y,
            Self::NegativeY => Vec3::NEG_Y,
            Self::PositiveZ => Vec3::Z,
            Self::NegativeZ => Vec3::NEG_Z,
        }
    }

    /// Up vector matching the cube-map face orientation convention.
    #[must_use]
    pub fn up(self) -> Vec3 {
        match self {
            Self::PositiveY => Vec3::NEG_Z,
            Self::NegativeY => Vec3::Z,
            _ => Vec3::Y,
        }
    }
}

/// Six cameras sharing one position, one per cube face, each with a 90°
/// square frustum so the faces tile seamlessly.
#[derive(Debug, Clone)]
pub struct ProbeRig {
    cameras: [FirstPersonCamera; 6],
    projection: Projection,
}

impl ProbeRig {
    /// Probe rig at the origin with the given clip planes.
    #[must_use]
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            cameras: CubeFace::ALL
                .map(|face| FirstPersonCamera::new(Vec3::ZERO, face.up(), face.direction())),
            projection: Projection {
                fov_y: std::f32::consts::FRAC_PI_2,
                aspect: 1.0,
                near,
                far,
            },
        }
    }

    /// Shared probe position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.cameras[0].pos()
    }

    /// Move every probe camera by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        for camera in &mut self.cameras {
            camera.set_pos(camera.pos() + delta);
        }
    }

    /// Put every probe camera back at the origin.
    pub fn reset(&mut self) {
        for camera in &mut self.cameras {
            camera.set_pos(Vec3::ZERO);
        }
    }

    /// Camera rendering `face`.
    #[must_use]
    pub fn camera(&self, face: CubeFace) -> &FirstPersonCamera {
        &self.cameras[face.layer() as usize]
    }

    /// Shared square projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Combined projection * view for `face`.
    #[must_use]
    pub fn view_proj(&self, face: CubeFace) -> Mat4 {
        self.projection.matrix() * self.camera(face).view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::cubemap_face_direction;

    #[test]
    fn face_layers_follow_the_cube_order() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.layer(), i as u32);
        }
    }

    #[test]
    fn face_bases_agree_with_cube_sampling() {
        // The top of each rendered face (view-space +Y) must be where cube
        // sampling expects v = -1 for that face.
        for face in CubeFace::ALL {
            let top = cubemap_face_direction(face.layer(), 0.0, -1.0);
            let expected = Vec3::from(top) - face.direction();
            assert!((face.up() - expected).length() < 1e-6, "{face:?}");
            assert!(face.up().dot(face.direction()).abs() < 1e-6);
        }
    }

    #[test]
    fn face_bases_agree_on_the_right_hand_edge() {
        // Left-handed view space puts +X on the right, where u = +1.
        let rig = ProbeRig::new(1.0, 1000.0);
        for face in CubeFace::ALL {
            let right = Vec3::from(cubemap_face_direction(face.layer(), 1.0, 0.0))
                - face.direction();
            let view = rig.camera(face).view_matrix();
            let in_view = view.transform_vector3(right);
            assert!((in_view - Vec3::X).length() < 1e-5, "{face:?}");
        }
    }

    #[test]
    fn translate_and_reset_move_every_probe() {
        let mut rig = ProbeRig::new(1.0, 1000.0);
        rig.translate(Vec3::new(0.5, 0.0, 0.0));
        rig.translate(Vec3::new(0.0, -0.5, 0.0));
        for face in CubeFace::ALL {
            assert_eq!(rig.camera(face).pos(), Vec3::new(0.5, -0.5, 0.0));
        }
        rig.reset();
        assert_eq!(rig.position(), Vec3::ZERO);
    }

    #[test]
    fn face_projection_is_square_and_ninety_degrees() {
        let rig = ProbeRig::new(1.0, 1000.0);
        let edge = rig
            .view_proj(CubeFace::PositiveZ)
            .project_point3(Vec3::new(10.0, 10.0, 10.0));
        assert!((edge.x - 1.0).abs() < 1e-4);
        assert!((edge.y - 1.0).abs() < 1e-4);
    }
}
