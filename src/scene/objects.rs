use glam::{Mat4, Vec3};

use super::material::{Material, GLOSS_WHITE, MATT_WHITE};
use crate::camera::CubeFace;

/// The fixed set of objects in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneObject {
    /// Stone arch bridge.
    Bridge,
    /// Mossy tower.
    Tower,
    /// Knight orbiting the scene.
    Knight,
    /// Environment cube around everything.
    SkyBox,
    /// Grass-covered heightmap.
    Terrain,
    /// Fire particle system at the second light.
    Fire,
    /// The reflective sphere.
    Sphere,
}

impl SceneObject {
    /// Every object, in uniform slot order.
    pub const ALL: [Self; 7] = [
        Self::Bridge,
        Self::Tower,
        Self::Knight,
        Self::SkyBox,
        Self::Terrain,
        Self::Fire,
        Self::Sphere,
    ];

    /// Objects drawn into each cube face. The sphere never sees itself.
    pub const CUBE_FACE_ORDER: [Self; 6] = [
        Self::Bridge,
        Self::Tower,
        Self::Knight,
        Self::SkyBox,
        Self::Terrain,
        Self::Fire,
    ];

    /// Objects drawn into the main view.
    pub const MAIN_ORDER: [Self; 7] = Self::ALL;

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Draw order for `view`.
    #[must_use]
    pub fn draw_order(view: View) -> &'static [Self] {
        match view {
            View::Main => &Self::MAIN_ORDER,
            View::CubeFace(_) => &Self::CUBE_FACE_ORDER,
        }
    }

    /// Specular material the object is shaded with.
    #[must_use]
    pub fn material(self) -> Material {
        match self {
            Self::Sphere => GLOSS_WHITE,
            _ => MATT_WHITE,
        }
    }

    /// Object-to-world transform at game time `t`.
    #[must_use]
    pub fn world_matrix(
        self,
        t: f32,
        sphere_translation: Vec3,
        fire_position: Vec3,
    ) -> Mat4 {
        match self {
            Self::Bridge => {
                Mat4::from_translation(Vec3::new(0.0, -2.7, -10.0))
                    * Mat4::from_scale(Vec3::splat(0.05))
            }
            Self::Tower => {
                Mat4::from_translation(Vec3::new(0.0, -5.0, 15.0))
                    * Mat4::from_scale(Vec3::new(2.0, 3.0, 2.0))
            }
            Self::Knight => {
                Mat4::from_rotation_y(t * 0.1)
                    * Mat4::from_translation(Vec3::new(0.0, -3.0, 20.0))
                    * Mat4::from_scale(Vec3::splat(0.05))
                    * Mat4::from_rotation_y(1.5)
            }
            Self::SkyBox => Mat4::from_scale(Vec3::splat(100.0)),
            Self::Terrain => Mat4::from_translation(Vec3::new(4.5, -1.2, 4.0)),
            Self::Fire => Mat4::from_translation(fire_position),
            Self::Sphere => {
                Mat4::from_translation(sphere_translation) * Mat4::from_rotation_x(t)
            }
        }
    }
}

/// A render target the scene is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The window surface, seen through the main camera.
    Main,
    /// One face of the sphere's dynamic cube map.
    CubeFace(CubeFace),
}

impl View {
    /// Every view, in render order: the six faces, then the main view.
    pub const ALL: [Self; 7] = [
        Self::CubeFace(CubeFace::PositiveX),
        Self::CubeFace(CubeFace::NegativeX),
        Self::CubeFace(CubeFace::PositiveY),
        Self::CubeFace(CubeFace::NegativeY),
        Self::CubeFace(CubeFace::PositiveZ),
        Self::CubeFace(CubeFace::NegativeZ),
        Self::Main,
    ];

    /// Position in [`Self::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::CubeFace(face) => face.layer() as usize,
            Self::Main => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn sphere_is_only_drawn_in_the_main_view() {
        let face = View::CubeFace(CubeFace::NegativeY);
        assert!(!SceneObject::draw_order(face).contains(&SceneObject::Sphere));
        assert_eq!(SceneObject::draw_order(View::Main).last(), Some(&SceneObject::Sphere));
        assert_eq!(
            SceneObject::draw_order(View::Main)[..6],
            SceneObject::CUBE_FACE_ORDER
        );
    }

    #[test]
    fn view_indices_cover_every_slot_once() {
        let mut seen = [false; 7];
        for view in View::ALL {
            assert!(!seen[view.index()]);
            seen[view.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn bridge_scales_before_translating() {
        let m = SceneObject::Bridge.world_matrix(0.0, Vec3::ZERO, Vec3::ZERO);
        let p = m.transform_point3(Vec3::new(100.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(5.0, -2.7, -10.0)));
    }

    #[test]
    fn knight_orbits_the_origin_over_time() {
        let origin = Vec3::ZERO;
        let start = SceneObject::Knight
            .world_matrix(0.0, Vec3::ZERO, Vec3::ZERO)
            .transform_point3(origin);
        assert!(approx(start, Vec3::new(0.0, -3.0, 20.0)));

        // A quarter orbit after 5π seconds.
        let t = 5.0 * std::f32::consts::PI;
        let later = SceneObject::Knight
            .world_matrix(t, Vec3::ZERO, Vec3::ZERO)
            .transform_point3(origin);
        assert!(approx(later, Vec3::new(20.0, -3.0, 0.0)));
    }

    #[test]
    fn sphere_spins_in_place_then_follows_the_user_offset() {
        let offset = Vec3::new(1.0, 0.5, -2.0);
        let m = SceneObject::Sphere.world_matrix(1.3, offset, Vec3::ZERO);
        assert!(approx(m.transform_point3(Vec3::ZERO), offset));
        let top = m.transform_point3(Vec3::Y) - offset;
        assert!((top.length() - 1.0).abs() < 1e-5);
        assert!(top.x.abs() < 1e-5);
    }

    #[test]
    fn fire_sits_at_the_fire_light() {
        let fire = Vec3::new(-2.5, 0.0, 2.0);
        let m = SceneObject::Fire.world_matrix(9.0, Vec3::ONE, fire);
        assert!(approx(m.transform_point3(Vec3::ZERO), fire));
    }

    #[test]
    fn only_the_sphere_is_glossy() {
        for object in SceneObject::ALL {
            let expected = if object == SceneObject::Sphere {
                GLOSS_WHITE
            } else {
                MATT_WHITE
            };
            assert_eq!(object.material(), expected);
        }
    }
}
