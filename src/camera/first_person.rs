use glam::{Mat4, Quat, Vec3};

/// Free-look camera that turns about a fixed up axis and pitches towards
/// it.
///
/// Yaw and pitch are tracked as accumulated angles so the pitch can be
/// clamped short of looking straight along the up axis, where the view
/// basis would degenerate.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPersonCamera {
    pos: Vec3,
    dir: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    pitch_limit: Option<f32>,
}

/// Pitch limit used for the main camera: just short of straight up/down.
pub const MAIN_PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

impl FirstPersonCamera {
    /// Camera at `pos` looking along `dir`, turning about `up`.
    ///
    /// Zero-length vectors fall back to +Y up and +Z forward.
    #[must_use]
    pub fn new(pos: Vec3, up: Vec3, dir: Vec3) -> Self {
        let up = up.normalize_or(Vec3::Y);
        let dir = dir.normalize_or(Vec3::Z);
        Self {
            pos,
            dir,
            up,
            yaw: 0.0,
            pitch: dir.dot(up).clamp(-1.0, 1.0).asin(),
            pitch_limit: None,
        }
    }

    /// Clamp the pitch to `±limit` radians from here on.
    #[must_use]
    pub fn with_pitch_limit(mut self, limit: f32) -> Self {
        self.pitch_limit = Some(limit.abs());
        self
    }

    /// Rotate the look direction about the up axis.
    pub fn turn(&mut self, angle: f32) {
        self.dir = (Quat::from_axis_angle(self.up, angle) * self.dir).normalize();
        self.yaw += angle;
    }

    /// Tilt the look direction towards (positive) or away from the up
    /// axis.
    pub fn elevate(&mut self, angle: f32) {
        let mut target = self.pitch + angle;
        if let Some(limit) = self.pitch_limit {
            target = target.clamp(-limit, limit);
        }
        let delta = target - self.pitch;
        let Some(axis) = self.dir.cross(self.up).try_normalize() else {
            return;
        };
        self.dir = (Quat::from_axis_angle(axis, delta) * self.dir).normalize();
        self.pitch = target;
    }

    /// Translate along the look direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.pos += self.dir * distance;
    }

    /// Move the camera without changing its orientation.
    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = pos;
    }

    /// World-space position.
    #[must_use]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }

    /// Unit look direction.
    #[must_use]
    pub fn dir(&self) -> Vec3 {
        self.dir
    }

    /// Up axis.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Accumulated yaw in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians above the plane perpendicular to `up`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Left-handed world-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_lh(self.pos, self.dir, self.up)
    }
}

/// Left-handed perspective projection with a 0..1 depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near plane distance.
    pub near: f32,
    /// Far plane distance.
    pub far: f32,
}

impl Projection {
    /// Projection for a `width x height` target; zero sizes give aspect 1.
    #[must_use]
    pub fn for_size(fov_y: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        let aspect = if width == 0 || height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// The projection matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn turning_a_quarter_swings_forward_to_the_right() {
        let mut cam = FirstPersonCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Z);
        cam.turn(FRAC_PI_2);
        assert!(approx(cam.dir(), Vec3::X));
        assert!((cam.yaw() - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn elevating_tilts_towards_up() {
        let mut cam = FirstPersonCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Z);
        cam.elevate(0.3);
        assert!(cam.dir().y > 0.0);
        assert!((cam.pitch() - 0.3).abs() < 1e-6);
        assert!((cam.dir().y - 0.3_f32.sin()).abs() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped_short_of_vertical() {
        let mut cam = FirstPersonCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Z)
            .with_pitch_limit(MAIN_PITCH_LIMIT);
        cam.elevate(10.0);
        assert!((cam.pitch() - MAIN_PITCH_LIMIT).abs() < 1e-6);
        assert!(cam.dir().y < 1.0);
        cam.elevate(-20.0);
        assert!((cam.pitch() + MAIN_PITCH_LIMIT).abs() < 1e-6);
        // Still a valid basis.
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn move_forward_follows_the_look_direction() {
        let mut cam = FirstPersonCamera::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::NEG_X);
        cam.move_forward(2.0);
        assert!(approx(cam.pos(), Vec3::new(-1.0, 2.0, 3.0)));
    }

    #[test]
    fn view_matrix_puts_the_target_in_front() {
        let cam = FirstPersonCamera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Y, Vec3::Z);
        let p = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!(approx(p, Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn projection_maps_near_and_far_to_unit_depth_range() {
        let proj = Projection::for_size(0.25 * std::f32::consts::PI, 800, 600, 1.0, 1000.0);
        assert!((proj.aspect - 4.0 / 3.0).abs() < 1e-6);
        let near = proj.matrix().project_point3(Vec3::new(0.0, 0.0, 1.0));
        let far = proj.matrix().project_point3(Vec3::new(0.0, 0.0, 1000.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_sized_target_keeps_a_finite_aspect() {
        let proj = Projection::for_size(1.0, 0, 600, 1.0, 10.0);
        assert_eq!(proj.aspect, 1.0);
    }
}
