//! GPU-free half of the engine: cameras, sphere placement, the clock, and
//! the per-frame uniform fill.

use glam::{Mat4, Vec3};

use super::command::SceneCommand;
use crate::{
    camera::{CubeFace, FirstPersonCamera, ProbeRig, Projection, MAIN_PITCH_LIMIT},
    options::Options,
    scene::{FrameState, ObjectUniform, SceneObject, UniformArena, View},
    util::GameClock,
};

/// Interactive scene state driven by [`SceneCommand`]s.
#[derive(Debug, Clone)]
pub struct SceneState {
    options: Options,
    camera: FirstPersonCamera,
    projection: Projection,
    probes: ProbeRig,
    sphere_translation: Vec3,
    clock: GameClock,
}

impl SceneState {
    /// Initial state for a `width x height` main view.
    #[must_use]
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let camera = main_camera(&options);
        let projection = main_projection(&options, width, height);
        let probes = ProbeRig::new(
            options.reflection.probe_znear,
            options.reflection.probe_zfar,
        );
        let clock = GameClock::new("main", options.scene.clock_deferred_start);
        Self {
            options,
            camera,
            projection,
            probes,
            sphere_translation: Vec3::ZERO,
            clock,
        }
    }

    /// Apply one command.
    pub fn execute(&mut self, command: SceneCommand) {
        let camera_options = &self.options.camera;
        match command {
            SceneCommand::RotateCamera { dx, dy } => {
                self.camera.elevate(-dy * camera_options.rotate_speed);
                self.camera.turn(-dx * camera_options.rotate_speed);
            }
            SceneCommand::MoveCamera { delta } => {
                self.camera.move_forward(delta * camera_options.move_speed);
            }
            SceneCommand::MoveSphere(offset) => {
                self.sphere_translation += offset;
                self.probes.translate(offset);
            }
            SceneCommand::ResetSphere => {
                self.sphere_translation = Vec3::ZERO;
                self.probes.reset();
            }
            SceneCommand::TogglePause => {
                if self.clock.is_paused() {
                    self.clock.start();
                    log::info!("game time resumed");
                } else {
                    self.clock.stop();
                    log::info!("game time paused");
                }
            }
            SceneCommand::ReportTiming => {
                log::info!(
                    "actual time elapsed {:.2}s, game time elapsed {:.2}s",
                    self.clock.actual_time_elapsed(),
                    self.clock.game_time_elapsed()
                );
                self.clock.report_timing_data();
            }
        }
    }

    /// Rebuild the main projection for a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection = main_projection(&self.options, width, height);
    }

    /// Tick the clock and evaluate this frame's inputs.
    pub fn advance(&mut self) -> FrameState {
        self.clock.tick();
        self.frame_at(self.clock.game_time_elapsed() as f32)
    }

    /// Frame inputs at game time `time`.
    #[must_use]
    pub fn frame_at(&self, time: f32) -> FrameState {
        FrameState::new(&self.options, time, self.sphere_translation)
    }

    /// View-projection matrix and eye position of `view`.
    #[must_use]
    pub fn view_camera(&self, view: View) -> (Mat4, Vec3) {
        match view {
            View::Main => (
                self.projection.matrix() * self.camera.view_matrix(),
                self.camera.pos(),
            ),
            View::CubeFace(face) => (self.probes.view_proj(face), self.probes.position()),
        }
    }

    /// Write every (view, object) slot for `frame`, the sphere's
    /// cube-face slots included so the arena is fully defined.
    pub fn fill_arena(&self, arena: &mut UniformArena, frame: &FrameState) {
        for view in View::ALL {
            let (view_proj, eye) = self.view_camera(view);
            for object in SceneObject::ALL {
                let uniform = ObjectUniform::for_object(object, view_proj, eye, frame);
                arena.set(view, object, &uniform);
            }
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options, resetting the main camera to the new start
    /// pose and rebuilding the projections.
    pub fn set_options(&mut self, options: Options, width: u32, height: u32) {
        self.options = options;
        self.camera = main_camera(&self.options);
        self.projection = main_projection(&self.options, width, height);
        let position = self.probes.position();
        self.probes = ProbeRig::new(
            self.options.reflection.probe_znear,
            self.options.reflection.probe_zfar,
        );
        self.probes.translate(position);
    }

    /// The main camera.
    #[must_use]
    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    /// The main projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The cube-map probe rig.
    #[must_use]
    pub fn probes(&self) -> &ProbeRig {
        &self.probes
    }

    /// User offset of the sphere.
    #[must_use]
    pub fn sphere_translation(&self) -> Vec3 {
        self.sphere_translation
    }

    /// The game clock.
    #[must_use]
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// View-projection of one probe face.
    #[must_use]
    pub fn probe_view_proj(&self, face: CubeFace) -> Mat4 {
        self.probes.view_proj(face)
    }
}

fn main_camera(options: &Options) -> FirstPersonCamera {
    let camera = &options.camera;
    FirstPersonCamera::new(
        Vec3::from_array(camera.start_position),
        Vec3::Y,
        Vec3::from_array(camera.start_direction),
    )
    .with_pitch_limit(MAIN_PITCH_LIMIT)
}

fn main_projection(options: &Options, width: u32, height: u32) -> Projection {
    let camera = &options.camera;
    Projection::for_size(camera.fov_y(), width, height, camera.znear, camera.zfar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::UniformSlots;

    fn state() -> SceneState {
        SceneState::new(Options::default(), 800, 600)
    }

    #[test]
    fn starts_at_the_configured_pose() {
        let state = state();
        assert_eq!(state.camera().pos(), Vec3::new(25.0, 2.0, -14.5));
        assert!((state.projection().aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((state.projection().fov_y - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(state.probes().position(), Vec3::ZERO);
    }

    #[test]
    fn moving_the_sphere_drags_the_probes_along() {
        let mut state = state();
        state.execute(SceneCommand::MoveSphere(Vec3::new(0.0, 0.5, 0.0)));
        state.execute(SceneCommand::MoveSphere(Vec3::new(-0.5, 0.0, 0.0)));
        let expected = Vec3::new(-0.5, 0.5, 0.0);
        assert_eq!(state.sphere_translation(), expected);
        assert_eq!(state.probes().position(), expected);

        state.execute(SceneCommand::ResetSphere);
        assert_eq!(state.sphere_translation(), Vec3::ZERO);
        assert_eq!(state.probes().position(), Vec3::ZERO);
    }

    #[test]
    fn wheel_moves_along_the_look_direction() {
        let mut state = state();
        let start = state.camera().pos();
        let dir = state.camera().dir();
        state.execute(SceneCommand::MoveCamera { delta: 120.0 });
        let moved = state.camera().pos() - start;
        assert!((moved - dir * 1.2).length() < 1e-4);
    }

    #[test]
    fn dragging_down_looks_down_and_pitch_is_clamped() {
        let mut state = state();
        let before = state.camera().pitch();
        state.execute(SceneCommand::RotateCamera { dx: 0.0, dy: 10.0 });
        assert!((state.camera().pitch() - (before - 0.1)).abs() < 1e-5);

        state.execute(SceneCommand::RotateCamera { dx: 0.0, dy: 100_000.0 });
        assert!((state.camera().pitch() + MAIN_PITCH_LIMIT).abs() < 1e-5);
    }

    #[test]
    fn dragging_sideways_turns_about_world_up() {
        let mut state = state();
        state.execute(SceneCommand::RotateCamera { dx: 50.0, dy: 0.0 });
        assert!((state.camera().yaw() + 0.5).abs() < 1e-6);
        assert_eq!(state.camera().up(), Vec3::Y);
    }

    #[test]
    fn toggle_pause_flips_the_clock() {
        let mut state = state();
        assert!(!state.clock().is_paused());
        state.execute(SceneCommand::TogglePause);
        assert!(state.clock().is_paused());
        state.execute(SceneCommand::TogglePause);
        assert!(!state.clock().is_paused());
        state.execute(SceneCommand::ReportTiming);
    }

    #[test]
    fn resize_only_changes_the_aspect() {
        let mut state = state();
        state.resize(1000, 500);
        assert!((state.projection().aspect - 2.0).abs() < 1e-6);
        assert_eq!(state.projection().near, 1.0);
        assert_eq!(state.projection().far, 1000.0);
    }

    #[test]
    fn cube_face_slots_use_the_probe_cameras() {
        let mut state = state();
        state.execute(SceneCommand::MoveSphere(Vec3::new(1.0, 0.0, 0.0)));
        let frame = state.frame_at(0.0);
        let slots = UniformSlots::new(256);
        let mut arena = UniformArena::new(slots);
        state.fill_arena(&mut arena, &frame);

        let face = View::CubeFace(CubeFace::PositiveZ);
        let start = slots.offset(face, SceneObject::Tower) as usize;
        let tower: ObjectUniform =
            bytemuck::pod_read_unaligned(&arena.bytes()[start..start + 384]);
        assert_eq!(tower.eye_pos, [1.0, 0.0, 0.0, 1.0]);

        let world = SceneObject::Tower.world_matrix(0.0, Vec3::ZERO, Vec3::ZERO);
        let expected = state.probe_view_proj(CubeFace::PositiveZ) * world;
        assert!(Mat4::from_cols_array_2d(&tower.wvp).abs_diff_eq(expected, 1e-4));

        let start = slots.offset(View::Main, SceneObject::Tower) as usize;
        let main: ObjectUniform =
            bytemuck::pod_read_unaligned(&arena.bytes()[start..start + 384]);
        assert_eq!(main.eye_pos, [25.0, 2.0, -14.5, 1.0]);
    }

    #[test]
    fn huge_clock_deferrals_from_toml_are_accepted() {
        for text in ["[scene]\nclock_deferred_start = inf", "[scene]\nclock_deferred_start = 1e30"] {
            let options = Options::from_toml(text).unwrap();
            let mut state = SceneState::new(options, 800, 600);
            let frame = state.advance();
            assert!(frame.time >= 0.0);
        }
    }

    #[test]
    fn replacing_options_keeps_the_probe_with_the_sphere() {
        let mut state = state();
        state.execute(SceneCommand::MoveSphere(Vec3::new(0.0, 0.0, 2.0)));
        let mut options = Options::default();
        options.camera.start_position = [0.0, 5.0, 0.0];
        state.set_options(options, 800, 600);
        assert_eq!(state.camera().pos(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(state.probes().position(), Vec3::new(0.0, 0.0, 2.0));
    }
}
