//! Standalone window backed by winit.
//!
//! ```no_run
//! # use mirrorball::viewer::Viewer;
//! Viewer::builder()
//!     .with_assets_root("assets")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    engine::{SceneCommand, SceneEngine},
    error::MirrorballError,
    input::{InputEvent, InputProcessor, MouseButton, WHEEL_DELTA},
    options::Options,
    util::FramePacer,
};

/// Pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
    assets_root: PathBuf,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: None,
            assets_root: PathBuf::from("assets"),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding `options.window.title`.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Directory holding `models/`, `textures/` and `shaders/`.
    #[must_use]
    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = root.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer {
            options,
            assets_root: self.assets_root,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the reflective-sphere scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    assets_root: PathBuf,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::Viewer`] if the event loop cannot be
    /// created or exits abnormally, or the engine error that stopped
    /// start-up.
    pub fn run(self) -> Result<(), MirrorballError> {
        let event_loop =
            EventLoop::new().map_err(|e| MirrorballError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            input: InputProcessor::new(
                self.options.keybindings.clone(),
                self.options.scene.sphere_step,
            ),
            pacer: FramePacer::new(self.options.window.target_fps),
            options: Some(self.options),
            assets_root: self.assets_root,
            startup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MirrorballError::Viewer(e.to_string()))?;

        app.startup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    input: InputProcessor,
    pacer: FramePacer,
    /// Taken when the engine is created.
    options: Option<Options>,
    assets_root: PathBuf,
    startup_error: Option<MirrorballError>,
}

impl ViewerApp {
    fn handle_input(&mut self, event: InputEvent) {
        if let (Some(command), Some(engine)) = (self.input.handle_event(event), &mut self.engine) {
            engine.execute(command);
        }
    }

    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine) else {
            return;
        };
        engine.update();
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let inner = window.inner_size();
                engine.resize(inner.width, inner.height);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        self.pacer.frame_rendered();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: MirrorballError) {
        log::error!("{error}");
        self.startup_error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(&options.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                options.window.width,
                options.window.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, MirrorballError::Viewer(e.to_string()));
                return;
            }
        };

        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));
        let engine = match pollster::block_on(SceneEngine::new(
            window.clone(),
            size,
            options,
            self.assets_root.clone(),
        )) {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.execute(SceneCommand::ReportTiming);
            }
            event_loop.exit();
            return;
        }

        if self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
                if !self.pacer.is_limited() {
                    if let Some(w) = &self.window {
                        w.request_redraw();
                    }
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_DELTA,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_NOTCH * WHEEL_DELTA
                    }
                };
                self.handle_input(InputEvent::Scroll { delta });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key = format!("{code:?}");
                if let (Some(command), Some(engine)) =
                    (self.input.handle_key_press(&key), &mut self.engine)
                {
                    engine.execute(command);
                }
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.pacer.is_limited() {
            return;
        }
        if self.pacer.should_render() {
            event_loop.set_control_flow(ControlFlow::Poll);
            if let Some(w) = &self.window {
                w.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame_at()));
        }
    }
}
