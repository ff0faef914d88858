//! Frame orchestration: cube-face passes, the main pass, and the commands
//! that steer them.

/// The engine's interactive vocabulary.
pub mod command;
/// Cameras, sphere placement and the clock.
pub mod state;

use std::path::{Path, PathBuf};

pub use self::command::SceneCommand;
pub use self::state::SceneState;
use crate::{
    camera::CubeFace,
    error::MirrorballError,
    gpu::{render_context::RenderContext, texture::DepthTarget},
    options::Options,
    renderer::{
        cube_map::{DynamicCubeMap, FACE_CLEAR_COLOR},
        SceneRenderer,
    },
    scene::{UniformArena, View},
};

/// Colour the main view is cleared to.
const MAIN_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Renders the scene with a dynamically reflecting sphere.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) then
/// [`render`](Self::render). Call [`resize`](Self::resize) when the window
/// size changes. Input arrives as [`SceneCommand`]s through
/// [`execute`](Self::execute).
///
/// ```ignore
/// engine.update();
/// match engine.render() {
///     Ok(()) => {}
///     Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
///         let (w, h) = engine.size();
///         engine.resize(w, h);
///     }
///     Err(e) => log::error!("render error: {e:?}"),
/// }
/// ```
///
/// Each frame renders the six cube-map faces from the sphere's position
/// (everything but the sphere), then the main view (everything).
pub struct SceneEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    cube_map: DynamicCubeMap,
    depth: DepthTarget,
    arena: UniformArena,
    state: SceneState,
    assets_root: PathBuf,
    minimized: bool,
}

impl SceneEngine {
    /// Create the GPU context for `window` and build the scene from the
    /// assets under `assets_root`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError`] if GPU initialisation fails, a shader
    /// fails to compose, or an existing asset file cannot be decoded.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
        assets_root: impl Into<PathBuf>,
    ) -> Result<Self, MirrorballError> {
        let context = RenderContext::new(window, size).await?;
        Self::from_context(context, options, assets_root.into())
    }

    /// Build the scene on an existing context.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError`] if a shader fails to compose or an
    /// existing asset file cannot be decoded.
    pub fn from_context(
        context: RenderContext,
        options: Options,
        assets_root: PathBuf,
    ) -> Result<Self, MirrorballError> {
        let (width, height) = context.size();
        let cube_map = DynamicCubeMap::new(&context.device, options.reflection.cube_map_size);
        let renderer = SceneRenderer::new(&context, &cube_map, &assets_root, &options)?;
        let depth = DepthTarget::new(&context.device, "Main Depth", width, height);
        let arena = UniformArena::new(renderer.slots());
        let state = SceneState::new(options, width, height);

        log::info!(
            "engine ready at {width}x{height}, cube map {}x{}",
            cube_map.size(),
            cube_map.size()
        );

        Ok(Self {
            context,
            renderer,
            cube_map,
            depth,
            arena,
            state,
            assets_root,
            minimized: false,
        })
    }

    /// Advance game time and upload every view's uniforms.
    pub fn update(&mut self) {
        let frame = self.state.advance();
        self.state.fill_arena(&mut self.arena, &frame);
        self.renderer
            .upload(&self.context.device, &self.context.queue, &self.arena);
    }

    /// Draw the six cube faces, then the main view, and present.
    ///
    /// Does nothing while the window is minimised.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next frame cannot be acquired.
    /// `Lost` and `Outdated` are recovered by calling
    /// [`resize`](Self::resize).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.minimized {
            return Ok(());
        }
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        for face in CubeFace::ALL {
            self.encode_pass(
                &mut encoder,
                View::CubeFace(face),
                self.cube_map.face_view(face),
                self.cube_map.depth_view(),
                FACE_CLEAR_COLOR,
            );
        }
        self.encode_pass(
            &mut encoder,
            View::Main,
            &view,
            &self.depth.view,
            MAIN_CLEAR_COLOR,
        );

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn encode_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: View,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
    ) {
        let label = format!("{view:?} pass");
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(&label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });
        self.renderer.draw(&mut render_pass, view);
    }

    /// Reconfigure the surface, main depth target and main projection.
    ///
    /// A zero-sized window (minimised) suspends rendering until the next
    /// non-zero resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            log::debug!("minimised, rendering suspended");
            self.minimized = true;
            return;
        }
        self.minimized = false;
        self.depth = DepthTarget::new(&self.context.device, "Main Depth", width, height);
        self.state.resize(width, height);
        log::info!("resized to {width}x{height}");
    }

    /// Perform one interactive command.
    pub fn execute(&mut self, command: SceneCommand) {
        self.state.execute(command);
    }

    /// Current surface size.
    pub fn size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Whether rendering is suspended because the window is minimised.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Interactive scene state.
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        self.state.options()
    }

    /// Replace the options. Camera, projection and lighting changes apply
    /// immediately; GPU resources (textures, meshes, particles, cube-map
    /// size) are rebuilt from the assets root.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError`] if rebuilding the scene resources fails;
    /// the previous resources stay in place.
    pub fn set_options(&mut self, options: Options) -> Result<(), MirrorballError> {
        let cube_map =
            DynamicCubeMap::new(&self.context.device, options.reflection.cube_map_size);
        let renderer =
            SceneRenderer::new(&self.context, &cube_map, &self.assets_root, &options)?;
        self.cube_map = cube_map;
        self.renderer = renderer;
        self.arena = UniformArena::new(self.renderer.slots());
        let (width, height) = self.context.size();
        self.state.set_options(options, width, height);
        Ok(())
    }

    /// Assets directory the scene was loaded from.
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }
}
