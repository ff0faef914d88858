//! Draw passes for the scene.
//!
//! [`SceneRenderer`] owns every GPU resource except the targets: the
//! uniform arena, the per-object pipelines and the mesh, texture and
//! particle buffers. The engine decides which target each view renders
//! into; the renderer draws that view's objects in order.

/// Six-face render target sampled by the sphere.
pub mod cube_map;
/// Fire particles.
pub mod fire;
/// GPU meshes and the lit model pass.
pub mod mesh;
/// Pipeline pairs and the object uniform binding.
pub mod pipeline_util;
/// The reflective sphere.
pub mod reflective;
/// Environment cube.
pub mod skybox;
/// Grass terrain.
pub mod terrain;

use std::path::Path;

use self::{
    cube_map::DynamicCubeMap,
    fire::FireRenderer,
    mesh::MeshRenderer,
    pipeline_util::{PassTargets, TargetPipelines},
    reflective::{ReflectiveRenderer, SphereMaterial},
    skybox::SkyboxRenderer,
    terrain::TerrainRenderer,
};
use crate::{
    assets::{TextureRole, TextureSource},
    error::MirrorballError,
    gpu::{
        dynamic_buffer::DynamicBuffer,
        pipeline_helpers::{self, ScenePipelineDesc},
        render_context::RenderContext,
        shader_composer::{SceneShader, ShaderComposer},
        texture::{SampledTexture, TexelEncoding},
    },
    mesh::{
        gltf_loader::{self, ModelKind},
        terrain as terrain_mesh, Vertex,
    },
    options::Options,
    scene::{SceneObject, UniformArena, UniformSlots, View},
};

/// All scene draw passes plus the uniform arena they read from.
pub struct SceneRenderer {
    object_layout: wgpu::BindGroupLayout,
    uniform_buffer: DynamicBuffer,
    object_group: wgpu::BindGroup,
    slots: UniformSlots,
    lit_pipelines: TargetPipelines,
    bridge: MeshRenderer,
    tower: MeshRenderer,
    knight: MeshRenderer,
    skybox: SkyboxRenderer,
    sphere: ReflectiveRenderer,
    terrain: TerrainRenderer,
    fire: FireRenderer,
}

impl SceneRenderer {
    /// Load every asset under `assets_root` and build the passes. The
    /// sphere samples `cube_map`.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorballError::Shader`] if a shader fails to compose and
    /// [`MirrorballError::Asset`] if an existing texture or model file
    /// cannot be decoded.
    pub fn new(
        context: &RenderContext,
        cube_map: &DynamicCubeMap,
        assets_root: &Path,
        options: &Options,
    ) -> Result<Self, MirrorballError> {
        let device = &context.device;
        let queue = &context.queue;
        let targets = PassTargets {
            cube: DynamicCubeMap::FORMAT,
            main: context.format(),
        };

        let mut composer = ShaderComposer::new()?;
        let lit_shader = composer.compose(device, SceneShader::PerPixelLighting)?;
        let sky_shader = composer.compose(device, SceneShader::SkyBox)?;
        let reflection_shader = composer.compose(device, SceneShader::ReflectionMap)?;
        let grass_shader = composer.compose(device, SceneShader::Grass)?;
        let fire_shader = composer.compose(device, SceneShader::Fire)?;

        let slots = UniformSlots::new(context.uniform_alignment());
        let object_layout = pipeline_util::object_layout(device);
        let uniform_buffer = DynamicBuffer::new(
            device,
            "Object Uniforms",
            slots.arena_size(),
            wgpu::BufferUsages::UNIFORM,
        );
        let object_group =
            pipeline_util::object_bind_group(device, &object_layout, uniform_buffer.buffer());

        let mut textures = TextureSource::new(assets_root);
        let mut upload = |role: TextureRole, encoding: TexelEncoding| {
            textures.load(role).map(|image| {
                SampledTexture::from_image(device, queue, role.file_name(), &image, encoding)
            })
        };
        let brick = upload(TextureRole::Brick, TexelEncoding::Srgb)?;
        let moss = upload(TextureRole::MossWall, TexelEncoding::Srgb)?;
        let knight_skin = upload(TextureRole::Knight, TexelEncoding::Srgb)?;
        let rust_diffuse = upload(TextureRole::RustDiffuse, TexelEncoding::Srgb)?;
        let rust_specular = upload(TextureRole::RustSpecular, TexelEncoding::Linear)?;
        let grass = upload(TextureRole::Grass, TexelEncoding::Srgb)?;
        let fire_sprite = upload(TextureRole::FireSprite, TexelEncoding::Srgb)?;

        let sky_faces = textures.load_skybox()?;
        let sky = SampledTexture::from_cube(device, queue, "Skybox", &sky_faces);

        let material_sampler = pipeline_helpers::repeat_sampler(device, "Material Sampler");
        let sky_sampler = pipeline_helpers::linear_sampler(device, "Sky Sampler");

        let material_layout = mesh::lit_material_layout(device);
        let lit_pipelines = TargetPipelines::new(
            device,
            &ScenePipelineDesc {
                label: "Per Pixel Lighting",
                shader: &lit_shader,
                bind_group_layouts: &[&object_layout, &material_layout],
                vertex_buffers: &[Vertex::layout()],
                blend: None,
                depth_write: true,
            },
            targets,
        );

        let model = |kind: ModelKind, diffuse: &SampledTexture| {
            gltf_loader::load_model(assets_root, kind).map(|data| {
                MeshRenderer::new(
                    device,
                    kind.file_name(),
                    &data,
                    &material_layout,
                    diffuse,
                    &material_sampler,
                )
            })
        };
        let bridge = model(ModelKind::Bridge, &brick)?;
        let tower = model(ModelKind::Tower, &moss)?;
        let knight = model(ModelKind::Knight, &knight_skin)?;

        let sphere = ReflectiveRenderer::new(
            device,
            &reflection_shader,
            &object_layout,
            targets.main,
            &gltf_loader::load_model(assets_root, ModelKind::Sphere)?,
            &SphereMaterial {
                diffuse: &rust_diffuse,
                specular: &rust_specular,
                sampler: &material_sampler,
            },
            cube_map,
        );

        let skybox = SkyboxRenderer::new(
            device,
            &sky_shader,
            &object_layout,
            targets,
            &sky,
            &sky_sampler,
        );

        let terrain_options = &options.terrain;
        let heightmap = textures.load(TextureRole::Heightmap)?;
        let normal_map = if textures.has_file(TextureRole::NormalMap) {
            Some(textures.load(TextureRole::NormalMap)?)
        } else {
            log::debug!("no terrain normal map, deriving normals from heights");
            None
        };
        let terrain_data = terrain_mesh::build(
            terrain_options.rows,
            terrain_options.cols,
            &heightmap,
            normal_map.as_deref(),
            terrain_options.height_scale,
        );
        let terrain = TerrainRenderer::new(
            device,
            &grass_shader,
            &object_layout,
            targets,
            &terrain_data,
            &grass,
            &material_sampler,
            terrain_options,
        );

        let fire = FireRenderer::new(
            device,
            &fire_shader,
            &object_layout,
            targets,
            &fire_sprite,
            &material_sampler,
            &options.particles,
        );

        log::info!(
            "scene ready: {} uniform slots of {} bytes",
            UniformSlots::SLOT_COUNT,
            slots.stride()
        );

        Ok(Self {
            object_layout,
            uniform_buffer,
            object_group,
            slots,
            lit_pipelines,
            bridge,
            tower,
            knight,
            skybox,
            sphere,
            terrain,
            fire,
        })
    }

    /// Slot layout the arena must be built with.
    pub fn slots(&self) -> UniformSlots {
        self.slots
    }

    /// Upload this frame's uniforms in one write.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        arena: &UniformArena,
    ) {
        if self.uniform_buffer.write_bytes(device, queue, arena.bytes()) {
            self.object_group = pipeline_util::object_bind_group(
                device,
                &self.object_layout,
                self.uniform_buffer.buffer(),
            );
        }
    }

    /// Draw the objects visible in `view`, in order.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, view: View) {
        let group = &self.object_group;
        for &object in SceneObject::draw_order(view) {
            let offset = self.slots.offset(view, object);
            match object {
                SceneObject::Bridge => {
                    self.bridge
                        .draw(render_pass, self.lit_pipelines.for_view(view), group, offset);
                }
                SceneObject::Tower => {
                    self.tower
                        .draw(render_pass, self.lit_pipelines.for_view(view), group, offset);
                }
                SceneObject::Knight => {
                    self.knight
                        .draw(render_pass, self.lit_pipelines.for_view(view), group, offset);
                }
                SceneObject::SkyBox => self.skybox.draw(render_pass, view, group, offset),
                SceneObject::Terrain => self.terrain.draw(render_pass, view, group, offset),
                SceneObject::Fire => self.fire.draw(render_pass, view, group, offset),
                SceneObject::Sphere => self.sphere.draw(render_pass, group, offset),
            }
        }
    }
}
