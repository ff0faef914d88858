//! The rusty mirror sphere.

use super::{cube_map::DynamicCubeMap, mesh::GpuMesh};
use crate::{
    gpu::{
        pipeline_helpers::{self, ScenePipelineDesc},
        texture::SampledTexture,
    },
    mesh::{MeshData, Vertex},
};

/// Sphere textures bound next to the dynamic cube map.
pub struct SphereMaterial<'a> {
    /// Rust colour.
    pub diffuse: &'a SampledTexture,
    /// Bare-metal mask; bright texels mirror the environment.
    pub specular: &'a SampledTexture,
    /// Sampler for all three textures.
    pub sampler: &'a wgpu::Sampler,
}

/// Draws the sphere into the main view, reflecting the dynamic cube map.
///
/// There is only a main-view pipeline: the sphere is never captured into
/// its own reflection.
pub struct ReflectiveRenderer {
    pipeline: wgpu::RenderPipeline,
    mesh: GpuMesh,
    bind_group: wgpu::BindGroup,
}

impl ReflectiveRenderer {
    /// Build the pipeline for `main_format` and bind the cube map.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        object_layout: &wgpu::BindGroupLayout,
        main_format: wgpu::TextureFormat,
        mesh: &MeshData,
        material: &SphereMaterial<'_>,
        cube_map: &DynamicCubeMap,
    ) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Reflective Layout"),
            entries: &[
                pipeline_helpers::texture_2d(0),
                pipeline_helpers::texture_cube(1),
                pipeline_helpers::texture_2d(2),
                pipeline_helpers::filtering_sampler(3),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Reflective Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&material.diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(cube_map.cube_view()),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&material.specular.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(material.sampler),
                },
            ],
        });

        let pipeline = pipeline_helpers::create_scene_pipeline(
            device,
            &ScenePipelineDesc {
                label: "Reflective Sphere",
                shader,
                bind_group_layouts: &[object_layout, &layout],
                vertex_buffers: &[Vertex::layout()],
                blend: None,
                depth_write: true,
            },
            main_format,
        );

        Self {
            pipeline,
            mesh: GpuMesh::upload(device, "Sphere", mesh),
            bind_group,
        }
    }

    /// Draw into the main view, reading the object uniform at `offset`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        object_group: &'a wgpu::BindGroup,
        offset: u32,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, object_group, &[offset]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        self.mesh.draw_instanced(render_pass, 0..1);
    }
}
