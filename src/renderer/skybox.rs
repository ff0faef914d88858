//! Environment cube drawn around the scene.

use super::{
    mesh::GpuMesh,
    pipeline_util::{PassTargets, TargetPipelines},
};
use crate::{
    gpu::{
        pipeline_helpers::{self, ScenePipelineDesc},
        texture::SampledTexture,
    },
    mesh::{primitives, Vertex},
    scene::View,
};

/// Inward-facing cube sampling the sky cube map by direction. Tests depth
/// but never writes it.
pub struct SkyboxRenderer {
    pipelines: TargetPipelines,
    mesh: GpuMesh,
    bind_group: wgpu::BindGroup,
}

impl SkyboxRenderer {
    /// Build the pipelines and bind `sky` as the environment.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        object_layout: &wgpu::BindGroupLayout,
        targets: PassTargets,
        sky: &SampledTexture,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox Layout"),
            entries: &[
                pipeline_helpers::texture_cube(0),
                pipeline_helpers::filtering_sampler(1),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skybox Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sky.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        let pipelines = TargetPipelines::new(
            device,
            &ScenePipelineDesc {
                label: "Skybox",
                shader,
                bind_group_layouts: &[object_layout, &layout],
                vertex_buffers: &[Vertex::layout()],
                blend: None,
                depth_write: false,
            },
            targets,
        );

        Self {
            pipelines,
            mesh: GpuMesh::upload(device, "Skybox", &primitives::inward_cube()),
            bind_group,
        }
    }

    /// Draw into `view`, reading the object uniform at `offset`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        view: View,
        object_group: &'a wgpu::BindGroup,
        offset: u32,
    ) {
        render_pass.set_pipeline(self.pipelines.for_view(view));
        render_pass.set_bind_group(0, object_group, &[offset]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        self.mesh.draw_instanced(render_pass, 0..1);
    }
}
