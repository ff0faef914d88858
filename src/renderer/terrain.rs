//! Grass-covered heightmap terrain, drawn as instanced shells.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{
    mesh::GpuMesh,
    pipeline_util::{PassTargets, TargetPipelines},
};
use crate::{
    gpu::{
        pipeline_helpers::{self, ScenePipelineDesc},
        texture::SampledTexture,
    },
    mesh::{MeshData, Vertex},
    options::TerrainOptions,
    scene::View,
};

/// Mirrors `GrassParams` in `grass.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct GrassParams {
    layers: u32,
    density: f32,
    _pad: [f32; 2],
}

impl GrassParams {
    fn from_options(options: &TerrainOptions) -> Self {
        Self {
            layers: options.grass_layers.max(1),
            density: options.grass_density,
            _pad: [0.0; 2],
        }
    }
}

/// Draws the terrain mesh once per grass shell. Wind sway comes from the
/// object uniform (`wind_dir`, `grass_height`, `timer`).
pub struct TerrainRenderer {
    pipelines: TargetPipelines,
    mesh: GpuMesh,
    bind_group: wgpu::BindGroup,
    layers: u32,
}

impl TerrainRenderer {
    /// Upload `mesh` and build the grass pipelines.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        object_layout: &wgpu::BindGroupLayout,
        targets: PassTargets,
        mesh: &MeshData,
        grass: &SampledTexture,
        sampler: &wgpu::Sampler,
        options: &TerrainOptions,
    ) -> Self {
        let params = GrassParams::from_options(options);
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grass Params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grass Layout"),
            entries: &[
                pipeline_helpers::texture_2d(0),
                pipeline_helpers::filtering_sampler(1),
                pipeline_helpers::uniform_buffer(2),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grass Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&grass.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let pipelines = TargetPipelines::new(
            device,
            &ScenePipelineDesc {
                label: "Grass Terrain",
                shader,
                bind_group_layouts: &[object_layout, &layout],
                vertex_buffers: &[Vertex::layout()],
                blend: None,
                depth_write: true,
            },
            targets,
        );

        Self {
            pipelines,
            mesh: GpuMesh::upload(device, "Terrain", mesh),
            bind_group,
            layers: params.layers,
        }
    }

    /// Draw every shell into `view`, reading the object uniform at
    /// `offset`.
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
        self.mesh.draw_instanced(render_pass, 0..self.layers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_match_the_wgsl_layout() {
        assert_eq!(size_of::<GrassParams>(), 16);
    }

    #[test]
    fn at_least_one_shell_is_drawn() {
        let options = TerrainOptions {
            grass_layers: 0,
            ..TerrainOptions::default()
        };
        assert_eq!(GrassParams::from_options(&options).layers, 1);
    }
}
