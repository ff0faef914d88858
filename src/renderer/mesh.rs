//! Indexed meshes on the GPU and the per-pixel lit model pass.

use std::ops::Range;

use crate::{
    gpu::{
        dynamic_buffer::DynamicBuffer, pipeline_helpers,
        texture::SampledTexture,
    },
    mesh::MeshData,
};

/// Vertex and index buffers of one mesh.
pub struct GpuMesh {
    vertex_buffer: DynamicBuffer,
    index_buffer: DynamicBuffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload `mesh`.
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        Self {
            vertex_buffer: DynamicBuffer::new_with_data(
                device,
                &format!("{label} Vertices"),
                &mesh.vertices,
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: DynamicBuffer::new_with_data(
                device,
                &format!("{label} Indices"),
                &mesh.indices,
                wgpu::BufferUsages::INDEX,
            ),
            index_count: mesh.indices.len() as u32,
        }
    }

    /// Number of indices drawn.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Bind the buffers and draw `instances`.
    ///
    /// Caller must set the pipeline and bind groups first.
    pub fn draw_instanced<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        instances: Range<u32>,
    ) {
        if self.index_count == 0 || instances.is_empty() {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.buffer().slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.buffer().slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, instances);
    }
}

/// Group 1 layout of the lit model shader: diffuse texture and sampler.
pub fn lit_material_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Lit Material Layout"),
        entries: &[
            pipeline_helpers::texture_2d(0),
            pipeline_helpers::filtering_sampler(1),
        ],
    })
}

/// A textured model drawn with the per-pixel lighting pipeline.
pub struct MeshRenderer {
    mesh: GpuMesh,
    material: wgpu::BindGroup,
}

impl MeshRenderer {
    /// Upload `mesh` and bind `diffuse` as its material.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        mesh: &MeshData,
        material_layout: &wgpu::BindGroupLayout,
        diffuse: &SampledTexture,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let material = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Material")),
            layout: material_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&diffuse.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        log::debug!(
            "{label}: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Self {
            mesh: GpuMesh::upload(device, label, mesh),
            material,
        }
    }

    /// Draw with `pipeline`, reading the object uniform at `offset`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        pipeline: &'a wgpu::RenderPipeline,
        object_group: &'a wgpu::BindGroup,
        offset: u32,
    ) {
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, object_group, &[offset]);
        render_pass.set_bind_group(1, &self.material, &[]);
        self.mesh.draw_instanced(render_pass, 0..1);
    }
}
