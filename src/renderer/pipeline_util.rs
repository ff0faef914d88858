//! Per-target pipeline pairs and the object uniform binding shared by every
//! scene renderer.

use crate::{
    gpu::pipeline_helpers::{self, ScenePipelineDesc},
    scene::{ObjectUniform, View},
};

/// Colour formats of the two kinds of render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTargets {
    /// Format of each dynamic cube-map face.
    pub cube: wgpu::TextureFormat,
    /// Surface format of the main view.
    pub main: wgpu::TextureFormat,
}

/// The same pipeline built once per target format.
pub struct TargetPipelines {
    cube: wgpu::RenderPipeline,
    main: wgpu::RenderPipeline,
}

impl TargetPipelines {
    /// Build `desc` against both target formats.
    pub fn new(
        device: &wgpu::Device,
        desc: &ScenePipelineDesc<'_>,
        targets: PassTargets,
    ) -> Self {
        Self {
            cube: pipeline_helpers::create_scene_pipeline(device, desc, targets.cube),
            main: pipeline_helpers::create_scene_pipeline(device, desc, targets.main),
        }
    }

    /// Pipeline matching the target of `view`.
    pub fn for_view(&self, view: View) -> &wgpu::RenderPipeline {
        match view {
            View::Main => &self.main,
            View::CubeFace(_) => &self.cube,
        }
    }
}

/// Group 0 layout: one dynamically offset [`ObjectUniform`] slot.
pub fn object_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Uniform Layout"),
        entries: &[pipeline_helpers::dynamic_uniform_buffer(0, ObjectUniform::SIZE)],
    })
}

/// Group 0 bind group over the whole uniform arena.
pub fn object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Uniform Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer,
                offset: 0,
                size: wgpu::BufferSize::new(ObjectUniform::SIZE),
            }),
        }],
    })
}

/// Additive colour blending for emissive particles.
pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};
