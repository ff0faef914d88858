//! Render-to-cube-map target for the reflective sphere.
//!
//! One six-layer texture is rendered face by face through single-layer 2D
//! views and sampled as a whole through a cube view. All six face passes
//! share one depth buffer; each pass clears it.

use crate::{camera::CubeFace, gpu::texture::DepthTarget};

/// Colour each face is cleared to before the scene is drawn into it.
pub const FACE_CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Six renderable faces plus a cube view for sampling.
pub struct DynamicCubeMap {
    size: u32,
    _texture: wgpu::Texture,
    face_views: Vec<wgpu::TextureView>,
    cube_view: wgpu::TextureView,
    depth: DepthTarget,
}

impl DynamicCubeMap {
    /// Colour format of the faces.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Allocate a `size` × `size` cube map with its shared depth buffer.
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let size = size.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Dynamic Cube Map"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 6,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let face_views = CubeFace::ALL
            .iter()
            .map(|face| {
                texture.create_view(&wgpu::TextureViewDescriptor {
                    label: Some(&format!("Cube Face {face:?}")),
                    dimension: Some(wgpu::TextureViewDimension::D2),
                    base_array_layer: face.layer(),
                    array_layer_count: Some(1),
                    ..Default::default()
                })
            })
            .collect();

        let cube_view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Dynamic Cube Map View"),
            dimension: Some(wgpu::TextureViewDimension::Cube),
            array_layer_count: Some(6),
            ..Default::default()
        });

        let depth = DepthTarget::new(device, "Cube Map Depth", size, size);
        log::debug!("dynamic cube map allocated at {size}x{size}");

        Self {
            size,
            _texture: texture,
            face_views,
            cube_view,
            depth,
        }
    }

    /// Render view of one face.
    pub fn face_view(&self, face: CubeFace) -> &wgpu::TextureView {
        &self.face_views[face.layer() as usize]
    }

    /// Cube view for sampling.
    pub fn cube_view(&self) -> &wgpu::TextureView {
        &self.cube_view
    }

    /// Depth buffer shared by all faces.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth.view
    }

    /// Edge length of each face.
    pub fn size(&self) -> u32 {
        self.size
    }
}
