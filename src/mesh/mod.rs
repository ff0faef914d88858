//! CPU-side mesh data: the shared vertex format, procedural primitives,
//! glTF import, and the heightmap terrain grid.

pub mod gltf_loader;
pub mod primitives;
pub mod terrain;

use glam::{Mat3, Mat4, Vec3};

/// Vertex layout shared by every lit mesh in the scene.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Per-vertex buffer layout matching `@location(0..3)` in the shaders.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Vertex from plain vectors.
    #[must_use]
    pub fn new(position: Vec3, normal: Vec3, uv: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv,
        }
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Append `other` transformed by `transform`, re-basing its indices.
    pub fn append(&mut self, other: &Self, transform: Mat4) {
        let base = self.vertices.len() as u32;
        let normal_matrix = Mat3::from_mat4(transform).inverse().transpose();
        self.vertices.extend(other.vertices.iter().map(|v| {
            let p = transform.transform_point3(Vec3::from(v.position));
            let n = (normal_matrix * Vec3::from(v.normal)).normalize_or_zero();
            Vertex::new(p, n, v.uv)
        }));
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether every index refers to an existing vertex.
    #[must_use]
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.indices.iter().all(|&i| i < n)
    }

    /// Reverse the winding of every triangle.
    pub fn flip_winding(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
    }

    /// Replace every normal with the area-weighted average of its adjacent
    /// face normals. Vertices touched only by degenerate triangles keep
    /// their normal.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            let pa = Vec3::from(self.vertices[a].position);
            let pb = Vec3::from(self.vertices[b].position);
            let pc = Vec3::from(self.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            if let Some(n) = n.try_normalize() {
                vertex.normal = n.to_array();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            vertices: vec![
                Vertex::new(Vec3::ZERO, Vec3::Z, [0.0, 0.0]),
                Vertex::new(Vec3::X, Vec3::Z, [1.0, 0.0]),
                Vertex::new(Vec3::Y, Vec3::Z, [0.0, 1.0]),
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn vertex_stride_is_32_bytes() {
        assert_eq!(Vertex::layout().array_stride, 32);
    }

    #[test]
    fn append_rebases_indices_and_transforms_positions() {
        let mut mesh = triangle();
        mesh.append(&triangle(), Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0)));
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.vertices[4].position, [1.0, 0.0, 5.0]);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn append_keeps_normals_unit_length_under_scale() {
        let mut mesh = MeshData::default();
        mesh.append(&triangle(), Mat4::from_scale(Vec3::new(3.0, 1.0, 0.5)));
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn recomputed_normals_follow_winding() {
        let mut mesh = triangle();
        mesh.vertices[0].normal = [0.0, 1.0, 0.0];
        mesh.recompute_normals();
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);

        mesh.flip_winding();
        mesh.recompute_normals();
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, -1.0]);
    }
}
