//! Model loading from binary glTF files with procedural fallbacks.

use std::path::Path;

use glam::Vec3;

use super::{primitives, MeshData, Vertex};
use crate::error::MirrorballError;

/// The scene's file-backed models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Arched bridge.
    Bridge,
    /// Round tower.
    Tower,
    /// Knight figure.
    Knight,
    /// Reflective sphere.
    Sphere,
}

impl ModelKind {
    /// File name looked up under `<assets>/models/`.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Bridge => "bridge.glb",
            Self::Tower => "tower.glb",
            Self::Knight => "knight.glb",
            Self::Sphere => "sphere.glb",
        }
    }

    /// Procedural mesh used when the file is missing.
    #[must_use]
    pub fn fallback(self) -> MeshData {
        match self {
            Self::Bridge => primitives::bridge(),
            Self::Tower => primitives::tower(),
            Self::Knight => primitives::knight(),
            Self::Sphere => primitives::uv_sphere(1.0, 32, 48),
        }
    }
}

/// Load `kind` from `<root>/models/`, or build its procedural stand-in
/// when the file does not exist.
///
/// # Errors
///
/// Returns [`MirrorballError::Asset`] if the file exists but is not a
/// usable glTF mesh.
pub fn load_model(root: &Path, kind: ModelKind) -> Result<MeshData, MirrorballError> {
    let path = root.join("models").join(kind.file_name());
    if path.is_file() {
        let mesh = load_gltf(&path)?;
        log::debug!(
            "loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    } else {
        log::warn!(
            "{} not found, using a procedural {kind:?}",
            path.display()
        );
        Ok(kind.fallback())
    }
}

/// Read every primitive of the file's first mesh into one triangle list.
///
/// glTF is right-handed while the scene is left-handed, so Z is mirrored
/// and triangle winding reversed. Missing normals are rebuilt from the
/// faces; missing texture coordinates default to zero.
///
/// # Errors
///
/// Returns [`MirrorballError::Asset`] if the file cannot be imported, has
/// no mesh, or a primitive has no positions.
pub fn load_gltf(path: &Path) -> Result<MeshData, MirrorballError> {
    let asset_error =
        |what: &dyn std::fmt::Display| MirrorballError::Asset(format!("{}: {what}", path.display()));

    let (document, buffers, _images) =
        gltf::import(path).map_err(|e| asset_error(&e))?;
    let mesh = document
        .meshes()
        .next()
        .ok_or_else(|| asset_error(&"file contains no meshes"))?;

    let mut out = MeshData::default();
    let mut needs_normals = false;
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "{}: skipping {:?} primitive",
                path.display(),
                primitive.mode()
            );
            continue;
        }
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| asset_error(&"primitive has no positions"))?
            .collect();
        let normals: Option<Vec<[f32; 3]>> =
            reader.read_normals().map(Iterator::collect);
        let uvs: Option<Vec<[f32; 2]>> = reader
            .read_tex_coords(0)
            .map(|coords| coords.into_f32().collect());
        needs_normals |= normals.is_none();

        let base = out.vertices.len() as u32;
        for (i, p) in positions.iter().enumerate() {
            let n = normals
                .as_ref()
                .and_then(|n| n.get(i))
                .map_or(Vec3::ZERO, |n| Vec3::new(n[0], n[1], -n[2]));
            let uv = uvs.as_ref().and_then(|t| t.get(i)).copied().unwrap_or_default();
            out.vertices
                .push(Vertex::new(Vec3::new(p[0], p[1], -p[2]), n, uv));
        }

        let indices: Vec<u32> = reader.read_indices().map_or_else(
            || (0..positions.len() as u32).collect(),
            |indices| indices.into_u32().collect(),
        );
        out.indices.extend(indices.into_iter().map(|i| i + base));
    }

    if out.indices.is_empty() {
        return Err(asset_error(&"mesh has no triangle primitives"));
    }
    if !out.indices_in_bounds() {
        return Err(asset_error(&"index out of range"));
    }
    out.flip_winding();
    if needs_normals {
        out.recompute_normals();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }]
    }"#;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        std::fs::create_dir_all(dir.join("models")).unwrap();
        dir
    }

    #[test]
    fn missing_model_uses_the_procedural_mesh() {
        let mesh = load_model(Path::new("/nonexistent/assets"), ModelKind::Sphere).unwrap();
        assert_eq!(mesh, ModelKind::Sphere.fallback());
    }

    #[test]
    fn unparseable_model_is_an_asset_error() {
        let dir = scratch_dir("mirrorball-corrupt-model");
        std::fs::write(dir.join("models").join("tower.glb"), b"garbage").unwrap();
        let err = load_model(&dir, ModelKind::Tower).unwrap_err();
        assert!(matches!(err, MirrorballError::Asset(_)));
    }

    #[test]
    fn gltf_triangle_is_mirrored_into_left_handed_space() {
        let dir = scratch_dir("mirrorball-gltf-triangle");
        let path = dir.join("models").join("triangle.gltf");
        std::fs::write(&path, TRIANGLE_GLTF).unwrap();

        let mesh = load_gltf(&path).unwrap();
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices, vec![0, 2, 1]);
        assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
        for v in &mesh.vertices {
            assert_eq!(v.normal[2], -1.0);
            assert_eq!(v.uv, [0.0, 0.0]);
        }
    }
}
