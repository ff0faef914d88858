//! Heightmap terrain.

use glam::Vec3;

use super::{primitives, MeshData};
use crate::assets::Rgba8Image;

/// Build a `rows x cols` terrain grid, one unit between vertices and
/// centred on the origin.
///
/// Heights come from the heightmap's red channel scaled by
/// `height_scale`. Normals are decoded from `normal_map` (RGB as XYZ, Y
/// up) when one is supplied, otherwise they are estimated from the
/// heights by central differences.
#[must_use]
pub fn build(
    rows: u32,
    cols: u32,
    heightmap: &Rgba8Image,
    normal_map: Option<&Rgba8Image>,
    height_scale: f32,
) -> MeshData {
    let mut mesh = primitives::grid(rows, cols);
    let rows = rows.max(2);
    let cols = cols.max(2);

    let heights: Vec<f32> = (0..rows * cols)
        .map(|i| {
            let (u, v) = grid_uv(i % cols, i / cols, rows, cols);
            heightmap.sample(u, v)[0] * height_scale
        })
        .collect();
    let height = |c: u32, r: u32| heights[(r.min(rows - 1) * cols + c.min(cols - 1)) as usize];

    for r in 0..rows {
        for c in 0..cols {
            let i = (r * cols + c) as usize;
            let vertex = &mut mesh.vertices[i];
            vertex.position[1] = heights[i];

            let normal = match normal_map {
                Some(map) => {
                    let (u, v) = grid_uv(c, r, rows, cols);
                    decode_normal(map.sample(u, v))
                }
                None => {
                    let dx = (height(c + 1, r) - height(c.saturating_sub(1), r))
                        / span(c, cols);
                    let dz = (height(c, r + 1) - height(c, r.saturating_sub(1)))
                        / span(r, rows);
                    Vec3::new(-dx, 1.0, -dz).normalize()
                }
            };
            vertex.normal = normal.to_array();
        }
    }
    mesh
}

fn grid_uv(c: u32, r: u32, rows: u32, cols: u32) -> (f32, f32) {
    (
        c as f32 / (cols - 1) as f32,
        r as f32 / (rows - 1) as f32,
    )
}

/// Distance covered by a central difference, one-sided at the edges.
fn span(i: u32, n: u32) -> f32 {
    if i == 0 || i == n - 1 {
        1.0
    } else {
        2.0
    }
}

fn decode_normal(texel: [f32; 4]) -> Vec3 {
    Vec3::new(texel[0], texel[1], texel[2])
        .mul_add(Vec3::splat(2.0), Vec3::splat(-1.0))
        .normalize_or(Vec3::Y)
}
