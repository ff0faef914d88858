//! Procedural meshes for the fixed scene.
//!
//! Sizes are in model units; the world matrices in
//! [`crate::scene::objects`] scale them into place.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3};

use super::{MeshData, Vertex};

/// Texture repeats across a terrain grid along each axis.
pub const GRID_UV_TILES: f32 = 10.0;

/// Axis-aligned box centred on the origin.
#[must_use]
pub fn cuboid(half_extents: Vec3) -> MeshData {
    // (normal, u axis, v axis) with u x v == normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData::default();
    for (normal, u_axis, v_axis) in faces {
        let base = mesh.vertices.len() as u32;
        for (su, sv) in corners {
            let p = (normal + u_axis * su + v_axis * sv) * half_extents;
            mesh.vertices.push(Vertex::new(
                p,
                normal,
                [(su + 1.0) * 0.5, (1.0 - sv) * 0.5],
            ));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

/// Unit cube seen from the inside, for the skybox.
#[must_use]
pub fn inward_cube() -> MeshData {
    let mut mesh = cuboid(Vec3::ONE);
    mesh.flip_winding();
    for v in &mut mesh.vertices {
        v.normal = v.normal.map(|c| -c);
    }
    mesh
}

/// Latitude/longitude sphere centred on the origin.
#[must_use]
pub fn uv_sphere(radius: f32, stacks: u32, slices: u32) -> MeshData {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let mut mesh = MeshData::default();

    for j in 0..=stacks {
        let phi = PI * j as f32 / stacks as f32;
        let (ring, y) = phi.sin_cos();
        // Collapse the poles exactly so their fans are truly degenerate.
        let ring = if j == 0 || j == stacks { 0.0 } else { ring };
        for i in 0..=slices {
            let theta = TAU * i as f32 / slices as f32;
            let (s, c) = theta.sin_cos();
            let n = Vec3::new(ring * c, y, ring * s);
            mesh.vertices.push(Vertex::new(
                n * radius,
                n,
                [i as f32 / slices as f32, j as f32 / stacks as f32],
            ));
        }
    }

    let row = slices + 1;
    for j in 0..stacks {
        for i in 0..slices {
            let a = j * row + i;
            let b = a + row;
            mesh.indices
                .extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Closed cylinder standing on the origin, `height` tall along +Y.
#[must_use]
pub fn cylinder(radius: f32, height: f32, segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();
    let ring = |i: u32| {
        let theta = TAU * i as f32 / segments as f32;
        let (s, c) = theta.sin_cos();
        Vec3::new(c, 0.0, s)
    };

    for i in 0..=segments {
        let n = ring(i);
        let u = i as f32 / segments as f32;
        mesh.vertices.push(Vertex::new(n * radius, n, [u, 1.0]));
        mesh.vertices.push(Vertex::new(
            n * radius + Vec3::Y * height,
            n,
            [u, 0.0],
        ));
    }
    for i in 0..segments {
        let (b0, t0) = (i * 2, i * 2 + 1);
        let (b1, t1) = (b0 + 2, t0 + 2);
        mesh.indices.extend_from_slice(&[b0, t0, b1, b1, t0, t1]);
    }

    for (y, normal) in [(height, Vec3::Y), (0.0, Vec3::NEG_Y)] {
        let centre = mesh.vertices.len() as u32;
        mesh.vertices
            .push(Vertex::new(Vec3::Y * y, normal, [0.5, 0.5]));
        for i in 0..segments {
            let d = ring(i);
            mesh.vertices.push(Vertex::new(
                d * radius + Vec3::Y * y,
                normal,
                [0.5 + d.x * 0.5, 0.5 + d.z * 0.5],
            ));
        }
        for i in 0..segments {
            let r0 = centre + 1 + i;
            let r1 = centre + 1 + (i + 1) % segments;
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[centre, r1, r0]);
            } else {
                mesh.indices.extend_from_slice(&[centre, r0, r1]);
            }
        }
    }
    mesh
}

/// Round tower: a unit-radius drum three units tall with crenellations.
#[must_use]
pub fn tower() -> MeshData {
    let mut mesh = cylinder(1.0, 3.0, 32);
    let merlon = cuboid(Vec3::new(0.12, 0.1, 0.12));
    for i in 0..8 {
        let angle = TAU * i as f32 / 8.0;
        let at = Vec3::new(angle.cos() * 0.9, 3.1, angle.sin() * 0.9);
        mesh.append(
            &merlon,
            Mat4::from_rotation_translation(Quat::from_rotation_y(-angle), at),
        );
    }
    mesh
}

/// Arched stone bridge spanning 200 units along X, 40 wide.
#[must_use]
pub fn bridge() -> MeshData {
    const SEGMENTS: u32 = 16;
    const HALF_SPAN: f32 = 100.0;
    const RISE: f32 = 20.0;

    let arch = |x: f32| RISE * (1.0 - (x / HALF_SPAN).powi(2));
    let slope = |x: f32| -2.0 * RISE * x / (HALF_SPAN * HALF_SPAN);
    let step = 2.0 * HALF_SPAN / SEGMENTS as f32;

    let mut mesh = MeshData::default();
    let deck = cuboid(Vec3::new(step * 0.5 + 0.5, 2.0, 20.0));
    let parapet = cuboid(Vec3::new(step * 0.5 + 0.5, 3.0, 1.5));
    for k in 0..SEGMENTS {
        let x = -HALF_SPAN + step * (k as f32 + 0.5);
        let tilt = Quat::from_rotation_z(slope(x).atan());
        let y = arch(x);
        mesh.append(
            &deck,
            Mat4::from_rotation_translation(tilt, Vec3::new(x, y, 0.0)),
        );
        for z in [-18.5, 18.5] {
            mesh.append(
                &parapet,
                Mat4::from_rotation_translation(tilt, Vec3::new(x, y + 5.0, z)),
            );
        }
    }

    let pier = cuboid(Vec3::new(6.0, 10.0, 20.0));
    for x in [-HALF_SPAN, HALF_SPAN] {
        mesh.append(&pier, Mat4::from_translation(Vec3::new(x, -8.0, 0.0)));
    }
    mesh
}

/// Armoured figure about 40 units tall, standing on the origin and facing
/// +X.
#[must_use]
pub fn knight() -> MeshData {
    let mut mesh = MeshData::default();

    let leg = cuboid(Vec3::new(2.5, 8.0, 2.5));
    for z in [-3.5, 3.5] {
        mesh.append(&leg, Mat4::from_translation(Vec3::new(0.0, 8.0, z)));
    }
    mesh.append(
        &cylinder(6.5, 14.0, 20),
        Mat4::from_translation(Vec3::Y * 16.0),
    );
    mesh.append(
        &uv_sphere(4.5, 12, 16),
        Mat4::from_translation(Vec3::Y * 34.5),
    );

    let arm = cuboid(Vec3::new(2.0, 6.5, 2.0));
    for z in [-8.5, 8.5] {
        mesh.append(&arm, Mat4::from_translation(Vec3::new(0.0, 23.0, z)));
    }
    mesh.append(
        &cuboid(Vec3::new(0.8, 7.0, 5.0)),
        Mat4::from_translation(Vec3::new(3.5, 22.0, -11.5)),
    );
    mesh.append(
        &cylinder(0.6, 30.0, 8),
        Mat4::from_rotation_translation(
            Quat::from_rotation_z(-1.2),
            Vec3::new(0.0, 20.0, 9.5),
        ),
    );
    mesh
}

/// Flat `rows x cols` vertex grid in the XZ plane, one unit apart and
/// centred on the origin, facing +Y.
#[must_use]
pub fn grid(rows: u32, cols: u32) -> MeshData {
    let rows = rows.max(2);
    let cols = cols.max(2);
    let half_w = (cols - 1) as f32 * 0.5;
    let half_d = (rows - 1) as f32 * 0.5;

    let mut mesh = MeshData::default();
    mesh.vertices.reserve((rows * cols) as usize);
    for r in 0..rows {
        for c in 0..cols {
            let u = c as f32 / (cols - 1) as f32;
            let v = r as f32 / (rows - 1) as f32;
            mesh.vertices.push(Vertex::new(
                Vec3::new(c as f32 - half_w, 0.0, r as f32 - half_d),
                Vec3::Y,
                [u * GRID_UV_TILES, v * GRID_UV_TILES],
            ));
        }
    }

    mesh.indices.reserve(((rows - 1) * (cols - 1) * 6) as usize);
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let a = r * cols + c;
            let b = a + cols;
            mesh.indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normals_agree_with_winding(mesh: &MeshData, min_dot: f32) {
        let mut recomputed = mesh.clone();
        recomputed.recompute_normals();
        for (a, b) in mesh.vertices.iter().zip(&recomputed.vertices) {
            let dot = Vec3::from(a.normal).dot(Vec3::from(b.normal));
            assert!(dot > min_dot, "normal {:?} vs {:?}", a.normal, b.normal);
        }
    }

    #[test]
    fn sphere_counts_and_radius() {
        let mesh = uv_sphere(2.0, 8, 12);
        assert_eq!(mesh.vertices.len(), 9 * 13);
        assert_eq!(mesh.triangle_count(), 8 * 12 * 2);
        assert!(mesh.indices_in_bounds());
        for v in &mesh.vertices {
            assert!((Vec3::from(v.position).length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_winding_faces_outwards() {
        assert_normals_agree_with_winding(&uv_sphere(1.0, 16, 24), 0.8);
    }

    #[test]
    fn cuboid_winding_matches_face_normals() {
        let mesh = cuboid(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let mut recomputed = mesh.clone();
        recomputed.recompute_normals();
        assert_eq!(mesh, recomputed);
    }

    #[test]
    fn inward_cube_normals_point_at_the_centre() {
        let mesh = inward_cube();
        for v in &mesh.vertices {
            let p = Vec3::from(v.position);
            let n = Vec3::from(v.normal);
            assert!(p.dot(n) < 0.0);
        }
        assert_normals_agree_with_winding(&mesh, 0.99);
    }

    #[test]
    fn cylinder_caps_and_sides_face_outwards() {
        let mesh = cylinder(1.0, 2.0, 16);
        assert!(mesh.indices_in_bounds());
        for tri in mesh.indices.chunks_exact(3) {
            let p: Vec<Vec3> = tri
                .iter()
                .map(|&i| Vec3::from(mesh.vertices[i as usize].position))
                .collect();
            let face = (p[1] - p[0]).cross(p[2] - p[0]);
            let centroid = (p[0] + p[1] + p[2]) / 3.0;
            let outward = centroid - Vec3::new(0.0, 1.0, 0.0);
            assert!(face.dot(outward) > 0.0);
        }
    }

    #[test]
    fn tower_rises_three_units_plus_merlons() {
        let mesh = tower();
        let top = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!((top - 3.2).abs() < 1e-4);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn bridge_spans_two_hundred_units() {
        let mesh = bridge();
        let (lo, hi) = mesh.vertices.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[0]), hi.max(v.position[0]))
        });
        assert!(lo <= -100.0 && hi >= 100.0);
        assert!(mesh.indices_in_bounds());
    }

    #[test]
    fn knight_stands_on_the_origin() {
        let mesh = knight();
        let lowest = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        let highest = mesh
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!(lowest.abs() < 1e-3);
        assert!((35.0..45.0).contains(&highest));
    }

    #[test]
    fn grid_is_centred_and_tiles_uvs() {
        let mesh = grid(5, 3);
        assert_eq!(mesh.vertices.len(), 15);
        assert_eq!(mesh.triangle_count(), 4 * 2 * 2);
        assert_eq!(mesh.vertices[0].position, [-1.0, 0.0, -2.0]);
        assert_eq!(mesh.vertices[14].position, [1.0, 0.0, 2.0]);
        assert_eq!(mesh.vertices[14].uv, [GRID_UV_TILES, GRID_UV_TILES]);
        assert_normals_agree_with_winding(&mesh, 0.99);
    }
}
