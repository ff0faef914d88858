//! Deterministic procedural textures used when asset files are missing.

use super::{CubeImages, Rgba8Image};

/// Convert cubemap face index + UV coordinates in `[-1, 1]` to a direction.
///
/// Face order: +X, -X, +Y, -Y, +Z, -Z. `v` grows downwards within a face.
#[must_use]
pub fn cubemap_face_direction(face: u32, u: f32, v: f32) -> [f32; 3] {
    match face {
        0 => [1.0, -v, -u],
        1 => [-1.0, -v, u],
        2 => [u, 1.0, v],
        3 => [u, -1.0, -v],
        4 => [u, -v, 1.0],
        5 => [-u, -v, -1.0],
        _ => [0.0, 0.0, 1.0],
    }
}

fn hash(x: i32, y: i32, seed: u32) -> f32 {
    let mut h = (x as u32)
        .wrapping_mul(0x27d4_eb2d)
        .wrapping_add((y as u32).wrapping_mul(0x1656_67b1))
        .wrapping_add(seed.wrapping_mul(0x9e37_79b9));
    h ^= h >> 15;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    (h & 0x00ff_ffff) as f32 / 0x00ff_ffff as f32
}

fn smooth(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Tileable value noise with `period` cells across, in `[0, 1]`.
fn value_noise(x: f32, y: f32, period: i32, seed: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let (tx, ty) = (smooth(x - x0), smooth(y - y0));
    let (ix, iy) = (x0 as i32, y0 as i32);
    let corner = |dx: i32, dy: i32| {
        hash(
            (ix + dx).rem_euclid(period),
            (iy + dy).rem_euclid(period),
            seed,
        )
    };
    let top = corner(0, 0) + (corner(1, 0) - corner(0, 0)) * tx;
    let bottom = corner(0, 1) + (corner(1, 1) - corner(0, 1)) * tx;
    top + (bottom - top) * ty
}

/// Four octaves of tileable value noise over a unit square, in `[0, 1]`.
fn fbm(u: f32, v: f32, base_period: i32, seed: u32) -> f32 {
    let mut sum = 0.0;
    let mut amplitude = 0.5;
    let mut period = base_period;
    for octave in 0..4 {
        sum += value_noise(u * period as f32, v * period as f32, period, seed + octave)
            * amplitude;
        amplitude *= 0.5;
        period *= 2;
    }
    sum / 0.9375
}

fn shade(colour: [f32; 3], k: f32) -> [u8; 4] {
    [
        (colour[0] * k * 255.0).clamp(0.0, 255.0) as u8,
        (colour[1] * k * 255.0).clamp(0.0, 255.0) as u8,
        (colour[2] * k * 255.0).clamp(0.0, 255.0) as u8,
        255,
    ]
}

fn unit(size: u32, x: u32) -> f32 {
    (x as f32 + 0.5) / size as f32
}

pub(super) fn flat(size: u32, colour: [u8; 4]) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |_, _| colour)
}

/// Running-bond brick courses with mortar lines.
pub(super) fn brick(size: u32) -> Rgba8Image {
    let courses = 8.0;
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let row = (v * courses).floor();
        let offset = if row as i32 % 2 == 0 { 0.0 } else { 0.5 };
        let bu = (u * courses * 0.5 + offset).fract();
        let bv = (v * courses).fract();
        let mortar = bu < 0.04 || bv < 0.08;
        let grain = fbm(u, v, 8, 1);
        if mortar {
            shade([0.72, 0.70, 0.66], 0.8 + 0.2 * grain)
        } else {
            shade([0.62, 0.26, 0.18], 0.7 + 0.4 * grain)
        }
    })
}

pub(super) fn moss(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let stone = fbm(u, v, 4, 2);
        let growth = smooth(fbm(u, v, 6, 3).clamp(0.0, 1.0));
        let base = [0.45, 0.45, 0.42];
        let green = [0.22, 0.38, 0.12];
        let mixed = [
            base[0] + (green[0] - base[0]) * growth,
            base[1] + (green[1] - base[1]) * growth,
            base[2] + (green[2] - base[2]) * growth,
        ];
        shade(mixed, 0.7 + 0.5 * stone)
    })
}

pub(super) fn rust(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let n = fbm(u, v, 8, 4);
        shade([0.55, 0.27, 0.12], 0.6 + 0.6 * n)
    })
}

/// Bright where bare metal shows through the rust.
pub(super) fn rust_specular(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let n = fbm(u, v, 8, 4);
        let metal = smooth(((n - 0.35) * 2.5).clamp(0.0, 1.0));
        shade([1.0, 1.0, 1.0], 0.2 + 0.8 * metal)
    })
}

pub(super) fn grass(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let n = fbm(u, v, 16, 5);
        shade([0.24, 0.48, 0.14], 0.65 + 0.55 * n)
    })
}

/// Rolling hills in the red channel.
pub(super) fn hills(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let (u, v) = (unit(size, x), unit(size, y));
        let h = (fbm(u, v, 3, 6) * 255.0) as u8;
        [h, h, h, 255]
    })
}

/// Soft radial blob, opaque at the centre.
pub(super) fn fire_sprite(size: u32) -> Rgba8Image {
    Rgba8Image::from_fn(size, size, |x, y| {
        let du = unit(size, x) * 2.0 - 1.0;
        let dv = unit(size, y) * 2.0 - 1.0;
        let r = (du * du + dv * dv).sqrt();
        let a = smooth((1.0 - r).clamp(0.0, 1.0));
        [255, 255, 255, (a * 255.0) as u8]
    })
}

/// Sky above the horizon, grass below.
fn sky_colour(dir: [f32; 3]) -> [f32; 3] {
    let len = (dir[0] * dir[0] + dir[1] * dir[1] + dir[2] * dir[2]).sqrt();
    let y = dir[1] / len;
    if y >= 0.0 {
        let t = smooth(y.min(1.0));
        let horizon = [0.78, 0.86, 0.95];
        let zenith = [0.25, 0.45, 0.85];
        [
            horizon[0] + (zenith[0] - horizon[0]) * t,
            horizon[1] + (zenith[1] - horizon[1]) * t,
            horizon[2] + (zenith[2] - horizon[2]) * t,
        ]
    } else {
        let t = smooth((-y * 4.0).min(1.0));
        let horizon = [0.45, 0.55, 0.35];
        let ground = [0.20, 0.36, 0.12];
        [
            horizon[0] + (ground[0] - horizon[0]) * t,
            horizon[1] + (ground[1] - horizon[1]) * t,
            horizon[2] + (ground[2] - horizon[2]) * t,
        ]
    }
}

pub(super) fn sky_cube(size: u32) -> CubeImages {
    let face = |index: u32| {
        Rgba8Image::from_fn(size, size, |x, y| {
            let u = unit(size, x) * 2.0 - 1.0;
            let v = unit(size, y) * 2.0 - 1.0;
            shade(sky_colour(cubemap_face_direction(index, u, v)), 1.0)
        })
    };
    CubeImages {
        faces: [face(0), face(1), face(2), face(3), face(4), face(5)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_centres_point_along_the_axes() {
        let expected = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        for (face, axis) in expected.iter().enumerate() {
            let d = cubemap_face_direction(face as u32, 0.0, 0.0);
            for c in 0..3 {
                assert!((d[c] - axis[c]).abs() < 1e-6, "face {face}");
            }
        }
    }

    #[test]
    fn noise_is_deterministic_and_bounded() {
        for i in 0..64 {
            let u = i as f32 / 64.0;
            let n = fbm(u, 1.0 - u, 4, 9);
            assert!((0.0..=1.0).contains(&n));
            assert_eq!(n, fbm(u, 1.0 - u, 4, 9));
        }
    }

    #[test]
    fn noise_tiles_across_the_unit_square() {
        let left = value_noise(0.0, 1.3, 4, 7);
        let right = value_noise(4.0, 1.3, 4, 7);
        assert!((left - right).abs() < 1e-6);
    }

    #[test]
    fn sky_is_lighter_overhead_than_underfoot() {
        let cube = sky_cube(8);
        let up = cube.faces[2].texel(4, 4);
        let down = cube.faces[3].texel(4, 4);
        assert!(u32::from(up[2]) > u32::from(down[2]));
    }

    #[test]
    fn fire_sprite_fades_towards_the_rim() {
        let sprite = fire_sprite(32);
        assert!(sprite.texel(16, 16)[3] > 200);
        assert_eq!(sprite.texel(0, 0)[3], 0);
    }
}
