use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::objects::{SceneObject, View};
use super::FrameState;

/// Per-object uniform block, mirrored by `ObjectUniform` in
/// `modules/uniforms.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    /// Projection · view · world.
    pub wvp: [[f32; 4]; 4],
    /// Inverse transpose of `world`, for normals.
    pub world_it: [[f32; 4]; 4],
    /// Object to world.
    pub world: [[f32; 4]; 4],
    /// Camera position of the view being rendered.
    pub eye_pos: [f32; 4],
    /// Key light position.
    pub light_vec: [f32; 4],
    /// Key light ambient.
    pub light_ambient: [f32; 4],
    /// Key light diffuse.
    pub light_diffuse: [f32; 4],
    /// Key light specular.
    pub light_specular: [f32; 4],
    /// Fire light position.
    pub light2_vec: [f32; 4],
    /// Fire light ambient.
    pub light2_ambient: [f32; 4],
    /// Fire light diffuse, flicker applied.
    pub light2_diffuse: [f32; 4],
    /// Fire light specular.
    pub light2_specular: [f32; 4],
    /// Wind direction and sway frequency.
    pub wind_dir: [f32; 4],
    /// Material specular colour.
    pub material_specular: [f32; 4],
    /// Game time in seconds.
    pub timer: f32,
    /// Outer grass shell height.
    pub grass_height: f32,
    _pad: [f32; 2],
}

impl ObjectUniform {
    /// Byte size of one block.
    pub const SIZE: u64 = size_of::<Self>() as u64;

    /// Fill the block for `object` seen through `view_proj` from `eye`.
    #[must_use]
    pub fn for_object(
        object: SceneObject,
        view_proj: Mat4,
        eye: Vec3,
        frame: &FrameState,
    ) -> Self {
        let world = object.world_matrix(
            frame.time,
            frame.sphere_translation,
            frame.lights.fire_position(),
        );
        let lights = &frame.lights;
        Self {
            wvp: (view_proj * world).to_cols_array_2d(),
            world_it: world.inverse().transpose().to_cols_array_2d(),
            world: world.to_cols_array_2d(),
            eye_pos: eye.extend(1.0).to_array(),
            light_vec: lights.key.origin.to_array(),
            light_ambient: lights.key.ambient.to_array(),
            light_diffuse: lights.key.diffuse.to_array(),
            light_specular: lights.key.specular.to_array(),
            light2_vec: lights.fire.origin.to_array(),
            light2_ambient: lights.fire.ambient.to_array(),
            light2_diffuse: lights.fire.diffuse.to_array(),
            light2_specular: lights.fire.specular.to_array(),
            wind_dir: frame.wind_dir.to_array(),
            material_specular: object.material().specular.to_array(),
            timer: frame.time,
            grass_height: frame.grass_height,
            _pad: [0.0; 2],
        }
    }
}

/// Maps (view, object) pairs onto aligned slots of one uniform buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSlots {
    stride: u64,
}

impl UniformSlots {
    /// Number of slots: every object in every view.
    pub const SLOT_COUNT: usize = View::ALL.len() * SceneObject::ALL.len();

    /// Slots spaced by [`ObjectUniform::SIZE`] rounded up to `alignment`
    /// (the device's `min_uniform_buffer_offset_alignment`).
    #[must_use]
    pub fn new(alignment: u64) -> Self {
        let alignment = alignment.max(1);
        Self {
            stride: ObjectUniform::SIZE.div_ceil(alignment) * alignment,
        }
    }

    /// Distance in bytes between consecutive slots.
    #[must_use]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Slot index of `object` in `view`.
    #[must_use]
    pub fn index(view: View, object: SceneObject) -> usize {
        view.index() * SceneObject::ALL.len() + object.index()
    }

    /// Dynamic offset of `object` in `view`.
    #[must_use]
    pub fn offset(&self, view: View, object: SceneObject) -> u32 {
        (Self::index(view, object) as u64 * self.stride) as u32
    }

    /// Total bytes needed for every slot.
    #[must_use]
    pub fn arena_size(&self) -> usize {
        Self::SLOT_COUNT * self.stride as usize
    }
}

/// CPU staging copy of the whole uniform buffer, uploaded once per frame.
#[derive(Debug, Clone)]
pub struct UniformArena {
    slots: UniformSlots,
    bytes: Vec<u8>,
}

impl UniformArena {
    /// Zeroed arena laid out by `slots`.
    #[must_use]
    pub fn new(slots: UniformSlots) -> Self {
        Self {
            slots,
            bytes: vec![0; slots.arena_size()],
        }
    }

    /// Slot layout.
    #[must_use]
    pub fn slots(&self) -> UniformSlots {
        self.slots
    }

    /// Store the block for `object` in `view`.
    pub fn set(&mut self, view: View, object: SceneObject, uniform: &ObjectUniform) {
        let start = self.slots.offset(view, object) as usize;
        let end = start + ObjectUniform::SIZE as usize;
        self.bytes[start..end].copy_from_slice(bytemuck::bytes_of(uniform));
    }

    /// Bytes to upload.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::camera::CubeFace;
    use crate::options::Options;

    #[test]
    fn block_is_384_bytes() {
        assert_eq!(ObjectUniform::SIZE, 384);
        assert_eq!(ObjectUniform::SIZE % 16, 0);
    }

    #[test]
    fn stride_rounds_up_to_the_alignment() {
        assert_eq!(UniformSlots::new(256).stride(), 512);
        assert_eq!(UniformSlots::new(64).stride(), 384);
        assert_eq!(UniformSlots::new(0).stride(), 384);
    }

    #[test]
    fn every_pair_gets_a_distinct_slot() {
        let mut seen = vec![false; UniformSlots::SLOT_COUNT];
        for view in View::ALL {
            for object in SceneObject::ALL {
                let i = UniformSlots::index(view, object);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
        assert_eq!(UniformSlots::SLOT_COUNT, 49);
    }

    #[test]
    fn main_view_slots_come_last() {
        let slots = UniformSlots::new(256);
        assert_eq!(slots.offset(View::CubeFace(CubeFace::PositiveX), SceneObject::Bridge), 0);
        assert_eq!(
            slots.offset(View::Main, SceneObject::Sphere),
            48 * 512
        );
        assert_eq!(slots.arena_size(), 49 * 512);
    }

    #[test]
    fn for_object_composes_wvp_and_copies_frame_inputs() {
        let options = Options::default();
        let frame = FrameState::new(&options, 2.0, Vec3::new(0.0, 1.0, 0.0));
        let view_proj = Mat4::from_scale(Vec3::splat(2.0));
        let uniform = ObjectUniform::for_object(
            SceneObject::Sphere,
            view_proj,
            Vec3::new(1.0, 2.0, 3.0),
            &frame,
        );

        let world = Mat4::from_cols_array_2d(&uniform.world);
        let wvp = Mat4::from_cols_array_2d(&uniform.wvp);
        assert!(wvp.abs_diff_eq(view_proj * world, 1e-5));
        assert_eq!(uniform.eye_pos, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(uniform.timer, 2.0);
        assert_eq!(uniform.grass_height, options.terrain.grass_height);
        assert_eq!(uniform.material_specular, Vec4::ONE.to_array());
        assert_eq!(uniform.light2_diffuse, frame.lights.fire.diffuse.to_array());

        let world_it = Mat4::from_cols_array_2d(&uniform.world_it);
        assert!(world_it.abs_diff_eq(world.inverse().transpose(), 1e-5));
    }

    #[test]
    fn arena_places_blocks_at_their_offsets() {
        let slots = UniformSlots::new(256);
        let mut arena = UniformArena::new(slots);
        let frame = FrameState::new(&Options::default(), 0.5, Vec3::ZERO);
        let uniform = ObjectUniform::for_object(
            SceneObject::Tower,
            Mat4::IDENTITY,
            Vec3::ZERO,
            &frame,
        );
        let view = View::CubeFace(CubeFace::NegativeZ);
        arena.set(view, SceneObject::Tower, &uniform);

        let start = slots.offset(view, SceneObject::Tower) as usize;
        let stored: ObjectUniform =
            bytemuck::pod_read_unaligned(&arena.bytes()[start..start + 384]);
        assert_eq!(stored, uniform);
        assert!(arena.bytes()[..start].iter().all(|b| *b == 0));
    }
}
