//! Fire particles.
//!
//! Particles are stateless: every instance carries a launch velocity and a
//! random phase, and the vertex shader derives its position from
//! `fract(timer * speed + phase)`. Nothing is simulated on the CPU after
//! start-up.

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use wgpu::util::DeviceExt;

use super::pipeline_util::{PassTargets, TargetPipelines, ADDITIVE_BLEND};
use crate::{
    gpu::{
        pipeline_helpers::{self, ScenePipelineDesc},
        texture::SampledTexture,
    },
    options::ParticleOptions,
    scene::View,
};

/// Per-instance particle data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    /// Launch position relative to the fire.
    pub position: [f32; 3],
    /// Direction and speed of travel over one lifetime.
    pub velocity: [f32; 3],
    /// `x` is the lifetime phase in `[0, 1)`.
    pub data: [f32; 3],
}

impl ParticleVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    /// Instance-rate buffer layout.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// A particle launched upwards with a random lean.
    pub fn random(rng: &mut impl Rng) -> Self {
        let velocity = [
            rng.random::<f32>() - 0.5,
            rng.random::<f32>(),
            rng.random::<f32>() - 0.5,
        ];
        Self {
            position: [0.0; 3],
            velocity,
            data: [rng.random(), 0.0, 0.0],
        }
    }
}

/// `count` freshly launched particles.
pub fn spawn_particles(rng: &mut impl Rng, count: u32) -> Vec<ParticleVertex> {
    (0..count).map(|_| ParticleVertex::random(rng)).collect()
}

/// Instance data to upload for `particles`, plus the number to draw.
///
/// Zero-sized vertex buffers are invalid, so an empty set uploads one idle
/// particle and draws none.
fn instance_data(mut particles: Vec<ParticleVertex>) -> (Vec<ParticleVertex>, u32) {
    let count = particles.len() as u32;
    if particles.is_empty() {
        particles.push(ParticleVertex::zeroed());
    }
    (particles, count)
}

/// Mirrors `FireParams` in `fire.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct FireParams {
    speed: f32,
    spread: f32,
    size: f32,
    _pad: f32,
}

/// Billboarded, additively blended particles. Tests depth but never writes
/// it.
pub struct FireRenderer {
    pipelines: TargetPipelines,
    instance_buffer: wgpu::Buffer,
    count: u32,
    bind_group: wgpu::BindGroup,
}

impl FireRenderer {
    /// Spawn the particles and build the pipelines.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        object_layout: &wgpu::BindGroupLayout,
        targets: PassTargets,
        sprite: &SampledTexture,
        sampler: &wgpu::Sampler,
        options: &ParticleOptions,
    ) -> Self {
        let (instances, count) =
            instance_data(spawn_particles(&mut rand::rng(), options.count));
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fire Particles"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let params = FireParams {
            speed: options.speed,
            spread: options.spread,
            size: options.size,
            _pad: 0.0,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fire Params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Fire Layout"),
            entries: &[
                pipeline_helpers::texture_2d(0),
                pipeline_helpers::filtering_sampler(1),
                pipeline_helpers::uniform_buffer(2),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Fire Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&sprite.view),
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
                label: "Fire",
                shader,
                bind_group_layouts: &[object_layout, &layout],
                vertex_buffers: &[ParticleVertex::layout()],
                blend: Some(ADDITIVE_BLEND),
                depth_write: false,
            },
            targets,
        );

        log::debug!("fire: {count} particles");

        Self {
            pipelines,
            instance_buffer,
            count,
            bind_group,
        }
    }

    /// Draw six vertices per particle into `view`, reading the object
    /// uniform at `offset`.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        view: View,
        object_group: &'a wgpu::BindGroup,
        offset: u32,
    ) {
        if self.count == 0 {
            return;
        }
        render_pass.set_pipeline(self.pipelines.for_view(view));
        render_pass.set_bind_group(0, object_group, &[offset]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        render_pass.draw(0..6, 0..self.count);
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn launch_velocities_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for p in spawn_particles(&mut rng, 2000) {
            let [vx, vy, vz] = p.velocity;
            assert!((0.0..1.0).contains(&vy));
            assert!((-0.5..0.5).contains(&vx));
            assert!((-0.5..0.5).contains(&vz));
            assert!((0.0..1.0).contains(&p.data[0]));
            assert_eq!(p.position, [0.0; 3]);
        }
    }

    #[test]
    fn phases_are_spread_over_the_lifetime() {
        let mut rng = StdRng::seed_from_u64(3);
        let particles = spawn_particles(&mut rng, 1000);
        let early = particles.iter().filter(|p| p.data[0] < 0.5).count();
        assert!((300..700).contains(&early));
    }

    #[test]
    fn spawn_count_matches_the_request() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(spawn_particles(&mut rng, 1000).len(), 1000);
        assert!(spawn_particles(&mut rng, 0).is_empty());
    }

    #[test]
    fn empty_fire_uploads_one_idle_particle_and_draws_none() {
        let (instances, count) = instance_data(Vec::new());
        assert_eq!(count, 0);
        assert_eq!(instances, vec![ParticleVertex::zeroed()]);

        let mut rng = StdRng::seed_from_u64(5);
        let (instances, count) = instance_data(spawn_particles(&mut rng, 12));
        assert_eq!(count, 12);
        assert_eq!(instances.len(), 12);
    }

    #[test]
    fn gpu_layouts_match_the_wgsl_structs() {
        assert_eq!(size_of::<ParticleVertex>(), 36);
        assert_eq!(size_of::<FireParams>(), 16);
    }
}
