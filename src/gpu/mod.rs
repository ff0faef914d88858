//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable buffers, texture
//! uploads, bind-group helpers, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Bind-group layout entries and samplers shared by the scene pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth targets and sampled texture uploads.
pub mod texture;
