// -- Lint policy ---------------------------------------------------------
// Lint groups and their graphics allowances live in Cargo.toml; these are
// the crate-level additions.

// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Real-time scene with a dynamically reflecting sphere, built on wgpu.
//!
//! Every frame the scene is rendered six times from the sphere's centre
//! into the faces of a cube map, then once from the user's camera. The
//! sphere samples that cube map, so it mirrors the bridge, tower, knight,
//! grass terrain, fire and sky around it as they move.
//!
//! # Key entry points
//!
//! - [`engine::SceneEngine`] - owns the GPU context and runs the passes
//! - [`engine::SceneState`] - cameras, sphere placement and the game clock
//! - [`options::Options`] - runtime configuration loaded from TOML
//! - [`input::InputProcessor`] - turns window events into
//!   [`engine::SceneCommand`]s
//!
//! # Frame layout
//!
//! Per-object uniforms for all seven views live in one dynamic-offset
//! buffer written once per frame (see [`scene::UniformSlots`]). The six
//! cube faces share one depth buffer and are cleared red; the main view is
//! cleared blue and additionally draws the sphere.

pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
