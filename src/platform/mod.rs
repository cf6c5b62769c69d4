//! Platform abstraction layer
//!
//! Browser bindings for the collaborators the simulation leaves external:
//! - Canvas 2D draw surface
//! - Arrow-key listener feeding the input adapter
//! - `setInterval`/`setTimeout` scheduler
//!
//! Native builds run headless with `ManualScheduler` and `RecordingSurface`.

#[cfg(target_arch = "wasm32")]
pub mod web;
