#![forbid(unsafe_code)]

//! Browser shell for the `entrain` decoration engine.
//!
//! This crate is intentionally host-specific (web/WASM). It wires the three
//! page effects to their browser primitives:
//! - the navigation scroll shadow to a passive `scroll` listener,
//! - reveal-on-scroll to an `IntersectionObserver`,
//! - the hero animation to a self-rescheduling `requestAnimationFrame` loop
//!   painting a 2D canvas context.
//!
//! All decisions live in `entrain-core`; this crate only measures, forwards,
//! and paints.

pub mod options;
pub mod recorder;

#[cfg(target_arch = "wasm32")]
mod painter;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::SiteDecor;

pub use options::{DecorError, DecorOptions, EffectSet};
pub use recorder::{FrameRecorder, FrameSample, RecorderSummary};

/// Native builds compile this crate as a stub so `cargo check --workspace`
/// stays green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SiteDecor;

#[cfg(not(target_arch = "wasm32"))]
impl SiteDecor {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
