#![forbid(unsafe_code)]

//! Optional structured-logging bootstrap.
//!
//! The crate emits `tracing` events at lifecycle transitions when built with
//! the `tracing` feature. This module adds a JSON subscriber installer for
//! native harnesses built with `tracing-json`; the browser shell is expected
//! to bring its own subscriber if it wants one.

/// Install a JSON-formatting subscriber honoring `RUST_LOG`.
///
/// Call once at harness startup. Panics if a global subscriber is already
/// installed, matching `tracing_subscriber`'s `init` contract.
#[cfg(all(feature = "tracing-json", not(target_arch = "wasm32")))]
pub fn init_json() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
