#![forbid(unsafe_code)]

//! Deterministic effect logic for the `entrain` site decoration engine.
//!
//! `entrain-core` is the platform-independent half of the engine. It owns the
//! math and state for all three page effects — the navigation scroll shadow,
//! the reveal-on-scroll ledger, and the coupled-oscillator hero animation —
//! without touching a single browser API. The `entrain-web` shell feeds it
//! measurements and events and paints the scenes it returns.
//!
//! # Primary responsibilities
//!
//! - **Schedule**: the periodic coupling function cycling the oscillators
//!   through fragmented → entraining → coherent → destabilizing phases.
//! - **Oscillators**: the fixed five-entry bank, the shared coherent target,
//!   and coupling-weighted parameter resolution.
//! - **Scene**: per-frame polyline composition in CSS pixel space.
//! - **Player**: host-driven frame stepping, including the reduced-motion
//!   single-still contract.
//! - **Scroll / Reveal**: the two scroll-driven effects' state machines.
//!
//! # Design principles
//!
//! - **No I/O**: the host supplies time deltas and layout measurements.
//! - **Deterministic**: identical inputs always compose identical scenes.
//! - **Total**: degenerate geometry and out-of-range inputs degrade to no-ops.

pub mod clock;
pub mod easing;
pub mod geometry;
pub mod logging;
pub mod oscillator;
pub mod player;
pub mod reveal;
pub mod scene;
pub mod schedule;
pub mod scroll;

pub use clock::DeterministicClock;
pub use geometry::SurfaceGeometry;
pub use oscillator::{
    CENTER_INDEX, CoherentTarget, OSCILLATOR_BANK, Oscillator, RenderedParams, center_distance,
};
pub use player::{HeroPlayer, MotionPreference, StepOutcome};
pub use reveal::{RevealLedger, RevealState};
pub use scene::{SAMPLE_STEP_PX, STROKE_WIDTH_PX, Trace, TraceScene};
pub use schedule::{CouplingPhase, CouplingSchedule};
pub use scroll::{SHADOW_THRESHOLD_PX, ScrollShadow};
