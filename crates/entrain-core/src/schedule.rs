#![forbid(unsafe_code)]

//! Coupling schedule for the hero animation.
//!
//! The five oscillators cycle through visual coherence phases driven by a
//! single periodic function of elapsed time. One cycle walks through four
//! segments of the normalized cycle fraction `u`:
//!
//! ```text
//! fragmented    u ∈ [0.00, 0.25)   coupling = 0
//! entraining    u ∈ [0.25, 0.42)   smoothstep ramp 0 → 1
//! coherent      u ∈ [0.42, 0.62)   coupling = 1
//! destabilizing u ∈ [0.62, 0.80)   smoothstep ramp 1 → 0
//! fragmented    u ∈ [0.80, 1.00)   coupling = 0
//! ```
//!
//! # Invariants
//!
//! 1. Coupling is in [0, 1] for any finite elapsed time and any stagger
//!    distance.
//! 2. Coupling is continuous across every segment boundary (smoothstep meets
//!    the flat segments at exactly 0 and 1).
//! 3. Stagger is confined to the ramp windows: every oscillator reads exactly
//!    1 throughout the coherent window and exactly 0 throughout both
//!    fragmented windows, regardless of its distance from the center.
//!
//! # Stagger
//!
//! Each oscillator's ramp is shifted inside the ramp window by its normalized
//! distance from the center oscillator. During entrainment the center ramps
//! first and the edges trail; during destabilization the edges drop first and
//! the center holds on longest. Both ramps still start and finish inside their
//! window, which is what keeps invariant 3 true.

use core::time::Duration;

use crate::easing::{clamp01, ramp, smoothstep};

/// Seconds for one full coherence cycle.
pub const CYCLE_SECONDS: f32 = 32.0;

/// Cycle fraction where the entraining ramp begins.
pub const ENTRAIN_START: f32 = 0.25;
/// Cycle fraction where the coherent hold begins.
pub const COHERENT_START: f32 = 0.42;
/// Cycle fraction where the destabilizing ramp begins.
pub const DESTABILIZE_START: f32 = 0.62;
/// Cycle fraction where the trailing fragmented hold begins.
pub const FRAGMENT_START: f32 = 0.80;

/// Fraction of each ramp window consumed by the center-to-edge stagger.
pub const STAGGER_SPAN: f32 = 0.35;

/// Which segment of the cycle a given fraction falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CouplingPhase {
    /// Oscillators run on their natural parameters.
    Fragmented,
    /// Coupling ramps up, center oscillator first.
    Entraining,
    /// All oscillators locked to the shared coherent parameters.
    Coherent,
    /// Coupling ramps down, edge oscillators first.
    Destabilizing,
}

/// Periodic schedule mapping elapsed time to a coupling coefficient.
///
/// The default matches the production constants above; the builder setters
/// exist for tests and demos that want shorter cycles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CouplingSchedule {
    cycle_seconds: f32,
    entrain_start: f32,
    coherent_start: f32,
    destabilize_start: f32,
    fragment_start: f32,
    stagger_span: f32,
}

impl Default for CouplingSchedule {
    fn default() -> Self {
        Self {
            cycle_seconds: CYCLE_SECONDS,
            entrain_start: ENTRAIN_START,
            coherent_start: COHERENT_START,
            destabilize_start: DESTABILIZE_START,
            fragment_start: FRAGMENT_START,
            stagger_span: STAGGER_SPAN,
        }
    }
}

impl CouplingSchedule {
    /// Schedule with the production cycle constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cycle length in seconds (builder). Clamped to a positive value.
    #[must_use]
    pub fn cycle_seconds(mut self, seconds: f32) -> Self {
        self.cycle_seconds = seconds.max(f32::MIN_POSITIVE);
        self
    }

    /// Set the stagger span (builder). Clamped to [0, 0.9] so every ramp keeps
    /// a non-empty window of its own.
    #[must_use]
    pub fn stagger_span(mut self, span: f32) -> Self {
        self.stagger_span = span.clamp(0.0, 0.9);
        self
    }

    /// Length of one cycle as a [`Duration`].
    #[must_use]
    pub fn cycle_len(&self) -> Duration {
        Duration::from_secs_f64(f64::from(self.cycle_seconds))
    }

    /// Elapsed time folded into a cycle fraction in [0, 1).
    #[must_use]
    pub fn cycle_fraction(&self, elapsed: Duration) -> f32 {
        let secs = elapsed.as_secs_f64() % f64::from(self.cycle_seconds);
        (secs / f64::from(self.cycle_seconds)) as f32
    }

    /// Segment classification for a cycle fraction.
    #[must_use]
    pub fn phase_at(&self, fraction: f32) -> CouplingPhase {
        let u = wrap_fraction(fraction);
        if u < self.entrain_start {
            CouplingPhase::Fragmented
        } else if u < self.coherent_start {
            CouplingPhase::Entraining
        } else if u < self.destabilize_start {
            CouplingPhase::Coherent
        } else if u < self.fragment_start {
            CouplingPhase::Destabilizing
        } else {
            CouplingPhase::Fragmented
        }
    }

    /// Coupling coefficient at `fraction` for the center oscillator.
    ///
    /// This is the unstaggered value that also scales the global amplitude
    /// breath.
    #[must_use]
    pub fn base_coupling(&self, fraction: f32) -> f32 {
        self.coupling_for(fraction, 0.0)
    }

    /// Coupling coefficient at `fraction` for an oscillator at normalized
    /// distance `center_distance` (0 = center, 1 = outermost) from the center.
    #[must_use]
    pub fn coupling_for(&self, fraction: f32, center_distance: f32) -> f32 {
        let u = wrap_fraction(fraction);
        let d = clamp01(center_distance);
        let span = self.stagger_span;
        match self.phase_at(u) {
            CouplingPhase::Fragmented => 0.0,
            CouplingPhase::Entraining => {
                // Center leads: its ramp occupies the front of the window.
                let p = ramp(u, self.entrain_start, self.coherent_start);
                smoothstep(ramp(p, d * span, d * span + (1.0 - span)))
            }
            CouplingPhase::Coherent => 1.0,
            CouplingPhase::Destabilizing => {
                // Edges lead: the outermost oscillator lets go first.
                let q = ramp(u, self.destabilize_start, self.fragment_start);
                let lead = (1.0 - d) * span;
                1.0 - smoothstep(ramp(q, lead, lead + (1.0 - span)))
            }
        }
    }

    /// Coupling coefficient at an elapsed time, staggered.
    #[must_use]
    pub fn coupling_at(&self, elapsed: Duration, center_distance: f32) -> f32 {
        self.coupling_for(self.cycle_fraction(elapsed), center_distance)
    }

    /// Instant in the middle of the coherent hold.
    ///
    /// Used for the reduced-motion still frame: everything reads coupling 1
    /// here, stagger or not.
    #[must_use]
    pub fn coherent_midpoint(&self) -> Duration {
        let mid = (self.coherent_start + self.destabilize_start) / 2.0;
        Duration::from_secs_f64(f64::from(self.cycle_seconds) * f64::from(mid))
    }
}

/// Fold an arbitrary fraction into [0, 1).
#[inline]
fn wrap_fraction(fraction: f32) -> f32 {
    let u = fraction.rem_euclid(1.0);
    if u.is_nan() { 0.0 } else { u }
}
