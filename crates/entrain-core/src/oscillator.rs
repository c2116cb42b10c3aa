#![forbid(unsafe_code)]

//! The fixed five-oscillator bank and its parameter resolution.
//!
//! Each oscillator carries its *natural* waveform parameters (what it renders
//! fully fragmented) plus a stroke color and base opacity. The shared
//! [`CoherentTarget`] is what every oscillator is pulled toward as coupling
//! rises; the pull is a plain linear interpolation weighted by the staggered
//! coupling coefficient.
//!
//! Amplitudes and vertical offsets are fractions of the surface height so the
//! bank is resolution-independent; `cycles` counts full waves across the
//! surface width.

use core::f32::consts::TAU;

use crate::easing::lerp;

/// One oscillator's immutable descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    /// Full sine periods across the surface width when fragmented.
    pub cycles: f32,
    /// Initial phase in radians.
    pub phase: f32,
    /// Peak amplitude as a fraction of surface height.
    pub amplitude: f32,
    /// Vertical centerline as a fraction of surface height.
    pub offset: f32,
    /// Phase advance in radians per second when fragmented.
    pub drift: f32,
    /// CSS stroke color.
    pub color: &'static str,
    /// Stroke opacity when fragmented.
    pub alpha: f32,
}

/// The five production oscillators, center entry third.
pub const OSCILLATOR_BANK: [Oscillator; 5] = [
    Oscillator {
        cycles: 3.4,
        phase: 0.9,
        amplitude: 0.10,
        offset: 0.26,
        drift: 0.90,
        color: "#7dd3fc",
        alpha: 0.38,
    },
    Oscillator {
        cycles: 2.6,
        phase: 2.2,
        amplitude: 0.14,
        offset: 0.38,
        drift: 0.65,
        color: "#a5b4fc",
        alpha: 0.46,
    },
    Oscillator {
        cycles: 2.0,
        phase: 0.0,
        amplitude: 0.18,
        offset: 0.50,
        drift: 0.50,
        color: "#6ee7b7",
        alpha: 0.55,
    },
    Oscillator {
        cycles: 2.9,
        phase: 4.1,
        amplitude: 0.13,
        offset: 0.62,
        drift: 0.75,
        color: "#fcd34d",
        alpha: 0.46,
    },
    Oscillator {
        cycles: 3.7,
        phase: 5.3,
        amplitude: 0.09,
        offset: 0.74,
        drift: 1.05,
        color: "#fda4af",
        alpha: 0.38,
    },
];

/// Index of the center oscillator in [`OSCILLATOR_BANK`].
pub const CENTER_INDEX: usize = 2;

/// Additive amplitude wobble depth, as a fraction of surface height.
const WOBBLE_DEPTH: f32 = 0.035;
/// Wobble angular rate in radians per second.
const WOBBLE_RATE: f32 = 0.7;
/// Per-oscillator wobble phase spread in radians.
const WOBBLE_SPREAD: f32 = 1.3;

/// Global breath depth (multiplicative amplitude swing at full coupling).
const BREATH_DEPTH: f32 = 0.06;
/// Breath angular rate in radians per second.
const BREATH_RATE: f32 = 0.35;

/// Shared parameters every oscillator converges to at full coupling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherentTarget {
    /// Shared wave count across the width.
    pub cycles: f32,
    /// Shared phase origin in radians.
    pub phase: f32,
    /// Shared amplitude fraction.
    pub amplitude: f32,
    /// Shared vertical centerline fraction.
    pub offset: f32,
    /// Shared drift in radians per second.
    pub drift: f32,
    /// Stroke opacity at full coupling.
    pub alpha: f32,
}

impl Default for CoherentTarget {
    fn default() -> Self {
        Self {
            cycles: 2.0,
            phase: 0.0,
            amplitude: 0.22,
            offset: 0.50,
            drift: 0.50,
            alpha: 0.92,
        }
    }
}

/// Waveform parameters after coupling has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedParams {
    pub cycles: f32,
    pub phase: f32,
    pub amplitude: f32,
    pub offset: f32,
    pub alpha: f32,
}

impl RenderedParams {
    /// Interpolate between an oscillator's natural parameters and the shared
    /// target, weighted by its staggered coupling coefficient.
    ///
    /// Phase is interpolated *after* advancing both endpoints by their own
    /// drift, so a fully coupled bank moves as one wave while a fragmented one
    /// slides apart.
    #[must_use]
    pub fn resolve(
        osc: &Oscillator,
        target: &CoherentTarget,
        coupling: f32,
        elapsed_secs: f32,
    ) -> Self {
        let natural_phase = osc.phase + osc.drift * elapsed_secs;
        let coherent_phase = target.phase + target.drift * elapsed_secs;
        Self {
            cycles: lerp(osc.cycles, target.cycles, coupling),
            phase: lerp(natural_phase, coherent_phase, coupling),
            amplitude: lerp(osc.amplitude, target.amplitude, coupling),
            offset: lerp(osc.offset, target.offset, coupling),
            alpha: lerp(osc.alpha, target.alpha, coupling),
        }
    }
}

/// Normalized distance of oscillator `index` from the center of a bank of
/// `len` entries: 0 at the center, 1 at either end.
#[must_use]
pub fn center_distance(index: usize, len: usize) -> f32 {
    if len < 2 {
        return 0.0;
    }
    let center = (len - 1) as f32 / 2.0;
    let max = center.max(1.0);
    ((index as f32 - center).abs() / max).clamp(0.0, 1.0)
}

/// Deterministic low-frequency amplitude wobble for one oscillator.
///
/// Pure function of elapsed time; the spread keeps neighbors out of phase so
/// the bank never pulses in lockstep.
#[must_use]
pub fn amplitude_wobble(index: usize, elapsed_secs: f32) -> f32 {
    WOBBLE_DEPTH * (WOBBLE_RATE * elapsed_secs + index as f32 * WOBBLE_SPREAD).sin()
}

/// Global multiplicative amplitude breath, scaled by the base coupling.
///
/// Reads 1.0 exactly when fully fragmented and swings ±[`BREATH_DEPTH`] at
/// full coupling.
#[must_use]
pub fn breath(elapsed_secs: f32, base_coupling: f32) -> f32 {
    1.0 + BREATH_DEPTH * base_coupling * (BREATH_RATE * elapsed_secs).sin()
}

/// Angular position along the trace for CSS pixel `x` on a surface of
/// `width` CSS pixels.
#[inline]
#[must_use]
pub fn angle_at(x: f32, width: f32, params: &RenderedParams) -> f32 {
    TAU * params.cycles * (x / width) + params.phase
}
