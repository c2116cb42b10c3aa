#![forbid(unsafe_code)]

//! Frame scene composition.
//!
//! A scene is the complete, paint-ready description of one hero frame: five
//! stroked polylines in CSS pixel space. The painter on the web side walks the
//! point lists and strokes them; nothing here touches a canvas.
//!
//! Sampling every 3 CSS pixels keeps the point count low enough that scene
//! composition stays far below a frame budget even on wide hero banners, while
//! the stroke still reads as a smooth curve.

use core::time::Duration;

use crate::geometry::SurfaceGeometry;
use crate::oscillator::{
    CoherentTarget, Oscillator, RenderedParams, amplitude_wobble, angle_at, breath,
    center_distance,
};
use crate::schedule::CouplingSchedule;

/// Horizontal sampling step in CSS pixels.
pub const SAMPLE_STEP_PX: f32 = 3.0;

/// Stroke width in CSS pixels.
pub const STROKE_WIDTH_PX: f32 = 2.0;

/// One stroked polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    /// CSS stroke color.
    pub color: &'static str,
    /// Stroke opacity in [0, 1].
    pub alpha: f32,
    /// Stroke width in CSS pixels.
    pub width: f32,
    /// Sampled `(x, y)` points in CSS pixel space, left to right.
    pub points: Vec<(f32, f32)>,
}

/// Paint-ready description of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TraceScene {
    pub traces: Vec<Trace>,
}

impl TraceScene {
    /// Total sampled points across all traces.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }

    /// True when there is nothing to stroke.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

/// Compose the scene for `elapsed` time on `geometry`.
///
/// A degenerate surface (zero width or height) composes an empty scene; the
/// caller can still paint it, which clears nothing and draws nothing.
#[must_use]
pub fn compose(
    schedule: &CouplingSchedule,
    bank: &[Oscillator],
    target: &CoherentTarget,
    geometry: SurfaceGeometry,
    elapsed: Duration,
) -> TraceScene {
    if geometry.is_empty() || bank.is_empty() {
        return TraceScene::default();
    }

    let w = geometry.css_width();
    let h = geometry.css_height();
    let secs = elapsed.as_secs_f32();
    let fraction = schedule.cycle_fraction(elapsed);
    let base = schedule.base_coupling(fraction);
    let breath_scale = breath(secs, base);

    let samples = (w / SAMPLE_STEP_PX).ceil() as usize;
    let mut traces = Vec::with_capacity(bank.len());

    for (index, osc) in bank.iter().enumerate() {
        let distance = center_distance(index, bank.len());
        let coupling = schedule.coupling_for(fraction, distance);
        let params = RenderedParams::resolve(osc, target, coupling, secs);

        let amplitude = (params.amplitude * breath_scale + amplitude_wobble(index, secs)) * h;
        let centerline = params.offset * h;

        let mut points = Vec::with_capacity(samples + 1);
        for i in 0..=samples {
            let x = (i as f32 * SAMPLE_STEP_PX).min(w);
            let y = centerline + amplitude * angle_at(x, w, &params).sin();
            points.push((x, y));
        }

        traces.push(Trace {
            color: osc.color,
            alpha: params.alpha,
            width: STROKE_WIDTH_PX,
            points,
        });
    }

    TraceScene { traces }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillator::OSCILLATOR_BANK;
    use pretty_assertions::assert_eq;

    fn geometry() -> SurfaceGeometry {
        SurfaceGeometry::new(600.0, 300.0, 2.0)
    }

    fn compose_at(secs: f64) -> TraceScene {
        compose(
            &CouplingSchedule::default(),
            &OSCILLATOR_BANK,
            &CoherentTarget::default(),
            geometry(),
            Duration::from_secs_f64(secs),
        )
    }

    #[test]
    fn one_trace_per_oscillator() {
        let scene = compose_at(0.0);
        assert_eq!(scene.traces.len(), OSCILLATOR_BANK.len());
        assert!(!scene.is_empty());
    }

    #[test]
    fn samples_every_three_pixels_and_ends_at_width() {
        let scene = compose_at(1.0);
        let points = &scene.traces[0].points;
        // 600 / 3 = 200 steps → 201 points.
        assert_eq!(points.len(), 201);
        assert_eq!(points[0].0, 0.0);
        assert_eq!(points[1].0, 3.0);
        assert_eq!(points.last().unwrap().0, 600.0);
    }

    #[test]
    fn non_multiple_width_still_ends_at_width() {
        let scene = compose(
            &CouplingSchedule::default(),
            &OSCILLATOR_BANK,
            &CoherentTarget::default(),
            SurfaceGeometry::new(601.0, 300.0, 1.0),
            Duration::ZERO,
        );
        let last = *scene.traces[0].points.last().unwrap();
        assert_eq!(last.0, 601.0);
    }

    #[test]
    fn degenerate_geometry_composes_empty_scene() {
        let scene = compose(
            &CouplingSchedule::default(),
            &OSCILLATOR_BANK,
            &CoherentTarget::default(),
            SurfaceGeometry::new(0.0, 300.0, 2.0),
            Duration::ZERO,
        );
        assert!(scene.is_empty());
        assert_eq!(scene.point_count(), 0);
    }

    #[test]
    fn composition_is_deterministic() {
        let a = compose_at(12.34);
        let b = compose_at(12.34);
        assert_eq!(a, b);
    }

    #[test]
    fn traces_keep_bank_colors() {
        let scene = compose_at(2.0);
        for (trace, osc) in scene.traces.iter().zip(OSCILLATOR_BANK.iter()) {
            assert_eq!(trace.color, osc.color);
            assert_eq!(trace.width, STROKE_WIDTH_PX);
        }
    }

    #[test]
    fn alpha_rises_with_coupling() {
        // Mid-fragmented vs mid-coherent for the same oscillator.
        let fragmented = compose_at(32.0 * 0.10);
        let coherent = compose_at(32.0 * 0.50);
        for (f, c) in fragmented.traces.iter().zip(coherent.traces.iter()) {
            assert!(c.alpha > f.alpha, "coherent {} vs fragmented {}", c.alpha, f.alpha);
        }
    }

    #[test]
    fn coherent_frame_collapses_traces_onto_one_curve() {
        // At the coherent midpoint every oscillator shares parameters, so the
        // sampled y values must agree across traces.
        let scene = compose_at(32.0 * 0.52);
        let reference = &scene.traces[2];
        for trace in &scene.traces {
            for (p, q) in trace.points.iter().zip(reference.points.iter()) {
                // Wobble is per-oscillator and additive, so allow its depth.
                assert!((p.1 - q.1).abs() < 0.08 * 300.0);
            }
        }
    }

    #[test]
    fn fragmented_frame_spreads_centerlines() {
        let scene = compose_at(32.0 * 0.10);
        let mean =
            |t: &Trace| t.points.iter().map(|p| p.1).sum::<f32>() / t.points.len() as f32;
        let top = mean(&scene.traces[0]);
        let bottom = mean(&scene.traces[4]);
        // Natural offsets 0.26 vs 0.74 of a 300 px surface.
        assert!(bottom - top > 100.0, "top {top} bottom {bottom}");
    }

    #[test]
    fn point_count_sums_all_traces() {
        let scene = compose_at(5.0);
        assert_eq!(scene.point_count(), 5 * 201);
    }
}
