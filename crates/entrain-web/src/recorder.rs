#![forbid(unsafe_code)]

//! Opt-in per-frame diagnostics.
//!
//! When mounted with `recordFrames: true`, the shell pushes one
//! [`FrameSample`] per painted hero frame. The host can pull the whole run as
//! JSONL via `frameReport()` and feed it to whatever analysis it likes; the
//! recorder itself never touches the network or the console.
//!
//! Platform-agnostic: samples are plain numbers, so the recorder is exercised
//! by native tests and by the wasm shell alike.

use serde::Serialize;

const FRAMES_JSONL_SCHEMA_VERSION: &str = "frames-jsonl-v1";

/// One painted frame's measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSample {
    /// Monotonic frame index from the player.
    pub frame_idx: u64,
    /// Host-reported delta since the previous frame, in microseconds.
    pub delta_us: u64,
    /// Traces stroked this frame.
    pub trace_count: u32,
    /// Total polyline points stroked this frame.
    pub point_count: u32,
}

/// Aggregate statistics over one recording run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecorderSummary {
    pub run_id: String,
    pub frames: usize,
    pub total_points: u64,
    pub avg_delta_us: f64,
    pub max_delta_us: u64,
}

/// Collects frame samples and exports them as JSONL.
#[derive(Debug, Clone)]
pub struct FrameRecorder {
    run_id: String,
    samples: Vec<FrameSample>,
}

impl FrameRecorder {
    /// Recorder for one run.
    #[must_use]
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_owned(),
            samples: Vec::with_capacity(1024),
        }
    }

    /// Record one frame.
    pub fn record(&mut self, sample: FrameSample) {
        self.samples.push(sample);
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first frame lands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Emit one JSON object per recorded frame.
    ///
    /// Each line carries `schema`, `run_id`, and the sample fields.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            schema: &'static str,
            run_id: &'a str,
            #[serde(flatten)]
            sample: FrameSample,
        }

        let mut out = String::new();
        for sample in &self.samples {
            let row = Line {
                schema: FRAMES_JSONL_SCHEMA_VERSION,
                run_id: &self.run_id,
                sample: *sample,
            };
            if let Ok(line) = serde_json::to_string(&row) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// Aggregate statistics for the run so far.
    #[must_use]
    pub fn summary(&self) -> RecorderSummary {
        let frames = self.samples.len();
        let total_points = self.samples.iter().map(|s| u64::from(s.point_count)).sum();
        let total_delta: u64 = self.samples.iter().map(|s| s.delta_us).sum();
        let max_delta_us = self.samples.iter().map(|s| s.delta_us).max().unwrap_or(0);
        RecorderSummary {
            run_id: self.run_id.clone(),
            frames,
            total_points,
            avg_delta_us: if frames > 0 {
                total_delta as f64 / frames as f64
            } else {
                0.0
            },
            max_delta_us,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(idx: u64, delta_us: u64) -> FrameSample {
        FrameSample {
            frame_idx: idx,
            delta_us,
            trace_count: 5,
            point_count: 1005,
        }
    }

    #[test]
    fn starts_empty() {
        let rec = FrameRecorder::new("test");
        assert!(rec.is_empty());
        assert_eq!(rec.len(), 0);
        assert_eq!(rec.to_jsonl(), "");
    }

    #[test]
    fn jsonl_emits_one_parseable_line_per_frame() {
        let mut rec = FrameRecorder::new("hero-run");
        rec.record(sample(1, 16_000));
        rec.record(sample(2, 17_000));

        let jsonl = rec.to_jsonl();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["schema"], "frames-jsonl-v1");
        assert_eq!(first["run_id"], "hero-run");
        assert_eq!(first["frame_idx"], 1);
        assert_eq!(first["delta_us"], 16_000);
        assert_eq!(first["point_count"], 1005);
    }

    #[test]
    fn summary_aggregates_samples() {
        let mut rec = FrameRecorder::new("r");
        rec.record(sample(1, 16_000));
        rec.record(sample(2, 20_000));
        rec.record(sample(3, 12_000));

        let s = rec.summary();
        assert_eq!(s.frames, 3);
        assert_eq!(s.total_points, 3 * 1005);
        assert_eq!(s.max_delta_us, 20_000);
        assert!((s.avg_delta_us - 16_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let s = FrameRecorder::new("r").summary();
        assert_eq!(s.frames, 0);
        assert_eq!(s.max_delta_us, 0);
        assert_eq!(s.avg_delta_us, 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn summary_is_consistent_for_any_run(
                deltas in proptest::collection::vec(0u64..100_000, 0..64),
            ) {
                let mut rec = FrameRecorder::new("prop");
                for (i, &delta_us) in deltas.iter().enumerate() {
                    rec.record(FrameSample {
                        frame_idx: i as u64 + 1,
                        delta_us,
                        trace_count: 5,
                        point_count: 201,
                    });
                }
                let s = rec.summary();
                prop_assert_eq!(s.frames, deltas.len());
                prop_assert_eq!(s.max_delta_us, deltas.iter().copied().max().unwrap_or(0));
                prop_assert!(s.avg_delta_us <= s.max_delta_us as f64);
                prop_assert_eq!(rec.to_jsonl().lines().count(), deltas.len());
            }
        }
    }
}
