#![forbid(unsafe_code)]

//! Host-driven frame stepping for the hero animation.
//!
//! [`HeroPlayer`] owns the schedule, the oscillator bank, and a
//! host-advanced clock. The embedding shell calls [`HeroPlayer::step`] once
//! per animation frame with the frame delta; the returned [`StepOutcome`]
//! carries the scene to paint and whether another frame should be scheduled.
//!
//! Under a reduced-motion preference the player produces exactly one scene —
//! the fully coherent still — and never asks for another frame.
//!
//! # Lifecycle
//!
//! 1. [`HeroPlayer::new`] with the measured surface geometry and the user's
//!    motion preference.
//! 2. [`HeroPlayer::step`] from the host frame callback.
//! 3. [`HeroPlayer::set_geometry`] whenever the window resizes.

use core::time::Duration;

use crate::clock::DeterministicClock;
use crate::geometry::SurfaceGeometry;
use crate::oscillator::{CoherentTarget, OSCILLATOR_BANK, Oscillator};
use crate::scene::{self, TraceScene};
use crate::schedule::CouplingSchedule;

/// The user's platform motion preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPreference {
    /// Animate continuously.
    Full,
    /// Render one static coherent frame, then stop.
    Reduced,
}

/// Result of one [`HeroPlayer::step`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Scene to paint this frame, if any.
    pub scene: Option<TraceScene>,
    /// Whether the host should schedule another frame.
    pub schedule_next: bool,
    /// Frames produced so far, including this one.
    pub frame_idx: u64,
}

/// Frame stepper for the hero canvas.
#[derive(Debug, Clone)]
pub struct HeroPlayer {
    schedule: CouplingSchedule,
    bank: &'static [Oscillator],
    target: CoherentTarget,
    clock: DeterministicClock,
    geometry: SurfaceGeometry,
    motion: MotionPreference,
    frame_idx: u64,
    still_rendered: bool,
}

impl HeroPlayer {
    /// Player over the production bank and schedule.
    #[must_use]
    pub fn new(geometry: SurfaceGeometry, motion: MotionPreference) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(?motion, "hero player created");
        Self {
            schedule: CouplingSchedule::default(),
            bank: &OSCILLATOR_BANK,
            target: CoherentTarget::default(),
            clock: DeterministicClock::new(),
            geometry,
            motion,
            frame_idx: 0,
            still_rendered: false,
        }
    }

    /// Replace the schedule (builder). Used by demos with shorter cycles.
    #[must_use]
    pub fn with_schedule(mut self, schedule: CouplingSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Current surface geometry.
    #[must_use]
    pub fn geometry(&self) -> SurfaceGeometry {
        self.geometry
    }

    /// Adopt a new surface geometry after a resize.
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
        // A reduced-motion still must be repainted at the new size.
        if self.motion == MotionPreference::Reduced {
            self.still_rendered = false;
        }
    }

    /// The configured motion preference.
    #[must_use]
    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Time the player has animated through so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Advance by one frame delta and compose the frame's scene.
    pub fn step(&mut self, dt: Duration) -> StepOutcome {
        match self.motion {
            MotionPreference::Reduced => self.step_still(),
            MotionPreference::Full => self.step_animated(dt),
        }
    }

    fn step_still(&mut self) -> StepOutcome {
        if self.still_rendered {
            return StepOutcome {
                scene: None,
                schedule_next: false,
                frame_idx: self.frame_idx,
            };
        }
        self.still_rendered = true;
        self.frame_idx += 1;
        let scene = scene::compose(
            &self.schedule,
            self.bank,
            &self.target,
            self.geometry,
            self.schedule.coherent_midpoint(),
        );
        #[cfg(feature = "tracing")]
        tracing::debug!("reduced motion: coherent still rendered");
        StepOutcome {
            scene: Some(scene),
            schedule_next: false,
            frame_idx: self.frame_idx,
        }
    }

    fn step_animated(&mut self, dt: Duration) -> StepOutcome {
        self.clock.advance(dt);
        self.frame_idx += 1;
        let scene = scene::compose(
            &self.schedule,
            self.bank,
            &self.target,
            self.geometry,
            self.clock.elapsed(),
        );
        StepOutcome {
            scene: Some(scene),
            schedule_next: true,
            frame_idx: self.frame_idx,
        }
    }
}
