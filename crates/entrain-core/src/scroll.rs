#![forbid(unsafe_code)]

//! Navigation scroll-shadow latch.
//!
//! The nav bar shows a drop shadow once the page is scrolled past a small
//! threshold. The latch reports only *transitions* so the caller can skip
//! redundant class writes; the engaged state itself is recomputed from every
//! offset, so scrolling back up clears the shadow again.

/// Scroll offset above which the shadow engages, in CSS pixels.
pub const SHADOW_THRESHOLD_PX: f32 = 20.0;

/// Threshold latch for the navigation shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollShadow {
    threshold: f32,
    engaged: bool,
}

impl ScrollShadow {
    /// Latch with the production threshold, initially disengaged.
    #[must_use]
    pub fn new() -> Self {
        Self::with_threshold(SHADOW_THRESHOLD_PX)
    }

    /// Latch with a custom threshold.
    #[must_use]
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            engaged: false,
        }
    }

    /// Whether the shadow is currently engaged.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Feed a scroll offset; returns the new state only when it changed.
    ///
    /// Engagement is strict: an offset exactly at the threshold stays clear.
    pub fn observe(&mut self, offset: f32) -> Option<bool> {
        let engaged = offset > self.threshold;
        if engaged == self.engaged {
            return None;
        }
        self.engaged = engaged;
        Some(engaged)
    }
}

impl Default for ScrollShadow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disengaged() {
        assert!(!ScrollShadow::new().is_engaged());
    }

    #[test]
    fn threshold_is_strict() {
        let mut s = ScrollShadow::new();
        assert_eq!(s.observe(20.0), None);
        assert!(!s.is_engaged());
        assert_eq!(s.observe(20.01), Some(true));
        assert!(s.is_engaged());
    }

    #[test]
    fn offsets_at_or_below_threshold_stay_clear() {
        let mut s = ScrollShadow::new();
        for offset in [0.0, 5.0, 19.9, 20.0] {
            assert_eq!(s.observe(offset), None, "offset {offset}");
            assert!(!s.is_engaged());
        }
    }

    #[test]
    fn reports_only_transitions() {
        let mut s = ScrollShadow::new();
        assert_eq!(s.observe(120.0), Some(true));
        assert_eq!(s.observe(500.0), None);
        assert_eq!(s.observe(21.0), None);
        assert_eq!(s.observe(3.0), Some(false));
        assert_eq!(s.observe(0.0), None);
    }

    #[test]
    fn scrolling_back_up_clears_the_shadow() {
        let mut s = ScrollShadow::new();
        s.observe(300.0);
        assert!(s.is_engaged());
        s.observe(10.0);
        assert!(!s.is_engaged());
    }

    #[test]
    fn negative_overscroll_is_clear() {
        // Rubber-band overscroll on macOS reports negative offsets.
        let mut s = ScrollShadow::new();
        s.observe(100.0);
        assert_eq!(s.observe(-12.0), Some(false));
    }

    #[test]
    fn custom_threshold() {
        let mut s = ScrollShadow::with_threshold(0.0);
        assert_eq!(s.observe(0.0), None);
        assert_eq!(s.observe(0.1), Some(true));
    }
}
