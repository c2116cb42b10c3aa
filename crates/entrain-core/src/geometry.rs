#![forbid(unsafe_code)]

//! Canvas surface geometry.
//!
//! The backing store of the hero canvas is its container's CSS size scaled by
//! the device pixel ratio. Scene composition works in CSS pixel space; the
//! painter applies the ratio once via the context transform.

/// CSS dimensions plus device pixel ratio for one canvas surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    css_width: f32,
    css_height: f32,
    dpr: f32,
}

impl SurfaceGeometry {
    /// Build a geometry from raw layout measurements.
    ///
    /// Negative or non-finite dimensions collapse to zero; a non-finite or
    /// non-positive pixel ratio falls back to 1.0 (the browser contract for
    /// `devicePixelRatio` on odd platforms).
    #[must_use]
    pub fn new(css_width: f32, css_height: f32, dpr: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            css_width: sanitize(css_width),
            css_height: sanitize(css_height),
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// CSS width in pixels.
    #[must_use]
    pub fn css_width(&self) -> f32 {
        self.css_width
    }

    /// CSS height in pixels.
    #[must_use]
    pub fn css_height(&self) -> f32 {
        self.css_height
    }

    /// Device pixel ratio.
    #[must_use]
    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    /// Backing-store width: CSS width × ratio, rounded to whole pixels.
    #[must_use]
    pub fn device_width(&self) -> u32 {
        (self.css_width * self.dpr).round() as u32
    }

    /// Backing-store height: CSS height × ratio, rounded to whole pixels.
    #[must_use]
    pub fn device_height(&self) -> u32 {
        (self.css_height * self.dpr).round() as u32
    }

    /// True when either dimension collapses to nothing renderable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.device_width() == 0 || self.device_height() == 0
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_dimensions_scale_by_ratio() {
        let g = SurfaceGeometry::new(800.0, 420.0, 2.0);
        assert_eq!(g.device_width(), 1600);
        assert_eq!(g.device_height(), 840);
        assert!(!g.is_empty());
    }

    #[test]
    fn fractional_ratio_rounds() {
        let g = SurfaceGeometry::new(801.0, 400.0, 1.5);
        assert_eq!(g.device_width(), 1202); // 1201.5 rounds up
        assert_eq!(g.device_height(), 600);
    }

    #[test]
    fn zero_size_is_empty() {
        assert!(SurfaceGeometry::new(0.0, 300.0, 2.0).is_empty());
        assert!(SurfaceGeometry::new(640.0, 0.0, 2.0).is_empty());
        assert!(SurfaceGeometry::default().is_empty());
    }

    #[test]
    fn bad_measurements_are_sanitized() {
        let g = SurfaceGeometry::new(f32::NAN, -40.0, 0.0);
        assert_eq!(g.css_width(), 0.0);
        assert_eq!(g.css_height(), 0.0);
        assert_eq!(g.dpr(), 1.0);
        assert!(g.is_empty());
    }

    #[test]
    fn infinite_ratio_falls_back_to_one() {
        let g = SurfaceGeometry::new(100.0, 100.0, f32::INFINITY);
        assert_eq!(g.dpr(), 1.0);
        assert_eq!(g.device_width(), 100);
    }
}
