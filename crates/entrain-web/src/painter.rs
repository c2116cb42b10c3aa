#![forbid(unsafe_code)]

//! Canvas 2D painting for composed scenes.
//!
//! The scene arrives in CSS pixel space; the painter applies the device pixel
//! ratio once through the context transform and strokes each trace as a
//! polyline. No state is kept between frames beyond what the context itself
//! holds.

use entrain_core::{SurfaceGeometry, TraceScene};
use web_sys::CanvasRenderingContext2d;

/// Paint one scene, replacing the previous frame entirely.
pub fn paint(ctx: &CanvasRenderingContext2d, geometry: SurfaceGeometry, scene: &TraceScene) {
    let dpr = f64::from(geometry.dpr());
    // Transform errors only occur for non-finite arguments, which the
    // geometry sanitizer already rules out.
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    ctx.clear_rect(
        0.0,
        0.0,
        f64::from(geometry.css_width()),
        f64::from(geometry.css_height()),
    );
    ctx.set_line_cap("round");
    ctx.set_line_join("round");

    for trace in &scene.traces {
        let mut points = trace.points.iter();
        let Some(&(x0, y0)) = points.next() else {
            continue;
        };
        ctx.begin_path();
        ctx.set_stroke_style_str(trace.color);
        ctx.set_global_alpha(f64::from(trace.alpha));
        ctx.set_line_width(f64::from(trace.width));
        ctx.move_to(f64::from(x0), f64::from(y0));
        for &(x, y) in points {
            ctx.line_to(f64::from(x), f64::from(y));
        }
        ctx.stroke();
    }
    ctx.set_global_alpha(1.0);
}
