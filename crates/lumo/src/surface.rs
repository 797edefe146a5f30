//! Maps the sim's glow primitives onto ratatui canvas shapes.
//!
//! A terminal has no alpha channel and no blur, so colors are pre-blended
//! against the theme background and the glow becomes a dim halo ring. Shapes
//! are recorded during the tick and replayed into the canvas widget's paint
//! closure.

use lumo_core::{Theme, Viewport};
use lumo_sim::{Rgba, Surface};
use ratatui::{
    style::Color,
    widgets::canvas::{Circle, Context, Line as CanvasLine},
};

/// Alpha scale of the halo pass standing in for canvas blur.
const GLOW_ALPHA: f64 = 0.25;
/// Extra radius of the halo ring, px.
const GLOW_SPREAD: f64 = 2.0;
/// Line weights at or above this draw fully opaque.
const FULL_WEIGHT: f64 = 8.0;
/// Weights below this aren't worth a draw call.
const MIN_WEIGHT_ALPHA: f64 = 0.02;
/// Spacing of the concentric strokes that fill a dot.
const DOT_FILL_STEP: f64 = 2.0;

/// A recorded canvas shape, already blended and y-flipped.
#[derive(Clone, Copy, Debug)]
pub enum Shape {
    Ring {
        x: f64,
        y: f64,
        radius: f64,
        color: Color,
    },
    Segment {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    },
}

/// Records one frame of draw calls for the canvas widget to replay.
#[derive(Debug, Default)]
pub struct CanvasSurface {
    shapes: Vec<Shape>,
    viewport: Viewport,
    background: Rgba,
}

impl CanvasSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new frame: drop last frame's shapes, adopt the current
    /// dimensions and theme background.
    pub fn begin_frame(&mut self, viewport: Viewport, theme: Theme) {
        self.shapes.clear();
        self.viewport = viewport;
        self.background = if theme.is_light() {
            Rgba::opaque(235, 235, 228)
        } else {
            Rgba::opaque(0, 0, 0)
        };
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn background(&self) -> Color {
        Color::Rgb(self.background.r, self.background.g, self.background.b)
    }

    /// Premultiply against the background; terminals can't blend.
    fn blend(&self, color: Rgba, extra_alpha: f64) -> Color {
        let a = (color.a * extra_alpha).clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f64::from(bg) + (f64::from(fg) - f64::from(bg)) * a).round() as u8;
        Color::Rgb(
            mix(color.r, self.background.r),
            mix(color.g, self.background.g),
            mix(color.b, self.background.b),
        )
    }

    /// The sim's y axis points down, the canvas's up.
    fn flip(&self, y: f64) -> f64 {
        self.viewport.height - y
    }

    fn push_ring(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        let y = self.flip(y);
        self.shapes.push(Shape::Ring {
            x,
            y,
            radius: radius.abs(),
            color,
        });
    }
}

impl Surface for CanvasSurface {
    fn draw_ring(&mut self, x: f64, y: f64, radius: f64, stroke: Rgba, glow: Rgba, _weight: f64) {
        let halo = self.blend(glow, GLOW_ALPHA * stroke.a);
        let main = self.blend(stroke, 1.0);
        self.push_ring(x, y, radius.abs() + GLOW_SPREAD, halo);
        self.push_ring(x, y, radius, main);
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba, _glow: Rgba, weight: f64) {
        let alpha = (weight / FULL_WEIGHT).clamp(0.0, 1.0);
        if alpha < MIN_WEIGHT_ALPHA {
            return;
        }
        let blended = self.blend(color, alpha);
        let (y1, y2) = (self.flip(y1), self.flip(y2));
        self.shapes.push(Shape::Segment {
            x1,
            y1,
            x2,
            y2,
            color: blended,
        });
    }

    fn draw_dot(&mut self, x: f64, y: f64, radius: f64, fill: Rgba, glow: Rgba) {
        let r = radius.abs();
        if r <= 0.0 {
            return;
        }
        let halo = self.blend(glow, GLOW_ALPHA * fill.a);
        let main = self.blend(fill, 1.0);
        self.push_ring(x, y, r + GLOW_SPREAD, halo);
        // No filled-disc primitive on a canvas; concentric strokes suffice at
        // these radii.
        let mut rr = r;
        while rr > 0.0 {
            self.push_ring(x, y, rr, main);
            rr -= DOT_FILL_STEP;
        }
    }
}

/// Replay recorded shapes into the canvas drawing context.
pub fn replay(ctx: &mut Context<'_>, shapes: &[Shape]) {
    for shape in shapes {
        match *shape {
            Shape::Ring { x, y, radius, color } => ctx.draw(&Circle { x, y, radius, color }),
            Shape::Segment { x1, y1, x2, y2, color } => {
                ctx.draw(&CanvasLine { x1, y1, x2, y2, color })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CanvasSurface {
        let mut s = CanvasSurface::new();
        s.begin_frame(Viewport::new(800.0, 600.0), Theme::Dark);
        s
    }

    #[test]
    fn test_blend_extremes() {
        let s = surface();
        let c = Rgba::opaque(255, 7, 58);
        assert_eq!(s.blend(c, 1.0), Color::Rgb(255, 7, 58));
        assert_eq!(s.blend(c, 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_rings_are_flipped_and_absolute() {
        let mut s = surface();
        s.draw_ring(100.0, 50.0, -40.0, Rgba::WHITE, Rgba::WHITE, 4.0);
        // Halo first, then the main ring.
        assert_eq!(s.shapes().len(), 2);
        match s.shapes()[1] {
            Shape::Ring { x, y, radius, .. } => {
                assert_eq!(x, 100.0);
                assert_eq!(y, 550.0);
                assert_eq!(radius, 40.0);
            }
            _ => panic!("expected a ring"),
        }
    }

    #[test]
    fn test_faint_lines_are_skipped() {
        let mut s = surface();
        s.draw_line(0.0, 0.0, 10.0, 10.0, Rgba::WHITE, Rgba::WHITE, 0.01);
        assert!(s.shapes().is_empty());
        s.draw_line(0.0, 0.0, 10.0, 10.0, Rgba::WHITE, Rgba::WHITE, 8.0);
        assert_eq!(s.shapes().len(), 1);
    }

    #[test]
    fn test_begin_frame_clears() {
        let mut s = surface();
        s.draw_dot(10.0, 10.0, 3.0, Rgba::WHITE, Rgba::WHITE);
        assert!(!s.shapes().is_empty());
        s.begin_frame(Viewport::new(800.0, 600.0), Theme::Light);
        assert!(s.shapes().is_empty());
    }
}
