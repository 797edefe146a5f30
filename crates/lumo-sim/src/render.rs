//! The drawing abstraction particles render through.

use lumo_core::{Theme, Viewport};
use rand::rngs::StdRng;

use crate::color::{Palette, Rgba};

/// An immediate-mode 2D drawing target.
///
/// Primitives are stateless: no call may leave styling behind for the next
/// one. Radii can be transiently negative while the easing settles, so
/// implementations draw the magnitude.
pub trait Surface {
    /// Stroke a glowing circle outline.
    fn draw_ring(&mut self, x: f64, y: f64, radius: f64, stroke: Rgba, glow: Rgba, weight: f64);

    /// Stroke a glowing line segment. `weight` carries the sigmoid falloff
    /// and doubles as the opacity channel.
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgba, glow: Rgba, weight: f64);

    /// Fill a glowing disc.
    fn draw_dot(&mut self, x: f64, y: f64, radius: f64, fill: Rgba, glow: Rgba);
}

/// Discards every draw call. Headless ticking and tests.
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw_ring(&mut self, _: f64, _: f64, _: f64, _: Rgba, _: Rgba, _: f64) {}
    fn draw_line(&mut self, _: f64, _: f64, _: f64, _: f64, _: Rgba, _: Rgba, _: f64) {}
    fn draw_dot(&mut self, _: f64, _: f64, _: f64, _: Rgba, _: Rgba) {}
}

/// Everything a simulation step needs besides its own particles.
pub struct FrameCtx<'a> {
    pub viewport: Viewport,
    pub theme: Theme,
    pub palette: &'a Palette,
    pub surface: &'a mut dyn Surface,
    pub rng: &'a mut StdRng,
}
