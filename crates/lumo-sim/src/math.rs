//! Easing and distance helpers for the particle simulations.

use lumo_core::Viewport;

/// Vertical slide speed of a screen toward its target offset, px/s.
pub const SCROLL_SPEED: f64 = 1500.0;

/// Maximum distance at which two nodes connect, px.
pub const CONNECT_DIST: f64 = 300.0;

/// End-of-life fade factor: 1.0 for most of a particle's lifetime, dropping
/// to 0 as `age` approaches `zero_point`.
pub fn time_decay(age: f64, zero_point: f64, decay_speed: f64) -> f64 {
    (1.0 - (decay_speed * (age - zero_point)).exp()).max(0.0)
}

/// Exponential approach of `current` toward `target`.
///
/// The step scales with raw `delta`, so a very large delta (a suspended
/// terminal, say) can overshoot or invert the ease. Kept as-is for parity
/// with the tuned visuals; see DESIGN.md before changing.
pub fn ease_out_lerp(current: f64, target: f64, delta: f64, speed: f64) -> f64 {
    current + (target - current) * speed * delta
}

/// Connection-line weight falloff: ~8 near zero distance, 4 at 100 px,
/// negligible past ~300 px.
pub fn sigmoid(distance: f64) -> f64 {
    8.0 / (1.0 + (0.02 * (distance - 100.0)).exp())
}

/// Relative placement of a neighbor when the viewport edges wrap around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wrap {
    Center,
    North,
    South,
    East,
    West,
}

impl Wrap {
    pub const ALL: [Wrap; 5] = [Wrap::Center, Wrap::North, Wrap::South, Wrap::East, Wrap::West];

    /// Pixel offset applied to a neighbor's position under this wrap.
    pub fn offset(self, viewport: Viewport) -> (f64, f64) {
        match self {
            Wrap::Center => (0.0, 0.0),
            Wrap::North => (0.0, -viewport.height),
            Wrap::South => (0.0, viewport.height),
            Wrap::East => (viewport.width, 0.0),
            Wrap::West => (-viewport.width, 0.0),
        }
    }
}

/// Distance from `a` to `b` with `b` displaced by the wrap offset.
pub fn wrapped_distance(a: (f64, f64), b: (f64, f64), wrap: Wrap, viewport: Viewport) -> f64 {
    let (ox, oy) = wrap.offset(viewport);
    let dx = b.0 + ox - a.0;
    let dy = b.1 + oy - a.1;
    dx.hypot(dy)
}
