//! Glowing network nodes with toroidal connections.

use lumo_core::Viewport;
use rand::{Rng, rngs::StdRng};

use crate::{
    color::Rgba,
    math::{CONNECT_DIST, Wrap, ease_out_lerp, sigmoid, time_decay, wrapped_distance},
    render::FrameCtx,
};

/// Velocity roll is `scale * [-3, 3)` on each axis.
const VELOCITY_SCALE: f64 = 10.0;
const RADIUS_EASE_SPEED: f64 = 2.0;
const DECAY_SPEED: f64 = 10.0;
/// Stroke weight of the faint outer ring.
const RING_WEIGHT: f64 = 4.0;
/// Alpha of the faint outer ring.
const RING_ALPHA: f64 = 0.1;
/// Ring radius grows with the connection count.
const RADIUS_PER_CONNECTION: f64 = 25.0;
/// Floor that keeps lonely nodes visible.
const MIN_DESIRED_RADIUS: f64 = 10.0;
/// Core dot radius per connection.
const DOT_RADIUS_PER_CONNECTION: f64 = 1.5;

/// A single network node. Position is local to the owning screen.
#[derive(Clone, Copy, Debug)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Current eased visual radius.
    pub radius: f64,
    /// Follows the connection count.
    pub desired_radius: f64,
    /// Seconds lived so far.
    pub age: f64,
    /// Lifetime in seconds; past this the node gets respawned.
    pub max_age: f64,
    light: Rgba,
    dark: Rgba,
}

impl Node {
    /// Roll a fresh node anywhere in the viewport, keeping the given colors.
    pub fn spawn(rng: &mut StdRng, viewport: Viewport, light: Rgba, dark: Rgba) -> Self {
        Self {
            x: rng.gen_range(0.0..viewport.width.max(1.0)),
            y: rng.gen_range(0.0..viewport.height.max(1.0)),
            vx: VELOCITY_SCALE * rng.gen_range(-3.0..3.0),
            vy: VELOCITY_SCALE * rng.gen_range(-3.0..3.0),
            radius: 0.0,
            desired_radius: 0.0,
            age: 0.0,
            max_age: rng.gen_range(30.0..140.0),
            light,
            dark,
        }
    }

    pub fn expired(&self) -> bool {
        self.age > self.max_age
    }

    /// Color pair carried over to this node's replacement.
    pub fn colors(&self) -> (Rgba, Rgba) {
        (self.light, self.dark)
    }

    /// Advance one frame: age, integrate with hard wraparound, recompute the
    /// five wrapped connection sets against `all` (the screen's full node
    /// arena, this node's own slot included), ease the radius, draw.
    pub fn update(&mut self, all: &[Node], delta: f64, screen_y: f64, ctx: &mut FrameCtx<'_>) {
        self.age += delta;
        self.x += self.vx * delta;
        self.y += self.vy * delta;

        let Viewport { width, height } = ctx.viewport;
        if self.x > width {
            self.x -= width;
        }
        if self.x < 0.0 {
            self.x += width;
        }
        if self.y > height {
            self.y -= height;
        }
        if self.y < 0.0 {
            // Subtracts on this branch too, drifting further negative on
            // repeated crossings. Kept as observed; see DESIGN.md.
            self.y -= height;
        }

        let connections = self.connections(all, ctx.viewport);
        let total: usize = connections.iter().map(Vec::len).sum();
        self.desired_radius = (total as f64 * RADIUS_PER_CONNECTION).max(MIN_DESIRED_RADIUS);
        self.radius = ease_out_lerp(self.radius, self.desired_radius, delta, RADIUS_EASE_SPEED)
            * time_decay(self.age, self.max_age, DECAY_SPEED);

        self.draw(all, &connections, total, screen_y, ctx);
    }

    /// Indices into `all` connected to this node, one set per wrap direction.
    /// A pair can qualify under several wraps at once; every edge is kept.
    fn connections(&self, all: &[Node], viewport: Viewport) -> [Vec<usize>; 5] {
        let mut sets: [Vec<usize>; 5] = Default::default();
        for (set, wrap) in sets.iter_mut().zip(Wrap::ALL) {
            for (i, other) in all.iter().enumerate() {
                let dist = wrapped_distance((self.x, self.y), (other.x, other.y), wrap, viewport);
                if dist <= CONNECT_DIST {
                    set.push(i);
                }
            }
        }
        sets
    }

    fn draw(
        &self,
        all: &[Node],
        connections: &[Vec<usize>; 5],
        total: usize,
        screen_y: f64,
        ctx: &mut FrameCtx<'_>,
    ) {
        let (color, glow) = if ctx.theme.is_light() {
            (self.light, self.light)
        } else {
            (Rgba::WHITE, self.dark)
        };
        let dot_radius = total as f64 * DOT_RADIUS_PER_CONNECTION;
        let sy = self.y + screen_y;
        let Viewport { width, height } = ctx.viewport;

        // Peek copies past the four edges so the network reads as seamless.
        for dir in [-1.0, 1.0] {
            ctx.surface
                .draw_dot(self.x + width * dir, sy, dot_radius, color, glow);
            ctx.surface.draw_ring(
                self.x + width * dir,
                sy,
                self.radius,
                color.faded(RING_ALPHA),
                glow,
                RING_WEIGHT,
            );
        }
        for dir in [-1.0, 1.0] {
            ctx.surface
                .draw_dot(self.x, sy + height * dir, dot_radius, color, glow);
            ctx.surface.draw_ring(
                self.x,
                sy + height * dir,
                self.radius,
                color.faded(RING_ALPHA),
                glow,
                RING_WEIGHT,
            );
        }

        ctx.surface
            .draw_ring(self.x, sy, self.radius, color.faded(RING_ALPHA), glow, RING_WEIGHT);

        for (set, wrap) in connections.iter().zip(Wrap::ALL) {
            let (ox, oy) = wrap.offset(ctx.viewport);
            for &i in set {
                let other = &all[i];
                let dist =
                    wrapped_distance((self.x, self.y), (other.x, other.y), wrap, ctx.viewport);
                ctx.surface.draw_line(
                    self.x,
                    sy,
                    other.x + ox,
                    other.y + screen_y + oy,
                    color,
                    glow,
                    sigmoid(dist),
                );
            }
        }

        ctx.surface.draw_dot(self.x, sy, dot_radius, color, glow);
    }
}
