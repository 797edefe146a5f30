//! Drifting glow-ring bubbles with soft separation.

use lumo_core::Viewport;
use rand::{Rng, rngs::StdRng};

use crate::{
    color::{Palette, Rgba},
    math::{ease_out_lerp, time_decay},
    render::FrameCtx,
};

/// Divisor floor when two bubbles sit (nearly) on top of each other.
const MIN_SEPARATION_DIST: f64 = 0.1;
/// How fast the visual radius chases the target radius.
const RADIUS_EASE_SPEED: f64 = 2.0;
/// Steepness of the end-of-life fade.
const DECAY_SPEED: f64 = 10.0;
/// Stroke weight of the bubble ring.
const RING_WEIGHT: f64 = 4.0;

/// A single bubble. Position is local to the owning screen.
#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Current eased visual radius.
    pub radius: f64,
    /// Radius the easing relaxes toward.
    pub desired_radius: f64,
    /// Seconds lived so far.
    pub age: f64,
    /// Lifetime in seconds; past this the bubble gets respawned.
    pub max_age: f64,
    light: Rgba,
    dark: Rgba,
}

impl Bubble {
    /// Roll a fresh bubble: size 25-100, velocity scaled by the field's speed
    /// modifier, position inset by its own size, lifetime 30-140 s.
    pub fn spawn(
        rng: &mut StdRng,
        viewport: Viewport,
        palette: &Palette,
        speed_modifier: f64,
    ) -> Self {
        let size = rng.gen_range(25.0..=100.0_f64).round();
        let (light, dark) = palette.pick(rng);
        Self {
            x: inset_position(rng, size, viewport.width),
            y: inset_position(rng, size, viewport.height),
            vx: speed_modifier * rng.gen_range(-3.0..3.0),
            vy: speed_modifier * rng.gen_range(-3.0..3.0),
            radius: 0.0,
            desired_radius: size,
            age: 0.0,
            max_age: rng.gen_range(30.0..140.0),
            light,
            dark,
        }
    }

    pub fn expired(&self) -> bool {
        self.age > self.max_age
    }

    /// Advance one frame: age, ease the radius, integrate, bounce off walls,
    /// separate from `later` (the bubbles after this one in the screen's
    /// sequence, so each pair is resolved once), then draw.
    pub fn update(&mut self, later: &mut [Bubble], delta: f64, screen_y: f64, ctx: &mut FrameCtx<'_>) {
        self.age += delta;
        self.radius = ease_out_lerp(self.radius, self.desired_radius, delta, RADIUS_EASE_SPEED)
            * time_decay(self.age, self.max_age, DECAY_SPEED);
        self.x += self.vx * delta;
        self.y += self.vy * delta;
        self.resolve_walls(ctx.viewport);
        self.resolve_overlaps(later);
        self.draw(screen_y, ctx);
    }

    /// Clamp the center into `[radius, dimension - radius]` and invert the
    /// velocity component on contact.
    fn resolve_walls(&mut self, viewport: Viewport) {
        if self.x - self.radius < 0.0 || self.x + self.radius > viewport.width {
            self.x = self.x.min(viewport.width - self.radius).max(self.radius);
            self.vx = -self.vx;
        }
        if self.y - self.radius < 0.0 || self.y + self.radius > viewport.height {
            self.y = self.y.min(viewport.height - self.radius).max(self.radius);
            self.vy = -self.vy;
        }
    }

    /// Push overlapping pairs apart along the connecting normal, half the
    /// overlap (plus a pixel) each.
    fn resolve_overlaps(&mut self, later: &mut [Bubble]) {
        for other in later {
            let dx = other.x - self.x;
            let dy = other.y - self.y;
            let dist = dx.hypot(dy);
            let overlap = self.radius + other.radius - dist;
            if overlap > 0.0 {
                let nx = dx / dist.max(MIN_SEPARATION_DIST);
                let ny = dy / dist.max(MIN_SEPARATION_DIST);
                let push = (overlap + 1.0) / 2.0;
                self.x -= nx * push;
                self.y -= ny * push;
                other.x += nx * push;
                other.y += ny * push;
            }
        }
    }

    fn draw(&self, screen_y: f64, ctx: &mut FrameCtx<'_>) {
        let (stroke, glow) = if ctx.theme.is_light() {
            (self.light, self.light)
        } else {
            (Rgba::WHITE, self.dark)
        };
        ctx.surface
            .draw_ring(self.x, self.y + screen_y, self.radius, stroke, glow, RING_WEIGHT);
    }
}

/// Uniform position inset from both edges; center of the axis when the
/// viewport is too small for the inset.
fn inset_position(rng: &mut StdRng, inset: f64, dimension: f64) -> f64 {
    let span = dimension - inset * 2.0;
    if span > 0.0 {
        inset + rng.gen_range(0.0..span)
    } else {
        dimension / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;
    use lumo_core::Theme;
    use rand::SeedableRng;

    fn test_bubble(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Bubble {
        Bubble {
            x,
            y,
            vx,
            vy,
            radius,
            desired_radius: radius,
            age: 0.0,
            max_age: 1000.0,
            light: Rgba::opaque(0, 139, 139),
            dark: Rgba::opaque(0, 255, 255),
        }
    }

    #[test]
    fn test_walls_contain_the_center() {
        let viewport = Viewport::new(800.0, 600.0);
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut surface = NullSurface;
        let mut ctx = FrameCtx {
            viewport,
            theme: Theme::Dark,
            palette: &palette,
            surface: &mut surface,
            rng: &mut rng,
        };

        let mut bubble = test_bubble(750.0, 300.0, 500.0, -400.0, 40.0);
        for _ in 0..100 {
            bubble.update(&mut [], 0.05, 0.0, &mut ctx);
            assert!(bubble.x >= bubble.radius && bubble.x <= viewport.width - bubble.radius);
            assert!(bubble.y >= bubble.radius && bubble.y <= viewport.height - bubble.radius);
        }
    }

    #[test]
    fn test_exact_overlap_resolves_finitely() {
        // Coincident centers: the 0.1 floor divisor keeps the math finite.
        let mut a = test_bubble(100.0, 100.0, 0.0, 0.0, 30.0);
        let mut rest = [test_bubble(100.0, 100.0, 0.0, 0.0, 30.0)];
        a.resolve_overlaps(&mut rest);
        assert!(a.x.is_finite() && a.y.is_finite());
        assert!(rest[0].x.is_finite() && rest[0].y.is_finite());
    }

    #[test]
    fn test_near_overlap_pushes_apart() {
        let mut a = test_bubble(100.0, 100.0, 0.0, 0.0, 30.0);
        let mut rest = [test_bubble(100.05, 100.0, 0.0, 0.0, 30.0)];
        let before = (rest[0].x - a.x).hypot(rest[0].y - a.y);
        a.resolve_overlaps(&mut rest);
        let after = (rest[0].x - a.x).hypot(rest[0].y - a.y);
        assert!(after > before);
    }

    #[test]
    fn test_spawn_distributions() {
        let viewport = Viewport::new(800.0, 600.0);
        let palette = Palette::default();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let b = Bubble::spawn(&mut rng, viewport, &palette, 25.0);
            assert_eq!(b.age, 0.0);
            assert!((30.0..140.0).contains(&b.max_age));
            assert!((25.0..=100.0).contains(&b.desired_radius));
            assert_eq!(b.radius, 0.0);
            assert!(b.x >= b.desired_radius && b.x <= viewport.width - b.desired_radius);
            assert!(b.vx.abs() <= 75.0 && b.vy.abs() <= 75.0);
        }
    }

    #[test]
    fn test_expiry() {
        let mut b = test_bubble(10.0, 10.0, 0.0, 0.0, 5.0);
        b.max_age = 1.0;
        assert!(!b.expired());
        b.age = 1.0;
        assert!(!b.expired());
        b.age = 1.0 + f64::EPSILON;
        assert!(b.expired());
    }
}
