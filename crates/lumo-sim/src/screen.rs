//! Scrolling viewports and the simulations they run.

use lumo_core::{SimKind, Viewport};
use rand::{Rng, rngs::StdRng};

use crate::{
    bubble::Bubble,
    color::Palette,
    math::SCROLL_SPEED,
    node::Node,
    render::FrameCtx,
};

/// Particle count rolled at seeding time.
const MIN_PARTICLES: usize = 10;
const MAX_PARTICLES: usize = 20;

/// Bubble velocity scale rolled once per field.
const MIN_SPEED_MODIFIER: u32 = 10;
const MAX_SPEED_MODIFIER: u32 = 50;

/// A screen's per-frame update strategy, switched on reroll.
#[derive(Clone, Debug)]
pub enum Simulation {
    BubbleField {
        bubbles: Vec<Bubble>,
        /// Scales every bubble's velocity roll, shared by respawns.
        speed_modifier: f64,
    },
    NodeNetwork {
        nodes: Vec<Node>,
    },
}

impl Simulation {
    /// An unseeded simulation with no particles.
    pub fn empty(kind: SimKind) -> Self {
        match kind {
            SimKind::BubbleField => Simulation::BubbleField {
                bubbles: Vec::new(),
                speed_modifier: 0.0,
            },
            SimKind::NodeNetwork => Simulation::NodeNetwork { nodes: Vec::new() },
        }
    }

    pub fn kind(&self) -> SimKind {
        match self {
            Simulation::BubbleField { .. } => SimKind::BubbleField,
            Simulation::NodeNetwork { .. } => SimKind::NodeNetwork,
        }
    }

    pub fn particle_count(&self) -> usize {
        match self {
            Simulation::BubbleField { bubbles, .. } => bubbles.len(),
            Simulation::NodeNetwork { nodes } => nodes.len(),
        }
    }

    /// Roll a fresh particle set and per-field parameters: 10-20 particles, a
    /// field-wide speed modifier for bubbles, one shared palette draw for a
    /// node network.
    pub fn seed(&mut self, rng: &mut StdRng, viewport: Viewport, palette: &Palette) {
        let count = rng.gen_range(MIN_PARTICLES..=MAX_PARTICLES);
        match self {
            Simulation::BubbleField { bubbles, speed_modifier } => {
                *speed_modifier = f64::from(rng.gen_range(MIN_SPEED_MODIFIER..=MAX_SPEED_MODIFIER));
                *bubbles = (0..count)
                    .map(|_| Bubble::spawn(rng, viewport, palette, *speed_modifier))
                    .collect();
            }
            Simulation::NodeNetwork { nodes } => {
                let (light, dark) = palette.pick(rng);
                *nodes = (0..count)
                    .map(|_| Node::spawn(rng, viewport, light, dark))
                    .collect();
            }
        }
    }

    /// Run one frame over the particle arena, then respawn expired entries in
    /// place so the sequence order never changes.
    pub fn step(&mut self, delta: f64, screen_y: f64, ctx: &mut FrameCtx<'_>) {
        match self {
            Simulation::BubbleField { bubbles, speed_modifier } => {
                for i in 0..bubbles.len() {
                    let (head, tail) = bubbles.split_at_mut(i + 1);
                    head[i].update(tail, delta, screen_y, ctx);
                }
                for bubble in bubbles.iter_mut() {
                    if bubble.expired() {
                        *bubble = Bubble::spawn(ctx.rng, ctx.viewport, ctx.palette, *speed_modifier);
                    }
                }
            }
            Simulation::NodeNetwork { nodes } => {
                for i in 0..nodes.len() {
                    let mut node = nodes[i];
                    node.update(nodes, delta, screen_y, ctx);
                    nodes[i] = node;
                }
                for node in nodes.iter_mut() {
                    if node.expired() {
                        let (light, dark) = node.colors();
                        *node = Node::spawn(ctx.rng, ctx.viewport, light, dark);
                    }
                }
            }
        }
    }
}

/// One of the two scrolling viewports.
#[derive(Clone, Debug)]
pub struct Screen {
    offset: f64,
    target_offset: f64,
    active: bool,
    sim: Simulation,
}

impl Screen {
    pub fn new(kind: SimKind, start_offset: f64) -> Self {
        Self {
            offset: start_offset,
            target_offset: start_offset,
            active: true,
            sim: Simulation::empty(kind),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn toggle_active(&mut self) {
        self.active = !self.active;
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    /// Rebind to an empty simulation of `kind`; the caller reseeds.
    pub fn change_sim(&mut self, kind: SimKind) {
        self.sim = Simulation::empty(kind);
    }

    /// Slide the target only (transition nudge).
    pub fn nudge_target(&mut self, amount: f64) {
        self.target_offset += amount;
    }

    /// Slide both current and target offsets (coincidence displacement).
    pub fn displace(&mut self, amount: f64) {
        self.offset += amount;
        self.target_offset += amount;
    }

    /// Snap both offsets, ending any slide in progress.
    pub fn reset_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.target_offset = offset;
    }

    /// Step the simulation, then advance the scroll offset toward its target
    /// at the fixed slide speed with a sign-aware no-overshoot clamp.
    /// Inactive screens do nothing at all.
    pub fn update(&mut self, delta: f64, ctx: &mut FrameCtx<'_>) {
        if !self.active {
            return;
        }
        self.sim.step(delta, self.offset, ctx);

        if self.offset != self.target_offset {
            let dir = (self.target_offset - self.offset).signum();
            self.offset += dir * SCROLL_SPEED * delta;
            if (dir > 0.0 && self.offset > self.target_offset)
                || (dir < 0.0 && self.offset < self.target_offset)
            {
                self.offset = self.target_offset;
            }
        }
    }

    /// Whether a point sits inside the screen's frame, inset by `margin` on
    /// every edge.
    pub fn contains(&self, x: f64, y: f64, margin: f64, viewport: Viewport) -> bool {
        let top = self.offset;
        let bottom = self.offset + viewport.height;
        x >= margin && x <= viewport.width - margin && y >= top + margin && y <= bottom - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;
    use lumo_core::Theme;
    use rand::SeedableRng;

    fn ctx_parts() -> (Palette, StdRng, NullSurface) {
        (Palette::default(), StdRng::seed_from_u64(11), NullSurface)
    }

    #[test]
    fn test_seed_counts_and_kind() {
        let viewport = Viewport::new(800.0, 600.0);
        let (palette, mut rng, _) = ctx_parts();
        for kind in SimKind::ALL {
            let mut sim = Simulation::empty(kind);
            assert_eq!(sim.particle_count(), 0);
            sim.seed(&mut rng, viewport, &palette);
            assert_eq!(sim.kind(), kind);
            assert!((MIN_PARTICLES..=MAX_PARTICLES).contains(&sim.particle_count()));
        }
    }

    #[test]
    fn test_change_sim_clears_particles() {
        let viewport = Viewport::new(800.0, 600.0);
        let (palette, mut rng, _) = ctx_parts();
        let mut screen = Screen::new(SimKind::BubbleField, 0.0);
        screen.sim_mut().seed(&mut rng, viewport, &palette);
        assert!(screen.sim().particle_count() > 0);

        screen.change_sim(SimKind::NodeNetwork);
        assert_eq!(screen.sim().kind(), SimKind::NodeNetwork);
        assert_eq!(screen.sim().particle_count(), 0);
    }

    #[test]
    fn test_inactive_screen_is_a_no_op() {
        let viewport = Viewport::new(800.0, 600.0);
        let (palette, mut rng, mut surface) = ctx_parts();
        let mut screen = Screen::new(SimKind::BubbleField, 0.0);
        screen.sim_mut().seed(&mut rng, viewport, &palette);
        screen.set_active(false);
        screen.nudge_target(600.0);

        let ages_before: Vec<f64> = match screen.sim() {
            Simulation::BubbleField { bubbles, .. } => bubbles.iter().map(|b| b.age).collect(),
            Simulation::NodeNetwork { .. } => unreachable!(),
        };

        let mut ctx = FrameCtx {
            viewport,
            theme: Theme::Dark,
            palette: &palette,
            surface: &mut surface,
            rng: &mut rng,
        };
        screen.update(1.0, &mut ctx);

        assert_eq!(screen.offset(), 0.0);
        let ages_after: Vec<f64> = match screen.sim() {
            Simulation::BubbleField { bubbles, .. } => bubbles.iter().map(|b| b.age).collect(),
            Simulation::NodeNetwork { .. } => unreachable!(),
        };
        assert_eq!(ages_before, ages_after);
    }

    #[test]
    fn test_offset_clamps_to_target_both_directions() {
        let viewport = Viewport::new(800.0, 600.0);
        let (palette, mut rng, mut surface) = ctx_parts();
        let mut ctx = FrameCtx {
            viewport,
            theme: Theme::Dark,
            palette: &palette,
            surface: &mut surface,
            rng: &mut rng,
        };

        // Upward slide: a full second would cover 1500 px, far past 600.
        let mut screen = Screen::new(SimKind::NodeNetwork, 0.0);
        screen.nudge_target(600.0);
        screen.update(1.0, &mut ctx);
        assert_eq!(screen.offset(), 600.0);

        // Downward slide clamps the same way.
        let mut screen = Screen::new(SimKind::NodeNetwork, 600.0);
        screen.nudge_target(-1200.0);
        screen.update(1.0, &mut ctx);
        assert_eq!(screen.offset(), -600.0);
    }

    #[test]
    fn test_contains_respects_offset_and_margin() {
        let viewport = Viewport::new(800.0, 600.0);
        let screen = Screen::new(SimKind::BubbleField, 0.0);
        assert!(screen.contains(400.0, 300.0, 50.0, viewport));
        assert!(!screen.contains(10.0, 300.0, 50.0, viewport));
        assert!(!screen.contains(400.0, 580.0, 50.0, viewport));

        let mut shifted = Screen::new(SimKind::BubbleField, 0.0);
        shifted.displace(600.0);
        assert!(shifted.contains(400.0, 900.0, 50.0, viewport));
        assert!(!shifted.contains(400.0, 300.0, 50.0, viewport));
    }
}
