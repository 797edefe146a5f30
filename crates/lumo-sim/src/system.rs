//! The orchestrator: two screens, the shared clock, reroll coalescing.

use lumo_core::{SimKind, Theme, Viewport};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    color::Palette,
    render::{FrameCtx, Surface},
    screen::Screen,
};

/// Most rerolls that can stack up behind an in-flight transition.
const MAX_QUEUED_CHANGES: u8 = 3;

/// Construction options for an [`AnimationSystem`].
#[derive(Clone, Debug, Default)]
pub struct SimOptions {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Palette override; `None` uses the built-in neon palettes.
    pub palette: Option<Palette>,
}

/// Owns the whole animation: both screens, the palette, the RNG and the
/// transition state. Single-threaded and infallible; one [`tick`] runs to
/// completion before the next is scheduled by the host.
///
/// [`tick`]: AnimationSystem::tick
pub struct AnimationSystem {
    viewport: Viewport,
    screens: [Screen; 2],
    palette: Palette,
    rng: StdRng,
    changing: bool,
    queued: u8,
}

impl AnimationSystem {
    /// Create both screens, one on stage at offset 0 and one parked a full
    /// height above, the parked one deactivated, each seeded with an
    /// independently chosen simulation.
    pub fn new(viewport: Viewport, options: SimOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let palette = options.palette.unwrap_or_default();

        let mut screens = [
            Screen::new(random_kind(&mut rng), 0.0),
            Screen::new(random_kind(&mut rng), -viewport.height),
        ];
        screens[1].toggle_active();
        for screen in &mut screens {
            screen.sim_mut().seed(&mut rng, viewport, &palette);
        }

        Self {
            viewport,
            screens,
            palette,
            rng,
            changing: false,
            queued: 0,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Store new output dimensions; read from the next tick onward.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn screens(&self) -> &[Screen; 2] {
        &self.screens
    }

    pub fn is_transitioning(&self) -> bool {
        self.changing
    }

    pub fn queued_changes(&self) -> u8 {
        self.queued
    }

    /// Force a reroll: both screens slide down by one viewport height and the
    /// departing one is reseeded on arrival. Safe to call any time between
    /// ticks; while a transition is in flight the request is queued (capped)
    /// instead of compounding the slide.
    pub fn request_change(&mut self) {
        if self.changing {
            self.queued = (self.queued + 1).min(MAX_QUEUED_CHANGES);
            return;
        }
        self.changing = true;
        let height = self.viewport.height;
        for screen in &mut self.screens {
            screen.set_active(true);
            screen.nudge_target(height);
        }
    }

    /// Advance the whole animation by `delta` seconds, drawing onto
    /// `surface`. Screen 1 always updates (and therefore draws) before
    /// screen 2.
    pub fn tick(&mut self, delta: f64, theme: Theme, surface: &mut dyn Surface) {
        {
            let Self { viewport, screens, palette, rng, .. } = self;
            let mut ctx = FrameCtx {
                viewport: *viewport,
                theme,
                palette: &*palette,
                surface,
                rng,
            };
            for screen in screens.iter_mut() {
                screen.update(delta, &mut ctx);
            }
        }

        for i in 0..self.screens.len() {
            if self.screens[i].offset() >= self.viewport.height {
                self.recycle(i);
            }
        }

        // Exact coincidence only arises from the clamp landing both screens
        // on the same target; keep the viewports visually distinct.
        if self.screens[0].offset() == self.screens[1].offset() {
            self.screens[0].displace(self.viewport.height);
        }
    }

    /// A screen has scrolled fully out of view: park it above the viewport,
    /// deactivate it, reseed it with a freshly chosen simulation, and pop one
    /// queued change if any are waiting.
    fn recycle(&mut self, index: usize) {
        let height = self.viewport.height;
        let kind = random_kind(&mut self.rng);
        let screen = &mut self.screens[index];
        screen.reset_offset(-height);
        screen.toggle_active();
        screen.change_sim(kind);
        screen.sim_mut().seed(&mut self.rng, self.viewport, &self.palette);

        self.changing = false;
        if self.queued > 0 {
            self.queued -= 1;
            self.request_change();
        }
    }
}

fn random_kind(rng: &mut StdRng) -> SimKind {
    SimKind::ALL[rng.gen_range(0..SimKind::ALL.len())]
}
