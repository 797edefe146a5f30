//! Neon background animation core.
//!
//! Two independently scrolling viewports ([`Screen`]) each run one of two
//! particle simulations (a drifting bubble field or a glowing node network)
//! and are swapped through vertical slide transitions by the
//! [`AnimationSystem`]. Drawing goes through the [`Surface`] trait, so the
//! crate has no opinion about what the output device is.

mod bubble;
mod color;
mod math;
mod node;
mod render;
mod screen;
mod system;

pub use bubble::Bubble;
pub use color::{DARK_PALETTE, LIGHT_PALETTE, Palette, Rgba, parse_css, transparent_variant};
pub use math::{CONNECT_DIST, SCROLL_SPEED, Wrap, ease_out_lerp, sigmoid, time_decay, wrapped_distance};
pub use node::Node;
pub use render::{FrameCtx, NullSurface, Surface};
pub use screen::{Screen, Simulation};
pub use system::{AnimationSystem, SimOptions};
