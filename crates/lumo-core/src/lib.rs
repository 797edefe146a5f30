//! Core types shared by the lumo crates.

use serde::{Deserialize, Serialize};

/// Display theme, read by every particle at draw time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Switch between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        self == Theme::Light
    }
}

/// Which simulation a screen is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimKind {
    BubbleField,
    NodeNetwork,
}

impl SimKind {
    pub const ALL: [SimKind; 2] = [SimKind::BubbleField, SimKind::NodeNetwork];

    pub fn name(self) -> &'static str {
        match self {
            SimKind::BubbleField => "bubbles",
            SimKind::NodeNetwork => "network",
        }
    }
}

/// Logical pixel dimensions of the output surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
