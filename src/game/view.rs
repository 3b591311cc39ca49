//! Data contract between the round state and whatever draws it.

use super::{GameState, Phase, stack_priority};
use crate::config::GameConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Title {
    LetsPlay,
    AllCleared,
    GameOver,
}

impl Title {
    pub fn for_phase(phase: Phase) -> Self {
        match phase {
            Phase::Success => Title::AllCleared,
            Phase::GameOver => Title::GameOver,
            Phase::Idle | Phase::Playing => Title::LetsPlay,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Title::LetsPlay => "LET'S PLAY",
            Title::AllCleared => "ALL CLEARED",
            Title::GameOver => "GAME OVER",
        }
    }

    /// CSS color for the heading.
    pub fn color(self) -> &'static str {
        match self {
            Title::LetsPlay => "inherit",
            Title::AllCleared => "#15803d",
            Title::GameOver => "#b91c1c",
        }
    }
}

/// A marker ready to draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Marker {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub z_index: i32,
    pub clicked: bool,
}

impl Marker {
    pub fn fill(&self) -> &'static str {
        if self.clicked { "#ef4444" } else { "#ffffff" }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderModel {
    pub title: Title,
    pub elapsed: String,
    pub button_label: &'static str,
    pub markers: Vec<Marker>,
}

impl RenderModel {
    pub fn build(state: &GameState, cfg: &GameConfig) -> Self {
        let markers = state
            .targets()
            .iter()
            .map(|t| Marker {
                id: t.id,
                x: t.x,
                y: t.y,
                size: cfg.target_size,
                z_index: stack_priority(t.id, cfg.max_stack_priority),
                clicked: t.is_clicked,
            })
            .collect();
        Self {
            title: Title::for_phase(state.phase()),
            elapsed: state.clock().display(),
            button_label: if state.phase() == Phase::Playing { "Restart" } else { "Play" },
            markers,
        }
    }
}
