//! Round state machine.
//!
//! A round moves `Idle -> Playing -> (Success | GameOver)`. A new start from
//! any phase re-enters `Playing` with fresh targets. This module holds the pure
//! state; scheduling of the clock tick and of marker removal lives in
//! `controller`, which reacts to the outcomes returned here.

use rand::Rng;

use crate::config::GameConfig;

mod input;
mod layout;
mod timer;
pub mod view;

pub use input::{ClickOutcome, parse_count};
pub use layout::{generate_targets, stack_priority};
pub use timer::RoundClock;

/// One numbered marker on the play surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub id: u32,
    /// Top-left corner, surface-local pixels.
    pub x: f64,
    pub y: f64,
    pub is_clicked: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Idle,
    Playing,
    Success,
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Success | Phase::GameOver)
    }
}

/// Runtime round state.
#[derive(Debug)]
pub struct GameState {
    phase: Phase,
    target_count: u32,
    clicked_count: u32,
    clock: RoundClock,
    /// Active markers, ascending by id. Clicked markers stay here until their
    /// removal fires.
    targets: Vec<Target>,
    /// Bumped on every successful start; 0 until the first round.
    round: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            target_count: 0,
            clicked_count: 0,
            clock: RoundClock::new(),
            targets: Vec::new(),
            round: 0,
        }
    }

    /// Begin a round of `count` targets. Returns false (and changes nothing)
    /// when `count` is zero or above `cfg.max_targets`.
    pub fn start<R: Rng + ?Sized>(&mut self, count: u32, cfg: &GameConfig, rng: &mut R) -> bool {
        if count == 0 || count > cfg.max_targets {
            return false;
        }
        self.clock.reset();
        self.clicked_count = 0;
        self.target_count = count;
        self.targets = generate_targets(count, cfg, rng);
        self.round += 1;
        self.phase = Phase::Playing;
        log::info!("round {} started with {} targets", self.round, count);
        true
    }

    /// One clock tick. Only advances while playing.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.clock.advance();
        log::trace!("tick {}", self.clock.display());
        true
    }

    /// Drop a clicked marker once its flash has elapsed. Stale rounds and ids
    /// that are already gone are no-ops.
    pub fn remove_target(&mut self, round: u64, id: u32) -> bool {
        if round != self.round {
            return false;
        }
        let before = self.targets.len();
        self.targets.retain(|t| t.id != id);
        before != self.targets.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn clicked_count(&self) -> u32 {
        self.clicked_count
    }

    pub fn next_expected_id(&self) -> u32 {
        self.clicked_count + 1
    }

    pub fn clock(&self) -> &RoundClock {
        &self.clock
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn has_played(&self) -> bool {
        self.round > 0
    }
}
