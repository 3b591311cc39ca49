//! Owns the round state and turns its outcomes into timer side effects.
//!
//! Invariant: a tick schedule exists only while the phase is `Playing`. It is
//! cancelled when a click ends the round, before a restart arms a new one, and
//! when the controller is dropped.

use rand::Rng;

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::view::RenderModel;
use crate::game::{ClickOutcome, GameState, parse_count};
use crate::scheduler::{ManualScheduler, Scheduler, Task, TaskHandle};

pub struct Controller<S: Scheduler, R: Rng> {
    config: GameConfig,
    state: GameState,
    scheduler: S,
    rng: R,
    /// Last parsed value of the count field.
    count: u32,
    tick_handle: Option<TaskHandle>,
}

impl<S: Scheduler, R: Rng> Controller<S, R> {
    pub fn new(config: GameConfig, scheduler: S, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::new(),
            scheduler,
            rng,
            count: 0,
            tick_handle: None,
        })
    }

    /// Store the count field's raw text; returns the parsed count.
    pub fn set_count_input(&mut self, raw: &str) -> u32 {
        self.count = parse_count(raw);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Play / Restart. Returns whether a round was started; a zero or
    /// oversized count leaves everything as it was.
    pub fn press_play(&mut self) -> Result<bool, GameError> {
        if self.count > self.config.max_targets {
            log::warn!("count {} exceeds the limit of {}; ignoring", self.count, self.config.max_targets);
            return Ok(false);
        }
        if !self.state.start(self.count, &self.config, &mut self.rng) {
            log::debug!("play pressed with zero count; ignoring");
            return Ok(false);
        }
        self.stop_clock();
        let handle = self.scheduler.schedule_every(self.config.tick_ms, Task::Tick)?;
        self.tick_handle = Some(handle);
        Ok(true)
    }

    pub fn click_target(&mut self, id: u32) -> Result<ClickOutcome, GameError> {
        let outcome = self.state.click(id);
        if outcome.ends_round() {
            self.stop_clock();
        }
        if let Some(id) = outcome.marked() {
            let task = Task::RemoveTarget { round: self.state.round(), id };
            self.scheduler.schedule_once(self.config.removal_delay_ms, task)?;
        }
        Ok(outcome)
    }

    /// Deliver a fired schedule.
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::Tick => {
                if !self.state.tick() {
                    // A tick raced past a cancel; make sure nothing keeps firing.
                    self.stop_clock();
                }
            }
            Task::RemoveTarget { round, id } => {
                if self.state.remove_target(round, id) {
                    log::debug!("removed target {} from round {}", id, round);
                }
            }
        }
    }

    pub fn render_model(&self) -> RenderModel {
        RenderModel::build(&self.state, &self.config)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_clock_running(&self) -> bool {
        self.tick_handle.is_some()
    }

    fn stop_clock(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
            if self.state.phase().is_terminal() {
                log::debug!("clock stopped at {}", self.state.clock().display());
            }
        }
    }
}

impl<R: Rng> Controller<ManualScheduler, R> {
    /// Advance virtual time by `ms`, running every task that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.settle(until);
    }
}

impl<S: Scheduler, R: Rng> Drop for Controller<S, R> {
    fn drop(&mut self) {
        self.stop_clock();
    }
}
