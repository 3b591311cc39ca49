//! Cancellable scheduled tasks.
//!
//! The controller never calls browser timers directly. It asks a `Scheduler`
//! for one-shot or periodic delivery of a `Task` and keeps the returned
//! handle if it may need to cancel. The browser implementation lives in
//! `web::timers`; `ManualScheduler` is a virtual clock for native tests.

use crate::error::GameError;

/// Work delivered back to the controller when a schedule fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Advance the round clock by one tenth.
    Tick,
    /// Drop a clicked marker from the given round.
    RemoveTarget { round: u64, id: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub i32);

pub trait Scheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> Result<TaskHandle, GameError>;
    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Result<TaskHandle, GameError>;
    /// Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}

struct Entry {
    handle: TaskHandle,
    due_ms: u64,
    period_ms: Option<u64>,
    task: Task,
}

/// Deterministic scheduler driven by explicit time advancement.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_handle: i32,
    entries: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of schedules still pending (periodic ones count until cancelled).
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock to
    /// its due time. Ties fire in scheduling order. Periodic entries are
    /// re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.handle.0))
            .map(|(idx, _)| idx)?;
        let (due_ms, period_ms, task) = {
            let entry = &self.entries[idx];
            (entry.due_ms, entry.period_ms, entry.task)
        };
        self.now_ms = self.now_ms.max(due_ms);
        match period_ms {
            Some(period) => self.entries[idx].due_ms += period,
            None => {
                self.entries.remove(idx);
            }
        }
        Some(task)
    }

    /// Move the clock forward without firing anything; used once all due
    /// tasks up to `until_ms` have been drained.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn push(&mut self, delay_ms: u32, period_ms: Option<u64>, task: Task) -> TaskHandle {
        self.next_handle += 1;
        let handle = TaskHandle(self.next_handle);
        self.entries.push(Entry {
            handle,
            due_ms: self.now_ms + delay_ms as u64,
            period_ms,
            task,
        });
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> Result<TaskHandle, GameError> {
        Ok(self.push(delay_ms, None, task))
    }

    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Result<TaskHandle, GameError> {
        // A zero period would never let time advance.
        let period = (period_ms as u64).max(1);
        Ok(self.push(period_ms.max(1), Some(period), task))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|e| e.handle != handle);
    }
}
