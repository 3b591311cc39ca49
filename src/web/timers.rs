// Browser `setTimeout` / `setInterval` scheduler.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::error::GameError;
use crate::scheduler::{Scheduler, Task, TaskHandle};

pub type Dispatch = Rc<dyn Fn(Task)>;

pub struct WebScheduler {
    window: Window,
    dispatch: Dispatch,
    /// Interval closures must outlive their registration; dropped on cancel.
    intervals: HashMap<i32, Closure<dyn FnMut()>>,
    /// Timeouts that have not fired yet. A callback removes its own id.
    timeouts: Rc<RefCell<HashSet<i32>>>,
}

impl WebScheduler {
    pub fn new(window: Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            dispatch,
            intervals: HashMap::new(),
            timeouts: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    pub fn pending_timeouts(&self) -> usize {
        self.timeouts.borrow().len()
    }

    pub fn running_intervals(&self) -> usize {
        self.intervals.len()
    }

    /// Clear every registered timer. Nothing scheduled so far will be
    /// dispatched afterwards.
    pub fn clear_all(&mut self) {
        for (id, _) in self.intervals.drain() {
            self.window.clear_interval_with_handle(id);
        }
        for id in self.timeouts.borrow_mut().drain() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

impl Scheduler for WebScheduler {
    fn schedule_once(&mut self, delay_ms: u32, task: Task) -> Result<TaskHandle, GameError> {
        let dispatch = self.dispatch.clone();
        let timeouts = self.timeouts.clone();
        let slot = Rc::new(Cell::new(0));
        let own_id = slot.clone();
        // One-shot closures free themselves after running.
        let callback = Closure::once_into_js(move || {
            timeouts.borrow_mut().remove(&own_id.get());
            dispatch(task)
        });
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout_arg(delay_ms))?;
        slot.set(id);
        self.timeouts.borrow_mut().insert(id);
        Ok(TaskHandle(id))
    }

    fn schedule_every(&mut self, period_ms: u32, task: Task) -> Result<TaskHandle, GameError> {
        let dispatch = self.dispatch.clone();
        let closure = Closure::wrap(Box::new(move || dispatch(task)) as Box<dyn FnMut()>);
        let id = self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timeout_arg(period_ms),
        )?;
        self.intervals.insert(id, closure);
        Ok(TaskHandle(id))
    }

    fn cancel(&mut self, handle: TaskHandle) {
        if self.intervals.remove(&handle.0).is_some() {
            self.window.clear_interval_with_handle(handle.0);
        } else if self.timeouts.borrow_mut().remove(&handle.0) {
            self.window.clear_timeout_with_handle(handle.0);
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        // Pending removals belong to this game; a remounted game must not see them.
        self.clear_all();
    }
}

fn timeout_arg(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}
