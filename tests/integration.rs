// Integration tests (native) for the `sequence-dash` crate.
// These drive the controller with the manual scheduler and a seeded RNG, so
// they run under `cargo test` on the host without any browser APIs.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use sequence_dash::{
    ClickOutcome, Controller, GameConfig, GameError, ManualScheduler, Phase, Scheduler, Task, TaskHandle,
};

fn game(seed: u64) -> Controller<ManualScheduler, StdRng> {
    Controller::new(GameConfig::default(), ManualScheduler::new(), StdRng::seed_from_u64(seed)).unwrap()
}

fn start(count: &str, seed: u64) -> Controller<ManualScheduler, StdRng> {
    let mut c = game(seed);
    c.set_count_input(count);
    assert!(c.press_play().unwrap());
    c
}

fn ids(c: &Controller<ManualScheduler, StdRng>) -> Vec<u32> {
    c.state().targets().iter().map(|t| t.id).collect()
}

#[test]
fn start_places_exactly_n_targets_in_bounds() {
    let cfg = GameConfig::default();
    for (seed, n) in [(1u64, 1u32), (2, 5), (3, 40), (4, 120)] {
        let c = start(&n.to_string(), seed);
        assert_eq!(c.state().phase(), Phase::Playing);
        assert_eq!(ids(&c), (1..=n).collect::<Vec<_>>());
        for t in c.state().targets() {
            assert!(t.x >= 0.0 && t.x < cfg.surface_width - cfg.target_size);
            assert!(t.y >= 0.0 && t.y < cfg.surface_height - cfg.target_size);
        }
    }
}

#[test]
fn zero_or_garbage_count_keeps_idle() {
    for raw in ["0", "", "abc", "-2"] {
        let mut c = game(9);
        c.set_count_input(raw);
        assert!(!c.press_play().unwrap());
        assert_eq!(c.state().phase(), Phase::Idle);
        assert!(c.state().targets().is_empty());
        assert_eq!(c.render_model().button_label, "Play");
    }
}

#[test]
fn oversized_count_leaves_the_round_alone() {
    let mut c = start("2", 10);
    c.click_target(1).unwrap();
    c.set_count_input("4000000000");
    assert!(!c.press_play().unwrap());
    assert_eq!(c.state().phase(), Phase::Playing);
    assert_eq!(c.state().clicked_count(), 1);
    assert_eq!(c.state().target_count(), 2);

    c.set_count_input(&GameConfig::default().max_targets.to_string());
    assert!(c.press_play().unwrap());
    assert_eq!(c.state().targets().len(), 1_000);
}

#[test]
fn ascending_clicks_clear_and_stop_the_clock() {
    let mut c = start("3", 11);
    for id in 1..=3 {
        c.advance(100);
        c.click_target(id).unwrap();
    }
    assert_eq!(c.state().phase(), Phase::Success);
    assert_eq!(c.state().clicked_count(), 3);
    assert!(!c.is_clock_running());
    let frozen = c.state().clock().tenths();
    assert_eq!(frozen, 3);
    c.advance(5_000);
    assert_eq!(c.state().clock().tenths(), frozen);

    let model = c.render_model();
    assert_eq!(model.title.text(), "ALL CLEARED");
    assert_eq!(model.elapsed, "0.3s");
    assert_eq!(model.button_label, "Play");
    // all markers gone once the last flash expires
    assert!(model.markers.is_empty());
}

#[test]
fn skipped_id_is_game_over_and_final() {
    let mut c = start("3", 12);
    assert_eq!(c.click_target(1).unwrap(), ClickOutcome::Advanced { id: 1 });
    assert_eq!(c.click_target(3).unwrap(), ClickOutcome::Missed { id: 3 });
    assert_eq!(c.state().phase(), Phase::GameOver);
    assert_eq!(c.state().clicked_count(), 1);

    // 2 would have been valid before the miss
    assert_eq!(c.click_target(2).unwrap(), ClickOutcome::Ignored);
    assert_eq!(c.state().phase(), Phase::GameOver);
    assert_eq!(c.render_model().title.text(), "GAME OVER");
    assert_eq!(c.render_model().button_label, "Play");
}

#[test]
fn clicked_target_leaves_after_grace_delay_regardless_of_later_clicks() {
    let mut c = start("3", 13);
    c.click_target(1).unwrap();
    c.advance(100);
    c.click_target(2).unwrap();
    assert_eq!(ids(&c), vec![1, 2, 3]);
    c.advance(100);
    assert_eq!(ids(&c), vec![2, 3]);
    assert!(c.state().targets()[0].is_clicked);
    c.advance(100);
    assert_eq!(ids(&c), vec![3]);
}

#[test]
fn removal_still_happens_after_game_over() {
    let mut c = start("4", 14);
    c.click_target(1).unwrap();
    c.click_target(4).unwrap();
    c.advance(200);
    assert_eq!(ids(&c), vec![2, 3, 4]);
}

#[test]
fn terminal_clicks_change_nothing() {
    let mut c = start("2", 15);
    c.advance(300);
    c.click_target(2).unwrap();
    let before = (c.state().phase(), c.state().clicked_count(), c.state().clock().tenths());
    for id in [1, 2, 3, 1] {
        assert_eq!(c.click_target(id).unwrap(), ClickOutcome::Ignored);
        c.advance(100);
    }
    let after = (c.state().phase(), c.state().clicked_count(), c.state().clock().tenths());
    assert_eq!(before, after);
}

#[test]
fn clock_counts_tenths_while_playing() {
    let mut c = start("5", 16);
    c.advance(1_000);
    assert_eq!(c.render_model().elapsed, "1.0s");
    c.advance(250);
    assert_eq!(c.render_model().elapsed, "1.2s");
}

#[test]
fn restart_resets_clock_and_ignores_stale_removals() {
    let mut c = start("2", 17);
    c.advance(400);
    c.click_target(1).unwrap();
    c.advance(50);
    assert!(c.press_play().unwrap());
    assert_eq!(c.state().clock().tenths(), 0);
    assert_eq!(c.state().clicked_count(), 0);
    // the old round's removal of id 1 comes due here
    c.advance(200);
    assert_eq!(ids(&c), vec![1, 2]);
    assert_eq!(c.state().clock().tenths(), 2);
}

// A scheduler that only records calls, to observe cleanup from outside.
#[derive(Default)]
struct CallLog {
    every: Vec<TaskHandle>,
    once: Vec<Task>,
    cancelled: Vec<TaskHandle>,
}

struct RecordingScheduler {
    log: Rc<RefCell<CallLog>>,
    next: i32,
}

impl Scheduler for RecordingScheduler {
    fn schedule_once(&mut self, _delay_ms: u32, task: Task) -> Result<TaskHandle, GameError> {
        self.next += 1;
        self.log.borrow_mut().once.push(task);
        Ok(TaskHandle(self.next))
    }

    fn schedule_every(&mut self, _period_ms: u32, _task: Task) -> Result<TaskHandle, GameError> {
        self.next += 1;
        let handle = TaskHandle(self.next);
        self.log.borrow_mut().every.push(handle);
        Ok(handle)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.log.borrow_mut().cancelled.push(handle);
    }
}

#[test]
fn every_exit_path_cancels_the_tick() {
    let log = Rc::new(RefCell::new(CallLog::default()));
    let scheduler = RecordingScheduler { log: log.clone(), next: 0 };
    let mut c = Controller::new(GameConfig::default(), scheduler, StdRng::seed_from_u64(21)).unwrap();
    c.set_count_input("2");

    // restart while playing
    c.press_play().unwrap();
    c.press_play().unwrap();
    {
        let log = log.borrow();
        assert_eq!(log.every.len(), 2);
        assert_eq!(log.cancelled, vec![log.every[0]]);
    }

    // round ends
    c.click_target(1).unwrap();
    c.click_target(2).unwrap();
    {
        let log = log.borrow();
        assert_eq!(log.cancelled, log.every);
        assert_eq!(
            log.once,
            vec![Task::RemoveTarget { round: 2, id: 1 }, Task::RemoveTarget { round: 2, id: 2 }]
        );
    }

    // teardown mid-round
    c.press_play().unwrap();
    let live = *log.borrow().every.last().unwrap();
    drop(c);
    assert_eq!(log.borrow().cancelled.last(), Some(&live));
    assert_eq!(log.borrow().cancelled.len(), 3);
}
