//! The scheduler and the realtime driver against a real grid.

use std::thread;
use std::time::{Duration, Instant};

use spoor_core::{Position, TickId};
use spoor_engine::{DriverConfig, GridConfig, RealtimeDriver, ScentGrid, SimParams, TickScheduler};

fn open_grid(period: f64) -> ScentGrid {
    let params = SimParams::new(period, 100.0, 100.0).unwrap();
    let mut grid = ScentGrid::new(GridConfig::new(10, 10).with_params(params)).unwrap();
    grid.fill_speed(1.0);
    grid.add_target(Position::new(0, 0), Position::new(9, 9));
    grid
}

#[test]
fn scheduler_runs_whole_periods_on_the_grid() {
    let mut grid = open_grid(0.1);
    let mut s = TickScheduler::new();
    assert_eq!(s.advance(&mut grid, 0.35, 10), 3);
    assert_eq!(grid.tick_id(), TickId(3));
    assert_eq!(grid.targets(), vec![Position::new(3, 3)]);
}

#[test]
fn scheduler_caps_catch_up_after_a_stall() {
    let mut grid = open_grid(0.1);
    let mut s = TickScheduler::new();
    s.start();
    let t0 = Instant::now();
    assert_eq!(s.poll(&mut grid, t0, 10), 0);
    assert_eq!(s.poll(&mut grid, t0 + Duration::from_secs(120), 10), 10);
    assert_eq!(grid.tick_id(), TickId(10));
}

#[test]
fn period_changes_apply_on_the_next_advance() {
    let mut grid = open_grid(0.1);
    let mut s = TickScheduler::new();
    s.advance(&mut grid, 0.1, 0);
    grid.set_period(0.5);
    assert_eq!(s.advance(&mut grid, 1.0, 0), 2);
    assert_eq!(grid.tick_id(), TickId(3));
}

#[test]
fn observers_fire_on_the_driver_thread() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut grid = open_grid(0.002);
    grid.on_tick(move || {
        let _ = tx.send(thread::current().name().map(str::to_owned));
    });

    let driver = RealtimeDriver::start(grid, DriverConfig::default()).unwrap();
    let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(name.as_deref(), Some("spoor-tick"));
    let grid = driver.stop().unwrap();
    assert!(grid.tick_id() > TickId(0));
}

#[test]
fn snapshots_are_published_while_running() {
    let driver = RealtimeDriver::start(
        open_grid(0.002),
        DriverConfig {
            max_ticks_per_poll: 4,
            poll_interval: Some(Duration::from_millis(2)),
        },
    )
    .unwrap();
    let first = driver.latest();
    assert_eq!(first.tick_id(), TickId(0));

    let deadline = Instant::now() + Duration::from_secs(5);
    while driver.tick_id() < TickId(3) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(2));
    }
    let snap = driver.latest();
    assert!(snap.tick_id() >= TickId(3));
    // The earlier snapshot is untouched by later ticks.
    assert_eq!(first.tick_id(), TickId(0));
    assert_eq!(snap.dims(), first.dims());
    for t in snap.targets() {
        assert!(!snap.view().cell(t.x, t.y).unwrap().is_empty());
    }
    drop(driver);
}

#[test]
fn manual_step_after_stop() {
    let driver = RealtimeDriver::start(open_grid(0.002), DriverConfig::default()).unwrap();
    thread::sleep(Duration::from_millis(20));
    let mut grid = driver.stop().unwrap();
    let before = grid.tick_id();
    grid.step();
    grid.step();
    assert_eq!(grid.tick_id(), TickId(before.0 + 2));
}
