//! Realtime scent propagation on a random maze.
//!
//! Demonstrates: config → ScentGrid → randomize → RealtimeDriver → read
//! snapshots → stop → manual step. Run with `RUST_LOG=spoor_engine=debug`
//! to see the engine's log output.

use std::thread;
use std::time::Duration;

use spoor_core::Position;
use spoor_engine::{DriverConfig, GridConfig, RealtimeDriver, ScentGrid, SimParams};
use tracing_subscriber::EnvFilter;

fn render(view: spoor_engine::GridView<'_>) -> String {
    let mut out = String::new();
    let intensity = view.intensity_map();
    for y in 0..view.height() as i32 {
        for x in 0..view.width() as i32 {
            let i = (y * view.width() as i32 + x) as usize;
            let ch = if view.speed(x, y) == 0.0 {
                '#'
            } else if intensity[i] >= 1.0 {
                ' '
            } else if intensity[i] < 0.1 {
                '@'
            } else if intensity[i] < 0.3 {
                'o'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    println!("=== Spoor Quickstart ===\n");

    let params = SimParams::new(0.02, 40.0, 40.0).unwrap();
    let config = GridConfig::new(40, 20).with_params(params).with_seed(42);
    let mut grid = ScentGrid::new(config).unwrap();
    grid.add_target(Position::new(3, 3), Position::new(36, 16));
    grid.randomize(0.3);

    let driver = RealtimeDriver::start(grid, DriverConfig::default()).unwrap();
    for _ in 0..3 {
        thread::sleep(Duration::from_millis(250));
        let snap = driver.latest();
        println!("tick {}", snap.tick_id());
        println!("{}", render(snap.view()));
    }

    let mut grid = driver.stop().unwrap();
    grid.step();
    let m = grid.last_metrics();
    println!(
        "stopped at tick {}: {} active cells, sweep {} us",
        grid.tick_id(),
        m.active_cells,
        m.sweep_us
    );
    if let Some(probe) = grid.view().probe(20, 10) {
        println!("{probe}");
    }
}
