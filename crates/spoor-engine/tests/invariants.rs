//! Property tests for the field invariants over random terrains, seeds and
//! connectivity schemes.

use proptest::prelude::*;
use spoor_core::{CellState, Position};
use spoor_engine::{GridConfig, ScentGrid, SimParams};
use spoor_space::{Connectivity, Neighbourhood};

fn arb_connectivity() -> impl Strategy<Value = Connectivity> {
    prop_oneof![
        Just(Connectivity::Orthogonal4),
        Just(Connectivity::Diagonal4),
        Just(Connectivity::Octile8),
    ]
}

fn arb_speed() -> impl Strategy<Value = f32> {
    prop_oneof![Just(0.0f32), Just(0.25), Just(0.5), Just(1.0), Just(3.0)]
}

#[derive(Clone, Debug)]
struct Scenario {
    width: u32,
    height: u32,
    speeds: Vec<f32>,
    targets: Vec<(Position, Position)>,
    connectivity: Connectivity,
    fade_time: f32,
    flow_time: f32,
    seed: u64,
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (2u32..10, 2u32..10)
        .prop_flat_map(|(w, h)| {
            let n = (w * h) as usize;
            let pos = move || (0..w as i32, 0..h as i32).prop_map(|(x, y)| Position::new(x, y));
            let goal = (-3i32..14, -3i32..14).prop_map(|(x, y)| Position::new(x, y));
            (
                Just(w),
                Just(h),
                prop::collection::vec(arb_speed(), n),
                prop::collection::vec((pos(), goal), 0..3),
                arb_connectivity(),
                0.0f32..12.0,
                0.0f32..12.0,
                any::<u64>(),
            )
        })
        .prop_map(
            |(width, height, speeds, targets, connectivity, fade_time, flow_time, seed)| Scenario {
                width,
                height,
                speeds,
                targets,
                connectivity,
                fade_time,
                flow_time,
                seed,
            },
        )
}

fn build(s: &Scenario) -> ScentGrid {
    let mut params = SimParams::default();
    params.set_fade_time(s.fade_time);
    params.set_flow_time(s.flow_time.min(s.fade_time));
    let config = GridConfig::new(s.width, s.height)
        .with_connectivity(s.connectivity)
        .with_params(params)
        .with_seed(s.seed);
    let mut grid = ScentGrid::new(config).unwrap();
    for (i, p) in grid.dims().positions().enumerate() {
        grid.set_speed(p.x, p.y, s.speeds[i]);
    }
    for &(t, a) in &s.targets {
        grid.add_target(t, a);
    }
    grid
}

fn check_field(grid: &ScentGrid) -> Result<(), TestCaseError> {
    let scheme = Neighbourhood::new(grid.connectivity());
    let fade = grid.params().fade_time();
    for cell in grid.view().cells() {
        match cell.state {
            CellState::Empty | CellState::Source => {
                prop_assert_eq!(cell.age, 0.0);
            }
            CellState::Tracking(d) => {
                prop_assert!(scheme.contains(d as usize));
                prop_assert!(cell.age > 0.0, "tracking cell with age {}", cell.age);
                prop_assert!(cell.age <= fade, "age {} above fade {}", cell.age, fade);
            }
        }
    }
    for t in grid.targets() {
        prop_assert_eq!(grid.view().cell(t.x, t.y).map(|c| c.state), Some(CellState::Source));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn field_invariants_hold_every_tick(s in arb_scenario(), ticks in 1usize..20) {
        let mut grid = build(&s);
        for _ in 0..ticks {
            grid.step();
            check_field(&grid)?;
        }
    }

    #[test]
    fn invariants_survive_scheme_changes(
        s in arb_scenario(),
        switches in prop::collection::vec(arb_connectivity(), 1..4),
    ) {
        let mut grid = build(&s);
        for c in switches {
            for _ in 0..4 {
                grid.step();
            }
            grid.set_connection(c);
            check_field_after_switch(&grid)?;
            grid.step();
            check_field(&grid)?;
        }
    }

    #[test]
    fn stepping_is_deterministic_per_seed(s in arb_scenario(), ticks in 1usize..15) {
        let mut a = build(&s);
        let mut b = build(&s);
        for _ in 0..ticks {
            a.step();
            b.step();
        }
        prop_assert_eq!(a.view().cells(), b.view().cells());
    }

    #[test]
    fn derived_maps_stay_in_range(s in arb_scenario(), ticks in 0usize..10) {
        let mut grid = build(&s);
        for _ in 0..ticks {
            grid.step();
        }
        let view = grid.view();
        for v in view.intensity_map() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
        for a in view.angle_map() {
            prop_assert!(a == -1.0 || (0.0..std::f32::consts::TAU).contains(&a));
        }
        for shade in view.shade_map() {
            prop_assert!((0.0..=1.0).contains(&shade.saturation));
            prop_assert!((0.0..=1.0).contains(&shade.brightness));
        }
    }
}

/// A scheme switch keeps ages and only rewrites directions, so the age
/// bound still holds and every direction fits the new scheme.
fn check_field_after_switch(grid: &ScentGrid) -> Result<(), TestCaseError> {
    let scheme = Neighbourhood::new(grid.connectivity());
    for cell in grid.view().cells() {
        if let CellState::Tracking(d) = cell.state {
            prop_assert!(scheme.contains(d as usize));
        }
    }
    Ok(())
}
