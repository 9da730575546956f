//! The scent-field engine.
//!
//! [`ScentGrid`] is the single writer of the cost field, the scent field and
//! the target set. Every mutating method takes `&mut self`, so a grid being
//! stepped by the [`RealtimeDriver`](crate::RealtimeDriver) can not be touched
//! by anyone else: the driver owns it until it is stopped.
//!
//! # One tick
//!
//! 1. Every target steps one cell toward its attractor and is stamped as a
//!    fresh source into the published field, so the sweep sees it this tick.
//! 2. The propagation sweep computes a complete new field from the published
//!    one into the staging buffer.
//! 3. Targets are re-stamped into the new field, the buffers swap and the
//!    tick counter advances.
//! 4. Tick observers run, in registration order.

use std::fmt;
use std::time::Instant;

use indexmap::IndexMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use spoor_core::{Cell, CellState, ObserverId, Position, TargetId, TickId, Tickable};
use spoor_space::{Connectivity, GridDims, Neighbourhood};
use tracing::{debug, trace, warn};

use crate::brush::Brush;
use crate::config::{ConfigError, GridConfig, SimParams};
use crate::field::FieldState;
use crate::metrics::StepMetrics;
use crate::motion::{TargetPair, TargetSet};
use crate::snapshot::FieldSnapshot;
use crate::sweep::Sweep;
use crate::views::GridView;

type Observer = Box<dyn FnMut() + Send>;

// Compile-time assertion: the grid can be handed to the tick thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<ScentGrid>();
    }
};

/// A 2D cost grid with moving scent sources and a propagating scent field.
///
/// # Example
///
/// ```
/// use spoor_core::Position;
/// use spoor_engine::{GridConfig, ScentGrid};
///
/// let mut grid = ScentGrid::new(GridConfig::new(16, 16).with_seed(7)).unwrap();
/// grid.fill_speed(1.0);
/// grid.add_target(Position::new(2, 2), Position::new(12, 9));
/// for _ in 0..20 {
///     grid.step();
/// }
/// assert_eq!(grid.targets(), vec![Position::new(12, 9)]);
/// assert_ne!(grid.direction_label(5, 5), "none");
/// ```
pub struct ScentGrid {
    state: FieldState,
    scheme: Neighbourhood,
    params: SimParams,
    targets: TargetSet,
    observers: IndexMap<ObserverId, Observer>,
    next_observer: u64,
    rng: ChaCha8Rng,
    seed: u64,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl ScentGrid {
    /// Create a grid with every cell impassable and empty and no targets.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        let dims = config.validate()?;
        debug!(
            width = dims.width(),
            height = dims.height(),
            connectivity = %config.connectivity,
            seed = config.seed,
            "grid created"
        );
        Ok(Self {
            state: FieldState::new(dims),
            scheme: Neighbourhood::new(config.connectivity),
            params: config.params,
            targets: TargetSet::default(),
            observers: IndexMap::new(),
            next_observer: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            seed: config.seed,
            tick: TickId::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Structure ──────────────────────────────────────────────

    /// Replace the grid with a fresh `width x height` one.
    ///
    /// Every speed becomes 0, every cell empty, all targets are dropped and
    /// the tick counter restarts at 0. Observers, parameters, the scheme and
    /// the random stream are kept. On error the grid is left untouched.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        let dims = GridDims::new(width, height)?;
        self.state = FieldState::new(dims);
        self.targets.clear();
        self.tick = TickId::default();
        self.last_metrics = StepMetrics::default();
        debug!(width, height, "grid resized");
        Ok(())
    }

    /// Switch connectivity scheme.
    ///
    /// Direction indices of the old scheme mean nothing in the new one, so
    /// every tracking cell gets a uniformly random direction of the new
    /// scheme. Ages are kept.
    pub fn set_connection(&mut self, connectivity: Connectivity) {
        self.scheme = Neighbourhood::new(connectivity);
        let n = self.scheme.len();
        let mut reassigned = 0usize;
        for cell in self.state.buffers.current_mut() {
            if let CellState::Tracking(_) = cell.state {
                *cell = Cell::tracking(self.rng.random_range(0..n), cell.age);
                reassigned += 1;
            }
        }
        debug!(%connectivity, reassigned, "connectivity changed");
    }

    /// Active connectivity scheme.
    pub fn connectivity(&self) -> Connectivity {
        self.scheme.connectivity()
    }

    // ── Terrain ────────────────────────────────────────────────

    /// Set the speed of one cell. Out-of-range coordinates are ignored;
    /// negative and NaN speeds are stored as 0.
    pub fn set_speed(&mut self, x: i32, y: i32, speed: f32) {
        if let Some(i) = self.state.dims.index(x, y) {
            self.state.speeds[i] = sanitize_speed(speed);
        }
    }

    /// Set every cell to the same speed.
    pub fn fill_speed(&mut self, speed: f32) {
        self.state.speeds.fill(sanitize_speed(speed));
    }

    /// Apply `speed` to every in-range cell under `brush` centered at
    /// `center`.
    pub fn paint(&mut self, center: Position, brush: Brush, speed: f32) {
        for o in brush.footprint() {
            let p = center.offset(o.dx, o.dy);
            self.set_speed(p.x, p.y, speed);
        }
    }

    /// Generate a random maze-like terrain.
    ///
    /// Border cells become impassable. Each interior cell is impassable with
    /// probability `p` and has speed 1 otherwise. Finally every target cell
    /// and its four orthogonal neighbours are set to speed 1 so no target
    /// starts walled in. `p` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn randomize(&mut self, p: f32) {
        let p = if p.is_nan() {
            warn!("ignoring NaN wall probability, using 0");
            0.0
        } else {
            p.clamp(0.0, 1.0)
        };
        let dims = self.state.dims;
        for (i, pos) in dims.positions().enumerate() {
            self.state.speeds[i] = if dims.is_border(pos.x, pos.y) {
                0.0
            } else if self.rng.random::<f32>() < p {
                0.0
            } else {
                1.0
            };
        }
        let targets: Vec<Position> = self.targets.positions().collect();
        for t in targets {
            self.paint(t, Brush::Plus, 1.0);
        }
        debug!(p, "terrain randomized");
    }

    // ── Targets ────────────────────────────────────────────────

    /// Register a target and the attractor it walks toward. The target is
    /// clamped into the grid; the attractor may lie anywhere.
    pub fn add_target(&mut self, target: Position, attractor: Position) -> TargetId {
        let id = self.targets.add(self.state.dims, target, attractor);
        debug!(%id, %target, %attractor, "target registered");
        id
    }

    /// Teleport a target, clamped into the grid. Returns `false` for an
    /// unknown id.
    pub fn set_target(&mut self, id: TargetId, target: Position) -> bool {
        let dims = self.state.dims;
        match self.targets.get_mut(id) {
            Some(pair) => {
                pair.target = dims.clamp(target);
                true
            }
            None => false,
        }
    }

    /// Move the attractor of a target. Returns `false` for an unknown id.
    pub fn set_attractor(&mut self, id: TargetId, attractor: Position) -> bool {
        match self.targets.get_mut(id) {
            Some(pair) => {
                pair.attractor = attractor;
                true
            }
            None => false,
        }
    }

    /// Current target positions, in registration order.
    pub fn targets(&self) -> Vec<Position> {
        self.targets.positions().collect()
    }

    /// Every target with its attractor, in registration order.
    pub fn target_pairs(&self) -> &[TargetPair] {
        self.targets.pairs()
    }

    // ── Parameters ─────────────────────────────────────────────

    /// Current timing parameters.
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// See [`SimParams::set_period`].
    pub fn set_period(&mut self, period: f64) {
        self.params.set_period(period);
    }

    /// See [`SimParams::set_fade_time`].
    pub fn set_fade_time(&mut self, fade_time: f32) {
        self.params.set_fade_time(fade_time);
    }

    /// See [`SimParams::set_flow_time`].
    pub fn set_flow_time(&mut self, flow_time: f32) {
        self.params.set_flow_time(flow_time);
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// The seed the random stream was last started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    // ── Stepping ───────────────────────────────────────────────

    /// Execute one tick: target motion, propagation sweep, swap, observers.
    pub fn step(&mut self) {
        let start = Instant::now();
        let dims = self.state.dims;

        self.targets.advance(dims);
        self.targets.stamp(dims, self.state.buffers.current_mut());

        let sweep_start = Instant::now();
        let FieldState {
            speeds, buffers, ..
        } = &mut self.state;
        let (prev, next) = buffers.stage();
        Sweep {
            dims,
            scheme: &self.scheme,
            speeds: speeds.as_slice(),
            params: &self.params,
        }
        .run(prev, next, &mut self.rng);
        let sweep_us = sweep_start.elapsed().as_micros() as u64;

        let sources = self.targets.stamp(dims, next);
        let active_cells = next.iter().filter(|c| !c.is_empty()).count();
        buffers.publish();
        self.tick = self.tick.next();

        self.last_metrics = StepMetrics {
            sweep_us,
            total_us: start.elapsed().as_micros() as u64,
            active_cells,
            sources,
        };

        for observer in self.observers.values_mut() {
            observer();
        }
        trace!(
            tick = self.tick.0,
            active_cells,
            sources,
            sweep_us,
            "tick complete"
        );
    }

    /// Number of ticks completed since construction or the last resize.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Counters of the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    // ── Observers ──────────────────────────────────────────────

    /// Register a callback run once after every completed tick.
    ///
    /// Observers get no payload; they re-read state through the grid's
    /// queries or a snapshot. When the grid is driven by a
    /// [`RealtimeDriver`](crate::RealtimeDriver) they run on its thread.
    pub fn on_tick<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut() + Send + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, Box::new(observer));
        id
    }

    /// Unregister a callback. Returns `false` if `id` is not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.shift_remove(&id).is_some()
    }

    // ── Queries ────────────────────────────────────────────────

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.state.dims.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.state.dims.height()
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.state.dims
    }

    /// Read-only view of the published field.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            dims: self.state.dims,
            cells: self.state.buffers.current(),
            speeds: &self.state.speeds,
            scheme: &self.scheme,
            fade_time: self.params.fade_time(),
        }
    }

    /// Speed at `(x, y)`, `-1` out of range.
    pub fn speed(&self, x: i32, y: i32) -> f32 {
        self.view().speed(x, y)
    }

    /// Scent age at `(x, y)`, `-1` out of range.
    pub fn age(&self, x: i32, y: i32) -> f32 {
        self.view().age(x, y)
    }

    /// Direction label at `(x, y)`, `"none"` where there is no direction.
    pub fn direction_label(&self, x: i32, y: i32) -> String {
        self.view().direction_label(x, y)
    }

    /// See [`GridView::intensity_map`].
    pub fn intensity_map(&self) -> Vec<f32> {
        self.view().intensity_map()
    }

    /// See [`GridView::angle_map`].
    pub fn angle_map(&self) -> Vec<f32> {
        self.view().angle_map()
    }

    /// An owned copy of the published field.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::new(self.view(), self.tick, self.targets())
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        0.0
    } else {
        speed.max(0.0)
    }
}

impl Tickable for ScentGrid {
    fn period(&self) -> f64 {
        self.params.period()
    }

    fn tick(&mut self) {
        self.step();
    }
}

impl fmt::Debug for ScentGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScentGrid")
            .field("dims", &self.state.dims)
            .field("connectivity", &self.scheme.connectivity())
            .field("params", &self.params)
            .field("targets", &self.targets.pairs())
            .field("observers", &self.observers.len())
            .field("seed", &self.seed)
            .field("tick", &self.tick)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn open_grid(w: u32, h: u32, seed: u64) -> ScentGrid {
        let mut g = ScentGrid::new(GridConfig::new(w, h).with_seed(seed)).unwrap();
        g.fill_speed(1.0);
        g
    }

    #[test]
    fn new_grid_is_impassable_and_empty() {
        let g = ScentGrid::new(GridConfig::new(4, 3)).unwrap();
        assert_eq!((g.width(), g.height()), (4, 3));
        assert_eq!(g.speed(3, 2), 0.0);
        assert_eq!(g.age(0, 0), 0.0);
        assert!(g.intensity_map().iter().all(|&v| v == 1.0));
        assert_eq!(g.tick_id(), TickId(0));
    }

    #[test]
    fn new_rejects_zero_size() {
        assert!(ScentGrid::new(GridConfig::new(0, 3)).is_err());
    }

    #[test]
    fn set_size_resets_everything_but_observers() {
        let mut g = open_grid(5, 5, 1);
        g.add_target(Position::new(1, 1), Position::new(3, 3));
        g.step();
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        g.on_tick(move || {
            h.fetch_add(1, Ordering::Relaxed);
        });

        g.set_size(3, 2).unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert!(g.targets().is_empty());
        assert_eq!(g.tick_id(), TickId(0));
        assert_eq!(g.speed(0, 0), 0.0);

        g.step();
        assert_eq!(hits.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn set_size_error_leaves_grid_untouched() {
        let mut g = open_grid(5, 5, 1);
        assert!(g.set_size(0, 4).is_err());
        assert_eq!(g.width(), 5);
        assert_eq!(g.speed(2, 2), 1.0);
    }

    #[test]
    fn speed_writes_are_sanitized_and_bounded() {
        let mut g = open_grid(3, 3, 0);
        g.set_speed(1, 1, -2.0);
        assert_eq!(g.speed(1, 1), 0.0);
        g.set_speed(0, 0, f32::NAN);
        assert_eq!(g.speed(0, 0), 0.0);
        g.set_speed(7, 7, 3.0); // ignored
        assert_eq!(g.speed(7, 7), -1.0);
    }

    #[test]
    fn paint_skips_out_of_range_cells() {
        let mut g = ScentGrid::new(GridConfig::new(4, 4)).unwrap();
        g.paint(Position::new(0, 0), Brush::Disk, 0.5);
        let painted = (0..4)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| g.speed(x, y) == 0.5)
            .count();
        // (0,0) (1,0) (0,1) (1,1) (2,0) (0,2)
        assert_eq!(painted, 6);
    }

    #[test]
    fn first_step_seeds_the_target_neighbourhood() {
        let mut g = open_grid(5, 5, 3);
        g.add_target(Position::new(2, 2), Position::new(2, 2));
        g.step();
        assert_eq!(g.view().cell(2, 2), Some(Cell::SOURCE));
        assert_eq!(g.age(2, 3), 1.0);
        assert_eq!(g.direction_label(2, 3), "[0,-1]");
        assert_eq!(g.last_metrics().sources, 1);
        assert_eq!(g.last_metrics().active_cells, 9);
    }

    #[test]
    fn source_on_impassable_cell_is_still_stamped() {
        let mut g = ScentGrid::new(GridConfig::new(3, 3)).unwrap();
        g.add_target(Position::new(1, 1), Position::new(1, 1));
        g.step();
        assert_eq!(g.view().cell(1, 1), Some(Cell::SOURCE));
        assert_eq!(g.last_metrics().active_cells, 1);
    }

    #[test]
    fn vacated_source_cells_are_cleared() {
        let mut g = open_grid(6, 1, 0);
        g.add_target(Position::new(0, 0), Position::new(5, 0));
        g.step();
        g.step();
        let v = g.view();
        assert_eq!(v.cell(2, 0), Some(Cell::SOURCE));
        assert_eq!(v.cell(1, 0), Some(Cell::EMPTY));
        assert_eq!(v.cell(3, 0).unwrap().state, CellState::Tracking(3));
        assert_eq!(g.targets(), vec![Position::new(2, 0)]);
    }

    #[test]
    fn set_connection_reassigns_tracking_directions() {
        let mut g = open_grid(7, 7, 11);
        g.add_target(Position::new(3, 3), Position::new(3, 3));
        for _ in 0..4 {
            g.step();
        }
        let before = g.view().cells().to_vec();
        g.set_connection(Connectivity::Diagonal4);
        assert_eq!(g.connectivity(), Connectivity::Diagonal4);
        for (old, new) in before.iter().zip(g.view().cells()) {
            assert_eq!(old.age, new.age);
            match new.state {
                CellState::Tracking(d) => assert!(d < 4),
                other => assert_eq!(other, old.state),
            }
        }
    }

    #[test]
    fn observers_run_in_registration_order_once_per_tick() {
        let mut g = open_grid(3, 3, 0);
        let log = Arc::new(Mutex::new(Vec::new()));
        let a = Arc::clone(&log);
        let b = Arc::clone(&log);
        g.on_tick(move || a.lock().unwrap().push('a'));
        let id_b = g.on_tick(move || b.lock().unwrap().push('b'));
        g.step();
        g.step();
        assert_eq!(*log.lock().unwrap(), vec!['a', 'b', 'a', 'b']);

        assert!(g.remove_observer(id_b));
        assert!(!g.remove_observer(id_b));
        g.step();
        assert_eq!(log.lock().unwrap().len(), 5);
    }

    #[test]
    fn target_editing() {
        let mut g = open_grid(5, 5, 0);
        let id = g.add_target(Position::new(0, 0), Position::new(0, 0));
        assert!(g.set_target(id, Position::new(9, 2)));
        assert!(g.set_attractor(id, Position::new(4, 0)));
        assert_eq!(g.targets(), vec![Position::new(4, 2)]);
        assert_eq!(g.target_pairs()[0].attractor, Position::new(4, 0));
        assert!(!g.set_target(TargetId(3), Position::new(1, 1)));
    }

    #[test]
    fn randomize_all_walls_keeps_target_cross_open() {
        let mut g = ScentGrid::new(GridConfig::new(7, 7)).unwrap();
        g.add_target(Position::new(3, 3), Position::new(3, 3));
        g.randomize(1.0);
        for y in 0..7 {
            for x in 0..7 {
                let open = (x == 3 && (2..=4).contains(&y)) || (y == 3 && (2..=4).contains(&x));
                assert_eq!(g.speed(x, y), if open { 1.0 } else { 0.0 }, "({x},{y})");
            }
        }
    }

    #[test]
    fn randomize_clamps_probability() {
        let mut g = ScentGrid::new(GridConfig::new(5, 5)).unwrap();
        g.randomize(-4.0);
        assert_eq!(g.speed(2, 2), 1.0);
        assert_eq!(g.speed(0, 2), 0.0);
        g.randomize(f32::NAN);
        assert_eq!(g.speed(1, 1), 1.0);
    }

    #[test]
    fn reseed_restarts_the_stream() {
        let mut a = ScentGrid::new(GridConfig::new(12, 12).with_seed(1)).unwrap();
        let mut b = ScentGrid::new(GridConfig::new(12, 12).with_seed(2)).unwrap();
        b.reseed(1);
        assert_eq!(b.seed(), 1);
        a.randomize(0.4);
        b.randomize(0.4);
        assert_eq!(a.view().brightness_map(), b.view().brightness_map());
    }

    #[test]
    fn tickable_delegates_to_step() {
        let mut g = open_grid(3, 3, 0);
        g.set_period(0.25);
        assert_eq!(Tickable::period(&g), 0.25);
        Tickable::tick(&mut g);
        assert_eq!(g.tick_id(), TickId(1));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut g = open_grid(4, 4, 0);
        g.add_target(Position::new(1, 1), Position::new(1, 1));
        g.step();
        let snap = g.snapshot();
        g.step();
        g.step();
        assert_eq!(snap.tick_id(), TickId(1));
        assert_eq!(snap.targets(), &[Position::new(1, 1)]);
        assert_eq!(snap.view().age(1, 2), 1.0);
        assert_eq!(g.tick_id(), TickId(3));
    }
}
