//! The per-tick propagation rule.
//!
//! Every traversable cell is recomputed from the previous buffer only, so
//! the result does not depend on visiting order. Randomness enters through
//! the scan start of cells that were empty, which is what breaks ties
//! between equally good neighbours.

use rand::Rng;
use spoor_core::{Cell, CellState};
use spoor_space::{GridDims, Neighbourhood};

use crate::config::SimParams;

/// Read-only inputs of one sweep.
pub(crate) struct Sweep<'a> {
    pub(crate) dims: GridDims,
    pub(crate) scheme: &'a Neighbourhood,
    pub(crate) speeds: &'a [f32],
    pub(crate) params: &'a SimParams,
}

impl Sweep<'_> {
    /// Compute `next` from `prev`. `next` must already be all empty.
    pub(crate) fn run<R: Rng + ?Sized>(&self, prev: &[Cell], next: &mut [Cell], rng: &mut R) {
        debug_assert_eq!(prev.len(), self.dims.cell_count());
        debug_assert_eq!(next.len(), prev.len());
        let fade = self.params.fade_time();
        for pos in self.dims.positions() {
            let Some(idx) = self.dims.index_of(pos) else {
                continue;
            };
            let speed = self.speeds[idx];
            if speed.is_nan() || speed <= 0.0 {
                continue;
            }
            let Some((direction, age)) = self.relax(pos.x, pos.y, speed, prev[idx], prev, rng)
            else {
                continue;
            };
            if age <= fade {
                next[idx] = Cell::tracking(direction, age);
            }
        }
    }

    /// Best `(direction, age)` for the traversable cell at `(x, y)`, or
    /// `None` when it stays empty.
    fn relax<R: Rng + ?Sized>(
        &self,
        x: i32,
        y: i32,
        speed: f32,
        current: Cell,
        prev: &[Cell],
        rng: &mut R,
    ) -> Option<(usize, f32)> {
        let n = self.scheme.len();
        match current.state {
            // Sources are re-stamped by target motion, never relaxed.
            CellState::Source => None,
            CellState::Tracking(d) if (d as usize) < n => {
                let d = d as usize;
                let mut best = (d, current.age + 1.0 / speed);
                for i in self.scheme.scan_from(d) {
                    if let Some(t) = self.arrival(x, y, i, speed, prev) {
                        if t < best.1 {
                            best = (i, t);
                        }
                    }
                }
                Some(best)
            }
            CellState::Empty | CellState::Tracking(_) => {
                let start = rng.random_range(0..n);
                let mut best: Option<(usize, f32)> = None;
                for i in self.scheme.scan_from(start) {
                    if let Some(t) = self.arrival(x, y, i, speed, prev) {
                        if best.is_none_or(|(_, b)| t < b) {
                            best = Some((i, t));
                        }
                    }
                }
                best
            }
        }
    }

    /// Candidate age when inheriting from the neighbour in direction `i`,
    /// or `None` if that neighbour is outside, empty or too old.
    fn arrival(&self, x: i32, y: i32, i: usize, speed: f32, prev: &[Cell]) -> Option<f32> {
        let nidx = self.dims.neighbour(x, y, self.scheme.offset(i))?;
        let neighbour = prev[nidx];
        if neighbour.is_empty() || neighbour.age > self.params.flow_time() {
            return None;
        }
        let half_len = 0.5 * self.scheme.length(i);
        Some(neighbour.age + half_len * (1.0 / self.speeds[nidx] + 1.0 / speed))
    }
}
