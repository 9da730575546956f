//! Targets and the attractors they walk toward.

use spoor_core::{Cell, Position, TargetId};
use spoor_space::GridDims;

/// A moving scent source and the position it walks toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetPair {
    /// Current position; always inside the grid.
    pub target: Position,
    /// Goal; may lie outside the grid, the target then stops at the edge.
    pub attractor: Position,
}

/// Registered target/attractor pairs, in registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct TargetSet {
    pairs: Vec<TargetPair>,
}

impl TargetSet {
    /// Register a pair, clamping the target into `dims`.
    pub(crate) fn add(&mut self, dims: GridDims, target: Position, attractor: Position) -> TargetId {
        let id = TargetId(self.pairs.len() as u32);
        self.pairs.push(TargetPair {
            target: dims.clamp(target),
            attractor,
        });
        id
    }

    pub(crate) fn get_mut(&mut self, id: TargetId) -> Option<&mut TargetPair> {
        self.pairs.get_mut(id.0 as usize)
    }

    pub(crate) fn clear(&mut self) {
        self.pairs.clear();
    }

    pub(crate) fn pairs(&self) -> &[TargetPair] {
        &self.pairs
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.pairs.iter().map(|p| p.target)
    }

    /// Move every target one step toward its attractor, staying in `dims`.
    pub(crate) fn advance(&mut self, dims: GridDims) {
        for pair in &mut self.pairs {
            pair.target = dims.clamp(pair.target.step_toward(pair.attractor));
        }
    }

    /// Mark every target cell as a fresh source. Returns the number of
    /// distinct cells stamped.
    pub(crate) fn stamp(&self, dims: GridDims, cells: &mut [Cell]) -> usize {
        let mut stamped = 0;
        for pos in self.positions() {
            if let Some(idx) = dims.index_of(pos) {
                if cells[idx] != Cell::SOURCE {
                    stamped += 1;
                }
                cells[idx] = Cell::SOURCE;
            }
        }
        stamped
    }
}
