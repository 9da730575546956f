//! Owned per-grid state: dimensions, cost field and the ping-pong cell
//! buffers.

use spoor_core::Cell;
use spoor_space::GridDims;

/// Double-buffered scent field.
///
/// The front buffer is the published state. A tick reads the front,
/// writes a fully reset back buffer, then swaps.
#[derive(Clone, Debug)]
pub(crate) struct FieldBuffers {
    front: Vec<Cell>,
    back: Vec<Cell>,
}

impl FieldBuffers {
    pub(crate) fn new(cell_count: usize) -> Self {
        Self {
            front: vec![Cell::EMPTY; cell_count],
            back: vec![Cell::EMPTY; cell_count],
        }
    }

    pub(crate) fn current(&self) -> &[Cell] {
        &self.front
    }

    pub(crate) fn current_mut(&mut self) -> &mut [Cell] {
        &mut self.front
    }

    /// Borrow the published buffer for reading and a cleared staging
    /// buffer for writing.
    pub(crate) fn stage(&mut self) -> (&[Cell], &mut [Cell]) {
        self.back.fill(Cell::EMPTY);
        (&self.front, &mut self.back)
    }

    /// Make the staging buffer the published one.
    pub(crate) fn publish(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

/// Everything that is replaced wholesale by a resize.
#[derive(Clone, Debug)]
pub(crate) struct FieldState {
    pub(crate) dims: GridDims,
    pub(crate) speeds: Vec<f32>,
    pub(crate) buffers: FieldBuffers,
}

impl FieldState {
    /// A grid with every speed 0 and every cell empty.
    pub(crate) fn new(dims: GridDims) -> Self {
        let n = dims.cell_count();
        Self {
            dims,
            speeds: vec![0.0; n],
            buffers: FieldBuffers::new(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoor_core::CellState;

    #[test]
    fn stage_clears_back_and_publish_swaps() {
        let mut b = FieldBuffers::new(3);
        b.current_mut()[1] = Cell::SOURCE;
        {
            let (prev, next) = b.stage();
            assert_eq!(prev[1].state, CellState::Source);
            assert!(next.iter().all(Cell::is_empty));
            next[2] = Cell::tracking(0, 1.5);
        }
        b.publish();
        assert!(b.current()[1].is_empty());
        assert_eq!(b.current()[2], Cell::tracking(0, 1.5));

        // The old front is now the back and gets cleared on the next stage.
        let (prev, next) = b.stage();
        assert_eq!(prev[2].age, 1.5);
        assert!(next.iter().all(Cell::is_empty));
    }

    #[test]
    fn fresh_state_is_impassable_and_empty() {
        let s = FieldState::new(GridDims::new(4, 2).unwrap());
        assert_eq!(s.speeds.len(), 8);
        assert!(s.speeds.iter().all(|&v| v == 0.0));
        assert!(s.buffers.current().iter().all(Cell::is_empty));
    }
}
