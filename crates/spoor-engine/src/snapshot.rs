//! Owned, immutable copies of a published field.

use spoor_core::{Cell, Position, TickId};
use spoor_space::{Connectivity, GridDims, Neighbourhood};

use crate::views::GridView;

/// Everything the derived views need, detached from the live grid.
///
/// Snapshots are what crosses thread boundaries: the realtime driver
/// publishes one per poll, and readers hold an `Arc` to it for as long as
/// they like without blocking the tick thread.
#[derive(Clone, Debug)]
pub struct FieldSnapshot {
    tick: TickId,
    dims: GridDims,
    scheme: Neighbourhood,
    cells: Vec<Cell>,
    speeds: Vec<f32>,
    fade_time: f32,
    targets: Vec<Position>,
}

impl FieldSnapshot {
    pub(crate) fn new(view: GridView<'_>, tick: TickId, targets: Vec<Position>) -> Self {
        Self {
            tick,
            dims: view.dims,
            scheme: view.scheme.clone(),
            cells: view.cells.to_vec(),
            speeds: view.speeds.to_vec(),
            fade_time: view.fade_time,
            targets,
        }
    }

    /// The tick this snapshot was taken after.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Connectivity scheme in effect.
    pub fn connectivity(&self) -> Connectivity {
        self.scheme.connectivity()
    }

    /// Target positions at the time of the snapshot.
    pub fn targets(&self) -> &[Position] {
        &self.targets
    }

    /// A read-only view over the snapshot.
    pub fn view(&self) -> GridView<'_> {
        GridView {
            dims: self.dims,
            cells: &self.cells,
            speeds: &self.speeds,
            scheme: &self.scheme,
            fade_time: self.fade_time,
        }
    }
}
