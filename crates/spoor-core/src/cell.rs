//! Per-cell propagation state.
//!
//! A cell is either empty, tracking a direction of the active connectivity
//! scheme, or marking a target's current position for the tick in which it
//! was occupied. The age is only meaningful for non-empty cells and is kept
//! at zero for empty ones.

/// What a cell currently knows about the scent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    /// No scent.
    #[default]
    Empty,
    /// Scent inherited through the neighbour at this offset index of the
    /// active connectivity scheme (the direction points back toward the
    /// scent's origin).
    Tracking(u8),
    /// A target occupies this cell.
    Source,
}

impl CellState {
    /// Whether this is [`CellState::Empty`].
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The tracked direction index, if any.
    pub fn direction(self) -> Option<usize> {
        match self {
            Self::Tracking(d) => Some(d as usize),
            Self::Empty | Self::Source => None,
        }
    }
}

/// A `(state, age)` pair: one cell of the scent field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    /// Propagation state.
    pub state: CellState,
    /// Seconds since the scent left its source. Zero when empty.
    pub age: f32,
}

impl Cell {
    /// An empty cell.
    pub const EMPTY: Cell = Cell {
        state: CellState::Empty,
        age: 0.0,
    };

    /// A freshly stamped source cell.
    pub const SOURCE: Cell = Cell {
        state: CellState::Source,
        age: 0.0,
    };

    /// A tracking cell with the given direction index and age.
    pub fn tracking(direction: usize, age: f32) -> Self {
        debug_assert!(direction <= u8::MAX as usize);
        Self {
            state: CellState::Tracking(direction as u8),
            age,
        }
    }

    /// Whether the cell carries no scent.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}
