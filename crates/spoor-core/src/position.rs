//! Integer grid positions.

use std::fmt;

/// A cell coordinate, `x` along the width and `y` along the height.
///
/// Signed so that offset arithmetic and out-of-range queries such as
/// `(-1, 0)` can be expressed directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Move at most one cell along each axis toward `goal`.
    ///
    /// Each axis steps independently by the sign of the remaining distance,
    /// so a diagonal goal is approached diagonally. Axes already aligned
    /// with the goal do not move.
    pub fn step_toward(self, goal: Position) -> Self {
        Self::new(
            self.x + goal.x.cmp(&self.x) as i32,
            self.y + goal.y.cmp(&self.y) as i32,
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
