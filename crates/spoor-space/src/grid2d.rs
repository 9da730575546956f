//! Rectangular grid dimensions and flat indexing.

use crate::connectivity::Offset;
use crate::error::SpaceError;
use spoor_core::Position;

/// The extent of a `width x height` grid.
///
/// Cells are addressed by [`Position`] `(x, y)` with `0 <= x < width` and
/// `0 <= y < height`, and stored row-major: `index = y * width + x`.
///
/// # Examples
///
/// ```
/// use spoor_core::Position;
/// use spoor_space::GridDims;
///
/// let dims = GridDims::new(10, 4).unwrap();
/// assert_eq!(dims.cell_count(), 40);
/// assert_eq!(dims.index(3, 2), Some(23));
/// assert_eq!(dims.index(10, 0), None);
/// assert_eq!(dims.position(23), Position::new(3, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    width: u32,
    height: u32,
}

impl GridDims {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create grid dimensions.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0, or
    /// `Err(SpaceError::DimensionTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(SpaceError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Flat index of `(x, y)`, or `None` if out of range.
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Flat index of a position, or `None` if out of range.
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.index(pos.x, pos.y)
    }

    /// Position of a flat index. The index must be below
    /// [`cell_count`](Self::cell_count).
    pub fn position(&self, index: usize) -> Position {
        debug_assert!(index < self.cell_count());
        let w = self.width as usize;
        Position::new((index % w) as i32, (index / w) as i32)
    }

    /// Flat index of the neighbour of `(x, y)` at `offset`, or `None` if
    /// it falls outside the grid.
    pub fn neighbour(&self, x: i32, y: i32, offset: Offset) -> Option<usize> {
        self.index(x + offset.dx, y + offset.dy)
    }

    /// Whether `(x, y)` is on the outermost ring of cells.
    pub fn is_border(&self, x: i32, y: i32) -> bool {
        self.contains(x, y)
            && (x == 0 || y == 0 || x == self.width as i32 - 1 || y == self.height as i32 - 1)
    }

    /// Clamp a position into the grid on both axes.
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            pos.x.clamp(0, self.width as i32 - 1),
            pos.y.clamp(0, self.height as i32 - 1),
        )
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Position::new(x, y)))
    }
}
