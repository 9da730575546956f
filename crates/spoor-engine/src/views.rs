//! Read-only projections of the field for rendering and inspection.
//!
//! A [`GridView`] borrows one complete, published field. Every method is a
//! pure function of that borrow: nothing is cached and nothing is mutated.
//! Whole-grid maps are returned row-major, `index = y * width + x`.

use std::fmt;

use spoor_core::{Cell, CellState, Position};
use spoor_space::{GridDims, Neighbourhood};

/// Returned by [`GridView::speed`], [`GridView::age`] and
/// [`GridView::angle_map`] where there is no value.
pub const SENTINEL: f32 = -1.0;

/// Returned by [`GridView::direction_label`] where there is no direction.
pub const NO_DIRECTION: &str = "none";

/// Two-channel colour encoding of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    /// `1 - intensity`: 0 for no scent, up to 1 for a fresh source.
    pub saturation: f32,
    /// `sqrt(speed)` clamped to `[0, 1]`: 0 for impassable cells.
    pub brightness: f32,
}

/// Everything known about one cell, as shown when hovering over it.
#[derive(Clone, Debug, PartialEq)]
pub struct CellProbe {
    /// The probed position.
    pub position: Position,
    /// Traversal speed.
    pub speed: f32,
    /// Scent age (0 when empty).
    pub age: f32,
    /// Direction label, or `"none"`.
    pub direction: String,
}

impl fmt::Display for CellProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tile [{}] Speed = {} Time = {} Direction = {}",
            self.position, self.speed, self.age, self.direction
        )
    }
}

/// A borrowed, read-only view of a published field.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    pub(crate) dims: GridDims,
    pub(crate) cells: &'a [Cell],
    pub(crate) speeds: &'a [f32],
    pub(crate) scheme: &'a Neighbourhood,
    pub(crate) fade_time: f32,
}

impl<'a> GridView<'a> {
    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.dims.width()
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.dims.height()
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// The raw cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.dims.index(x, y).map(|i| self.cells[i])
    }

    /// Every cell, row-major.
    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    /// Speed at `(x, y)`, or [`SENTINEL`] out of range.
    pub fn speed(&self, x: i32, y: i32) -> f32 {
        self.dims.index(x, y).map_or(SENTINEL, |i| self.speeds[i])
    }

    /// Age at `(x, y)`, or [`SENTINEL`] out of range.
    pub fn age(&self, x: i32, y: i32) -> f32 {
        self.dims.index(x, y).map_or(SENTINEL, |i| self.cells[i].age)
    }

    /// `"[dx,dy]"` of the tracked direction at `(x, y)`, or `"none"` for
    /// empty and source cells and out-of-range coordinates.
    pub fn direction_label(&self, x: i32, y: i32) -> String {
        self.cell(x, y)
            .and_then(|c| c.state.direction())
            .and_then(|d| self.scheme.label(d))
            .unwrap_or_else(|| NO_DIRECTION.to_string())
    }

    fn intensity_of(&self, cell: Cell) -> f32 {
        if cell.is_empty() {
            return 1.0;
        }
        if self.fade_time <= 0.0 {
            return 0.0;
        }
        (cell.age / self.fade_time).clamp(0.0, 1.0)
    }

    fn angle_of(&self, cell: Cell) -> f32 {
        match cell.state {
            CellState::Tracking(d) => self.scheme.angle(d as usize).unwrap_or(SENTINEL),
            CellState::Empty | CellState::Source => SENTINEL,
        }
    }

    fn brightness_of(speed: f32) -> f32 {
        speed.max(0.0).sqrt().clamp(0.0, 1.0)
    }

    /// Normalized scent age per cell: 1 for empty cells, otherwise
    /// `age / fade_time` clamped to `[0, 1]`.
    pub fn intensity_map(&self) -> Vec<f32> {
        self.cells.iter().map(|&c| self.intensity_of(c)).collect()
    }

    /// Angle of the tracked direction per cell, [`SENTINEL`] where there is
    /// none.
    pub fn angle_map(&self) -> Vec<f32> {
        self.cells.iter().map(|&c| self.angle_of(c)).collect()
    }

    /// `sqrt(speed)` clamped to `[0, 1]` per cell.
    pub fn brightness_map(&self) -> Vec<f32> {
        self.speeds.iter().map(|&s| Self::brightness_of(s)).collect()
    }

    /// Saturation and brightness per cell.
    pub fn shade_map(&self) -> Vec<Shade> {
        self.cells
            .iter()
            .zip(self.speeds)
            .map(|(&c, &s)| Shade {
                saturation: 1.0 - self.intensity_of(c),
                brightness: Self::brightness_of(s),
            })
            .collect()
    }

    /// Speed, age and direction of the cell at `(x, y)`.
    pub fn probe(&self, x: i32, y: i32) -> Option<CellProbe> {
        let i = self.dims.index(x, y)?;
        Some(CellProbe {
            position: Position::new(x, y),
            speed: self.speeds[i],
            age: self.cells[i].age,
            direction: self.direction_label(x, y),
        })
    }
}
