//! ASCII terrain fixtures.
//!
//! One character per cell, one line per row, top row is `y = 0`:
//!
//! | char | meaning |
//! |------|---------|
//! | `#` | impassable (speed 0) |
//! | `.` | open (speed 1) |
//! | `1`-`9` | speed `n / 10` |
//! | `T` | open cell holding a target |
//! | `A` | open cell holding the attractor of the target with the same index |
//!
//! Leading and trailing blank lines and surrounding whitespace on each
//! line are ignored, so fixtures can be written as indented raw strings.

use spoor_core::Position;
use spoor_space::GridDims;

/// A parsed terrain fixture.
#[derive(Clone, Debug, PartialEq)]
pub struct Terrain {
    pub dims: GridDims,
    /// Row-major speeds.
    pub speeds: Vec<f32>,
    /// `T` cells in row-major order.
    pub targets: Vec<Position>,
    /// `A` cells in row-major order.
    pub attractors: Vec<Position>,
}

impl Terrain {
    /// Parse a fixture. Panics on ragged rows, empty input or unknown
    /// characters.
    pub fn parse(src: &str) -> Self {
        let rows: Vec<&str> = src
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        assert!(!rows.is_empty(), "empty terrain fixture");
        let width = rows[0].chars().count();
        let mut speeds = Vec::with_capacity(width * rows.len());
        let mut targets = Vec::new();
        let mut attractors = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), width, "ragged row {y}: {row:?}");
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let speed = match ch {
                    '#' => 0.0,
                    '.' => 1.0,
                    'T' => {
                        targets.push(pos);
                        1.0
                    }
                    'A' => {
                        attractors.push(pos);
                        1.0
                    }
                    '1'..='9' => f32::from(ch as u8 - b'0') / 10.0,
                    other => panic!("unknown terrain char {other:?} at ({x}, {y})"),
                };
                speeds.push(speed);
            }
        }
        let dims = GridDims::new(width as u32, rows.len() as u32)
            .unwrap_or_else(|e| panic!("bad fixture size: {e}"));
        Self {
            dims,
            speeds,
            targets,
            attractors,
        }
    }

    pub fn width(&self) -> u32 {
        self.dims.width()
    }

    pub fn height(&self) -> u32 {
        self.dims.height()
    }

    /// `(x, y, speed)` for every cell, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, f32)> + '_ {
        self.dims
            .positions()
            .zip(&self.speeds)
            .map(|(p, &s)| (p.x, p.y, s))
    }

    /// Targets paired with their attractors; a target without an `A`
    /// attracts to itself.
    pub fn pairs(&self) -> Vec<(Position, Position)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, self.attractors.get(i).copied().unwrap_or(t)))
            .collect()
    }
}
