//! Connectivity schemes: ordered neighbour offset tables.
//!
//! The order of each table is part of the contract. A cell's tracked
//! direction is an index into the active table, and scans start from a
//! given index and wrap around, so reordering a table changes behaviour.

use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::fmt;

/// A neighbour offset `(dx, dy)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Step along x.
    pub dx: i32,
    /// Step along y.
    pub dy: i32,
}

impl Offset {
    /// Create an offset.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Euclidean length.
    pub fn length(self) -> f32 {
        ((self.dx * self.dx + self.dy * self.dy) as f32).sqrt()
    }

    /// Screen angle of the offset in `[0, 2π)`.
    ///
    /// `(0, 1)` maps to 0 and angles grow toward `(-1, 0)`; the result is
    /// quadrant-correct for every sign combination.
    pub fn angle(self) -> f32 {
        (-(self.dx as f32)).atan2(self.dy as f32).rem_euclid(TAU)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.dx, self.dy)
    }
}

const ORTHOGONAL_4: [Offset; 4] = [
    Offset::new(0, 1),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(-1, 0),
];

const DIAGONAL_4: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

const OCTILE_8: [Offset; 8] = [
    Offset::new(0, 1),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(-1, 0),
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

/// The neighbour set used for propagation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// North, east, south, west.
    Orthogonal4,
    /// The four diagonals only.
    Diagonal4,
    /// Orthogonal then diagonal neighbours.
    #[default]
    Octile8,
}

impl Connectivity {
    /// Every scheme, in menu order.
    pub const ALL: [Connectivity; 3] = [Self::Orthogonal4, Self::Diagonal4, Self::Octile8];

    /// The ordered offset table of this scheme.
    pub fn offsets(self) -> &'static [Offset] {
        match self {
            Self::Orthogonal4 => &ORTHOGONAL_4,
            Self::Diagonal4 => &DIAGONAL_4,
            Self::Octile8 => &OCTILE_8,
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Orthogonal4 => "4-orthogonal",
            Self::Diagonal4 => "4-diagonal",
            Self::Octile8 => "8-neighbour",
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An active connectivity scheme with precomputed offset lengths.
///
/// # Examples
///
/// ```
/// use spoor_space::{Connectivity, Neighbourhood};
///
/// let n = Neighbourhood::new(Connectivity::Octile8);
/// assert_eq!(n.len(), 8);
/// assert_eq!(n.length(0), 1.0);
/// assert!((n.length(4) - 2f32.sqrt()).abs() < 1e-6);
///
/// let order: Vec<usize> = n.scan_from(6).collect();
/// assert_eq!(order, vec![6, 7, 0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Neighbourhood {
    connectivity: Connectivity,
    offsets: SmallVec<[Offset; 8]>,
    lengths: SmallVec<[f32; 8]>,
}

impl Neighbourhood {
    /// Build the table for `connectivity`.
    pub fn new(connectivity: Connectivity) -> Self {
        let offsets: SmallVec<[Offset; 8]> = connectivity.offsets().iter().copied().collect();
        let lengths = offsets.iter().map(|o| o.length()).collect();
        Self {
            connectivity,
            offsets,
            lengths,
        }
    }

    /// Which scheme this is.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Number of directions.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false`: every scheme has at least one direction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `index` names a direction of this scheme.
    pub fn contains(&self, index: usize) -> bool {
        index < self.offsets.len()
    }

    /// The offset at `index`. Panics if out of range.
    pub fn offset(&self, index: usize) -> Offset {
        self.offsets[index]
    }

    /// The precomputed length of the offset at `index`. Panics if out of range.
    pub fn length(&self, index: usize) -> f32 {
        self.lengths[index]
    }

    /// All offsets in table order.
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Every direction index exactly once, starting at `start` and wrapping.
    pub fn scan_from(&self, start: usize) -> impl Iterator<Item = usize> {
        let n = self.offsets.len();
        (0..n).map(move |j| (j + start) % n)
    }

    /// `"[dx,dy]"` for a valid index, `None` otherwise.
    pub fn label(&self, index: usize) -> Option<String> {
        self.offsets.get(index).map(|o| o.to_string())
    }

    /// Angle of the offset at `index`, `None` if out of range.
    pub fn angle(&self, index: usize) -> Option<f32> {
        self.offsets.get(index).map(|o| o.angle())
    }
}

impl From<Connectivity> for Neighbourhood {
    fn from(c: Connectivity) -> Self {
        Self::new(c)
    }
}
