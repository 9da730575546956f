//! Terrain painting brushes and the slider-to-speed mapping.

use spoor_space::Offset;

/// Footprint stamped by [`ScentGrid::paint`](crate::ScentGrid::paint).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Brush {
    /// The center cell only.
    #[default]
    Point,
    /// Center plus the four orthogonal neighbours.
    Plus,
    /// The 3x3 block around the center.
    Square3,
    /// The 3x3 block plus the cells two steps out along each axis.
    Disk,
}

const POINT: [Offset; 1] = [Offset::new(0, 0)];

const PLUS: [Offset; 5] = [
    Offset::new(0, 0),
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

const SQUARE3: [Offset; 9] = [
    Offset::new(-1, -1),
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(-1, 0),
    Offset::new(0, 0),
    Offset::new(1, 0),
    Offset::new(-1, 1),
    Offset::new(0, 1),
    Offset::new(1, 1),
];

const DISK: [Offset; 13] = [
    Offset::new(-1, -1),
    Offset::new(0, -1),
    Offset::new(1, -1),
    Offset::new(-1, 0),
    Offset::new(0, 0),
    Offset::new(1, 0),
    Offset::new(-1, 1),
    Offset::new(0, 1),
    Offset::new(1, 1),
    Offset::new(2, 0),
    Offset::new(-2, 0),
    Offset::new(0, 2),
    Offset::new(0, -2),
];

impl Brush {
    /// Offsets covered by this brush, relative to the center.
    pub fn footprint(self) -> &'static [Offset] {
        match self {
            Self::Point => &POINT,
            Self::Plus => &PLUS,
            Self::Square3 => &SQUARE3,
            Self::Disk => &DISK,
        }
    }
}

/// Map a 0-100 "difficulty" slider onto a traversal speed.
///
/// 0 is the fastest terrain (speed 1) and 100 is impassable (speed 0); the
/// curve is quadratic and truncated to two decimals. Values above 100 are
/// treated as 100.
pub fn quantized_speed(slider: u8) -> f32 {
    let s = f64::from(slider.min(100));
    let v = (1.0 - s / 100.0).powi(2);
    ((v * 100.0).trunc() / 100.0) as f32
}
