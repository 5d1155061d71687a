//! Integer grid coordinates.
//!
//! The park map is a square grid of cells.  Facilities occupy one cell each;
//! visitors walk between cells one axis-step per tick.

use std::fmt;

/// A cell on the park grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance in grid steps.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The cell one step from `self` towards `target`.
    ///
    /// The x axis is closed first; y only moves once x already matches.
    /// Returns `None` when `self == target`.
    pub fn step_towards(self, target: GridPos) -> Option<GridPos> {
        if self.x != target.x {
            Some(GridPos::new(self.x + (target.x - self.x).signum(), self.y))
        } else if self.y != target.y {
            Some(GridPos::new(self.x, self.y + (target.y - self.y).signum()))
        } else {
            None
        }
    }

    /// `true` if the cell lies inside a `size × size` map anchored at the origin.
    #[inline]
    pub fn within(self, size: u32) -> bool {
        let size = size as i64;
        (0..size).contains(&(self.x as i64)) && (0..size).contains(&(self.y as i64))
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        GridPos::new(x, y)
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
