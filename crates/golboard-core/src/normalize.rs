//! Rescaling of surface positions into the fixed logical grid.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Side length of the square logical grid every surface is mapped onto.
pub const LOGICAL_GRID: u32 = 1000;

/// A position on the logical grid, as pushed to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NormalizedOffset {
    pub offset_x: i32,
    pub offset_y: i32,
}

impl NormalizedOffset {
    pub const fn new(offset_x: i32, offset_y: i32) -> Self {
        Self { offset_x, offset_y }
    }

    /// Whether both coordinates lie within `[0, grid]`.
    pub fn is_within(&self, grid: u32) -> bool {
        let grid = grid as i64;
        (0..=grid).contains(&(self.offset_x as i64)) && (0..=grid).contains(&(self.offset_y as i64))
    }

    /// Clamp both coordinates into `[0, grid]`.
    pub fn clamped(self, grid: u32) -> Self {
        let max = i32::try_from(grid).unwrap_or(i32::MAX);
        Self {
            offset_x: self.offset_x.clamp(0, max),
            offset_y: self.offset_y.clamp(0, max),
        }
    }
}

/// Map a position relative to the surface's top-left corner onto a
/// `grid` x `grid` logical square.
///
/// `offset = floor(position * grid / size)` per axis. The result is not
/// clamped: positions outside the surface map outside `[0, grid]`.
/// A zero-sized surface yields non-finite intermediates which the
/// float-to-int cast saturates (`NaN` becomes 0, infinities the `i32` bounds).
pub fn normalize(position: Point, size: Size, grid: u32) -> NormalizedOffset {
    let grid = f64::from(grid);
    NormalizedOffset {
        offset_x: (position.x * grid / size.width).floor() as i32,
        offset_y: (position.y * grid / size.height).floor() as i32,
    }
}
