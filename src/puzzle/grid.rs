//! Board of connectivity masks
//!
//! Cells are addressed `(x, y)` with `x` the column and `y` the row, stored
//! row-major. Up is toward row 0.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::mask::{Mask, Shape, Side};
use crate::error::{LoopError, Result};

/// A rectangular board of tiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr", into = "GridRepr")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Mask>,
}

/// Wire form, validated on the way in
#[derive(Clone, Serialize, Deserialize)]
struct GridRepr {
    width: usize,
    height: usize,
    cells: Vec<Mask>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = LoopError;

    fn try_from(repr: GridRepr) -> Result<Self> {
        let actual = repr.cells.len();
        let expected = repr
            .width
            .checked_mul(repr.height)
            .ok_or(LoopError::GridShape {
                expected: usize::MAX,
                actual,
            })?;
        if actual != expected {
            return Err(LoopError::GridShape { expected, actual });
        }
        Ok(Self {
            width: repr.width,
            height: repr.height,
            cells: repr.cells,
        })
    }
}

impl From<Grid> for GridRepr {
    fn from(grid: Grid) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells,
        }
    }
}

impl Grid {
    /// An all-empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Mask::EMPTY; width * height],
        }
    }

    /// Build from raw row-major values, validating length and every mask
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Result<Self> {
        let cells = raw
            .iter()
            .map(|&value| Mask::new(value))
            .collect::<Result<Vec<_>>>()?;
        Grid::try_from(GridRepr {
            width,
            height,
            cells,
        })
    }

    /// Assemble from already-built cells (row-major, length checked by caller)
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Mask>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of `(x, y)`, if on the board
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Mask> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: usize, y: usize, mask: Mask) -> Result<()> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = mask;
        Ok(())
    }

    /// Rotate one cell by `n` quarter turns clockwise, returning the new mask
    pub fn rotate_cell(&mut self, x: usize, y: usize, n: i32) -> Result<Mask> {
        let i = self.checked_index(x, y)?;
        self.cells[i] = self.cells[i].rotated(n);
        Ok(self.cells[i])
    }

    /// Coordinates of the neighbour on `side`, or `None` past the edge
    pub fn neighbor(&self, x: usize, y: usize, side: Side) -> Option<(usize, usize)> {
        let (dx, dy) = side.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.index(nx, ny).map(|_| (nx, ny))
    }

    /// `((x, y), mask)` for every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Mask)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &mask)| ((i % self.width, i / self.width), mask))
    }

    /// Row-major masks
    pub fn masks(&self) -> &[Mask] {
        &self.cells
    }

    pub(crate) fn masks_mut(&mut self) -> &mut [Mask] {
        &mut self.cells
    }

    /// Raw row-major values
    pub fn to_raw(&self) -> Vec<u8> {
        self.cells.iter().map(|m| m.raw()).collect()
    }

    /// How many tiles of each shape the board holds
    pub fn shape_counts(&self) -> BTreeMap<Shape, usize> {
        let mut counts = BTreeMap::new();
        for mask in &self.cells {
            *counts.entry(mask.shape()).or_insert(0) += 1;
        }
        counts
    }

    /// Cells whose orientation matters
    pub fn eligible_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|m| !m.is_rotation_invariant())
            .count()
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        self.index(x, y).ok_or(LoopError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }
}

/// Box-drawing glyph for a mask
fn glyph(mask: Mask) -> char {
    const GLYPHS: [char; 16] = [
        ' ', '╴', '╵', '┘', '╶', '─', '└', '┴', '╷', '┐', '│', '┤', '┌', '┬', '├', '┼',
    ];
    GLYPHS[mask.raw() as usize]
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            let line: String = row.iter().map(|&m| glyph(m)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates() {
        assert!(Grid::from_raw(2, 2, &[0, 1, 4, 15]).is_ok());
        assert!(matches!(
            Grid::from_raw(2, 2, &[0, 1, 4]),
            Err(LoopError::GridShape {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            Grid::from_raw(2, 1, &[0, 16]),
            Err(LoopError::InvalidMask(16))
        ));
    }

    #[test]
    fn test_neighbors_at_edges() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.neighbor(0, 0, Side::Left), None);
        assert_eq!(grid.neighbor(0, 0, Side::Up), None);
        assert_eq!(grid.neighbor(0, 0, Side::Right), Some((1, 0)));
        assert_eq!(grid.neighbor(0, 0, Side::Down), Some((0, 1)));
        assert_eq!(grid.neighbor(2, 1, Side::Right), None);
        assert_eq!(grid.neighbor(2, 1, Side::Down), None);
    }

    #[test]
    fn test_rotate_cell_out_of_bounds() {
        let mut grid = Grid::from_raw(2, 1, &[4, 1]).unwrap();
        assert_eq!(grid.rotate_cell(0, 0, 1).unwrap().raw(), 8);
        assert!(matches!(
            grid.rotate_cell(2, 0, 1),
            Err(LoopError::OutOfBounds { x: 2, y: 0, .. })
        ));
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = Grid::from_raw(2, 2, &[1, 2, 3, 4]).unwrap();
        let coords: Vec<_> = grid.cells().map(|(xy, m)| (xy, m.raw())).collect();
        assert_eq!(coords, vec![((0, 0), 1), ((1, 0), 2), ((0, 1), 3), ((1, 1), 4)]);
    }

    #[test]
    fn test_display_draws_pipes() {
        let grid = Grid::from_raw(2, 2, &[12, 9, 6, 3]).unwrap();
        assert_eq!(grid.to_string(), "┌┐\n└┘\n");
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let grid = Grid::from_raw(2, 1, &[4, 1]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"width":2,"height":1,"cells":[4,1]}"#);
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
        assert!(serde_json::from_str::<Grid>(r#"{"width":2,"height":2,"cells":[4,1]}"#).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let json = format!(r#"{{"width":{},"height":2,"cells":[]}}"#, 1usize << (usize::BITS - 1));
        let err = serde_json::from_str::<Grid>(&json).unwrap_err();
        assert!(err.to_string().contains("expected"), "{err}");
    }

    #[test]
    fn test_set_and_masks() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, Mask::new(9).unwrap()).unwrap();
        assert_eq!(grid.masks()[1].raw(), 9);
        assert_eq!(grid.get(1, 0), Some(Mask::new(9).unwrap()));
        assert!(matches!(
            grid.set(0, 2, Mask::FULL),
            Err(LoopError::OutOfBounds { x: 0, y: 2, .. })
        ));
        assert_eq!(grid.masks().iter().filter(|m| !m.is_empty()).count(), 1);
    }
}
