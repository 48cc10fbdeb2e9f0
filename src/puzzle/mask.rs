//! Connectivity mask and rotation algebra
//!
//! A tile's open sides are packed into the low four bits of a byte:
//! - bit 0: left
//! - bit 1: up
//! - bit 2: right
//! - bit 3: down
//!
//! Opposite sides are always two bits apart, so rotating the mask by one step
//! (a circular shift inside the 4-bit field) turns the tile a quarter clockwise.

use serde::{Deserialize, Serialize};

use crate::error::{LoopError, Result};

const MASK_BITS: u8 = 0b1111;

/// One of the four sides of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Up,
    Right,
    Down,
}

impl Side {
    /// All sides in bit order
    pub const ALL: [Side; 4] = [Side::Left, Side::Up, Side::Right, Side::Down];

    /// Bit index of this side inside a mask
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            Side::Left => 0,
            Side::Up => 1,
            Side::Right => 2,
            Side::Down => 3,
        }
    }

    #[inline]
    pub fn bit(self) -> u8 {
        1 << self.index()
    }

    /// The side a neighbour uses to face back toward this one
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Up => Side::Down,
            Side::Right => Side::Left,
            Side::Down => Side::Up,
        }
    }

    /// Grid step `(dx, dy)` toward this side. Up is toward row 0.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Side::Left => (-1, 0),
            Side::Up => (0, -1),
            Side::Right => (1, 0),
            Side::Down => (0, 1),
        }
    }
}

/// Validated 4-bit connectivity value. `0` is an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mask(u8);

impl Mask {
    pub const EMPTY: Mask = Mask(0);
    pub const FULL: Mask = Mask(MASK_BITS);

    /// Wrap a raw value, rejecting anything outside 0..=15
    pub fn new(raw: u8) -> Result<Self> {
        if raw > MASK_BITS {
            return Err(LoopError::InvalidMask(raw));
        }
        Ok(Self(raw))
    }

    /// Build a mask from the four side flags
    pub fn from_sides(left: bool, up: bool, right: bool, down: bool) -> Self {
        let mut raw = 0;
        for (side, open) in Side::ALL.into_iter().zip([left, up, right, down]) {
            if open {
                raw |= side.bit();
            }
        }
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn has_connection(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    /// Side check on an unvalidated value
    pub fn has_raw(raw: u8, side: Side) -> Result<bool> {
        Ok(Self::new(raw)?.has_connection(side))
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Empty and four-way tiles look the same in every orientation
    #[inline]
    pub fn is_rotation_invariant(self) -> bool {
        self.0 == 0 || self.0 == MASK_BITS
    }

    /// Number of open sides
    pub fn degree(self) -> u32 {
        self.0.count_ones()
    }

    /// Rotate by `n` quarter turns clockwise; negative turns go counterclockwise
    pub fn rotated(self, n: i32) -> Mask {
        let n = n.rem_euclid(4) as u32;
        let m = self.0;
        Mask(((m << n) | (m >> (4 - n))) & MASK_BITS)
    }

    /// Split into canonical shape and rotation index.
    ///
    /// Shapes with rotational symmetry report the lowest matching index.
    pub fn decompose(self) -> (Shape, u8) {
        for shape in Shape::TILES {
            if let Some(rotation) = shape.table().iter().position(|&m| m == self.0) {
                return (shape, rotation as u8);
            }
        }
        (Shape::Empty, 0)
    }

    pub fn shape(self) -> Shape {
        self.decompose().0
    }
}

impl TryFrom<u8> for Mask {
    type Error = LoopError;

    fn try_from(raw: u8) -> Result<Self> {
        Mask::new(raw)
    }
}

impl From<Mask> for u8 {
    fn from(mask: Mask) -> u8 {
        mask.0
    }
}

/// Rotate a raw connectivity value by `n` quarter turns clockwise.
///
/// `n` is taken modulo 4, so `-1` is one turn counterclockwise. Values outside
/// 0..=15 are rejected rather than masked, since they mean the board is corrupt.
pub fn rotate_mask(raw: u8, n: i32) -> Result<u8> {
    Ok(Mask::new(raw)?.rotated(n).raw())
}

/// Tile shape, i.e. a mask up to rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    Empty,
    One,
    TwoCorner,
    TwoStraight,
    Three,
    Four,
}

impl Shape {
    /// Every shape that draws a tile
    pub const TILES: [Shape; 5] = [
        Shape::One,
        Shape::TwoCorner,
        Shape::TwoStraight,
        Shape::Three,
        Shape::Four,
    ];

    /// Mask for each rotation index, counted counterclockwise from the
    /// unrotated artwork
    fn table(self) -> [u8; 4] {
        match self {
            Shape::Empty => [0, 0, 0, 0],
            Shape::One => [8, 4, 2, 1],
            Shape::TwoCorner => [12, 6, 3, 9],
            Shape::TwoStraight => [10, 5, 10, 5],
            Shape::Three => [14, 7, 11, 13],
            Shape::Four => [15, 15, 15, 15],
        }
    }

    /// Mask of this shape at the given rotation index (0..=3)
    pub fn mask(self, rotation: u8) -> Result<Mask> {
        let table = self.table();
        let raw = table
            .get(rotation as usize)
            .ok_or(LoopError::InvalidRotation(rotation))?;
        Ok(Mask(*raw))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Empty => "Empty",
            Shape::One => "One",
            Shape::TwoCorner => "TwoCorner",
            Shape::TwoStraight => "TwoStraight",
            Shape::Three => "Three",
            Shape::Four => "Four",
        }
    }
}
