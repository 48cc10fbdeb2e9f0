//! Board size by level number

use crate::consts::{MAX_SIDE, SIZE_TIERS};

/// Board `(width, height)` for a level.
///
/// Step function over the level number; boards only ever grow.
pub fn board_size(level: u32) -> (usize, usize) {
    let side = SIZE_TIERS
        .iter()
        .find(|&&(below, _)| level < below)
        .map(|&(_, side)| side)
        .unwrap_or(MAX_SIDE);
    (side, side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_size_tiers() {
        assert_eq!(board_size(1), (5, 5));
        assert_eq!(board_size(4), (5, 5));
        assert_eq!(board_size(5), (10, 10));
        assert_eq!(board_size(69), (10, 10));
        assert_eq!(board_size(70), (25, 25));
        assert_eq!(board_size(149), (25, 25));
        assert_eq!(board_size(150), (50, 50));
        assert_eq!(board_size(u32::MAX), (50, 50));
    }

    proptest! {
        #[test]
        fn prop_size_never_shrinks(level in 1u32..1000) {
            let (w, h) = board_size(level);
            let (nw, nh) = board_size(level + 1);
            prop_assert!(nw * nh >= w * h);
        }
    }
}
