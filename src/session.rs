//! One level in play
//!
//! A [`Session`] owns the live board. The player turns one tile at a time; the
//! board is checked after every turn, and once solved the session can advance,
//! recording the newly unlocked level in a [`ProgressStore`].

use log::{debug, info};

use crate::error::{LoopError, Result};
use crate::progress::ProgressStore;
use crate::puzzle::{Grid, Level, Mask, ScrambleOutcome, board_size, generate, is_solved};

/// Direction of a single player rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
}

impl Turn {
    /// Quarter turns to pass to [`Mask::rotated`]
    pub fn quarter_turns(self) -> i32 {
        match self {
            Turn::Clockwise => 1,
            Turn::CounterClockwise => -1,
        }
    }
}

/// Result of a player rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Tile turned, board still unsolved
    Rotated { mask: Mask },
    /// This turn solved the board
    Solved { next_level: u32 },
}

/// Current level and its live board
#[derive(Debug, Clone)]
pub struct Session {
    level: Level,
    board: Grid,
    moves: u32,
}

impl Session {
    /// Generate `level` and start playing it
    pub fn start(level: u32) -> Result<Self> {
        Ok(Self::from_level(generate(level)?))
    }

    /// Play an already generated level
    pub(crate) fn from_level(level: Level) -> Self {
        if level.scramble.outcome != ScrambleOutcome::Scrambled {
            info!("Level {} starts solved ({:?})", level.number, level.scramble.outcome);
        } else {
            info!("Level {} started", level.number);
        }
        Self {
            board: level.puzzle.clone(),
            level,
            moves: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level.number
    }

    /// Live board as the player sees it
    pub fn grid(&self) -> &Grid {
        &self.board
    }

    pub fn board_size(&self) -> (usize, usize) {
        board_size(self.level.number)
    }

    /// Player rotations since the level started
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.board)
    }

    /// Turn the tile at `(x, y)` a quarter and re-check the board
    pub fn rotate(&mut self, x: usize, y: usize, turn: Turn) -> Result<MoveOutcome> {
        let mask = self.board.rotate_cell(x, y, turn.quarter_turns())?;
        self.moves += 1;
        debug!("Rotated ({x}, {y}) {turn:?} -> {:#06b}", mask.raw());

        if self.is_solved() {
            info!("Level {} solved in {} moves", self.level.number, self.moves);
            return Ok(MoveOutcome::Solved {
                next_level: self.next_level()?,
            });
        }
        Ok(MoveOutcome::Rotated { mask })
    }

    /// Move on from a solved board: unlock and load the next level.
    ///
    /// Returns the new level number, or `None` if the board is not solved yet.
    pub fn advance<S: ProgressStore + ?Sized>(&mut self, store: &mut S) -> Result<Option<u32>> {
        if !self.is_solved() {
            debug!("Level {} not solved, staying", self.level.number);
            return Ok(None);
        }
        let next = self.next_level()?;
        store.update_max_level_if_higher(next)?;
        *self = Session::start(next)?;
        Ok(Some(next))
    }

    /// Jump to a level, e.g. one picked from the level menu
    pub fn select(&mut self, level: u32) -> Result<()> {
        *self = Session::start(level)?;
        Ok(())
    }

    /// Throw away the player's turns and start the current level over
    pub fn restart(&mut self) {
        self.board = self.level.puzzle.clone();
        self.moves = 0;
    }

    fn next_level(&self) -> Result<u32> {
        self.level
            .number
            .checked_add(1)
            .ok_or(LoopError::InvalidLevel(self.level.number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemoryProgress;
    use crate::puzzle::scramble;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Turn every tile clockwise until it matches the solution
    fn solve(session: &mut Session) -> Vec<MoveOutcome> {
        let solution = session.level.solution.clone();
        let mut outcomes = Vec::new();
        for ((x, y), target) in solution.cells() {
            while session.grid().get(x, y) != Some(target) {
                outcomes.push(session.rotate(x, y, Turn::Clockwise).unwrap());
            }
        }
        outcomes
    }

    #[test]
    fn test_start_rejects_level_zero() {
        assert!(matches!(Session::start(0), Err(LoopError::InvalidLevel(0))));
    }

    #[test]
    fn test_turns_are_inverse() {
        let mut session = Session::start(2).unwrap();
        let before = session.grid().clone();
        let ((x, y), _) = before
            .cells()
            .find(|(_, m)| !m.is_rotation_invariant())
            .unwrap();

        session.rotate(x, y, Turn::Clockwise).unwrap();
        session.rotate(x, y, Turn::CounterClockwise).unwrap();
        assert_eq!(session.grid(), &before);
        assert_eq!(session.moves(), 2);
    }

    #[test]
    fn test_off_board_rotation_fails() {
        let mut session = Session::start(1).unwrap();
        assert!(matches!(
            session.rotate(5, 0, Turn::Clockwise),
            Err(LoopError::OutOfBounds { .. })
        ));
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_solving_reports_and_advances() {
        let mut session = Session::start(1).unwrap();
        assert!(!session.is_solved());
        assert_eq!(session.board_size(), (5, 5));

        let mut store = MemoryProgress::new();
        assert_eq!(session.advance(&mut store).unwrap(), None);
        assert_eq!(store.max_level(), 1);

        let outcomes = solve(&mut session);
        assert_eq!(
            outcomes.last(),
            Some(&MoveOutcome::Solved { next_level: 2 })
        );
        assert!(session.is_solved());

        assert_eq!(session.advance(&mut store).unwrap(), Some(2));
        assert_eq!(store.max_level(), 2);
        assert_eq!(session.level(), 2);
        assert_eq!(session.moves(), 0);
    }

    #[test]
    fn test_advance_never_lowers_progress() {
        let mut session = Session::start(1).unwrap();
        solve(&mut session);
        let mut store = MemoryProgress::with_max_level(40);
        assert_eq!(session.advance(&mut store).unwrap(), Some(2));
        assert_eq!(store.max_level(), 40);
    }

    #[test]
    fn test_restart_and_select() {
        let mut session = Session::start(3).unwrap();
        let fresh = session.grid().clone();
        let ((x, y), _) = fresh
            .cells()
            .find(|(_, m)| !m.is_rotation_invariant())
            .unwrap();
        session.rotate(x, y, Turn::Clockwise).unwrap();
        session.restart();
        assert_eq!(session.grid(), &fresh);
        assert_eq!(session.moves(), 0);

        session.select(70).unwrap();
        assert_eq!(session.level(), 70);
        assert_eq!(session.board_size(), (25, 25));
        assert!(session.select(0).is_err());
    }

    #[test]
    fn test_unscramblable_level_starts_solved() {
        // Any four-way tile would point at an empty cell or off the board,
        // so the only solved layout without rotatable tiles is an empty one
        assert!(!is_solved(&Grid::from_raw(3, 2, &[0, 15, 0, 15, 0, 15]).unwrap()));
        let solution = Grid::new(3, 2);
        let mut puzzle = solution.clone();
        let record = scramble(&mut puzzle, &mut Pcg32::seed_from_u64(11));
        assert_eq!(record.outcome, ScrambleOutcome::Degenerate);

        let mut session = Session::from_level(Level {
            number: 9,
            solution,
            puzzle,
            scramble: record,
        });
        assert!(session.is_solved());
        assert_eq!(session.moves(), 0);

        let mut store = MemoryProgress::new();
        assert_eq!(session.advance(&mut store).unwrap(), Some(10));
        assert_eq!(store.max_level(), 10);
    }
}
