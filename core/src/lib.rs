//! Canonical Minesweeper rules engine.
//!
//! One render-agnostic implementation of the turn-based ruleset shared by the
//! console, chord-console, widget and 3-D front-ends: lazy field generation
//! around a safe first move, iterative flood-fill reveals, flag tracking,
//! chord opens and two selectable win conditions. Front-ends drive it through
//! [`Game`] and render from [`Snapshot`].

use core::ops::BitOr;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod field;
mod generator;
mod snapshot;
mod types;

/// Starts a fresh match, validating the configuration up front.
pub fn new_game(size: Coord, mines: CellCount, win_mode: WinMode) -> Result<Game> {
    Game::new(GameConfig::new(size, mines)?, win_mode)
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The target was already revealed; nothing changed.
    AlreadyOpen,
    /// The target carries a flag; remove it before revealing.
    Flagged,
    /// The target was a mine; the game is lost.
    HitMine,
    /// This many cells were newly revealed, counting the flood fill.
    Opened(CellCount),
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::HitMine | Self::Opened(_))
    }
}

/// Merges per-neighbor results when chord-opening: a loss dominates and
/// opened counts add up.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Opened(a), Opened(b)) => Opened(a + b),
            (Opened(n), _) | (_, Opened(n)) => Opened(n),
            (Flagged, _) | (_, Flagged) => Flagged,
            (AlreadyOpen, AlreadyOpen) => AlreadyOpen,
        }
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    /// The target is already revealed; flags only go on closed cells.
    Ignored,
    Added,
    Removed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Outcome of a chord open around a numbered cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordOutcome {
    /// The target is not a revealed numbered cell.
    NotNumbered,
    /// The surrounding flag count does not match the number; nothing changed.
    FlagMismatch { expected: u8, actual: u8 },
    /// An unflagged neighbor was a mine; the game is lost.
    HitMine,
    /// This many cells were newly revealed across all neighbors.
    Opened(CellCount),
}

impl ChordOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::HitMine | Self::Opened(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_outcome_merge_prioritizes_loss_and_sums_opens() {
        use RevealOutcome::*;

        assert_eq!(Opened(3) | Opened(2), Opened(5));
        assert_eq!(Opened(3) | HitMine, HitMine);
        assert_eq!(HitMine | Opened(3), HitMine);
        assert_eq!(AlreadyOpen | Opened(4), Opened(4));
        assert_eq!(Flagged | AlreadyOpen, Flagged);
        assert_eq!(AlreadyOpen | AlreadyOpen, AlreadyOpen);
    }

    #[test]
    fn new_game_rejects_impossible_configurations() {
        assert_eq!(
            new_game(9, 73, WinMode::RevealComplete),
            Err(GameError::InvalidMineCount { got: 73, max: 72 })
        );
        assert!(new_game(9, 10, WinMode::RevealComplete).is_ok());
    }
}
