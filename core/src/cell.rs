use serde::{Deserialize, Serialize};

/// What a cell holds once the field is generated. Immutable for the rest of
/// the match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Empty,
    Number(u8),
    Mine,
}

impl CellContent {
    /// Maps an adjacency count to content; zero is `Empty`, never `Number(0)`.
    pub const fn from_adjacent(count: u8) -> Self {
        match count {
            0 => Self::Empty,
            n => Self::Number(n),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn number(self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-visible state of a cell. `Flagged` and `Revealed` are mutually
/// exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Hidden,
    Revealed,
    Flagged,
}

impl Visibility {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Hidden
    }
}
