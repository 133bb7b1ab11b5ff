use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board size and mine count requested for a match. Fixed for the game's
/// lifetime.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates the mine count up front; an impossible configuration is an
    /// error, never a clamp.
    pub fn new(size: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let max = self.max_mines();
        if self.mines < 1 || self.mines > max {
            return Err(GameError::InvalidMineCount {
                got: self.mines,
                max,
            });
        }
        Ok(())
    }

    /// Largest mine count that still leaves room for a full interior 3x3 safe
    /// zone, so any first reveal is legal.
    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(9)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn bounds(&self) -> Coord2 {
        (self.size, self.size)
    }
}

/// Hidden mine layout with adjacency numbers baked in at generation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineField {
    content: Array2<CellContent>,
    mine_count: CellCount,
}

impl MineField {
    /// Builds a field from a mine mask, computing every number cell from the
    /// final mine set.
    pub fn from_mine_mask(mines: &Array2<bool>) -> Self {
        let dim = mines.dim();
        let bounds: Coord2 = (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        );

        let mut content: Array2<CellContent> = Array2::default(dim);
        let mut mine_count: CellCount = 0;
        for x in 0..bounds.0 {
            for y in 0..bounds.1 {
                let coords = (x, y);
                if mines[coords.to_nd_index()] {
                    content[coords.to_nd_index()] = CellContent::Mine;
                    mine_count += 1;
                } else {
                    let adjacent = neighbors(coords, bounds)
                        .filter(|&pos| mines[pos.to_nd_index()])
                        .count() as u8;
                    content[coords.to_nd_index()] = CellContent::from_adjacent(adjacent);
                }
            }
        }

        Self {
            content,
            mine_count,
        }
    }

    /// Builds a field with mines at exactly the given coordinates. Intended
    /// for tests and replays.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default([size as usize, size as usize]);

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mines))
    }

    pub fn size(&self) -> Coord {
        self.content.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn bounds(&self) -> Coord2 {
        (self.size(), self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.content.len().try_into().unwrap_or(CellCount::MAX)
    }

    /// Cells that have to be revealed for a reveal-complete win.
    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn content_at(&self, coords: Coord2) -> CellContent {
        self.content[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.content_at(coords).is_mine()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_and_excessive_mine_counts() {
        assert_eq!(
            GameConfig::new(9, 0),
            Err(GameError::InvalidMineCount { got: 0, max: 72 })
        );
        assert_eq!(
            GameConfig::new(9, 73),
            Err(GameError::InvalidMineCount { got: 73, max: 72 })
        );
        assert!(GameConfig::new(9, 72).is_ok());
        assert!(GameConfig::new(9, 10).is_ok());
    }

    #[test]
    fn from_mine_coords_bakes_adjacency_numbers() {
        let field = MineField::from_mine_coords(3, &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.safe_cell_count(), 7);
        assert_eq!(field.content_at((0, 0)), CellContent::Mine);
        assert_eq!(field.content_at((1, 1)), CellContent::Number(2));
        assert_eq!(field.content_at((0, 1)), CellContent::Number(1));
        assert_eq!(field.content_at((2, 0)), CellContent::Empty);
    }

    #[test]
    fn from_mine_coords_rejects_out_of_bounds_mines() {
        assert_eq!(
            MineField::from_mine_coords(3, &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
    }
}
