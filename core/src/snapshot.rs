use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render view of one cell. `content` is present only once the cell is
/// revealed or the game has ended, so front-ends can never peek at hidden
/// mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub visibility: Visibility,
    pub content: Option<CellContent>,
}

/// Read-only view of a match for any front-end to render, whether as a text
/// grid, a widget grid or a 3-D scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord,
    pub mine_count: CellCount,
    pub mines_left: isize,
    pub outcome: Outcome,
    pub elapsed_secs: u32,
    pub cells: Array2<CellView>,
}

impl Snapshot {
    pub fn from_game(game: &Game) -> Self {
        let size = game.size();
        let mut cells: Array2<CellView> = Array2::default([size as usize, size as usize]);

        for x in 0..size {
            for y in 0..size {
                let coords = (x, y);
                cells[coords.to_nd_index()] = CellView {
                    visibility: game.cell_visibility(coords),
                    content: game.visible_content(coords),
                };
            }
        }

        Self {
            size,
            mine_count: game.total_mines(),
            mines_left: game.mines_left(),
            outcome: game.outcome(),
            elapsed_secs: game.elapsed_secs(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hides_content_of_unrevealed_cells_while_in_progress() {
        let field = MineField::from_mine_coords(3, &[(0, 0)]).unwrap();
        let mut game = Game::from_field(field, WinMode::RevealComplete);
        game.reveal((2, 2)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let snapshot = Snapshot::from_game(&game);

        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.cell((2, 2)).content, Some(CellContent::Empty));
        assert_eq!(snapshot.cell((0, 0)).visibility, Visibility::Flagged);
        assert_eq!(snapshot.cell((0, 0)).content, None);
        assert_eq!(snapshot.cell((1, 0)).content, None);
    }

    #[test]
    fn exposes_everything_once_the_game_is_over() {
        let field = MineField::from_mine_coords(3, &[(0, 0)]).unwrap();
        let mut game = Game::from_field(field, WinMode::RevealComplete);
        game.reveal((0, 0)).unwrap();

        let snapshot = Snapshot::from_game(&game);

        assert_eq!(snapshot.outcome, Outcome::Lost);
        assert_eq!(snapshot.cell((0, 0)).content, Some(CellContent::Mine));
        assert_eq!(snapshot.cell((1, 1)).content, Some(CellContent::Number(1)));
        assert_eq!(snapshot.cell((2, 2)).content, Some(CellContent::Empty));
    }

    #[test]
    fn reports_negative_mines_left_when_over_flagged() {
        let field = MineField::from_mine_coords(3, &[(0, 0)]).unwrap();
        let mut game = Game::from_field(field, WinMode::FlagComplete);
        game.toggle_flag((1, 1)).unwrap();
        game.toggle_flag((2, 2)).unwrap();

        let snapshot = Snapshot::from_game(&game);

        assert_eq!(snapshot.mine_count, 1);
        assert_eq!(snapshot.mines_left, -1);
    }

    #[test]
    fn pre_generation_snapshot_is_fully_hidden() {
        let config = GameConfig::new(9, 10).unwrap();
        let game = Game::with_seed(config, WinMode::RevealComplete, 5).unwrap();

        let snapshot = Snapshot::from_game(&game);

        assert_eq!(snapshot.mines_left, 10);
        for x in 0..9 {
            for y in 0..9 {
                assert_eq!(snapshot.cell((x, y)), CellView::default());
            }
        }
    }
}
