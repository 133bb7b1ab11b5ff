use ndarray::Array2;

use super::*;

/// Uniform mine placement excluding the safe zone around the first revealed
/// cell, seeded for reproducibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomFieldGenerator {
    seed: u64,
}

impl RandomFieldGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

fn in_safe_zone((x, y): Coord2, (safe_x, safe_y): Coord2) -> bool {
    x.abs_diff(safe_x) <= 1 && y.abs_diff(safe_y) <= 1
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: GameConfig, safe: Coord2) -> Result<MineField> {
        use rand::prelude::*;

        config.validate()?;
        let bounds = config.bounds();
        if safe.0 >= bounds.0 || safe.1 >= bounds.1 {
            return Err(GameError::OutOfBounds);
        }

        // config validation guarantees at least `mines` candidates even for
        // an interior safe zone
        let mut candidates: Vec<Coord2> = (0..bounds.0)
            .flat_map(|x| (0..bounds.1).map(move |y| (x, y)))
            .filter(|&coords| !in_safe_zone(coords, safe))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = candidates.partial_shuffle(&mut rng, config.mines as usize);

        let mut mines: Array2<bool> = Array2::default(bounds.to_nd_index());
        for &coords in chosen.iter() {
            mines[coords.to_nd_index()] = true;
        }

        let field = MineField::from_mine_mask(&mines);
        if field.mine_count() != config.mines {
            log::warn!(
                "generated field mine count mismatch, actual: {}, requested: {}",
                field.mine_count(),
                config.mines
            );
        }
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord, mines: CellCount, safe: Coord2, seed: u64) -> MineField {
        RandomFieldGenerator::new(seed)
            .generate(GameConfig::new_unchecked(size, mines), safe)
            .unwrap()
    }

    #[test]
    fn places_exact_mine_count_outside_safe_zone() {
        for seed in 0..20 {
            let field = generate(9, 10, (4, 4), seed);

            assert_eq!(field.mine_count(), 10);
            for pos in safe_zone((4, 4), (9, 9)) {
                assert!(!field.is_mine(pos), "mine inside safe zone at {pos:?}");
            }

            let mut total = 0;
            for x in 0..9 {
                for y in 0..9 {
                    if field.is_mine((x, y)) {
                        total += 1;
                    }
                }
            }
            assert_eq!(total, 10);
        }
    }

    #[test]
    fn numbers_match_adjacent_mines() {
        let field = generate(9, 30, (0, 0), 7);

        for x in 0..9 {
            for y in 0..9 {
                let coords = (x, y);
                if field.is_mine(coords) {
                    continue;
                }
                let adjacent = neighbors(coords, (9, 9))
                    .filter(|&pos| field.is_mine(pos))
                    .count() as u8;
                assert_eq!(field.content_at(coords), CellContent::from_adjacent(adjacent));
            }
        }
    }

    #[test]
    fn clipped_corner_safe_zone_fits_maximal_mine_count() {
        // 9x9 allows up to 72 mines; a corner zone only excludes 4 cells so
        // placement must still succeed without touching them
        let field = generate(9, 72, (0, 0), 3);

        assert_eq!(field.mine_count(), 72);
        for pos in safe_zone((0, 0), (9, 9)) {
            assert!(!field.is_mine(pos));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let a = generate(9, 10, (4, 4), 42);
        let b = generate(9, 10, (4, 4), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_invalid_config_and_safe_coordinate() {
        let generator = RandomFieldGenerator::new(1);
        assert_eq!(
            generator.generate(GameConfig::new_unchecked(9, 73), (4, 4)),
            Err(GameError::InvalidMineCount { got: 73, max: 72 })
        );
        assert_eq!(
            generator.generate(GameConfig::new_unchecked(9, 10), (9, 0)),
            Err(GameError::OutOfBounds)
        );
    }
}
