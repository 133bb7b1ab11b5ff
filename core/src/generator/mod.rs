use crate::*;
pub use random::*;

mod random;

/// Produces the hidden layout for a match. Implementations own their
/// randomness so generation stays reproducible from the outside.
pub trait FieldGenerator {
    /// Places mines for `config`, keeping the clipped 3x3 zone around `safe`
    /// mine-free.
    fn generate(self, config: GameConfig, safe: Coord2) -> Result<MineField>;
}
