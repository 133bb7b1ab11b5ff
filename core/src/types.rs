/// Single coordinate axis used for board size and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const NEIGHBOR_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains inside
/// `bounds`.
fn offset(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(delta.0)?;
    if next_x >= bounds.0 {
        return None;
    }

    let next_y = coords.1.checked_add_signed(delta.1)?;
    if next_y >= bounds.1 {
        return None;
    }

    Some((next_x, next_y))
}

/// The 8-neighborhood of `center`, clipped to `bounds`.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    NEIGHBOR_DELTAS
        .into_iter()
        .filter_map(move |delta| offset(center, delta, bounds))
}

/// The clipped 3x3 block around `center`, including `center` itself.
pub fn safe_zone(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    core::iter::once(center).chain(neighbors(center, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_are_clipped_at_corners_and_edges() {
        assert_eq!(neighbors((0, 0), (9, 9)).count(), 3);
        assert_eq!(neighbors((4, 0), (9, 9)).count(), 5);
        assert_eq!(neighbors((4, 4), (9, 9)).count(), 8);
        assert_eq!(neighbors((8, 8), (9, 9)).count(), 3);
    }

    #[test]
    fn safe_zone_includes_center() {
        let zone: Vec<_> = safe_zone((0, 0), (9, 9)).collect();
        assert_eq!(zone.len(), 4);
        assert!(zone.contains(&(0, 0)));
        assert!(zone.contains(&(1, 1)));

        assert_eq!(safe_zone((4, 4), (9, 9)).count(), 9);
    }
}
