use gridway_core::Coord;

/// Manhattan (L1) distance between two coordinates.
///
/// Admissible and consistent for 4-directional uniform-cost grids, which
/// makes it the search heuristic.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Coord::new(0, 0), Coord::new(4, 4)), 8);
        assert_eq!(manhattan(Coord::new(3, 1), Coord::new(1, 2)), 3);
        assert_eq!(manhattan(Coord::new(2, 2), Coord::new(2, 2)), 0);
    }
}
