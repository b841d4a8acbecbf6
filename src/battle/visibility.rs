//! Line of sight and visible hexes
//!
//! Sight lines use `HexCoord::line_to`, an interpolated approximation of a hex line.

use std::collections::HashSet;

use crate::battle::hex::HexCoord;

/// Can `from` see `to`?
///
/// Walks the line from `from` (exclusive) to `to`. A blocking hex strictly between
/// the endpoints cuts the line; `to` itself may be blocking and still be seen.
pub fn has_line_of_sight<F>(from: HexCoord, to: HexCoord, is_blocking: F) -> bool
where
    F: Fn(HexCoord) -> bool,
{
    for coord in from.line_to(&to).into_iter().skip(1) {
        if coord == to {
            return true;
        }
        if is_blocking(coord) {
            return false;
        }
    }

    true
}

/// Every hex within `max_range` of `origin` (inclusive) with a clear line of sight
pub fn visible_hexes<F>(origin: HexCoord, max_range: u32, is_blocking: F) -> HashSet<HexCoord>
where
    F: Fn(HexCoord) -> bool,
{
    origin
        .hexes_in_range(max_range)
        .into_iter()
        .filter(|&coord| has_line_of_sight(origin, coord, &is_blocking))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_is_visible() {
        let a = HexCoord::new(2, -1);
        assert!(has_line_of_sight(a, a, |_| true));
    }

    #[test]
    fn test_no_blockers_always_visible() {
        let origin = HexCoord::new(0, 0);
        for target in origin.hexes_in_range(6) {
            assert!(has_line_of_sight(origin, target, |_| false));
        }
    }

    #[test]
    fn test_blocker_between_cuts_sight() {
        let from = HexCoord::new(0, 0);
        let wall = HexCoord::new(2, 0);
        let to = HexCoord::new(4, 0);

        assert!(!has_line_of_sight(from, to, |h| h == wall));
    }

    #[test]
    fn test_blocking_destination_still_seen() {
        let from = HexCoord::new(0, 0);
        let to = HexCoord::new(3, 0);

        assert!(has_line_of_sight(from, to, |h| h == to));
    }

    #[test]
    fn test_blocking_origin_does_not_matter() {
        let from = HexCoord::new(0, 0);
        let to = HexCoord::new(0, 3);

        assert!(has_line_of_sight(from, to, |h| h == from));
    }

    #[test]
    fn test_visible_hexes_open_field() {
        let origin = HexCoord::new(0, 0);
        let visible = visible_hexes(origin, 3, |_| false);

        assert_eq!(visible.len(), 37);
        assert!(visible.contains(&origin));
        assert!(!visible.contains(&HexCoord::new(4, 0)));
    }

    #[test]
    fn test_visible_hexes_shadow() {
        let origin = HexCoord::new(0, 0);
        let pillar = HexCoord::new(1, 0);
        let visible = visible_hexes(origin, 4, |h| h == pillar);

        // The pillar itself is seen, the hexes straight behind it are not
        assert!(visible.contains(&pillar));
        assert!(!visible.contains(&HexCoord::new(2, 0)));
        assert!(!visible.contains(&HexCoord::new(4, 0)));
        assert!(visible.contains(&HexCoord::new(0, 4)));
    }

    #[test]
    fn test_zero_range() {
        let origin = HexCoord::new(7, 7);
        let visible = visible_hexes(origin, 0, |_| true);
        assert_eq!(visible.len(), 1);
        assert!(visible.contains(&origin));
    }
}
