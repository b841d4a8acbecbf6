//! A* pathfinding over the hex grid
//!
//! Uniform step cost; walkability is supplied by the caller.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};

use crate::battle::hex::HexCoord;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode {
    coord: HexCoord,
    f_cost: u32, // g_cost + heuristic
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path from `start` to `goal` (both inclusive)
///
/// Returns an empty path if the goal cannot be reached. `is_walkable` is checked for
/// every neighbor before it enters the open set, never for `start`, and must bound the
/// search space (map edges) or an unreachable goal will never be reported.
///
/// Among equally short paths the one returned depends on heap order.
pub fn find_path<F>(start: HexCoord, goal: HexCoord, is_walkable: F) -> Vec<HexCoord>
where
    F: Fn(HexCoord) -> bool,
{
    let mut open_set = BinaryHeap::new();
    let mut closed_set: AHashSet<HexCoord> = AHashSet::new();
    let mut came_from: AHashMap<HexCoord, HexCoord> = AHashMap::new();
    let mut g_scores: AHashMap<HexCoord, u32> = AHashMap::new();

    g_scores.insert(start, 0);
    open_set.push(PathNode {
        coord: start,
        f_cost: start.distance(&goal),
    });

    while let Some(current) = open_set.pop() {
        if current.coord == goal {
            return reconstruct_path(&came_from, current.coord);
        }

        // Stale heap entries for already expanded nodes
        if !closed_set.insert(current.coord) {
            continue;
        }

        let current_g = g_scores[&current.coord];

        for neighbor in current.coord.neighbors() {
            if closed_set.contains(&neighbor) || !is_walkable(neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            let improved = g_scores
                .get(&neighbor)
                .map_or(true, |&existing| tentative_g < existing);

            if improved {
                came_from.insert(neighbor, current.coord);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(PathNode {
                    coord: neighbor,
                    f_cost: tentative_g + neighbor.distance(&goal),
                });
            }
        }
    }

    Vec::new()
}

/// Reconstruct path from came_from map
fn reconstruct_path(
    came_from: &AHashMap<HexCoord, HexCoord>,
    mut current: HexCoord,
) -> Vec<HexCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Number of steps a path takes (zero for a single hex or no path)
pub fn path_length(path: &[HexCoord]) -> u32 {
    path.len().saturating_sub(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(radius: i32) -> impl Fn(HexCoord) -> bool {
        move |h: HexCoord| h.q.abs() <= radius && h.r.abs() <= radius
    }

    fn assert_contiguous(path: &[HexCoord]) {
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]), "gap between {:?}", pair);
        }
    }

    #[test]
    fn test_pathfind_straight_line() {
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(5, 0);

        let path = find_path(start, goal, within(10));

        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path_length(&path), 5);
        assert_contiguous(&path);
    }

    #[test]
    fn test_pathfind_around_obstacle() {
        let wall = [HexCoord::new(2, 0), HexCoord::new(2, -1), HexCoord::new(2, 1)];
        let bounds = within(10);
        let walkable = |h: HexCoord| bounds(h) && !wall.contains(&h);

        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(4, 0);
        let path = find_path(start, goal, walkable);

        assert!(!path.is_empty());
        assert!(path.iter().all(|h| !wall.contains(h)));
        assert!(path_length(&path) > start.distance(&goal));
        assert_contiguous(&path);
    }

    #[test]
    fn test_pathfind_no_path() {
        let goal = HexCoord::new(3, 3);
        let ring = goal.neighbors();
        let bounds = within(6);
        let walkable = |h: HexCoord| bounds(h) && !ring.contains(&h);

        let path = find_path(HexCoord::new(0, 0), goal, walkable);

        assert!(path.is_empty());
    }

    #[test]
    fn test_pathfind_same_start_goal() {
        let start = HexCoord::new(5, 5);

        let path = find_path(start, start, |_| false);

        assert_eq!(path, vec![start]);
    }

    #[test]
    fn test_start_is_never_checked() {
        let start = HexCoord::new(0, 0);
        let goal = HexCoord::new(2, 0);
        let bounds = within(4);

        let path = find_path(start, goal, |h| h != start && bounds(h));

        assert_eq!(path.first(), Some(&start));
        assert_eq!(path_length(&path), 2);
    }

    #[test]
    fn test_unwalkable_goal_is_unreachable() {
        let goal = HexCoord::new(2, 0);
        let bounds = within(4);

        let path = find_path(HexCoord::new(0, 0), goal, |h| h != goal && bounds(h));

        assert!(path.is_empty());
    }

    #[test]
    fn test_path_length() {
        assert_eq!(path_length(&[]), 0);
        assert_eq!(path_length(&[HexCoord::new(0, 0)]), 0);
        assert_eq!(path_length(&[HexCoord::new(0, 0), HexCoord::new(1, 0)]), 1);
    }
}
