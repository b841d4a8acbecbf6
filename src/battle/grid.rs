//! Bounded battlefield with blocking terrain
//!
//! Supplies the walkability and sight-blocking predicates that pathfinding and
//! visibility take as arguments.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::battle::hex::HexCoord;

/// The battlefield: a square of axial coordinates plus impassable, sight-blocking hexes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleGrid {
    pub radius: i32,
    pub obstacles: HashSet<HexCoord>,
}

impl BattleGrid {
    /// Create an open grid where q and r both range over `-radius..=radius`
    pub fn new(radius: i32) -> Self {
        Self {
            radius,
            obstacles: HashSet::new(),
        }
    }

    /// Check if coordinate is within map bounds
    pub fn in_bounds(&self, coord: HexCoord) -> bool {
        coord.q.abs() <= self.radius && coord.r.abs() <= self.radius
    }

    pub fn add_obstacle(&mut self, coord: HexCoord) {
        if self.in_bounds(coord) {
            self.obstacles.insert(coord);
        }
    }

    pub fn is_obstacle(&self, coord: HexCoord) -> bool {
        self.obstacles.contains(&coord)
    }

    /// In bounds and not an obstacle
    pub fn is_passable(&self, coord: HexCoord) -> bool {
        self.in_bounds(coord) && !self.is_obstacle(coord)
    }

    /// Does this hex block line of sight?
    pub fn blocks_sight(&self, coord: HexCoord) -> bool {
        self.is_obstacle(coord)
    }

    /// All coordinates inside the bounds, row by row
    pub fn hexes(&self) -> impl Iterator<Item = HexCoord> + '_ {
        (-self.radius..=self.radius)
            .flat_map(move |q| (-self.radius..=self.radius).map(move |r| HexCoord::new(q, r)))
    }
}
