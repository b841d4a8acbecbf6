//! Battle tunables in one place

use crate::core::types::Round;

// Battlefield
pub const DEFAULT_GRID_RADIUS: i32 = 5;

// Turn order
pub const FIRST_ROUND: Round = 1;

// Combat log
pub const DEFAULT_LOG_CAPACITY: usize = 10;

// Movement (hexes per turn)
pub const DEFAULT_SPEED: u32 = 3;
pub const FAST_SPEED: u32 = 4;

// Reach (hexes); melee weapons only hit adjacent hexes
pub const MELEE_REACH: u32 = 1;
pub const SHORTBOW_REACH: u32 = 8;
