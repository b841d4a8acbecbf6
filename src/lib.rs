//! Hexy Tactics - turn-based tactical combat on a hex grid
//!
//! - `battle`: hex geometry, pathfinding, visibility, the turn scheduler and its commands
//! - `combat`: d20 attack resolution and combatant data
//! - `core`: errors, configuration and shared handles

pub mod battle;
pub mod combat;
pub mod core;
