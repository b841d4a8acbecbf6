//! Battle layer - hex geometry, turn order and the commands combatants issue
//!
//! Everything here is single-threaded and battle-scoped. Geometry queries are pure
//! functions; the scheduler owns the roster and is the only thing that mutates it.

pub mod actions;
pub mod ai;
pub mod constants;
pub mod grid;
pub mod hex;
pub mod layout;
pub mod log;
pub mod pathfinding;
pub mod roster;
pub mod scheduler;
pub mod visibility;

// Re-exports for convenient access
pub use actions::{Action, ActionCommand, ActionResult, AttackAction, MoveAction, WaitAction};
pub use ai::choose_action;
pub use constants::*;
pub use grid::BattleGrid;
pub use hex::{HexCoord, HexDirection};
pub use layout::HexLayout;
pub use log::CombatLog;
pub use pathfinding::{find_path, path_length};
pub use roster::Roster;
pub use scheduler::{TurnEntry, TurnPhase, TurnScheduler};
pub use visibility::{has_line_of_sight, visible_hexes};
