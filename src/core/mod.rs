pub mod config;
pub mod error;
pub mod types;

pub use config::{BattleConfig, LayoutConfig};
pub use error::{Result, TacticsError};
pub use types::{CombatantId, Round};
