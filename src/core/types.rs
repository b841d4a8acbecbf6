//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle into the battle roster
///
/// Handles are plain indices; the roster never removes records mid-battle, so a
/// handle stays valid for the whole battle it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub usize);

impl CombatantId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Battle round counter
pub type Round = u32;
