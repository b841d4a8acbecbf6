//! Armor profiles and armor class

use serde::{Deserialize, Serialize};

/// How much of the dexterity modifier armor lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DexCap {
    /// Light armor or none: full modifier
    Unlimited,
    /// Medium armor: modifier up to the cap
    Capped(i32),
    /// Heavy armor: no modifier
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorProfile {
    pub name: String,
    pub base_ac: i32,
    pub max_dex: DexCap,
}

impl Default for ArmorProfile {
    fn default() -> Self {
        Self::unarmored()
    }
}

impl ArmorProfile {
    pub fn new(name: impl Into<String>, base_ac: i32, max_dex: DexCap) -> Self {
        Self {
            name: name.into(),
            base_ac,
            max_dex,
        }
    }

    pub fn unarmored() -> Self {
        Self::new("None", 10, DexCap::Unlimited)
    }

    pub fn leather() -> Self {
        Self::new("Leather", 11, DexCap::Unlimited)
    }

    pub fn studded_leather() -> Self {
        Self::new("Studded Leather", 12, DexCap::Unlimited)
    }

    pub fn scale_mail() -> Self {
        Self::new("Scale Mail", 14, DexCap::Capped(2))
    }

    pub fn chain_mail() -> Self {
        Self::new("Chain Mail", 16, DexCap::None)
    }

    /// Armor class for a wearer with the given dexterity modifier
    pub fn armor_class(&self, dex_modifier: i32) -> i32 {
        let dex_bonus = match self.max_dex {
            DexCap::Unlimited => dex_modifier,
            DexCap::Capped(cap) => dex_modifier.min(cap),
            DexCap::None => 0,
        };
        self.base_ac + dex_bonus
    }
}
