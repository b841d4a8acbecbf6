//! Class templates used to set up a battle

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_SPEED, FAST_SPEED};
use crate::combat::armor::{ArmorProfile, DexCap};
use crate::combat::combatant::{Combatant, Faction};
use crate::combat::stats::AbilityScores;
use crate::combat::weapons::WeaponProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatClass {
    Fighter,
    Rogue,
    Archer,
    Goblin,
    Orc,
}

impl CombatClass {
    pub fn abilities(&self) -> AbilityScores {
        match self {
            CombatClass::Fighter => AbilityScores::new(16, 12, 14, 8, 10, 10),
            CombatClass::Rogue => AbilityScores::new(10, 16, 12, 12, 10, 14),
            CombatClass::Archer => AbilityScores::new(10, 16, 12, 10, 14, 8),
            CombatClass::Goblin => AbilityScores::new(8, 14, 10, 10, 8, 8),
            CombatClass::Orc => AbilityScores::new(16, 12, 16, 7, 11, 10),
        }
    }

    pub fn max_hp(&self) -> u32 {
        match self {
            CombatClass::Fighter => 20,
            CombatClass::Rogue => 14,
            CombatClass::Archer => 12,
            CombatClass::Goblin => 7,
            CombatClass::Orc => 15,
        }
    }

    pub fn weapon(&self) -> WeaponProfile {
        match self {
            CombatClass::Fighter => WeaponProfile::longsword(),
            CombatClass::Rogue => WeaponProfile::rapier(),
            CombatClass::Archer => WeaponProfile::shortbow(),
            CombatClass::Goblin => WeaponProfile::scimitar(),
            CombatClass::Orc => WeaponProfile::greataxe(),
        }
    }

    pub fn armor(&self) -> ArmorProfile {
        match self {
            CombatClass::Fighter => ArmorProfile::chain_mail(),
            CombatClass::Rogue | CombatClass::Archer => ArmorProfile::leather(),
            CombatClass::Goblin => ArmorProfile::studded_leather(),
            CombatClass::Orc => ArmorProfile::new("Hide", 12, DexCap::Capped(2)),
        }
    }

    pub fn speed(&self) -> u32 {
        match self {
            CombatClass::Rogue | CombatClass::Goblin => FAST_SPEED,
            _ => DEFAULT_SPEED,
        }
    }

    /// A fresh combatant with this class's stat line
    pub fn build(&self, name: impl Into<String>, faction: Faction) -> Combatant {
        Combatant::new(name, faction, self.abilities(), self.max_hp())
            .with_weapon(self.weapon())
            .with_armor(self.armor())
            .with_speed(self.speed())
    }
}
