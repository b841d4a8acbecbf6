//! Weapon profiles

use serde::{Deserialize, Serialize};

use crate::battle::constants::{MELEE_REACH, SHORTBOW_REACH};
use crate::combat::dice::DiceRoller;
use crate::combat::stats::Ability;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub name: String,
    /// Number of damage dice
    pub damage_dice: u32,
    /// Faces per damage die
    pub damage_die: u32,
    /// Ability that drives attack and damage bonuses
    pub uses: Ability,
    /// Attack range in hexes (1 = adjacent only)
    pub reach: u32,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, damage_dice: u32, damage_die: u32, uses: Ability) -> Self {
        Self {
            name: name.into(),
            damage_dice,
            damage_die,
            uses,
            reach: MELEE_REACH,
        }
    }

    pub fn with_reach(mut self, reach: u32) -> Self {
        self.reach = reach;
        self
    }

    pub fn longsword() -> Self {
        Self::new("Longsword", 1, 8, Ability::Strength)
    }

    pub fn greatsword() -> Self {
        Self::new("Greatsword", 2, 6, Ability::Strength)
    }

    pub fn greataxe() -> Self {
        Self::new("Greataxe", 1, 12, Ability::Strength)
    }

    pub fn scimitar() -> Self {
        Self::new("Scimitar", 1, 6, Ability::Dexterity)
    }

    pub fn rapier() -> Self {
        Self::new("Rapier", 1, 8, Ability::Dexterity)
    }

    pub fn shortbow() -> Self {
        Self::new("Shortbow", 1, 6, Ability::Dexterity).with_reach(SHORTBOW_REACH)
    }

    /// Roll the weapon's dice once, without modifiers
    pub fn roll_damage(&self, dice: &mut impl DiceRoller) -> u32 {
        dice.roll_dice(self.damage_dice, self.damage_die)
    }

    /// Smallest and largest total of one roll of the dice
    pub fn damage_range(&self) -> (u32, u32) {
        (self.damage_dice, self.damage_dice * self.damage_die)
    }
}
