//! Attack resolution
//!
//! d20 + ability modifier + proficiency against armor class. Natural 20 always hits
//! and rolls the damage dice twice; natural 1 always misses.

use serde::{Deserialize, Serialize};

use crate::combat::combatant::Combatant;
use crate::combat::constants::{
    ATTACK_DIE, CRITICAL_ROLL, FUMBLE_ROLL, MIN_HIT_DAMAGE, PROFICIENCY_BONUS,
};
use crate::combat::dice::DiceRoller;

/// Result of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub hit: bool,
    pub critical: bool,
    /// The d20 face before bonuses
    pub natural_roll: u32,
    /// natural_roll + attack bonus
    pub attack_total: i32,
    pub target_ac: i32,
    /// Hit points actually removed from the target
    pub damage: u32,
    pub target_killed: bool,
}

impl AttackOutcome {
    pub fn is_fumble(&self) -> bool {
        self.natural_roll == FUMBLE_ROLL
    }
}

/// Bonus added to the attacker's d20
///
/// # Panics
/// If the attacker has no weapon profile.
pub fn attack_bonus(attacker: &Combatant) -> i32 {
    let weapon = require_weapon(attacker);
    attacker.modifier(weapon.uses) + PROFICIENCY_BONUS
}

/// Resolve an attack and apply its damage to `target`
///
/// The attacker is never modified.
///
/// # Panics
/// If the attacker has no weapon profile. That is a setup bug, not a miss.
pub fn resolve_attack(
    attacker: &Combatant,
    target: &mut Combatant,
    dice: &mut impl DiceRoller,
) -> AttackOutcome {
    let weapon = require_weapon(attacker);
    let ability_mod = attacker.modifier(weapon.uses);
    let bonus = ability_mod + PROFICIENCY_BONUS;
    let target_ac = target.armor_class();

    let natural_roll = dice.roll_die(ATTACK_DIE);
    let attack_total = natural_roll as i32 + bonus;
    let critical = natural_roll == CRITICAL_ROLL;

    let hit = match natural_roll {
        FUMBLE_ROLL => false,
        CRITICAL_ROLL => true,
        _ => attack_total >= target_ac,
    };

    let mut outcome = AttackOutcome {
        hit,
        critical,
        natural_roll,
        attack_total,
        target_ac,
        damage: 0,
        target_killed: false,
    };

    if !hit {
        tracing::debug!(
            "{} misses {}: rolled {} ({} vs AC {})",
            attacker.name,
            target.name,
            natural_roll,
            attack_total,
            target_ac
        );
        return outcome;
    }

    let mut dice_total = weapon.roll_damage(dice);
    if critical {
        dice_total += weapon.roll_damage(dice);
    }
    let raw = (dice_total as i32 + ability_mod).max(MIN_HIT_DAMAGE as i32) as u32;

    outcome.damage = target.hit_points.damage(raw);
    outcome.target_killed = target.is_dead();

    tracing::debug!(
        "{} hits {} for {} (rolled {}, {} vs AC {}{})",
        attacker.name,
        target.name,
        outcome.damage,
        natural_roll,
        attack_total,
        target_ac,
        if critical { ", critical" } else { "" }
    );

    outcome
}

fn require_weapon(attacker: &Combatant) -> &crate::combat::weapons::WeaponProfile {
    match attacker.weapon.as_ref() {
        Some(weapon) => weapon,
        None => panic!("{} attacked without a weapon profile", attacker.name),
    }
}
