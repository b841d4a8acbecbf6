//! Combat math - dice, ability scores, armor, weapons and attack resolution

pub mod armor;
pub mod classes;
pub mod combatant;
pub mod constants;
pub mod dice;
pub mod resolution;
pub mod stats;
pub mod weapons;

pub use armor::{ArmorProfile, DexCap};
pub use classes::CombatClass;
pub use combatant::{Combatant, Faction, HitPoints, Size};
pub use dice::{DiceRoller, RngDice, ScriptedDice};
pub use resolution::{attack_bonus, resolve_attack, AttackOutcome};
pub use stats::{modifier, Ability, AbilityScores};
pub use weapons::WeaponProfile;
