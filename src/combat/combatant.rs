//! Per-combatant battle record

use serde::{Deserialize, Serialize};

use crate::battle::constants::DEFAULT_SPEED;
use crate::battle::hex::HexCoord;
use crate::combat::armor::ArmorProfile;
use crate::combat::stats::{Ability, AbilityScores};
use crate::combat::weapons::WeaponProfile;

/// Which side controls a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opposing(&self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Faction::Player)
    }
}

/// Hit points; `current` never leaves `0..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    current: u32,
    max: u32,
}

impl HitPoints {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Start below full; `current` is clamped to `max`
    pub fn with_current(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Subtract damage, stopping at zero. Returns the damage actually taken.
    pub fn damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.current);
        self.current -= taken;
        taken
    }

    /// Restore hit points, stopping at max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max - self.current);
        self.current += healed;
        healed
    }

    pub fn set_current(&mut self, current: u32) {
        self.current = current.min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub fn is_full_health(&self) -> bool {
        self.current == self.max
    }
}

/// Footprint on the grid: every hex within `radius` of the combatant's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Size {
    pub radius: u32,
}

impl Size {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    /// 1 + 3n(n+1)
    pub fn num_hexes(&self) -> u32 {
        1 + 3 * self.radius * (self.radius + 1)
    }

    pub fn occupied_hexes(&self, center: HexCoord) -> Vec<HexCoord> {
        center.hexes_in_range(self.radius)
    }
}

/// Everything the combat core tracks about one unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub faction: Faction,
    pub abilities: AbilityScores,
    pub hit_points: HitPoints,
    pub armor: ArmorProfile,
    /// Required to attack; attacking without one is a programming error
    pub weapon: Option<WeaponProfile>,
    /// Last rolled initiative (d20 + dexterity modifier)
    pub initiative: i32,
    pub has_acted: bool,
    pub position: HexCoord,
    pub size: Size,
    /// Hexes the combatant may move per turn
    pub speed: u32,
}

impl Combatant {
    pub fn new(name: impl Into<String>, faction: Faction, abilities: AbilityScores, max_hp: u32) -> Self {
        Self {
            name: name.into(),
            faction,
            abilities,
            hit_points: HitPoints::new(max_hp),
            armor: ArmorProfile::unarmored(),
            weapon: None,
            initiative: 0,
            has_acted: false,
            position: HexCoord::default(),
            size: Size::default(),
            speed: DEFAULT_SPEED,
        }
    }

    pub fn with_weapon(mut self, weapon: WeaponProfile) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: ArmorProfile) -> Self {
        self.armor = armor;
        self
    }

    pub fn at(mut self, position: HexCoord) -> Self {
        self.position = position;
        self
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points.is_dead()
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    pub fn armor_class(&self) -> i32 {
        self.armor.armor_class(self.modifier(Ability::Dexterity))
    }

    /// Hexes covered by this combatant's footprint
    pub fn occupied_hexes(&self) -> Vec<HexCoord> {
        self.size.occupied_hexes(self.position)
    }

    /// Does the footprint cover `coord`?
    pub fn occupies(&self, coord: HexCoord) -> bool {
        self.position.distance(&coord) <= self.size.radius
    }
}
