//! The combatant table for one battle
//!
//! Every other part of the battle refers to combatants by `CombatantId`.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::battle::hex::HexCoord;
use crate::combat::combatant::{Combatant, Faction};
use crate::combat::dice::DiceRoller;
use crate::combat::resolution::{resolve_attack, AttackOutcome};
use crate::core::types::CombatantId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a combatant and return its handle
    pub fn add(&mut self, combatant: Combatant) -> CombatantId {
        self.combatants.push(combatant);
        CombatantId(self.combatants.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        id.index() < self.combatants.len()
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    pub fn ids(&self) -> impl Iterator<Item = CombatantId> {
        (0..self.combatants.len()).map(CombatantId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, &Combatant)> {
        self.combatants
            .iter()
            .enumerate()
            .map(|(i, c)| (CombatantId(i), c))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Combatant> {
        self.combatants.iter_mut()
    }

    /// Living members of a faction
    pub fn living(&self, faction: Faction) -> impl Iterator<Item = (CombatantId, &Combatant)> {
        self.iter()
            .filter(move |(_, c)| c.faction == faction && c.is_alive())
    }

    pub fn any_alive(&self, faction: Faction) -> bool {
        self.living(faction).next().is_some()
    }

    /// Living combatant whose footprint covers `coord`
    pub fn occupant_at(&self, coord: HexCoord) -> Option<CombatantId> {
        self.iter()
            .find(|(_, c)| c.is_alive() && c.occupies(coord))
            .map(|(id, _)| id)
    }

    /// Borrow one combatant immutably and another mutably
    ///
    /// # Panics
    /// If `a == b` or either handle is not in the roster.
    pub fn pair_mut(&mut self, a: CombatantId, b: CombatantId) -> (&Combatant, &mut Combatant) {
        assert_ne!(a, b, "pair_mut needs two different combatants");
        let (ai, bi) = (a.index(), b.index());
        if ai < bi {
            let (head, tail) = self.combatants.split_at_mut(bi);
            (&head[ai], &mut tail[0])
        } else {
            let (head, tail) = self.combatants.split_at_mut(ai);
            (&tail[0], &mut head[bi])
        }
    }

    /// Resolve an attack between two roster entries
    ///
    /// # Panics
    /// On an unknown handle, a self-attack, or an attacker without a weapon.
    pub fn resolve_attack(
        &mut self,
        attacker: CombatantId,
        target: CombatantId,
        dice: &mut impl DiceRoller,
    ) -> AttackOutcome {
        let (attacker, target) = self.pair_mut(attacker, target);
        resolve_attack(attacker, target, dice)
    }
}

impl Index<CombatantId> for Roster {
    type Output = Combatant;

    fn index(&self, id: CombatantId) -> &Combatant {
        &self.combatants[id.index()]
    }
}

impl IndexMut<CombatantId> for Roster {
    fn index_mut(&mut self, id: CombatantId) -> &mut Combatant {
        &mut self.combatants[id.index()]
    }
}

impl FromIterator<Combatant> for Roster {
    fn from_iter<I: IntoIterator<Item = Combatant>>(iter: I) -> Self {
        Self {
            combatants: iter.into_iter().collect(),
        }
    }
}
