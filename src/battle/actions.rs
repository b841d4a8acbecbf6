//! Commands a combatant can take on its turn
//!
//! Each command is validated against the roster before it is queued and executed
//! exactly once by the scheduler.

use serde::{Deserialize, Serialize};

use crate::battle::grid::BattleGrid;
use crate::battle::hex::HexCoord;
use crate::battle::pathfinding::{find_path, path_length};
use crate::battle::roster::Roster;
use crate::combat::combatant::Combatant;
use crate::combat::dice::DiceRoller;
use crate::combat::resolution::AttackOutcome;
use crate::core::error::{Result, TacticsError};
use crate::core::types::CombatantId;

/// What executing a command produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    /// Lines for the combat log, in order
    pub messages: Vec<String>,
    pub attack: Option<AttackOutcome>,
}

impl ActionResult {
    fn succeeded(messages: Vec<String>) -> Self {
        Self {
            success: true,
            messages,
            attack: None,
        }
    }

    fn failed(error: TacticsError) -> Self {
        Self {
            success: false,
            messages: vec![error.to_string()],
            attack: None,
        }
    }
}

/// Shared capabilities of every command
pub trait Action {
    /// The combatant taking the action
    fn actor(&self) -> CombatantId;

    fn validate(&self, roster: &Roster, grid: &BattleGrid) -> Result<()>;

    /// Run the command. Re-validates first; an invalid command changes nothing.
    fn execute<D: DiceRoller>(
        &self,
        roster: &mut Roster,
        grid: &BattleGrid,
        dice: &mut D,
    ) -> ActionResult;

    fn description(&self, roster: &Roster) -> String;
}

fn display_name(roster: &Roster, id: CombatantId) -> String {
    roster
        .get(id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("combatant {}", id))
}

fn lookup(roster: &Roster, id: CombatantId) -> Result<&Combatant> {
    roster.get(id).ok_or(TacticsError::UnknownCombatant(id))
}

/// Melee or ranged attack against another combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackAction {
    pub attacker: CombatantId,
    pub target: CombatantId,
}

impl Action for AttackAction {
    fn actor(&self) -> CombatantId {
        self.attacker
    }

    fn validate(&self, roster: &Roster, _grid: &BattleGrid) -> Result<()> {
        let attacker = lookup(roster, self.attacker)?;
        if attacker.is_dead() {
            return Err(TacticsError::AttackerDead(attacker.name.clone()));
        }

        let target = lookup(roster, self.target)?;
        if target.is_dead() {
            return Err(TacticsError::TargetDead(target.name.clone()));
        }

        if self.attacker == self.target {
            return Err(TacticsError::SelfAttack(attacker.name.clone()));
        }

        Ok(())
    }

    fn execute<D: DiceRoller>(
        &self,
        roster: &mut Roster,
        grid: &BattleGrid,
        dice: &mut D,
    ) -> ActionResult {
        if let Err(e) = self.validate(roster, grid) {
            return ActionResult::failed(e);
        }

        let outcome = roster.resolve_attack(self.attacker, self.target, dice);
        let attacker = &roster[self.attacker].name;
        let target = &roster[self.target].name;

        let mut messages = Vec::new();
        if outcome.hit {
            if outcome.critical {
                messages.push(format!("Critical hit! {} strikes {}!", attacker, target));
            }
            messages.push(format!(
                "{} hits {} for {} damage ({} vs AC {})",
                attacker, target, outcome.damage, outcome.attack_total, outcome.target_ac
            ));
            if outcome.target_killed {
                messages.push(format!("{} is slain!", target));
            }
        } else if outcome.is_fumble() {
            messages.push(format!("{} fumbles the attack on {}", attacker, target));
        } else {
            messages.push(format!(
                "{} misses {} ({} vs AC {})",
                attacker, target, outcome.attack_total, outcome.target_ac
            ));
        }

        let mut result = ActionResult::succeeded(messages);
        result.attack = Some(outcome);
        result
    }

    fn description(&self, roster: &Roster) -> String {
        format!(
            "{} attacks {}",
            display_name(roster, self.attacker),
            display_name(roster, self.target)
        )
    }
}

/// Pass the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitAction {
    pub actor: CombatantId,
}

impl Action for WaitAction {
    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn validate(&self, _roster: &Roster, _grid: &BattleGrid) -> Result<()> {
        Ok(())
    }

    fn execute<D: DiceRoller>(
        &self,
        roster: &mut Roster,
        _grid: &BattleGrid,
        _dice: &mut D,
    ) -> ActionResult {
        ActionResult::succeeded(vec![format!("{} waits", display_name(roster, self.actor))])
    }

    fn description(&self, roster: &Roster) -> String {
        format!("{} waits", display_name(roster, self.actor))
    }
}

/// Walk to a destination along a shortest path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAction {
    pub actor: CombatantId,
    pub destination: HexCoord,
}

impl MoveAction {
    /// Path the move would take, or an error saying why it can't be taken
    pub fn plan(&self, roster: &Roster, grid: &BattleGrid) -> Result<Vec<HexCoord>> {
        let actor = lookup(roster, self.actor)?;
        if actor.is_dead() {
            return Err(TacticsError::AttackerDead(actor.name.clone()));
        }

        if actor.position == self.destination {
            return Err(TacticsError::InvalidMove(format!(
                "{} is already at ({}, {})",
                actor.name, self.destination.q, self.destination.r
            )));
        }

        if !grid.is_passable(self.destination) {
            return Err(TacticsError::InvalidMove(format!(
                "({}, {}) is not walkable",
                self.destination.q, self.destination.r
            )));
        }

        let walkable = walkable_for(roster, grid, self.actor);
        if !walkable(self.destination) {
            return Err(TacticsError::InvalidMove(format!(
                "({}, {}) is occupied",
                self.destination.q, self.destination.r
            )));
        }

        let path = find_path(actor.position, self.destination, walkable);
        if path.is_empty() {
            return Err(TacticsError::InvalidMove(format!(
                "no route to ({}, {})",
                self.destination.q, self.destination.r
            )));
        }

        let steps = path_length(&path);
        if steps > actor.speed {
            return Err(TacticsError::InvalidMove(format!(
                "{} needs {} steps but can move {}",
                actor.name, steps, actor.speed
            )));
        }

        Ok(path)
    }
}

impl Action for MoveAction {
    fn actor(&self) -> CombatantId {
        self.actor
    }

    fn validate(&self, roster: &Roster, grid: &BattleGrid) -> Result<()> {
        self.plan(roster, grid).map(|_| ())
    }

    fn execute<D: DiceRoller>(
        &self,
        roster: &mut Roster,
        grid: &BattleGrid,
        _dice: &mut D,
    ) -> ActionResult {
        let path = match self.plan(roster, grid) {
            Ok(path) => path,
            Err(e) => return ActionResult::failed(e),
        };

        let actor = &mut roster[self.actor];
        actor.position = self.destination;
        ActionResult::succeeded(vec![format!(
            "{} moves {} hexes to ({}, {})",
            actor.name,
            path_length(&path),
            self.destination.q,
            self.destination.r
        )])
    }

    fn description(&self, roster: &Roster) -> String {
        format!(
            "{} moves to ({}, {})",
            display_name(roster, self.actor),
            self.destination.q,
            self.destination.r
        )
    }
}

/// Walkability for `actor`: passable terrain not held by another living combatant
pub fn walkable_for<'a>(
    roster: &'a Roster,
    grid: &'a BattleGrid,
    actor: CombatantId,
) -> impl Fn(HexCoord) -> bool + 'a {
    move |coord| {
        grid.is_passable(coord)
            && roster
                .occupant_at(coord)
                .map_or(true, |occupant| occupant == actor)
    }
}

/// A validated unit of intent, queued on the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionCommand {
    Attack(AttackAction),
    Wait(WaitAction),
    Move(MoveAction),
}

impl ActionCommand {
    pub fn attack(attacker: CombatantId, target: CombatantId) -> Self {
        ActionCommand::Attack(AttackAction { attacker, target })
    }

    pub fn wait(actor: CombatantId) -> Self {
        ActionCommand::Wait(WaitAction { actor })
    }

    pub fn move_to(actor: CombatantId, destination: HexCoord) -> Self {
        ActionCommand::Move(MoveAction { actor, destination })
    }
}

impl Action for ActionCommand {
    fn actor(&self) -> CombatantId {
        match self {
            ActionCommand::Attack(a) => a.actor(),
            ActionCommand::Wait(a) => a.actor(),
            ActionCommand::Move(a) => a.actor(),
        }
    }

    fn validate(&self, roster: &Roster, grid: &BattleGrid) -> Result<()> {
        match self {
            ActionCommand::Attack(a) => a.validate(roster, grid),
            ActionCommand::Wait(a) => a.validate(roster, grid),
            ActionCommand::Move(a) => a.validate(roster, grid),
        }
    }

    fn execute<D: DiceRoller>(
        &self,
        roster: &mut Roster,
        grid: &BattleGrid,
        dice: &mut D,
    ) -> ActionResult {
        match self {
            ActionCommand::Attack(a) => a.execute(roster, grid, dice),
            ActionCommand::Wait(a) => a.execute(roster, grid, dice),
            ActionCommand::Move(a) => a.execute(roster, grid, dice),
        }
    }

    fn description(&self, roster: &Roster) -> String {
        match self {
            ActionCommand::Attack(a) => a.description(roster),
            ActionCommand::Wait(a) => a.description(roster),
            ActionCommand::Move(a) => a.description(roster),
        }
    }
}
