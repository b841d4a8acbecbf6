//! Turn scheduler - initiative order and the per-turn state machine
//!
//! ```text
//! BattleStart -> RollInitiative -> SortOrder -> WaitingForPlayerInput | EnemyTurn
//!     -> ExecuteAction -> (next combatant) | Victory | Defeat
//! ```
//!
//! Initiative is rolled once per battle. The presentation layer polls [`TurnScheduler::update`]
//! once per tick and queues at most one command per turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::battle::actions::{Action, ActionCommand, ActionResult};
use crate::battle::constants::FIRST_ROUND;
use crate::battle::grid::BattleGrid;
use crate::battle::log::CombatLog;
use crate::battle::roster::Roster;
use crate::combat::combatant::Faction;
use crate::combat::dice::DiceRoller;
use crate::combat::stats::Ability;
use crate::core::config::BattleConfig;
use crate::core::error::{Result, TacticsError};
use crate::core::types::{CombatantId, Round};

/// Scheduler phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    BattleStart,
    RollInitiative,
    SortOrder,
    WaitingForPlayerInput,
    EnemyTurn,
    ExecuteAction,
    Victory,
    Defeat,
}

impl TurnPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnPhase::Victory | TurnPhase::Defeat)
    }

    /// Phases where a command may be queued
    pub fn awaits_command(&self) -> bool {
        matches!(self, TurnPhase::WaitingForPlayerInput | TurnPhase::EnemyTurn)
    }

    /// Phases `update` steps through without outside input
    pub fn is_automatic(&self) -> bool {
        matches!(
            self,
            TurnPhase::BattleStart
                | TurnPhase::RollInitiative
                | TurnPhase::SortOrder
                | TurnPhase::ExecuteAction
        )
    }
}

/// One row of the turn order, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub id: CombatantId,
    pub name: String,
    pub faction: Faction,
    pub initiative: i32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub has_acted: bool,
    pub is_dead: bool,
    pub is_active: bool,
}

/// Owns the roster for one battle and decides whose turn it is
#[derive(Debug, Clone)]
pub struct TurnScheduler<D: DiceRoller> {
    phase: TurnPhase,
    order: Vec<CombatantId>,
    current_index: usize,
    round: Round,
    pending: Option<ActionCommand>,
    last_result: Option<ActionResult>,
    log: CombatLog,

    roster: Roster,
    grid: BattleGrid,
    dice: D,

    // Restored by `reset`
    initial_roster: Roster,
}

impl<D: DiceRoller> TurnScheduler<D> {
    pub fn new(roster: Roster, grid: BattleGrid, config: &BattleConfig, dice: D) -> Self {
        Self {
            phase: TurnPhase::BattleStart,
            order: Vec::new(),
            current_index: 0,
            round: FIRST_ROUND,
            pending: None,
            last_result: None,
            log: CombatLog::new(config.combat_log_capacity),
            initial_roster: roster.clone(),
            roster,
            grid,
            dice,
        }
    }

    // ---- State machine ----

    /// Advance one automatic phase; returns the phase afterwards
    ///
    /// Phases waiting on a command and the terminal phases are left alone.
    pub fn update(&mut self) -> TurnPhase {
        match self.phase {
            TurnPhase::BattleStart => self.roll_initiative(),
            TurnPhase::RollInitiative => self.sort_order(),
            TurnPhase::SortOrder => self.route_turn(),
            TurnPhase::ExecuteAction => {
                // Only reachable with a pending command
                let _ = self.execute_pending();
            }
            TurnPhase::WaitingForPlayerInput
            | TurnPhase::EnemyTurn
            | TurnPhase::Victory
            | TurnPhase::Defeat => {}
        }
        self.phase
    }

    /// Run initiative and ordering in one go, stopping at the first turn
    pub fn start_battle(&mut self) -> Result<TurnPhase> {
        if self.phase != TurnPhase::BattleStart {
            return Err(TacticsError::WrongPhase(self.phase));
        }

        while matches!(
            self.phase,
            TurnPhase::BattleStart | TurnPhase::RollInitiative | TurnPhase::SortOrder
        ) {
            self.update();
        }
        Ok(self.phase)
    }

    /// d20 + DEX for every combatant; clears acted flags
    fn roll_initiative(&mut self) {
        info!("Battle started with {} combatants", self.roster.len());
        self.log.push("Battle begins!");

        for combatant in self.roster.iter_mut() {
            combatant.initiative =
                self.dice.d20() as i32 + combatant.modifier(Ability::Dexterity);
            combatant.has_acted = false;
            debug!("{} rolls initiative {}", combatant.name, combatant.initiative);
        }

        self.set_phase(TurnPhase::RollInitiative);
    }

    /// Fix the turn order for the whole battle, highest initiative first
    fn sort_order(&mut self) {
        let roster = &self.roster;
        let mut order: Vec<CombatantId> = roster.ids().collect();
        // Stable: ties keep roster order
        order.sort_by(|a, b| roster[*b].initiative.cmp(&roster[*a].initiative));

        self.order = order;
        self.current_index = 0;
        self.round = FIRST_ROUND;
        self.set_phase(TurnPhase::SortOrder);
    }

    /// Hand the turn to the combatant at the current index
    ///
    /// Dead combatants stay in the order; their turns pass immediately.
    fn route_turn(&mut self) {
        if self.check_battle_end() {
            return;
        }

        for _ in 0..self.order.len() {
            let id = self.order[self.current_index];
            let combatant = &self.roster[id];
            if combatant.is_alive() {
                let phase = if combatant.faction.is_player() {
                    TurnPhase::WaitingForPlayerInput
                } else {
                    TurnPhase::EnemyTurn
                };
                debug!("Turn {} of round {}: {}", self.current_index, self.round, combatant.name);
                self.set_phase(phase);
                return;
            }

            debug!("Skipping {} (dead)", combatant.name);
            self.step_index();
        }
    }

    /// Mark the departing combatant as acted and move the index, rolling the round over
    fn step_index(&mut self) {
        if let Some(&id) = self.order.get(self.current_index) {
            self.roster[id].has_acted = true;
        }

        self.current_index += 1;
        if self.current_index >= self.order.len() {
            self.current_index = 0;
            self.round += 1;
            for combatant in self.roster.iter_mut() {
                combatant.has_acted = false;
            }
            info!("Round {} begins", self.round);
            self.log.push(format!("--- Round {} ---", self.round));
        }
    }

    fn next_turn(&mut self) {
        self.step_index();
        self.route_turn();
    }

    /// Queue the active combatant's command
    ///
    /// Rejections leave the scheduler untouched and the same turn can try again.
    pub fn queue_action(&mut self, command: ActionCommand) -> Result<()> {
        if let Err(e) = self.check_command(&command) {
            warn!("Rejected '{}': {}", command.description(&self.roster), e);
            return Err(e);
        }

        debug!("Queued '{}'", command.description(&self.roster));
        self.pending = Some(command);
        self.set_phase(TurnPhase::ExecuteAction);
        Ok(())
    }

    fn check_command(&self, command: &ActionCommand) -> Result<()> {
        if self.pending.is_some() {
            return Err(TacticsError::ActionAlreadyPending);
        }

        if self.phase.is_terminal() {
            return Err(TacticsError::BattleOver);
        }

        if !self.phase.awaits_command() {
            return Err(TacticsError::WrongPhase(self.phase));
        }

        let actor = command.actor();
        if self.active_combatant() != Some(actor) {
            let name = self
                .roster
                .get(actor)
                .map(|c| c.name.clone())
                .ok_or(TacticsError::UnknownCombatant(actor))?;
            return Err(TacticsError::NotActiveCombatant(name));
        }

        command.validate(&self.roster, &self.grid)
    }

    /// Execute the pending command, log it, and move on unless the battle ended
    pub fn execute_pending(&mut self) -> Result<ActionResult> {
        if self.phase != TurnPhase::ExecuteAction {
            return Err(TacticsError::WrongPhase(self.phase));
        }
        let Some(command) = self.pending.take() else {
            return Err(TacticsError::WrongPhase(self.phase));
        };

        let result = command.execute(&mut self.roster, &self.grid, &mut self.dice);
        for message in &result.messages {
            self.log.push(message.clone());
        }
        self.last_result = Some(result.clone());

        if !self.check_battle_end() {
            self.next_turn();
        }
        Ok(result)
    }

    /// Skip the active combatant's turn
    pub fn advance_turn(&mut self) -> Result<()> {
        if self.phase.is_terminal() {
            return Err(TacticsError::BattleOver);
        }
        if self.pending.is_some() {
            return Err(TacticsError::ActionAlreadyPending);
        }
        if !self.phase.awaits_command() {
            return Err(TacticsError::WrongPhase(self.phase));
        }

        if let Some(id) = self.active_combatant() {
            debug!("{} skips the turn", self.roster[id].name);
        }
        self.next_turn();
        Ok(())
    }

    /// Enter Victory or Defeat if only one faction is still standing
    ///
    /// With nobody left alive the player loses.
    fn check_battle_end(&mut self) -> bool {
        if self.phase.is_terminal() {
            return true;
        }

        let alive = |faction: Faction| {
            self.order.iter().any(|&id| {
                let c = &self.roster[id];
                c.faction == faction && c.is_alive()
            })
        };

        let outcome = if !alive(Faction::Player) {
            TurnPhase::Defeat
        } else if !alive(Faction::Enemy) {
            TurnPhase::Victory
        } else {
            return false;
        };

        info!("Battle over after {} rounds: {:?}", self.round, outcome);
        self.log.push(match outcome {
            TurnPhase::Victory => "Victory!",
            _ => "Defeat...",
        });
        self.set_phase(outcome);
        true
    }

    /// Start over with the original roster at full health
    pub fn reset(&mut self) {
        info!("Battle reset");
        self.roster = self.initial_roster.clone();
        self.phase = TurnPhase::BattleStart;
        self.order.clear();
        self.current_index = 0;
        self.round = FIRST_ROUND;
        self.pending = None;
        self.last_result = None;
        self.log.clear();
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        if self.phase != phase {
            debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    // ---- Queries ----

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Whose turn it is, once the order has been fixed and the battle is live
    pub fn active_combatant(&self) -> Option<CombatantId> {
        match self.phase {
            TurnPhase::WaitingForPlayerInput | TurnPhase::EnemyTurn | TurnPhase::ExecuteAction => {
                self.order.get(self.current_index).copied()
            }
            _ => None,
        }
    }

    pub fn order(&self) -> &[CombatantId] {
        &self.order
    }

    /// Snapshot of the turn order for display
    pub fn turn_order(&self) -> Vec<TurnEntry> {
        let active = self.active_combatant();
        self.order
            .iter()
            .map(|&id| {
                let c = &self.roster[id];
                TurnEntry {
                    id,
                    name: c.name.clone(),
                    faction: c.faction,
                    initiative: c.initiative,
                    current_hp: c.hit_points.current(),
                    max_hp: c.hit_points.max(),
                    has_acted: c.has_acted,
                    is_dead: c.is_dead(),
                    is_active: active == Some(id),
                }
            })
            .collect()
    }

    pub fn pending(&self) -> Option<&ActionCommand> {
        self.pending.as_ref()
    }

    pub fn last_result(&self) -> Option<&ActionResult> {
        self.last_result.as_ref()
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grid(&self) -> &BattleGrid {
        &self.grid
    }
}
