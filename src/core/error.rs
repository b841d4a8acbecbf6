use thiserror::Error;

use crate::battle::scheduler::TurnPhase;
use crate::core::types::CombatantId;

/// Recoverable failures surfaced to the caller.
///
/// Illegal commands land here and the battle carries on. Missing combat data on a
/// combatant is a programming error and panics instead.
#[derive(Error, Debug)]
pub enum TacticsError {
    #[error("Unknown combatant: {0}")]
    UnknownCombatant(CombatantId),

    #[error("{0} is dead and cannot act")]
    AttackerDead(String),

    #[error("{0} is already dead")]
    TargetDead(String),

    #[error("{0} cannot attack itself")]
    SelfAttack(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),

    #[error("An action is already pending")]
    ActionAlreadyPending,

    #[error("It is not {0}'s turn")]
    NotActiveCombatant(String),

    #[error("Cannot do that during {0:?}")]
    WrongPhase(TurnPhase),

    #[error("The battle is over")]
    BattleOver,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TacticsError>;
