// error.rs
use crate::turn_phase::TurnPhase;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input stream closed")]
    Closed,
    #[error("console i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("territory count {0} is outside 1..=100")]
    TerritoryCount(usize),
    #[error("player count {0} is outside 1..=10")]
    PlayerCount(usize),
    #[error("invalid territory name '{0}': use letters and spaces, at most 29 characters")]
    TerritoryName(String),
    #[error("invalid player name '{0}': must be non-empty, at most 29 characters")]
    PlayerName(String),
    #[error("invalid color '{0}': use letters only, at most 9 characters")]
    Color(String),
    #[error("invalid troop count {0}: must be within 1..=10000")]
    Troops(u32),
    #[error("unknown mission '{0}'")]
    UnknownMission(String),
    #[error("could not read setup file: {0}")]
    Config(#[from] std::io::Error),
    #[error("could not parse setup file: {0}")]
    ConfigFormat(#[from] serde_json::Error),
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttackError {
    #[error("The game is already over.")]
    GameOver,
    #[error("No attack can be made during {0:?}.")]
    WrongPhase(TurnPhase),
    #[error("A territory cannot attack itself!")]
    SelfAttack,
    /// Carries the 1-based number the player typed.
    #[error("Territory {0} does not exist.")]
    NoSuchTerritory(usize),
    #[error("The attacker needs at least 2 troops!")]
    NotEnoughTroops,
    #[error("Cannot attack a territory of the same color!")]
    SameColor,
    #[error("You can only attack from your own territories!")]
    NotOwner,
}
