// turn_phase.rs
use crate::game::Game;

/// `Setup → AttackSelection → CombatResolution → VictoryCheck →
/// (AttackSelection | Ended)`. A rejected attack stays in `AttackSelection`;
/// a pass goes straight from `AttackSelection` to `VictoryCheck`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TurnPhase {
    /// Registries are filled but nobody has played yet.
    Setup,
    AttackSelection,
    /// An attack was resolved; the turn has not been handed over yet.
    CombatResolution,
    /// The turn moved on; missions still have to be checked.
    VictoryCheck,
    Ended,
}

impl Game {
    /// Opens play. Only a game still in `Setup` moves.
    pub fn start(&mut self) {
        if self.turn_phase == TurnPhase::Setup {
            self.turn_phase = TurnPhase::AttackSelection;
            tracing::info!(players = self.players.len(), "play started");
        }
    }

    /// Hands the turn to the next player, wrapping around the table. A full
    /// wrap starts a new round.
    pub fn end_turn(&mut self) {
        self.current_turn = (self.current_turn + 1) % self.players.len();
        if self.current_turn == 0 {
            self.round += 1;
        }
        self.turn_phase = TurnPhase::VictoryCheck;
    }

    /// Closes the victory check: either the game ends or the next player
    /// picks an attack.
    pub fn advance_phase(&mut self, winner: Option<usize>) {
        self.turn_phase = match winner {
            Some(_) => TurnPhase::Ended,
            None => TurnPhase::AttackSelection,
        };
    }

    pub fn is_over(&self) -> bool {
        self.turn_phase == TurnPhase::Ended
    }
}
