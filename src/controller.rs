// controller.rs
use crate::combat::{BattleReport, Dice};
use crate::error::InputError;
use crate::game::Game;
use crate::input::Console;
use std::io::{BufRead, Write};

/// Drives a game from the console: one attack per turn, a victory check
/// after every turn, and a prompt before the next one.
pub struct GameController<R, W, D> {
    game: Game,
    console: Console<R, W>,
    dice: D,
}

impl<R: BufRead, W: Write, D: Dice> GameController<R, W, D> {
    pub fn new(game: Game, console: Console<R, W>, dice: D) -> Self {
        Self { game, console, dice }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_parts(self) -> (Game, Console<R, W>) {
        (self.game, self.console)
    }

    /// Plays one turn. Returns the battle when an attack was resolved, after
    /// handing the turn over; a rejected attack is reported and abandons the
    /// turn without passing it.
    pub fn run_turn(&mut self) -> Result<Option<BattleReport>, InputError> {
        let player = self.game.current_player().name.clone();
        self.console
            .say(format!("\n=== ROUND {} - Player {} ===", self.game.round, player))?;
        self.console.say(self.game.board.describe_all())?;
        self.console.say("--- ATTACK ---")?;

        if self.game.possible_attacks().is_empty() {
            self.console
                .say(format!("{} has no possible attack and passes the turn.", player))?;
            self.game.pass_turn();
            return Ok(None);
        }

        let count = self.game.board.len() as i32;
        let from = self
            .console
            .read_bounded_integer("Select ATTACKING territory: ", 1, count)?;
        let to = self
            .console
            .read_bounded_integer("Select DEFENDING territory: ", 1, count)?;

        match self
            .game
            .attack(from as usize - 1, to as usize - 1, &mut self.dice)
        {
            Ok(report) => {
                self.console.say(format!("\n{}", report))?;
                self.game.end_turn();
                Ok(Some(report))
            }
            Err(e) => {
                tracing::warn!(player = %player, from, to, "attack rejected: {}", e);
                self.console.say(e)?;
                self.console.say("Invalid attack!")?;
                Ok(None)
            }
        }
    }

    /// Main loop. Returns the winner's index, or `None` when the players
    /// stop early or the input closes.
    pub fn play(&mut self) -> Result<Option<usize>, InputError> {
        self.game.start();
        loop {
            match self.run_turn() {
                Ok(_) => {}
                Err(InputError::Closed) => {
                    tracing::info!("input closed, leaving the game");
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }

            if let Some(winner) = self.game.check_victory() {
                let player = &self.game.players[winner];
                let announcement = format!(
                    "\n*** VICTORY! ***\n{} completed the mission: {}",
                    player.name,
                    player.mission_text()
                );
                self.console.say(announcement)?;
                return Ok(Some(winner));
            }

            match self.console.confirm("\nContinue playing? (y/n): ") {
                Ok(true) => {}
                Ok(false) | Err(InputError::Closed) => return Ok(None),
                Err(e) => return Err(e),
            }
        }
    }
}
