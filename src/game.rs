// game.rs
use crate::board::Board;
use crate::combat::{self, BattleReport, Dice};
use crate::error::{AttackError, SetupError};
use crate::input::Console;
use crate::player::{allocate_players, Player, MAX_PLAYERS};
use crate::turn_phase::TurnPhase;
use itertools::Itertools;
use rand::Rng;
use std::io::{BufRead, Write};

/// Largest board the setup prompt offers.
pub const SETUP_MAX_TERRITORIES: i32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub board: Board,
    pub players: Vec<Player>,
    pub round: usize,
    pub current_turn: usize,
    pub turn_phase: TurnPhase,
}

impl Game {
    pub fn new(board: Board, players: Vec<Player>) -> Result<Self, SetupError> {
        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(SetupError::PlayerCount(players.len()));
        }
        Ok(Self {
            board,
            players,
            round: 1,
            current_turn: 0,
            turn_phase: TurnPhase::Setup,
        })
    }

    /// Interactive setup: board size, player count, then every territory and
    /// every player in order. Both registries are reserved before anything is
    /// registered; any failure drops whatever was built so far.
    pub fn setup<R, W, G>(console: &mut Console<R, W>, rng: &mut G) -> Result<Self, SetupError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        console.say("=== GAME SETUP ===")?;
        let territory_count = console.read_bounded_integer(
            &format!("Number of territories (1-{}): ", SETUP_MAX_TERRITORIES),
            1,
            SETUP_MAX_TERRITORIES,
        )?;
        let player_count = console.read_bounded_integer(
            &format!("Number of players (1-{}): ", MAX_PLAYERS),
            1,
            MAX_PLAYERS as i32,
        )?;

        let mut board = Board::allocate(territory_count as usize)?;
        let mut players = allocate_players(player_count as usize)?;

        console.say("\n=== TERRITORY REGISTRATION ===")?;
        board.register_all(console)?;

        console.say("\n=== PLAYER REGISTRATION ===")?;
        for (index, slot) in players.iter_mut().enumerate() {
            *slot = Player::register(console, index, rng)?;
            console.say(format!("{}\n---", slot))?;
        }

        tracing::info!(
            territories = board.len(),
            players = players.len(),
            "setup complete"
        );
        Game::new(board, players)
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    /// Attack from territory `from` into territory `to` (0-based) on behalf of
    /// the current player. A rejected attack leaves the game untouched; a
    /// resolved one leaves it in `CombatResolution` until `end_turn`.
    pub fn attack<D: Dice + ?Sized>(
        &mut self,
        from: usize,
        to: usize,
        dice: &mut D,
    ) -> Result<BattleReport, AttackError> {
        match self.turn_phase {
            TurnPhase::AttackSelection => {}
            TurnPhase::Ended => return Err(AttackError::GameOver),
            phase => return Err(AttackError::WrongPhase(phase)),
        }
        if from == to {
            return Err(AttackError::SelfAttack);
        }
        for index in [from, to] {
            if index >= self.board.len() {
                return Err(AttackError::NoSuchTerritory(index + 1));
            }
        }

        let player_color = self.players[self.current_turn].color.clone();
        let (attacker, defender) = self
            .board
            .get_pair_mut(from, to)
            .ok_or(AttackError::NoSuchTerritory(to + 1))?;
        combat::validate_attack(attacker, defender, &player_color)?;

        let report = combat::resolve(attacker, defender, dice);
        self.turn_phase = TurnPhase::CombatResolution;
        if report.outcome == combat::BattleOutcome::AttackerWins {
            self.players[self.current_turn].territories_conquered += 1;
        }
        tracing::info!(
            round = self.round,
            player = %self.players[self.current_turn].name,
            from = %report.attacker,
            to = %report.defender,
            outcome = ?report.outcome,
            "attack resolved"
        );

        Ok(report)
    }

    /// Forfeits the current player's attack.
    pub fn pass_turn(&mut self) {
        tracing::info!(player = %self.current_player().name, "turn passed");
        self.end_turn();
    }

    /// Every (attacker, defender) pair the current player could legally pick.
    pub fn possible_attacks(&self) -> Vec<(usize, usize)> {
        let color = &self.current_player().color;
        let territories = &self.board.territories;
        (0..territories.len())
            .cartesian_product(0..territories.len())
            .filter(|&(from, to)| {
                from != to && combat::validate_attack(&territories[from], &territories[to], color).is_ok()
            })
            .collect()
    }

    /// First player, in registration order, whose mission is complete.
    pub fn check_victory(&mut self) -> Option<usize> {
        let winner = self
            .players
            .iter()
            .position(|player| player.has_completed_mission(&self.board));
        self.advance_phase(winner);
        if let Some(index) = winner {
            tracing::info!(
                winner = %self.players[index].name,
                mission = self.players[index].mission_text(),
                round = self.round,
                "mission complete"
            );
        }
        winner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::LoadedDice;
    use crate::mission::Mission;
    use crate::territory::Territory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;

    fn duel() -> Game {
        let board = Board::from_territories(vec![
            Territory::new("Tone", "blue", 5).unwrap(),
            Territory::new("Ttwo", "red", 3).unwrap(),
        ])
        .unwrap();
        let players = vec![
            Player::new("Bia", "blue", Mission::ControlTerritories).unwrap(),
            Player::new("Rafa", "red", Mission::ControlTerritories).unwrap(),
        ];
        let mut game = Game::new(board, players).unwrap();
        game.start();
        game
    }

    #[test]
    fn winning_roll_conquers_then_the_turn_is_handed_over() {
        let mut game = duel();
        let report = game.attack(0, 1, &mut LoadedDice::new(&[6, 1])).unwrap();

        assert_eq!(report.outcome, combat::BattleOutcome::AttackerWins);
        assert_eq!(game.board.territories[1].color, "blue");
        assert_eq!(game.board.territories[1].troops, 1);
        assert_eq!(game.board.territories[0].troops, 4);
        assert_eq!(game.players[0].territories_conquered, 1);
        assert_eq!(game.turn_phase, TurnPhase::CombatResolution);
        assert_eq!(game.current_turn, 0);

        game.end_turn();
        assert_eq!(game.turn_phase, TurnPhase::VictoryCheck);
        assert_eq!(game.current_turn, 1);
    }

    #[test]
    fn attacks_only_happen_during_attack_selection() {
        let mut game = duel();
        game.turn_phase = TurnPhase::Setup;
        let mut dice = LoadedDice::new(&[6, 1]);
        assert_eq!(
            game.attack(0, 1, &mut dice),
            Err(AttackError::WrongPhase(TurnPhase::Setup))
        );

        game.start();
        game.attack(0, 1, &mut dice).unwrap();
        assert_eq!(
            game.attack(0, 1, &mut dice),
            Err(AttackError::WrongPhase(TurnPhase::CombatResolution))
        );

        game.end_turn();
        assert_eq!(
            game.attack(0, 1, &mut dice),
            Err(AttackError::WrongPhase(TurnPhase::VictoryCheck))
        );
    }

    #[test]
    fn rejected_attacks_leave_the_state_alone() {
        let mut game = duel();
        let before = game.clone();
        let mut dice = LoadedDice::new(&[6, 1]);

        assert_eq!(game.attack(0, 0, &mut dice), Err(AttackError::SelfAttack));
        assert_eq!(game.attack(0, 2, &mut dice), Err(AttackError::NoSuchTerritory(3)));
        assert_eq!(
            AttackError::NoSuchTerritory(3).to_string(),
            "Territory 3 does not exist."
        );
        assert_eq!(game.attack(1, 0, &mut dice), Err(AttackError::NotOwner));
        assert_eq!(game, before);

        game.board.territories[0].troops = 1;
        assert_eq!(game.attack(0, 1, &mut dice), Err(AttackError::NotEnoughTroops));
        assert_eq!(game.current_turn, 0);
    }

    #[test]
    fn ownership_follows_conquest() {
        let mut game = duel();
        game.attack(0, 1, &mut LoadedDice::new(&[6, 1])).unwrap();
        game.end_turn();
        // Rafa no longer owns anything; Bia's two territories share a color.
        assert!(game.possible_attacks().is_empty());
        game.pass_turn();
        game.board.territories[0].troops = 1;
        assert!(game.possible_attacks().is_empty());
    }

    #[test]
    fn possible_attacks_lists_legal_pairs_only() {
        let game = duel();
        assert_eq!(game.possible_attacks(), vec![(0, 1)]);
    }

    #[test]
    fn victory_goes_to_the_first_registered_player() {
        let board = Board::from_territories(vec![
            Territory::new("North", "blue", 12).unwrap(),
            Territory::new("South", "green", 12).unwrap(),
        ])
        .unwrap();
        let players = vec![
            Player::new("Caio", "purple", Mission::ControlTerritories).unwrap(),
            Player::new("Duda", "green", Mission::HoldGarrison).unwrap(),
            Player::new("Enzo", "blue", Mission::HoldGarrison).unwrap(),
        ];
        let mut game = Game::new(board, players).unwrap();
        game.start();

        assert_eq!(game.check_victory(), Some(1));
        assert!(game.is_over());
        assert_eq!(
            game.attack(0, 1, &mut LoadedDice::new(&[6, 1])),
            Err(AttackError::GameOver)
        );
    }

    #[test]
    fn no_winner_resumes_attack_selection() {
        let mut game = duel();
        game.attack(0, 1, &mut LoadedDice::new(&[1, 6])).unwrap();
        game.end_turn();
        assert_eq!(game.check_victory(), None);
        assert_eq!(game.turn_phase, TurnPhase::AttackSelection);
    }

    #[test]
    fn setup_registers_everything_in_order() {
        let script = "\
            abc\n2\n1\n\
            Green Valley\nblue\n5\n\
            Red Rock\nred\n3\n\
            Bia\nblue\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let game = Game::setup(&mut console, &mut rng).unwrap();
        assert_eq!(game.board.len(), 2);
        assert_eq!(game.board.territories[1].name, "Red Rock");
        assert_eq!(game.players.len(), 1);
        assert!(game.players[0].mission.is_some());
        assert_eq!((game.round, game.current_turn), (1, 0));
        assert_eq!(game.turn_phase, TurnPhase::Setup);

        let transcript = String::from_utf8(console.into_output()).unwrap();
        assert!(transcript.contains("=== PLAYER REGISTRATION ==="));
        assert!(transcript.contains("MISSION: "));
    }

    #[test]
    fn setup_aborts_when_input_ends_midway() {
        let script = "2\n2\nGreen Valley\nblue\n5\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(matches!(
            Game::setup(&mut console, &mut rng),
            Err(SetupError::Input(crate::error::InputError::Closed))
        ));
    }
}
