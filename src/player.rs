// player.rs
use crate::board::Board;
use crate::error::{InputError, SetupError};
use crate::input::{strip_spaces, Console};
use crate::mission::Mission;
use crate::territory::{is_valid_color, read_color, NAME_MAX_LEN};
use rand::Rng;
use std::fmt;
use std::io::{BufRead, Write};

pub const MAX_PLAYERS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub name: String,
    pub color: String,
    /// `None` until registration hands out a mission.
    pub mission: Option<Mission>,
    pub territories_conquered: u32,
}

/// Reserves `count` unregistered player slots.
pub fn allocate_players(count: usize) -> Result<Vec<Player>, SetupError> {
    if count == 0 || count > MAX_PLAYERS {
        return Err(SetupError::PlayerCount(count));
    }
    Ok(vec![Player::default(); count])
}

impl Player {
    pub fn new(name: &str, color: &str, mission: Mission) -> Result<Self, SetupError> {
        if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(SetupError::PlayerName(name.to_string()));
        }
        let color = strip_spaces(color);
        if !is_valid_color(&color) {
            return Err(SetupError::Color(color));
        }
        Ok(Self {
            name: name.to_string(),
            color,
            mission: Some(mission),
            territories_conquered: 0,
        })
    }

    /// Interactive registration of the player at `index` (0-based). The
    /// mission is drawn from `rng` once both fields are in.
    pub fn register<R, W, G>(
        console: &mut Console<R, W>,
        index: usize,
        rng: &mut G,
    ) -> Result<Self, InputError>
    where
        R: BufRead,
        W: Write,
        G: Rng + ?Sized,
    {
        console.say(format!("\n--- Player {} ---", index + 1))?;
        let name = console.read_bounded_line("Player name: ", NAME_MAX_LEN)?;
        let color = read_color(console, "Player color: ")?;
        let mission = Mission::assign_random(rng);
        tracing::debug!(player = %name, %mission, "mission assigned");

        Ok(Self {
            name,
            color,
            mission: Some(mission),
            territories_conquered: 0,
        })
    }

    pub fn mission_text(&self) -> &str {
        self.mission.as_ref().map_or("(unset)", Mission::text)
    }

    pub fn has_completed_mission(&self, board: &Board) -> bool {
        self.mission
            .map_or(false, |mission| mission.is_satisfied(board, self))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})\nMISSION: {}", self.name, self.color, self.mission_text())
    }
}
