// game_config.rs
use crate::board::Board;
use crate::error::SetupError;
use crate::game::Game;
use crate::mission::Mission;
use crate::player::{Player, MAX_PLAYERS};
use crate::territory::Territory;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preset board and roster, used in place of interactive registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub territories: Vec<TerritoryConfig>,
    pub players: Vec<PlayerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerritoryConfig {
    pub name: String,
    pub color: String,
    pub troops: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: String,
    /// Mission text; a random mission is drawn when absent.
    #[serde(default)]
    pub mission: Option<String>,
}

impl GameConfig {
    pub fn to_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Game, SetupError> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(SetupError::PlayerCount(self.players.len()));
        }

        let territories = self
            .territories
            .iter()
            .map(|t| Territory::new(&t.name, &t.color, t.troops))
            .collect::<Result<Vec<_>, _>>()?;
        let board = Board::from_territories(territories)?;

        let players = self
            .players
            .iter()
            .map(|p| {
                let mission = match &p.mission {
                    Some(text) => Mission::from_text(text)
                        .ok_or_else(|| SetupError::UnknownMission(text.clone()))?,
                    None => Mission::assign_random(rng),
                };
                Player::new(&p.name, &p.color, mission)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Game::new(board, players)
    }

    pub fn from_json(data: &str) -> Result<Self, SetupError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Write;

    const PRESET: &str = r#"{
        "territories": [
            { "name": "Green Valley", "color": "blue", "troops": 5 },
            { "name": "Red Rock", "color": "red", "troops": 3 }
        ],
        "players": [
            { "name": "Bia", "color": "blue", "mission": "Control at least 5 territories" },
            { "name": "Rafa", "color": "red" }
        ]
    }"#;

    #[test]
    fn preset_builds_a_game() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let game = GameConfig::from_json(PRESET).unwrap().to_game(&mut rng).unwrap();

        assert_eq!(game.board.len(), 2);
        assert_eq!(game.players[0].mission, Some(Mission::ControlTerritories));
        assert!(game.players[1].mission.is_some());
    }

    #[test]
    fn preset_entries_are_validated() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let mut config = GameConfig::from_json(PRESET).unwrap();
        config.territories[0].troops = 0;
        assert!(matches!(config.to_game(&mut rng), Err(SetupError::Troops(0))));

        let mut config = GameConfig::from_json(PRESET).unwrap();
        config.players[1].mission = Some("Win".to_string());
        assert!(matches!(config.to_game(&mut rng), Err(SetupError::UnknownMission(_))));

        let mut config = GameConfig::from_json(PRESET).unwrap();
        config.players.clear();
        assert!(matches!(config.to_game(&mut rng), Err(SetupError::PlayerCount(0))));

        let mut config = GameConfig::from_json(PRESET).unwrap();
        config.territories.clear();
        assert!(matches!(config.to_game(&mut rng), Err(SetupError::TerritoryCount(0))));

        assert!(matches!(
            GameConfig::from_json("{ \"territories\": 3 }"),
            Err(SetupError::ConfigFormat(_))
        ));
    }

    #[test]
    fn preset_loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PRESET.as_bytes()).unwrap();

        let config = GameConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.players[1].name, "Rafa");

        assert!(matches!(
            GameConfig::load_from_file("/nonexistent/preset.json"),
            Err(SetupError::Config(_))
        ));
    }
}
