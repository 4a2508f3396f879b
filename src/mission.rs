// mission.rs
use crate::board::Board;
use crate::player::Player;
use crate::territory::Territory;
use itertools::Itertools;
use rand::Rng;
use std::fmt;

/// Colors counted as "red" by the elimination mission, whatever colors the
/// players actually picked.
pub const RED_COLORS: [&str; 2] = ["vermelho", "red"];

pub const CONTROL_TARGET: usize = 5;
pub const GARRISON_TARGET: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mission {
    ConsecutiveTerritories,
    EliminateRed,
    ControlTerritories,
    ConquerColor,
    HoldGarrison,
}

// Characteristic fragments used to recognise a mission from free text. The
// Portuguese fragments keep older setup files readable.
const TEXT_MARKERS: [(&str, Mission); 10] = [
    ("3 consecutive territories", Mission::ConsecutiveTerritories),
    ("3 territorios consecutivos", Mission::ConsecutiveTerritories),
    ("red-colored", Mission::EliminateRed),
    ("cor vermelha", Mission::EliminateRed),
    ("5 territories", Mission::ControlTerritories),
    ("5 territorios", Mission::ControlTerritories),
    ("all territories of one color", Mission::ConquerColor),
    ("todos os territorios de uma cor", Mission::ConquerColor),
    ("10 troops", Mission::HoldGarrison),
    ("10 tropas", Mission::HoldGarrison),
];

impl Mission {
    pub const ALL: [Mission; 5] = [
        Mission::ConsecutiveTerritories,
        Mission::EliminateRed,
        Mission::ControlTerritories,
        Mission::ConquerColor,
        Mission::HoldGarrison,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            Mission::ConsecutiveTerritories => "Conquer 3 consecutive territories",
            Mission::EliminateRed => "Eliminate all red-colored troops",
            Mission::ControlTerritories => "Control at least 5 territories",
            Mission::ConquerColor => "Conquer all territories of one color",
            Mission::HoldGarrison => "Maintain 10 troops on one territory",
        }
    }

    pub fn assign_random<R: Rng + ?Sized>(rng: &mut R) -> Mission {
        Mission::ALL[rng.gen_range(0..Mission::ALL.len())]
    }

    pub fn from_text(text: &str) -> Option<Mission> {
        let text = text.to_lowercase();
        TEXT_MARKERS
            .iter()
            .find(|(marker, _)| text.contains(marker))
            .map(|&(_, mission)| mission)
    }

    pub fn is_satisfied(&self, board: &Board, player: &Player) -> bool {
        let territories = &board.territories;
        let color = player.color.as_str();
        match self {
            Mission::ConsecutiveTerritories => holds_consecutive_run(territories, color),
            Mission::EliminateRed => !territories
                .iter()
                .any(|t| RED_COLORS.contains(&t.color.as_str())),
            Mission::ControlTerritories => board.count_owned_by(color) >= CONTROL_TARGET,
            Mission::ConquerColor => conquered_a_color(territories, color),
            Mission::HoldGarrison => territories
                .iter()
                .any(|t| t.is_owned_by(color) && t.troops >= GARRISON_TARGET),
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

// Consecutive means adjacent in registration order.
fn holds_consecutive_run(territories: &[Territory], color: &str) -> bool {
    territories
        .iter()
        .tuple_windows()
        .any(|(a, b, c)| a.is_owned_by(color) && b.is_owned_by(color) && c.is_owned_by(color))
}

// Some other starting color has had every one of its territories taken by `color`.
fn conquered_a_color(territories: &[Territory], color: &str) -> bool {
    territories
        .iter()
        .map(|t| t.starting_color.as_str())
        .filter(|&starting| starting != color)
        .unique()
        .any(|target| {
            territories
                .iter()
                .filter(|t| t.starting_color == target)
                .all(|t| t.is_owned_by(color))
        })
}
