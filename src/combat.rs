// combat.rs
use crate::error::AttackError;
use crate::territory::Territory;
use rand::Rng;
use std::fmt;

pub trait Dice {
    /// One roll of a six-sided die.
    fn roll(&mut self) -> u8;
}

#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }
}

/// Replays a fixed sequence of rolls, starting over when it runs out. Faces
/// are clamped to 1..=6; an empty sequence always shows 1.
#[derive(Debug, Clone)]
pub struct LoadedDice {
    rolls: Vec<u8>,
    next: usize,
}

impl LoadedDice {
    pub fn new(rolls: &[u8]) -> Self {
        if rolls.is_empty() {
            tracing::warn!("loaded dice without faces, rolling 1");
        }
        Self {
            rolls: rolls.iter().map(|&face| face.clamp(1, 6)).collect(),
            next: 0,
        }
    }
}

impl Dice for LoadedDice {
    fn roll(&mut self) -> u8 {
        if self.rolls.is_empty() {
            return 1;
        }
        let roll = self.rolls[self.next % self.rolls.len()];
        self.next += 1;
        roll
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    AttackerWins,
    DefenderHolds,
    Tie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub attacker: String,
    pub attacker_color: String,
    pub defender: String,
    /// Defender's color before the battle.
    pub defender_color: String,
    pub attack_roll: u8,
    pub defense_roll: u8,
    pub outcome: BattleOutcome,
    pub attacker_troops: u16,
    pub defender_troops: u16,
}

pub fn validate_attack(
    attacker: &Territory,
    defender: &Territory,
    player_color: &str,
) -> Result<(), AttackError> {
    if attacker.troops <= 1 {
        return Err(AttackError::NotEnoughTroops);
    }
    if attacker.color == defender.color {
        return Err(AttackError::SameColor);
    }
    if attacker.color != player_color {
        return Err(AttackError::NotOwner);
    }
    Ok(())
}

pub fn roll_die<D: Dice + ?Sized>(dice: &mut D) -> u8 {
    dice.roll()
}

/// Rolls one die per side and applies the result to both territories.
pub fn resolve<D: Dice + ?Sized>(
    attacker: &mut Territory,
    defender: &mut Territory,
    dice: &mut D,
) -> BattleReport {
    let attack_roll = roll_die(dice);
    let defense_roll = roll_die(dice);
    apply_rolls(attacker, defender, attack_roll, defense_roll)
}

/// The attacker always pays one troop. A win flips the defender to the
/// attacker's color and leaves it half its troops (at least one); a tie also
/// costs the defender one troop.
pub fn apply_rolls(
    attacker: &mut Territory,
    defender: &mut Territory,
    attack_roll: u8,
    defense_roll: u8,
) -> BattleReport {
    let defender_color = defender.color.clone();
    let outcome = if attack_roll > defense_roll {
        defender.color = attacker.color.clone();
        defender.troops = (defender.troops / 2).max(1);
        BattleOutcome::AttackerWins
    } else if defense_roll > attack_roll {
        BattleOutcome::DefenderHolds
    } else {
        defender.remove_troops(1);
        BattleOutcome::Tie
    };
    attacker.remove_troops(1);

    tracing::debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        attack_roll,
        defense_roll,
        ?outcome,
        "battle resolved"
    );

    BattleReport {
        attacker: attacker.name.clone(),
        attacker_color: attacker.color.clone(),
        defender: defender.name.clone(),
        defender_color,
        attack_roll,
        defense_roll,
        outcome,
        attacker_troops: attacker.troops,
        defender_troops: defender.troops,
    }
}

impl fmt::Display for BattleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}) attacks {} ({})",
            self.attacker, self.attacker_color, self.defender, self.defender_color
        )?;
        writeln!(
            f,
            "Dice: Attacker={} | Defender={}",
            self.attack_roll, self.defense_roll
        )?;
        match self.outcome {
            BattleOutcome::AttackerWins => {
                writeln!(f, "VICTORY! {} conquers {}", self.attacker, self.defender)?;
                write!(f, "Attacker loses 1 troop. Remaining: {}", self.attacker_troops)
            }
            BattleOutcome::DefenderHolds => {
                writeln!(f, "DEFENSE HOLDS! {} defended its territory", self.defender)?;
                write!(f, "Attacker loses 1 troop. Remaining: {}", self.attacker_troops)
            }
            BattleOutcome::Tie => {
                writeln!(f, "TIE! Both sides lose troops")?;
                write!(
                    f,
                    "Attacker: {} troops | Defender: {} troops",
                    self.attacker_troops, self.defender_troops
                )
            }
        }
    }
}
