// board.rs
use crate::error::{InputError, SetupError};
use crate::input::Console;
use crate::territory::Territory;
use std::fmt;
use std::io::{BufRead, Write};

pub const MAX_TERRITORIES: usize = 100;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub territories: Vec<Territory>,
}

impl Board {
    /// Reserves `count` blank territories (no troops, empty names) that
    /// registration fills in afterwards.
    pub fn allocate(count: usize) -> Result<Self, SetupError> {
        if count == 0 || count > MAX_TERRITORIES {
            return Err(SetupError::TerritoryCount(count));
        }
        Ok(Self {
            territories: vec![Territory::default(); count],
        })
    }

    pub fn from_territories(territories: Vec<Territory>) -> Result<Self, SetupError> {
        if territories.is_empty() || territories.len() > MAX_TERRITORIES {
            return Err(SetupError::TerritoryCount(territories.len()));
        }
        Ok(Self { territories })
    }

    pub fn register_all<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
    ) -> Result<(), InputError> {
        for (index, slot) in self.territories.iter_mut().enumerate() {
            *slot = Territory::register(console, index)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn get_territory(&self, index: usize) -> Option<&Territory> {
        self.territories.get(index)
    }

    /// Mutable access to two distinct territories at once.
    pub fn get_pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Territory, &mut Territory)> {
        if first == second || first >= self.len() || second >= self.len() {
            return None;
        }
        if first < second {
            let (left, right) = self.territories.split_at_mut(second);
            Some((&mut left[first], &mut right[0]))
        } else {
            let (left, right) = self.territories.split_at_mut(first);
            Some((&mut right[0], &mut left[second]))
        }
    }

    pub fn count_owned_by(&self, color: &str) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(color)).count()
    }

    pub fn describe_all(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== TERRITORIES ===")?;
        writeln!(f, "#   {:<20} {:<12} Troops", "Name", "Color")?;
        writeln!(f, "{}", "-".repeat(44))?;
        for (index, territory) in self.territories.iter().enumerate() {
            writeln!(f, "{:2}. {}", index + 1, territory)?;
        }
        Ok(())
    }
}
