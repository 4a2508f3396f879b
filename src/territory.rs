// territory.rs
use crate::error::{InputError, SetupError};
use crate::input::{is_alphabetic_or_space, strip_spaces, Console};
use std::fmt;
use std::io::{BufRead, Write};

pub const NAME_MAX_LEN: usize = 29;
pub const COLOR_MAX_LEN: usize = 9;
pub const MAX_TROOPS: u16 = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Territory {
    pub name: String,
    pub color: String,
    pub troops: u16,
    /// Color the territory was registered with; never changes after setup.
    pub starting_color: String,
}

impl Territory {
    pub fn new(name: &str, color: &str, troops: u16) -> Result<Self, SetupError> {
        if !is_alphabetic_or_space(name, NAME_MAX_LEN) {
            return Err(SetupError::TerritoryName(name.to_string()));
        }
        let color = strip_spaces(color);
        if !is_valid_color(&color) {
            return Err(SetupError::Color(color));
        }
        if troops == 0 || troops > MAX_TROOPS {
            return Err(SetupError::Troops(troops.into()));
        }
        Ok(Self {
            name: name.to_string(),
            starting_color: color.clone(),
            color,
            troops,
        })
    }

    /// Interactive registration of the territory at `index` (0-based).
    pub fn register<R: BufRead, W: Write>(
        console: &mut Console<R, W>,
        index: usize,
    ) -> Result<Self, InputError> {
        console.say(format!("\n--- Territory {} ---", index + 1))?;

        let name = loop {
            let name = console.read_bounded_line("Territory name: ", NAME_MAX_LEN)?;
            if is_alphabetic_or_space(&name, NAME_MAX_LEN) {
                break name;
            }
            console.say("Use letters and spaces only.")?;
        };

        let color = read_color(console, "Army color: ")?;

        let troops = console.read_bounded_integer("Number of troops: ", 1, MAX_TROOPS.into())?;
        let troops = u16::try_from(troops).unwrap_or(MAX_TROOPS);

        Ok(Self {
            name,
            starting_color: color.clone(),
            color,
            troops,
        })
    }

    pub fn is_owned_by(&self, color: &str) -> bool {
        self.color == color
    }

    pub fn remove_troops(&mut self, amount: u16) {
        self.troops = self.troops.saturating_sub(amount);
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20} {:<12} {:4} troops", self.name, self.color, self.troops)
    }
}

pub(crate) fn is_valid_color(color: &str) -> bool {
    is_alphabetic_or_space(color, COLOR_MAX_LEN) && !color.contains(' ')
}

/// Reads a color: spaces are dropped, then only letters are accepted.
pub(crate) fn read_color<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
) -> Result<String, InputError> {
    loop {
        // Room for a few stray spaces; the stripped value is checked again below.
        let raw = console.read_bounded_line(prompt, NAME_MAX_LEN)?;
        let color = strip_spaces(&raw);
        if is_valid_color(&color) {
            return Ok(color);
        }
        console.say("Use letters only.")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn new_validates_every_field() {
        let territory = Territory::new("Terra Nova", "dark blue", 5).unwrap();
        assert_eq!(territory.color, "darkblue");
        assert_eq!(territory.starting_color, "darkblue");

        assert!(matches!(
            Territory::new("Zone 51", "blue", 5),
            Err(SetupError::TerritoryName(_))
        ));
        assert!(matches!(
            Territory::new("Zone", "blue2", 5),
            Err(SetupError::Color(_))
        ));
        assert!(matches!(
            Territory::new("Zone", "ultraviolet", 5),
            Err(SetupError::Color(_))
        ));
        assert!(matches!(
            Territory::new("Zone", "blue", 0),
            Err(SetupError::Troops(0))
        ));
        assert!(matches!(
            Territory::new("Zone", "blue", 10_001),
            Err(SetupError::Troops(10_001))
        ));
    }

    #[test]
    fn register_loops_until_each_field_is_valid() {
        let script = "Area 9\nNorth Shore\nred 1\n  r e d \n0\nmany\n25\n";
        let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let territory = Territory::register(&mut console, 0).unwrap();

        assert_eq!(territory.name, "North Shore");
        assert_eq!(territory.color, "red");
        assert_eq!(territory.troops, 25);

        let transcript = String::from_utf8(console.into_output()).unwrap();
        assert!(transcript.contains("--- Territory 1 ---"));
        assert!(transcript.contains("Use letters and spaces only."));
        assert!(transcript.contains("Use letters only."));
    }

    #[test]
    fn losses_saturate_at_zero() {
        let mut territory = Territory::new("Zone", "blue", 1).unwrap();
        territory.remove_troops(1);
        territory.remove_troops(1);
        assert_eq!(territory.troops, 0);
    }
}
