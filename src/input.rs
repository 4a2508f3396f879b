// input.rs
use crate::error::InputError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;
use std::io::{BufRead, ErrorKind, Write};

lazy_static! {
    // Base-10 integer with optional leading blanks and sign, nothing after the digits.
    static ref INTEGER: Regex = Regex::new(r"^\s*[+-]?[0-9]+$").expect("valid integer pattern");
    static ref LETTERS_AND_SPACES: Regex =
        Regex::new(r"^[\p{Alphabetic} ]+$").expect("valid letters pattern");
}

/// True iff `text` holds between 1 and `max_len` characters, all of them
/// letters or spaces.
pub fn is_alphabetic_or_space(text: &str, max_len: usize) -> bool {
    let len = text.chars().count();
    len >= 1 && len <= max_len && LETTERS_AND_SPACES.is_match(text)
}

pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&c| c != ' ').collect()
}

/// Line-oriented console that never gives up on bad input: every reader
/// re-prompts until the entry is valid. Only a closed input stream ends a read.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, line: impl Display) -> Result<(), InputError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn read_raw(&mut self, prompt: &str) -> Result<String, InputError> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut buf = String::new();
            match self.input.read_line(&mut buf) {
                Ok(0) => return Err(InputError::Closed),
                Ok(_) => return Ok(buf.trim_end_matches(&['\r', '\n'][..]).to_string()),
                Err(e) if e.kind() == ErrorKind::InvalidData || e.kind() == ErrorKind::Interrupted => {
                    tracing::debug!("discarding unreadable line: {}", e);
                    self.say("Read error. Try again.")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Reads a non-empty line of at most `max_len` characters.
    pub fn read_bounded_line(&mut self, prompt: &str, max_len: usize) -> Result<String, InputError> {
        loop {
            let line = self.read_raw(prompt)?;
            if line.is_empty() {
                self.say("Input cannot be empty. Try again.")?;
                continue;
            }
            if line.chars().count() > max_len {
                self.say(format!("Input is too long (at most {} characters). Try again.", max_len))?;
                continue;
            }
            return Ok(line);
        }
    }

    /// Reads an integer within `min..=max`.
    pub fn read_bounded_integer(&mut self, prompt: &str, min: i32, max: i32) -> Result<i32, InputError> {
        loop {
            let line = self.read_raw(prompt)?;
            if !INTEGER.is_match(&line) {
                self.say("Please enter a valid number.")?;
                continue;
            }
            match line.trim_start().parse::<i32>() {
                Err(_) => self.say("Number out of bounds.")?,
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => self.say(format!("Enter a number between {} and {}.", min, max))?,
            }
        }
    }

    /// Yes/no question. Accepts `y` as well as `s` ("sim"); blank lines ask
    /// again.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool, InputError> {
        loop {
            let line = self.read_raw(prompt)?;
            if let Some(answer) = line.trim_start().chars().next() {
                return Ok(matches!(answer, 'y' | 'Y' | 's' | 'S'));
            }
        }
    }
}
