//! Key prompts for the terminal.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::core::{UserPrompt, naming::is_valid_key};

/// Asks on `output` and reads answers from `input`.
///
/// An empty answer accepts the default, or cancels when there is none.
/// End of input cancels. Invalid keys are asked again.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, value: &str, default: Option<&str>) -> io::Result<Option<String>> {
        loop {
            match default {
                Some(default) => write!(
                    self.output,
                    "{} key for \"{}\" [{}]: ",
                    "?".cyan().bold(),
                    value,
                    default.green()
                )?,
                None => write!(self.output, "{} key for \"{}\": ", "?".cyan().bold(), value)?,
            }
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            let answer = line.trim();
            let key = match (answer.is_empty(), default) {
                (false, _) => answer,
                (true, Some(default)) => default,
                (true, None) => return Ok(None),
            };
            if is_valid_key(key) {
                return Ok(Some(key.to_string()));
            }
            writeln!(
                self.output,
                "{} \"{}\" is not a valid key (start with a letter, then letters, digits or _)",
                "warning:".bold().yellow(),
                key
            )?;
        }
    }
}

impl<R: BufRead, W: Write> UserPrompt for TerminalPrompt<R, W> {
    fn ask_for_key(&mut self, value: &str, default: Option<&str>) -> Option<String> {
        self.ask(value, default).ok().flatten()
    }
}

/// Takes every suggested key; literals without one are skipped.
pub struct AcceptDefaultsPrompt;

impl UserPrompt for AcceptDefaultsPrompt {
    fn ask_for_key(&mut self, _value: &str, default: Option<&str>) -> Option<String> {
        default.map(str::to_string)
    }
}

/// Answers the first question with a key given on the command line.
pub struct FixedKeyPrompt {
    key: Option<String>,
}

impl FixedKeyPrompt {
    pub fn new(key: String) -> Self {
        Self { key: Some(key) }
    }
}

impl UserPrompt for FixedKeyPrompt {
    fn ask_for_key(&mut self, _value: &str, _default: Option<&str>) -> Option<String> {
        self.key.take()
    }
}
