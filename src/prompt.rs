//! The prompt I/O capability.
//!
//! Prompting goes through the [`Console`] trait rather than straight at
//! the process-wide standard streams, so the reconciliation loader can be
//! driven by a scripted console in tests. [`TermConsole`] is the real
//! implementation: it prefers an attached interactive terminal and falls
//! back to reading standard input line by line when output is piped.

use std::io::BufRead;

use console::Term;

use crate::error::Error;

/// Line-oriented prompt I/O.
pub trait Console {
    /// Writes one line of output to the user.
    fn write_line(&mut self, line: &str);

    /// Shows `prompt` and blocks until a line of input arrives. Fails
    /// with [`Error::NoInput`] when no input source can produce a line.
    fn read_line(&mut self, prompt: &str) -> Result<String, Error>;
}

/// Console backed by the controlling terminal, with a standard-input
/// fallback for redirected sessions.
pub struct TermConsole {
    term: Term,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn write_line(&mut self, line: &str) {
        println!("{line}");
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, Error> {
        println!("{prompt}");
        if self.term.is_term() {
            if let Ok(line) = self.term.read_line() {
                return Ok(line);
            }
        }
        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|_| Error::NoInput)?;
        if read == 0 {
            return Err(Error::NoInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompts for a value; the returned input is trimmed.
pub(crate) fn value(console: &mut dyn Console, message: &str) -> Result<String, Error> {
    console.write_line("");
    let input = console.read_line(message)?;
    Ok(input.trim().to_string())
}

/// Asks a yes/no question until the answer is usable. Empty input picks
/// the default; anything but `y`/`n` (either case) re-prompts.
pub(crate) fn yes_no(
    console: &mut dyn Console,
    message: &str,
    default: bool,
) -> Result<bool, Error> {
    let suffix = if default { "(Y/n)" } else { "(y/N)" };
    loop {
        let answer = value(console, &format!("{message} {suffix}:"))?;
        if answer.is_empty() {
            return Ok(default);
        }
        if answer.eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        if answer.eq_ignore_ascii_case("n") {
            return Ok(false);
        }
        console.write_line(&format!("Invalid choice: {answer}"));
        console.write_line("Please type 'y' for Yes or 'n' for No");
    }
}
