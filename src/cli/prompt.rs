//! Terminal prompter.
//!
//! Uses hidden input on a terminal. When stdin is piped, values and answers
//! are read one line at a time instead.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::{Input, Password};
use zeroize::Zeroizing;

use crate::core::rotation::{is_affirmative, Prompter};
use crate::error::{Error, Result};

/// Prompts the operator on the controlling terminal or reads piped stdin.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn secret_value(&mut self, title: &str) -> Result<Zeroizing<String>> {
        if self.interactive {
            return Password::new()
                .with_prompt(title)
                .interact()
                .map(Zeroizing::new)
                .map_err(|e| Error::Input(e.to_string()));
        }

        println!("{}", title);
        read_line()
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.interactive {
            let answer: String = Input::new()
                .with_prompt(question)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| Error::Input(e.to_string()))?;
            return Ok(is_affirmative(&answer));
        }

        print!("{} ", question);
        io::stdout().flush()?;
        let answer = read_line()?;
        Ok(is_affirmative(&answer))
    }
}

/// Read one line from stdin without its line terminator.
fn read_line() -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| Error::Input(e.to_string()))?;
    if read == 0 {
        return Err(Error::Input("unexpected end of input".to_string()));
    }

    let len = line.trim_end_matches(|c| c == '\r' || c == '\n').len();
    line.truncate(len);
    Ok(line)
}
