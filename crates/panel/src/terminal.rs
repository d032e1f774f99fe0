//! [`Prompt`] over a line-oriented terminal.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};

use crate::prompt::Prompt;

/// Asks `[y/N]` questions on `output` and reads answers from `input`.
///
/// Anything other than `y`/`yes` (including EOF) is a no.
pub struct TerminalPrompt<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn confirm(&self, message: &str) -> bool {
        {
            let mut out = self.output.borrow_mut();
            if write!(out, "{message} [y/N] ").and_then(|_| out.flush()).is_err() {
                return false;
            }
        }

        let mut answer = String::new();
        match self.input.borrow_mut().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation");
                false
            }
        }
    }

    fn alert(&self, message: &str) {
        let mut out = self.output.borrow_mut();
        if let Err(e) = writeln!(out, "! {message}") {
            tracing::warn!(error = %e, message, "could not show alert");
        }
    }
}
