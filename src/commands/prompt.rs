//! Interactive yes/no and free-text prompts on the terminal.
use std::io::{self, BufRead, Write};

use crate::resources::{Action, Operation};
use crate::sync::Confirm;

/// Questions asked while a command runs.
pub trait Prompt {
    /// Ask a yes/no question; an empty answer means yes.
    fn ask(&self, question: &str) -> bool;

    /// Ask for a line of text. `None` when input is closed.
    fn ask_line(&self, question: &str) -> Option<String>;
}

/// Prompt reading answers from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> bool {
        ask_from(&mut io::stdin().lock(), &mut io::stdout(), question).unwrap_or(false)
    }

    fn ask_line(&self, question: &str) -> Option<String> {
        ask_line_from(&mut io::stdin().lock(), &mut io::stdout(), question)
            .ok()
            .flatten()
    }
}

impl Confirm for StdinPrompt {
    fn confirm(&self, name: &str, op: Operation, _action: Action) -> bool {
        self.ask(&op.question(name))
    }
}

/// Write `question [Yn] ` to `writer` and read the answer from `reader`.
///
/// An empty line, `y`, or `yes` (any case) answers yes; end of input
/// answers no.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn ask_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(writer, "{question} [Yn] ")?;
    writer.flush()?;
    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "" | "y" | "yes"
    ))
}

/// Write `question ` to `writer` and read one trimmed line from `reader`.
///
/// # Errors
///
/// Returns an error if writing the question or reading the answer fails.
pub fn ask_line_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
) -> io::Result<Option<String>> {
    write!(writer, "{question} ")?;
    writer.flush()?;
    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        return Ok(None);
    }
    Ok(Some(answer.trim().to_string()))
}
