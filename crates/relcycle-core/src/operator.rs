//! Operator interaction.
//!
//! Release steps pause for a human to look at what changed. The
//! [`Operator`] trait keeps that interaction out of the business logic.

use std::io::{self, BufRead, Write};

use tracing::info;

/// The human supervising a release.
pub trait Operator {
    /// Displays text for review.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be displayed.
    fn show(&mut self, text: &str) -> io::Result<()>;

    /// Asks a yes/no question; `default` is the answer to an empty reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool>;
}

/// Prompts on a text terminal.
///
/// Questions render as `"{question} (Y/n) "` or `"{question} (y/N) "`.
/// Accepted replies are empty (the default), `y` and `n` in any case;
/// anything else asks again.
pub struct TerminalOperator<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalOperator<R, W> {
    /// Creates an operator reading replies from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the operator, returning its output.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl TerminalOperator<io::StdinLock<'static>, io::Stdout> {
    /// Creates an operator on the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Operator for TerminalOperator<R, W> {
    fn show(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    fn confirm(&mut self, question: &str, default: bool) -> io::Result<bool> {
        let choices = if default { "(Y/n)" } else { "(y/N)" };

        loop {
            write!(self.output, "{question} {choices} ")?;
            self.output.flush()?;

            let mut reply = String::new();
            if self.input.read_line(&mut reply)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("no answer to {question:?}"),
                ));
            }

            match reply.trim_end_matches(['\r', '\n']).to_lowercase().as_str() {
                "" => return Ok(default),
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => writeln!(self.output, "answer should be 'y', 'n', or <return>")?,
            }
        }
    }
}

/// Accepts every question, for unattended runs.
pub struct AssumeYes<W> {
    output: W,
}

impl<W: Write> AssumeYes<W> {
    /// Creates an operator that still displays review text on `output`.
    pub fn new(output: W) -> Self {
        Self { output }
    }
}

impl AssumeYes<io::Stdout> {
    /// Creates an operator displaying on standard output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Operator for AssumeYes<W> {
    fn show(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn confirm(&mut self, question: &str, _default: bool) -> io::Result<bool> {
        info!(question, "assuming yes");
        Ok(true)
    }
}
