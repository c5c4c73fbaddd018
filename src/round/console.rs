//! Console I/O collaborator for the interactive round

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// How a line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Title,
    Highlight,
    Success,
    Failure,
}

/// Line-oriented console used by [`super::play_round`]
pub trait Console {
    /// Show `prompt` and read one trimmed line; `None` once input is closed
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one line of output
    fn write_line(&mut self, text: &str, tone: Tone) -> io::Result<()>;
}

/// Terminal console over stdin/stdout with ANSI colours
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}: ", prompt.yellow())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    fn write_line(&mut self, text: &str, tone: Tone) -> io::Result<()> {
        let styled = match tone {
            Tone::Plain => text.normal(),
            Tone::Title => text.cyan(),
            Tone::Highlight => text.blue(),
            Tone::Success => text.green(),
            Tone::Failure => text.red(),
        };
        writeln!(io::stdout().lock(), "{}", styled)
    }
}
