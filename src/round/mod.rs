//! Console round controller
//!
//! One round walks `AwaitingName -> AwaitingAnswer -> Resolved` and never
//! reopens. Input validation (blank names, non-integer answers) happens in
//! [`play_round`]; the state machine only sees accepted values.

pub mod console;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::engine::{parse_answer, Expression, Verdict};

pub use console::{Console, TerminalConsole, Tone};

/// Round state machine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
}

/// Errors raised while playing a round on a console
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed before the round finished")]
    InputClosed,

    #[error("Round error: {0}")]
    Round(#[from] RoundError),
}

/// Where a round currently stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    AwaitingName,
    AwaitingAnswer { player: String },
    Resolved { player: String, verdict: Verdict },
}

impl RoundState {
    fn label(&self) -> &'static str {
        match self {
            RoundState::AwaitingName => "awaiting a name",
            RoundState::AwaitingAnswer { .. } => "awaiting an answer",
            RoundState::Resolved { .. } => "resolved",
        }
    }
}

/// A single one-shot round
#[derive(Debug, Clone)]
pub struct Round {
    expression: Expression,
    correct_answer: i64,
    state: RoundState,
}

impl Round {
    /// Start a round; the correct answer is fixed here
    pub fn new(expression: Expression) -> Self {
        Self {
            correct_answer: expression.evaluate(),
            expression,
            state: RoundState::AwaitingName,
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Player name once one has been accepted
    pub fn player(&self) -> Option<&str> {
        match &self.state {
            RoundState::AwaitingName => None,
            RoundState::AwaitingAnswer { player } | RoundState::Resolved { player, .. } => {
                Some(player)
            }
        }
    }

    /// Accept the player's name
    pub fn submit_name(&mut self, name: &str) -> Result<(), RoundError> {
        if self.state != RoundState::AwaitingName {
            return Err(RoundError::InvalidTransition {
                state: self.state.label(),
                action: "submit a name",
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(RoundError::EmptyName);
        }

        self.state = RoundState::AwaitingAnswer {
            player: name.to_string(),
        };
        Ok(())
    }

    /// Accept the final answer and resolve the round
    pub fn submit_answer(&mut self, answer: i64) -> Result<Verdict, RoundError> {
        let player = match &self.state {
            RoundState::AwaitingAnswer { player } => player.clone(),
            other => {
                return Err(RoundError::InvalidTransition {
                    state: other.label(),
                    action: "submit an answer",
                })
            }
        };

        let verdict = Verdict::judge(answer, self.correct_answer);
        self.state = RoundState::Resolved { player, verdict };
        Ok(verdict)
    }
}

fn read_required<C: Console + ?Sized>(console: &mut C, prompt: &str) -> Result<String, GameError> {
    console.read_line(prompt)?.ok_or(GameError::InputClosed)
}

/// Play one full round on `console`
pub fn play_round<C, R>(console: &mut C, rng: &mut R) -> Result<Verdict, GameError>
where
    C: Console + ?Sized,
    R: Rng + ?Sized,
{
    console.write_line("Calculator game", Tone::Title)?;
    console.write_line(
        "Compute the value of an expression with 4 operands (+, -, *).",
        Tone::Plain,
    )?;

    let mut round = Round::new(Expression::random(rng));

    loop {
        let name = read_required(console, "Your name")?;
        match round.submit_name(&name) {
            Ok(()) => break,
            Err(RoundError::EmptyName) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    let player = round.player().unwrap_or_default().to_string();
    console.write_line(&format!("Hello, {}!", player), Tone::Plain)?;
    console.write_line(
        &format!("Expression: {}", round.expression()),
        Tone::Highlight,
    )?;

    let verdict = loop {
        let raw = read_required(console, "Your answer")?;
        match parse_answer(&raw) {
            Ok(answer) => break round.submit_answer(answer)?,
            Err(err) => {
                debug!("Rejected answer: {}", err);
                console.write_line("Enter an integer.", Tone::Failure)?;
            }
        }
    };

    if verdict.is_correct {
        console.write_line("Correct! :-)", Tone::Success)?;
    } else {
        console.write_line("Wrong. :-(", Tone::Failure)?;
        console.write_line(&format!("Your answer: {}", verdict.user_answer), Tone::Plain)?;
        console.write_line(
            &format!("Correct answer: {}", verdict.correct_answer),
            Tone::Plain,
        )?;
    }

    console.write_line(&format!("Thanks for playing, {}!", player), Tone::Plain)?;
    Ok(verdict)
}
