//! Expression engine
//!
//! Generates the four-operand arithmetic puzzles and parses player answers:
//! - Random expression generation and fixed-arity evaluation
//! - Integer answer parsing shared by the console and the HTTP API

pub mod answer;
pub mod expression;

pub use answer::{parse_answer, AnswerError};
pub use expression::{evaluate, generate, generate_with, Expression, Operator};

/// Outcome of comparing a submitted answer with the correct one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub user_answer: i64,
    pub correct_answer: i64,
    pub is_correct: bool,
}

impl Verdict {
    /// Judge an answer by exact equality
    pub fn judge(user_answer: i64, correct_answer: i64) -> Self {
        Self {
            user_answer,
            correct_answer,
            is_correct: user_answer == correct_answer,
        }
    }
}
