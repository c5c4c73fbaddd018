//! Game data types
//!
//! Types representing persisted games and their answer steps

use serde::{Deserialize, Serialize};

use crate::engine::{Expression, Verdict};

/// Timestamp layout used for `started_at` / `created_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Derived progress of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Finished,
}

impl GameStatus {
    /// A game is finished as soon as any step has been recorded
    pub fn from_step_count(count: usize) -> Self {
        if count == 0 {
            GameStatus::InProgress
        } else {
            GameStatus::Finished
        }
    }
}

/// Full game record with nested steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub player_name: String,
    pub expression: String,
    pub correct_answer: i64,
    pub started_at: String,
    pub status: GameStatus,
    pub steps: Vec<Step>,
}

impl Game {
    /// Append a step and refresh the derived status
    pub fn push_step(&mut self, step: Step) {
        self.steps.push(step);
        self.status = GameStatus::from_step_count(self.steps.len());
    }
}

/// One recorded answer attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    pub user_answer: i64,
    pub is_correct: bool,
    pub created_at: String,
}

/// Game row to insert
#[derive(Debug, Clone)]
pub struct NewGame {
    pub player_name: String,
    pub expression: String,
    pub correct_answer: i64,
    pub started_at: String,
}

impl NewGame {
    /// Prepare a game for `player_name` around a generated expression
    pub fn new(player_name: impl Into<String>, expression: &Expression) -> Self {
        Self {
            player_name: player_name.into(),
            expression: expression.render(),
            correct_answer: expression.evaluate(),
            started_at: timestamp_now(),
        }
    }
}

/// Step row to insert
#[derive(Debug, Clone)]
pub struct NewStep {
    pub game_id: i64,
    pub user_answer: i64,
    pub is_correct: bool,
    pub created_at: String,
}

impl NewStep {
    pub fn new(game_id: i64, verdict: &Verdict) -> Self {
        Self {
            game_id,
            user_answer: verdict.user_answer,
            is_correct: verdict.is_correct,
            created_at: timestamp_now(),
        }
    }
}
