//! Request and response bodies
//!
//! Incoming fields are kept as raw JSON values and validated into typed
//! values here, so malformed fields produce the API's own 400 messages
//! instead of a generic deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use crate::engine::parse_answer;
use crate::models::game::Step;

pub const BODY_NOT_JSON: &str = "Request body must be JSON.";
pub const PLAYER_NAME_REQUIRED: &str = "Field \"player_name\" is required.";
pub const USER_ANSWER_NOT_INTEGER: &str = "Field \"user_answer\" must be an integer.";

/// `POST /games`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub player_name: Option<Value>,
}

impl CreateGameRequest {
    /// Trimmed, non-empty player name
    pub fn player_name(&self) -> Result<String, ApiError> {
        let name = match &self.player_name {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        if name.is_empty() {
            return Err(ApiError::validation(PLAYER_NAME_REQUIRED));
        }
        Ok(name)
    }
}

/// `POST /step/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStepRequest {
    #[serde(default)]
    pub user_answer: Option<Value>,
}

impl CreateStepRequest {
    /// Submitted answer as an integer; accepts JSON integers and integer strings
    pub fn user_answer(&self) -> Result<i64, ApiError> {
        let answer = match &self.user_answer {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => parse_answer(s).ok(),
            _ => None,
        };

        answer.ok_or_else(|| ApiError::validation(USER_ANSWER_NOT_INTEGER))
    }
}

/// Response for a recorded step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCreatedResponse {
    pub game_id: i64,
    pub step: Step,
    pub correct_answer: i64,
}
