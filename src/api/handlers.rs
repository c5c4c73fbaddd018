//! HTTP handlers
//!
//! Each handler validates its input first, then touches the store inside a
//! single `with_connection` call.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{debug, info, warn};

use super::dto::{CreateGameRequest, CreateStepRequest, StepCreatedResponse, BODY_NOT_JSON};
use super::error::ApiError;
use super::AppState;
use crate::db::queries;
use crate::engine::{Expression, Verdict};
use crate::models::game::{Game, NewGame, NewStep};

fn game_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        debug!("Unroutable game id: {}", rejection);
        ApiError::NotFound
    })
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        ApiError::validation(BODY_NOT_JSON)
    })
}

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let index_path = state.public_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) => {
            warn!("Cannot read {:?}: {}", index_path, e);
            Err(ApiError::Internal("Cannot open index.html.".to_string()))
        }
    }
}

/// GET /games
pub async fn list_games(State(state): State<AppState>) -> Result<Json<Vec<Game>>, ApiError> {
    let games = state.db.with_connection(queries::list_games)?;
    Ok(Json(games))
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Game>, ApiError> {
    let id = game_id(path)?;

    state
        .db
        .with_connection(|conn| queries::get_game(conn, id))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /games
pub async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let player_name = json_body(body)?.player_name()?;

    let expression = Expression::random(&mut rand::thread_rng());
    let new_game = NewGame::new(player_name, &expression);
    let game = state
        .db
        .with_connection(|conn| queries::insert_game(conn, &new_game))?;

    info!("Created game {} for {}: {}", game.id, game.player_name, game.expression);
    Ok((StatusCode::CREATED, Json(game)))
}

/// POST /step/{id}
///
/// Games are never locked: every submission is judged against the same
/// stored answer and appended to the history.
pub async fn create_step(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<CreateStepRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StepCreatedResponse>), ApiError> {
    let id = game_id(path)?;
    let user_answer = json_body(body)?.user_answer()?;

    let (verdict, step) = state.db.with_connection(|conn| {
        let Some(correct_answer) = queries::get_correct_answer(conn, id)? else {
            return Ok(None);
        };

        let verdict = Verdict::judge(user_answer, correct_answer);
        let step = queries::insert_step(conn, &NewStep::new(id, &verdict))?;
        Ok(Some((verdict, step)))
    })?
    .ok_or(ApiError::NotFound)?;

    info!(
        "Recorded step {} for game {}: answer {} ({})",
        step.id,
        id,
        verdict.user_answer,
        if verdict.is_correct { "correct" } else { "wrong" }
    );

    Ok((
        StatusCode::CREATED,
        Json(StepCreatedResponse {
            game_id: id,
            step,
            correct_answer: verdict.correct_answer,
        }),
    ))
}
