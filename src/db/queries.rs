//! Database query implementations
//!
//! Contains functions for inserting and reading games and their steps

use rusqlite::{params, Connection, OptionalExtension, Row};
use super::DbError;
use crate::models::game::{Game, GameStatus, NewGame, NewStep, Step};

/// Columns shared by the list and detail queries; one row per (game, step)
const GAME_WITH_STEPS_SELECT: &str = r#"
    SELECT
        g.id,
        g.player_name,
        g.expression,
        g.correct_answer,
        g.started_at,
        s.id AS step_id,
        s.user_answer,
        s.is_correct,
        s.created_at
    FROM games g
    LEFT JOIN steps s ON s.game_id = g.id
"#;

/// Flat row from the games/steps join
#[derive(Debug, Clone)]
struct GameStepRow {
    game_id: i64,
    player_name: String,
    expression: String,
    correct_answer: i64,
    started_at: String,
    step: Option<Step>,
}

impl GameStepRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let step_id: Option<i64> = row.get(5)?;
        let step = match step_id {
            Some(id) => Some(Step {
                id,
                user_answer: row.get(6)?,
                is_correct: row.get::<_, i64>(7)? == 1,
                created_at: row.get(8)?,
            }),
            None => None,
        };

        Ok(Self {
            game_id: row.get(0)?,
            player_name: row.get(1)?,
            expression: row.get(2)?,
            correct_answer: row.get(3)?,
            started_at: row.get(4)?,
            step,
        })
    }
}

/// Group join rows into games, keeping row order for games and steps
fn hydrate_games(rows: Vec<GameStepRow>) -> Vec<Game> {
    let mut games: Vec<Game> = Vec::new();

    for row in rows {
        let is_new_game = games.last().map_or(true, |game| game.id != row.game_id);
        if is_new_game {
            games.push(Game {
                id: row.game_id,
                player_name: row.player_name,
                expression: row.expression,
                correct_answer: row.correct_answer,
                started_at: row.started_at,
                status: GameStatus::InProgress,
                steps: Vec::new(),
            });
        }

        if let (Some(step), Some(game)) = (row.step, games.last_mut()) {
            game.push_step(step);
        }
    }

    games
}

/// Insert a new game and return it with no steps
pub fn insert_game(conn: &Connection, game: &NewGame) -> Result<Game, DbError> {
    conn.execute(
        r#"
        INSERT INTO games (player_name, expression, correct_answer, started_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            game.player_name,
            game.expression,
            game.correct_answer,
            game.started_at,
        ],
    )?;

    Ok(Game {
        id: conn.last_insert_rowid(),
        player_name: game.player_name.clone(),
        expression: game.expression.clone(),
        correct_answer: game.correct_answer,
        started_at: game.started_at.clone(),
        status: GameStatus::InProgress,
        steps: Vec::new(),
    })
}

/// Insert a step for an existing game
pub fn insert_step(conn: &Connection, step: &NewStep) -> Result<Step, DbError> {
    conn.execute(
        r#"
        INSERT INTO steps (game_id, user_answer, is_correct, created_at)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![
            step.game_id,
            step.user_answer,
            step.is_correct as i64,
            step.created_at,
        ],
    )?;

    Ok(Step {
        id: conn.last_insert_rowid(),
        user_answer: step.user_answer,
        is_correct: step.is_correct,
        created_at: step.created_at.clone(),
    })
}

/// Get all games, newest first, each with its steps in insertion order
pub fn list_games(conn: &Connection) -> Result<Vec<Game>, DbError> {
    let sql = format!("{GAME_WITH_STEPS_SELECT} ORDER BY g.id DESC, s.id ASC");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([], GameStepRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(hydrate_games(rows))
}

/// Get a single game by ID
pub fn get_game(conn: &Connection, game_id: i64) -> Result<Option<Game>, DbError> {
    let sql = format!("{GAME_WITH_STEPS_SELECT} WHERE g.id = ?1 ORDER BY s.id ASC");
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map(params![game_id], GameStepRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(hydrate_games(rows).into_iter().next())
}

/// Get the stored correct answer for a game
pub fn get_correct_answer(conn: &Connection, game_id: i64) -> Result<Option<i64>, DbError> {
    let answer = conn
        .query_row(
            "SELECT correct_answer FROM games WHERE id = ?1",
            params![game_id],
            |row| row.get(0),
        )
        .optional()?;

    Ok(answer)
}

/// Count steps recorded for a game
pub fn count_steps(conn: &Connection, game_id: i64) -> Result<i64, DbError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM steps WHERE game_id = ?1",
        params![game_id],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Delete a game; its steps go with it. Returns whether a row was removed.
pub fn delete_game(conn: &Connection, game_id: i64) -> Result<bool, DbError> {
    let deleted = conn.execute("DELETE FROM games WHERE id = ?1", params![game_id])?;
    Ok(deleted > 0)
}
