//! HTTP API for the web version of the game
//!
//! ```text
//! GET  /            static index.html
//! GET  /games       all games with nested steps
//! GET  /games/:id   one game with nested steps
//! POST /games       {player_name}  -> created game
//! POST /step/:id    {user_answer}  -> {game_id, step, correct_answer}
//! ```
//!
//! Every route is also reachable under [`LEGACY_PREFIX`].

pub mod dto;
pub mod error;
pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ServeConfig;
use crate::db::{Database, DbError};

pub use error::ApiError;

/// Alternate mount point kept for hosts routing through a front controller
pub const LEGACY_PREFIX: &str = "/index.php";

/// Shared state handed to every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Arc<Database>,
    pub public_dir: PathBuf,
}

/// Server startup errors
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home))
        .route("/games", get(handlers::list_games).post(handlers::create_game))
        .route("/games/:id", get(handlers::get_game))
        .route("/step/:id", post(handlers::create_step))
}

/// Build the application router
pub fn create_router(state: AppState) -> Router {
    let routes = routes();

    Router::new()
        .merge(routes.clone())
        .nest(LEGACY_PREFIX, routes)
        .with_state(state)
}

/// Open the database and serve HTTP until Ctrl-C
pub async fn serve(config: ServeConfig) -> Result<(), ServeError> {
    info!("Database path: {:?}", config.db_path);
    let database = Database::open(&config.db_path)?;
    database.initialize()?;

    let state = AppState {
        db: Arc::new(database),
        public_dir: config.public_dir,
    };

    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::{Game, GameStatus};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let public_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public");

        create_router(AppState {
            db: Arc::new(db),
            public_dir,
        })
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn error_message(body: &[u8]) -> String {
        let parsed: serde_json::Value = serde_json::from_slice(body).unwrap();
        parsed["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_legacy_prefix_mirrors_routes() {
        let router = test_router();

        let (status, body) = send(
            &router,
            json_post("/index.php/games", r#"{"player_name": "Ada"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Game = serde_json::from_slice(&body).unwrap();
        assert_eq!(created.player_name, "Ada");
        assert_eq!(created.status, GameStatus::InProgress);

        let (status, body) = send(&router, get("/index.php/games")).await;
        assert_eq!(status, StatusCode::OK);
        let games: Vec<Game> = serde_json::from_slice(&body).unwrap();
        assert_eq!(games, vec![created.clone()]);

        let (status, body) = send(&router, get(&format!("/games/{}", created.id))).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Game = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_step_route_records_answer() {
        let router = test_router();
        let (_, body) = send(&router, json_post("/games", r#"{"player_name": "Ada"}"#)).await;
        let game: Game = serde_json::from_slice(&body).unwrap();

        let answer = format!(r#"{{"user_answer": {}}}"#, game.correct_answer);
        let (status, body) = send(
            &router,
            json_post(&format!("/index.php/step/{}", game.id), &answer),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["game_id"], game.id);
        assert_eq!(parsed["step"]["is_correct"], true);
        assert_eq!(parsed["correct_answer"], game.correct_answer);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_not_found() {
        let router = test_router();

        let (status, body) = send(&router, get("/games/abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&body), "Game not found.");

        let (status, body) = send(&router, json_post("/step/abc", r#"{"user_answer": 1}"#)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error_message(&body), "Game not found.");
    }

    #[tokio::test]
    async fn test_body_without_json_content_type_is_rejected() {
        let router = test_router();
        let request = Request::post("/games")
            .body(Body::from(r#"{"player_name": "Ada"}"#))
            .unwrap();

        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), dto::BODY_NOT_JSON);

        let (_, body) = send(&router, get("/games")).await;
        let games: Vec<Game> = serde_json::from_slice(&body).unwrap();
        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_step_body_rejected_before_lookup() {
        let router = test_router();

        let (status, body) = send(&router, json_post("/step/999", "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), dto::BODY_NOT_JSON);
    }

    #[tokio::test]
    async fn test_home_under_both_mounts() {
        let router = test_router();

        for uri in ["/", LEGACY_PREFIX] {
            let (status, body) = send(&router, get(uri)).await;
            assert_eq!(status, StatusCode::OK, "uri: {}", uri);
            assert!(String::from_utf8(body).unwrap().contains("<h1>Calculator</h1>"));
        }
    }
}
