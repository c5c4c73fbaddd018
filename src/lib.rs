//! Calculator - arithmetic guessing game
//!
//! This library provides both shapes of the game.
//! It handles:
//! - Expression generation and evaluation
//! - The one-shot console round
//! - SQLite persistence of games and answer steps
//! - The JSON HTTP API over that store

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod models;
pub mod round;

pub use engine::{evaluate, generate, Expression, Operator, Verdict};

/// Crate version, logged at startup
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
