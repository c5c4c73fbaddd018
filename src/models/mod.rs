//! Data models module
//!
//! Contains the persisted game and step types shared by the store and the API.

pub mod game;

pub use game::{Game, GameStatus, NewGame, NewStep, Step};
