//! twenty48-engine: the rules of 2048 on an N×N board.
//!
//! This crate provides:
//! - [`GameEngine`]: an owned game (board, score, won/over flags) driven by `make_move`
//! - The board rules in [`engine`]: the non-cascading line merge, tile spawning behind
//!   an injectable [`TileSource`], and win/game-over checks
//! - [`EngineConfig`]: TOML-loadable board size, win tile and spawn odds
//!
//! Quick start:
//! ```
//! use twenty48_engine::{GameEngine, Move};
//!
//! // Deterministic game with a seeded spawner
//! let mut game = GameEngine::seeded(4, 42).unwrap();
//! let before = game.score();
//! if game.make_move(Move::Left) {
//!     assert!(game.score() >= before);
//! }
//! assert!(!game.is_over());
//! ```
//!
//! Scripted spawns for exact scenarios:
//! ```
//! use twenty48_engine::{GameEngine, Move, ScriptedSource};
//!
//! let mut game = GameEngine::with_source(4, ScriptedSource::new([0, 0, 0], [2, 2, 4])).unwrap();
//! game.set_board(&[vec![2, 2, 2, 2], vec![0; 4], vec![0; 4], vec![0; 4]]).unwrap();
//! assert!(game.make_move(Move::Left));
//! assert_eq!(game.board()[0], vec![4, 4, 0, 0]);
//! // The scripted 4 lands in the first cell that was empty before the move.
//! assert_eq!(game.board()[1][0], 4);
//! assert_eq!(game.score(), 8);
//! ```
//!
pub mod config;
pub mod engine;
pub mod error;
pub mod game;

pub use config::EngineConfig;
pub use engine::spawn::{RngSource, ScriptedSource, Spawned, TileSource};
pub use engine::{Grid, Move, Score, Tile};
pub use error::{ConfigError, EngineError};
pub use game::{GameEngine, MoveOutcome};
