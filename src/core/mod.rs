//! Core simulation engine (no_std compatible)
//!
//! Boards, shooter knowledge, the match loop and batch aggregation. Beyond
//! `alloc` it only needs num-traits, libm, log and rand, so it builds without
//! `std`.

pub mod ai;
pub mod batch;
pub mod bitboard;
pub mod board;
pub mod common;
pub mod config;
pub mod game;
pub mod knowledge;
pub mod ship;

// Re-export commonly used types
pub use ai::{calc_density, densest_unresolved};
pub use batch::{publish, AggregateStats, BatchProgress, BatchRunner, PairingSummary, StatsSink};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, BoardSnapshot, Cell};
pub use common::{BoardError, ConfigError, Shot, ShotOutcome, Side, SimError};
pub use config::*;
pub use game::{
    MatchEngine, MatchOutcome, MatchResult, MatchSession, NullRenderer, RenderSink, ShotRecord,
    SideStats, Turn,
};
pub use knowledge::{CellKnowledge, Knowledge, TargetStack};
pub use ship::{Orientation, PlacedShip, ShipSpec};
