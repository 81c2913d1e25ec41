//! Search module for the Connect-K engine
//!
//! Contains:
//! - Cooperative deadline polled by the search
//! - One-ply move ordering with the incremental evaluator
//! - Alpha-Beta search with iterative deepening

pub mod alphabeta;
pub mod clock;
pub mod ordering;

pub use alphabeta::{SearchResult, Searcher};
pub use clock::{Clock, Deadline, DEFAULT_DEADLINE_FRACTION};
pub use ordering::{order_moves, ScoredMove};
