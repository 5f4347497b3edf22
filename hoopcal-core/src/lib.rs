//! Core types for hoopcal.
//!
//! This crate provides everything the CLI needs that is not I/O:
//! - `rating` for the Elo-style team rating and win predictions
//! - `ics` for building calendar documents from games
//! - `links` for web calendar deep links
//! - `schedule` for next-game and countdown helpers

pub mod config;
pub mod error;
pub mod game;
pub mod ics;
pub mod links;
pub mod rating;
pub mod schedule;

// Re-export game types at crate root for convenience
pub use game::*;

#[cfg(test)]
mod test_support;
