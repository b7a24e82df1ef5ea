//! Spar Core - Foundational types for the Spar engine
//!
//! This crate provides the core types that all other Spar crates depend on:
//! - `SparError` / `Result` - Error types and Result alias
//! - Fighter-slot addressing (`team`, `member_pos`, `control_key`)
//! - `TeamMode` - per-team battle configuration

mod error;
mod slot;

pub use error::{Result, SparError};
pub use slot::{control_key, member_pos, team, TeamMode, MAX_PLAYERS, MAX_SIMUL};
