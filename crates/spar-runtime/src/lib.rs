//! Spar Runtime - presentation pacing and engine context
//!
//! Provides the pieces that tie the engine together:
//! - `FramePacer` — adaptive frame pacing against a target frame rate
//! - `EngineConfig` — TOML engine configuration
//! - `VideoGeometry` — letterboxed game-area scaling
//! - `Engine` — the context object owning roster, load session and pacer

mod config;
mod engine;
mod pacer;
mod video;

pub use config::EngineConfig;
pub use engine::Engine;
pub use pacer::{decide, FrameDecision, FrameHost, FramePacer};
pub use video::VideoGeometry;
