//! Spar Loader - asynchronous match loading
//!
//! Drives one complete loading pass per match: character resolution,
//! behavior-script compilation and asset loading for every fighter slot,
//! stage loading, and a final global link pass, all on a background task
//! that runs concurrently with the select screen and the render loop.
//! The session is cancellable, reusable, and guarantees at most one load
//! attempt per fighter slot per session.

mod assets;
mod context;
mod fighter;
mod resolve;
mod session;

pub use assets::CharacterAssets;
pub use context::ContextWorker;
pub use fighter::{Fighter, FighterInfo, SlotTable};
pub use resolve::{resolve_slot, SlotDisposition};
pub use session::{LoadSession, MatchConfig, MatchState, SessionState};
