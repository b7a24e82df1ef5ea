//! Spar Select - the select-screen roster model
//!
//! Owns the enumerated selectable characters and stages, and the per-team
//! selections made during the select screen. Selections are mutated by the
//! UI while the load session reads them from a background task, so all
//! selection state lives behind the roster's single shared lock.

mod portrait;
mod roster;

pub use portrait::{Portrait, PortraitLoader, LARGE_PORTRAIT, PORTRAIT_GROUP, SMALL_PORTRAIT};
pub use roster::{GridLayout, Pick, Roster, SelectChar, SelectStage, RANDOM_SELECT};
