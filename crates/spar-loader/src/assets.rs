//! Character and stage asset-loading contract

use crate::fighter::Fighter;
use spar_core::Result;
use std::path::Path;

/// Asset loader consumed by the load session.
///
/// Implementations decode sprites, sounds and declared data for a fighter
/// or a stage; the formats are external to this core. Calls are issued
/// from the session's pinned context worker, so implementations may create
/// context-affine graphics resources.
pub trait CharacterAssets: Send + Sync {
    /// Populate a fighter's loaded state from its definition.
    fn load_character(&self, fighter: &mut Fighter, def: &Path) -> Result<()>;

    /// Load a stage's assets from its definition.
    fn load_stage(&self, def: &Path) -> Result<()>;
}
