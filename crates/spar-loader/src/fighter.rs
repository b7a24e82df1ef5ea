//! Per-slot fighter state

use spar_core::control_key;
use spar_core::MAX_PLAYERS;
use spar_script::CompiledScript;

/// A loaded fighter occupying one slot.
///
/// Asset population is performed by the [`CharacterAssets`](crate::CharacterAssets)
/// collaborator; this core only tracks identity and control.
#[derive(Debug)]
pub struct Fighter {
    /// Fighter slot index (`pn`).
    pub slot: usize,
    /// Control key: the slot index, bit-inverted for computer-controlled
    /// slots so a shared asset still carries a distinct control identity.
    pub key: i32,
    /// Set by the asset loader once the fighter's data is populated.
    pub loaded: bool,
}

impl Fighter {
    pub fn new(slot: usize, computer: bool) -> Self {
        Self {
            slot,
            key: control_key(slot, computer),
            loaded: false,
        }
    }

    /// Re-stamp control identity when a fighter from a previous session is
    /// reused in place.
    pub fn stamp_control(&mut self, slot: usize, computer: bool) {
        self.slot = slot;
        self.key = control_key(slot, computer);
    }
}

/// Bookkeeping that outlives the fighter object itself, one per slot.
#[derive(Debug)]
pub struct FighterInfo {
    /// Definition path loaded into this slot, kept across sessions so an
    /// unchanged selection can reuse the in-memory fighter.
    pub def: Option<String>,
    /// Palette assigned at load time.
    pub palette: i32,
    /// Palette actually drawn; -1 until the first round establishes it.
    pub draw_palette: i32,
    /// Whether the slot's asset container is open. Cleared when the slot
    /// is rebuilt, which forces a fresh compile + asset load.
    pub assets_open: bool,
}

impl Default for FighterInfo {
    fn default() -> Self {
        Self {
            def: None,
            palette: 0,
            draw_palette: -1,
            assets_open: false,
        }
    }
}

/// The slot-indexed fighter table. Owned by the background task while a
/// session is `Loading`; read-only to the control task afterward.
pub struct SlotTable {
    pub fighters: [Option<Fighter>; MAX_PLAYERS],
    pub info: [FighterInfo; MAX_PLAYERS],
    pub code: [Option<CompiledScript>; MAX_PLAYERS],
}

impl Default for SlotTable {
    fn default() -> Self {
        Self {
            fighters: std::array::from_fn(|_| None),
            info: std::array::from_fn(|_| FighterInfo::default()),
            code: std::array::from_fn(|_| None),
        }
    }
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }
}
