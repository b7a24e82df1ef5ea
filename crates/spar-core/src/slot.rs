//! Fighter-slot addressing and team modes
//!
//! Every piece of per-fighter state in the engine (loaded fighter, compiled
//! behavior script, control flags) is addressed by a global slot index
//! `pn` in `[0, MAX_PLAYERS)`. The parity convention is a fixed contract:
//! `pn & 1` is the team, `pn >> 1` is the fighter's position within that
//! team when playing simultaneous mode. Downstream match logic depends on
//! this layout, so it must not change.

use serde::{Deserialize, Serialize};

/// Maximum fighters per team in simultaneous mode.
pub const MAX_SIMUL: usize = 4;

/// Total fighter slots across both teams.
pub const MAX_PLAYERS: usize = MAX_SIMUL * 2;

/// How a team fields its selected fighters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamMode {
    /// One fighter for the whole match.
    Single,
    /// Up to `num_simul` fighters on screen at once.
    Simul,
    /// Fighters enter one at a time; the next enters when the previous loses.
    Turns,
}

impl Default for TeamMode {
    fn default() -> Self {
        TeamMode::Single
    }
}

/// Team (0 or 1) owning the given slot.
pub const fn team(pn: usize) -> usize {
    pn & 1
}

/// Position of the slot within its team's simultaneous lineup.
pub const fn member_pos(pn: usize) -> usize {
    pn >> 1
}

/// Control key stamped onto a loaded fighter.
///
/// Human-controlled slots use the slot index itself; computer-controlled
/// slots use the bitwise inversion, so a reloaded asset shared between a
/// human and an AI mirror slot still carries a distinct control identity.
pub const fn control_key(pn: usize, computer: bool) -> i32 {
    if computer {
        !(pn as i32)
    } else {
        pn as i32
    }
}
