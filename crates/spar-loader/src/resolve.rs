//! Slot resolution
//!
//! Before any load I/O is attempted, every fighter slot is classified from
//! the current selection state. A slot whose preconditions are unmet is
//! never loaded; this ordering is a correctness requirement.

use spar_core::{member_pos, TeamMode};

/// What a slot needs this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotDisposition {
    /// Slot is not used this match.
    Inactive,
    /// Not enough selections yet to assign this slot; retry later.
    Pending,
    /// Load the team's selection at `member`.
    Ready { member: usize },
}

/// Classify fighter slot `pn` for its team's mode.
///
/// `selections` is the number of selections the slot's team has made so
/// far; `opposing_wins` is the other team's current win count. In `Turns`
/// mode the member index is the opposing win count, not the slot's own
/// position: the next fighter enters when the previous one loses.
pub fn resolve_slot(
    pn: usize,
    mode: TeamMode,
    num_simul: usize,
    num_turns: usize,
    selections: usize,
    opposing_wins: u32,
) -> SlotDisposition {
    match mode {
        TeamMode::Simul => {
            if member_pos(pn) >= num_simul {
                return SlotDisposition::Inactive;
            }
        }
        // Non-simultaneous teams only ever field their first slot.
        _ => {
            if pn >= 2 {
                return SlotDisposition::Inactive;
            }
        }
    }

    if mode == TeamMode::Turns && selections < num_turns {
        return SlotDisposition::Pending;
    }

    let member = if mode == TeamMode::Turns {
        opposing_wins as usize
    } else {
        member_pos(pn)
    };

    if selections <= member {
        return SlotDisposition::Pending;
    }

    SlotDisposition::Ready { member }
}
