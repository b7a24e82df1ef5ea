//! Roster of selectable characters/stages and per-team selections

use crate::portrait::{Portrait, PortraitLoader, LARGE_PORTRAIT, PORTRAIT_GROUP, SMALL_PORTRAIT};
use spar_core::{Result, SparError};
use spar_def::{first_section, parse_sections, resolve_with_base, Filesystem};
use std::sync::Mutex;

/// Reserved identity of the "random select" roster entry.
pub const RANDOM_SELECT: &str = "randomselect";

/// Retry bound when resolving a random selection to a concrete character.
const MAX_RANDOM_ATTEMPTS: u32 = 100_000;

/// A selectable character: definition path, display name, portraits.
///
/// An entry with an empty `def` is a dead slot left behind by a selection
/// list line that failed to resolve; it occupies grid space but can never
/// be selected.
#[derive(Debug, Clone, Default)]
pub struct SelectChar {
    pub def: String,
    pub name: String,
    pub small_portrait: Option<Portrait>,
    pub large_portrait: Option<Portrait>,
}

/// A selectable stage: definition path and display name.
#[derive(Debug, Clone)]
pub struct SelectStage {
    pub def: String,
    pub name: String,
}

/// One recorded selection: roster index plus palette number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    pub palette: i32,
}

/// Select-screen grid geometry. The UI that draws it is not part of this
/// core; the numbers travel with the roster.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub cell_size: [f32; 2],
    pub cell_scale: [f32; 2],
    pub random_scale: [f32; 2],
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 2,
            cell_size: [29.0, 29.0],
            cell_scale: [1.0, 1.0],
            random_scale: [1.0, 1.0],
        }
    }
}

struct Inner {
    chars: Vec<SelectChar>,
    stages: Vec<SelectStage>,
    selected: [Vec<Pick>; 2],
    stage: Option<usize>,
}

/// The roster model.
///
/// Character and stage lists are append-only; indices are stable
/// identifiers. Selection lists and the stage choice are mutated by the UI
/// and read by the load session's background task, so the whole model sits
/// behind one lock, held only for the read or mutation itself. All file
/// I/O happens before the lock is taken.
pub struct Roster {
    pub grid: GridLayout,
    inner: Mutex<Inner>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            grid: GridLayout::default(),
            inner: Mutex::new(Inner {
                chars: Vec::new(),
                stages: Vec::new(),
                selected: [Vec::new(), Vec::new()],
                stage: None,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("roster lock poisoned")
    }

    /// Add a character from a selection-list entry.
    ///
    /// The entry's first comma-separated field is a definition path or the
    /// literal `randomselect`. Unresolvable entries are skipped silently:
    /// a dead slot is appended and no error is raised.
    pub fn add_character(&self, entry: &str, fs: &dyn Filesystem, portraits: &dyn PortraitLoader) {
        let added = self.resolve_character(entry, fs, portraits);
        if added.def.is_empty() {
            log::debug!("select entry {:?} skipped", entry);
        }
        self.lock().chars.push(added);
    }

    fn resolve_character(
        &self,
        entry: &str,
        fs: &dyn Filesystem,
        portraits: &dyn PortraitLoader,
    ) -> SelectChar {
        let mut def = entry
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .replace('\\', "/");

        if def.eq_ignore_ascii_case(RANDOM_SELECT) {
            return SelectChar {
                def: RANDOM_SELECT.to_string(),
                name: "Random".to_string(),
                ..SelectChar::default()
            };
        }

        let slash = def.find('/');
        let has_def_suffix = def.len() >= 4 && def[def.len() - 4..].eq_ignore_ascii_case(".def");
        if has_def_suffix {
            if slash.is_none() {
                return SelectChar::default();
            }
        } else if slash.is_none() {
            def = format!("{def}/{def}.def");
        } else {
            def.push_str(".def");
        }

        // Bare relative paths live under chars/; absolute and drive-lettered
        // paths are taken as given.
        let is_absolute = def.starts_with('/');
        let has_drive = def.find('/').is_some_and(|i| def[..i].contains(':'));
        if !is_absolute && !has_drive {
            def = format!("chars/{def}");
        }

        let Some(def_path) = fs.resolve(&def) else {
            return SelectChar::default();
        };
        let Ok(text) = fs.read_text(&def_path) else {
            return SelectChar::default();
        };
        let def = def_path.to_string_lossy().into_owned();

        let sections = parse_sections(&text);
        let info = first_section(&sections, "info");
        let name = info
            .and_then(|s| {
                s.get("displayname")
                    .filter(|v| !v.is_empty())
                    .or_else(|| s.get("name"))
            })
            .unwrap_or("")
            .to_string();
        let sprite = first_section(&sections, "files")
            .and_then(|s| s.get("sprite"))
            .unwrap_or("");

        let (small, large) = match resolve_with_base(fs, &def, sprite) {
            Some(sprite_path) => (
                portraits.load(&sprite_path, PORTRAIT_GROUP, SMALL_PORTRAIT).ok(),
                portraits.load(&sprite_path, PORTRAIT_GROUP, LARGE_PORTRAIT).ok(),
            ),
            None => (None, None),
        };

        SelectChar {
            def,
            name,
            small_portrait: small,
            large_portrait: large,
        }
    }

    /// Add a stage from a selection-list entry, searching `stages/` by
    /// default. Unlike characters, a stage that cannot be loaded is an
    /// error returned to the caller.
    pub fn add_stage(&self, entry: &str, fs: &dyn Filesystem) -> Result<()> {
        let entry = entry.trim().replace('\\', "/");
        let path = resolve_with_base(fs, "stages/", &entry)
            .ok_or_else(|| SparError::FileNotFound(entry.clone()))?;
        let text = fs.read_text(&path)?;

        let sections = parse_sections(&text);
        let name = first_section(&sections, "info")
            .and_then(|s| {
                s.get("displayname")
                    .filter(|v| !v.is_empty())
                    .or_else(|| s.get("name"))
            })
            .unwrap_or("")
            .to_string();

        self.lock().stages.push(SelectStage {
            def: path.to_string_lossy().into_owned(),
            name,
        });
        Ok(())
    }

    pub fn char_count(&self) -> usize {
        self.lock().chars.len()
    }

    pub fn stage_count(&self) -> usize {
        self.lock().stages.len()
    }

    /// Wrap an arbitrary cursor into `[0, char_count)` with floored modulo.
    /// Selection cursors can be incremented and decremented without bounds
    /// checks. An empty roster wraps to 0.
    pub fn char_index(&self, i: i64) -> usize {
        wrap(i, self.lock().chars.len())
    }

    /// Wrap a stage cursor into `[0, stage_count]`; the extra slot is the
    /// "no stage chosen" position.
    pub fn stage_index(&self, i: i64) -> usize {
        let n = self.lock().stages.len();
        wrap(i, n + 1)
    }

    /// Character at a wrapped cursor position, if the roster is non-empty.
    pub fn char_at(&self, i: i64) -> Option<SelectChar> {
        let inner = self.lock();
        if inner.chars.is_empty() {
            return None;
        }
        let n = wrap(i, inner.chars.len());
        Some(inner.chars[n].clone())
    }

    /// Definition path of the character at a concrete roster index.
    pub fn char_def(&self, index: usize) -> Option<String> {
        self.lock().chars.get(index).map(|c| c.def.clone())
    }

    /// Definition path of the stage at a concrete roster index.
    pub fn stage_def(&self, index: usize) -> Option<String> {
        self.lock().stages.get(index).map(|s| s.def.clone())
    }

    /// Stage at a wrapped cursor position, if any stages exist.
    pub fn stage_at(&self, i: i64) -> Option<SelectStage> {
        let inner = self.lock();
        if inner.stages.is_empty() {
            return None;
        }
        let n = wrap(i, inner.stages.len());
        Some(inner.stages[n].clone())
    }

    /// Record the stage choice for the next session. The wrapped extra slot
    /// (`index == stage_count`) clears the choice.
    pub fn select_stage(&self, i: i64) {
        let mut inner = self.lock();
        let n = inner.stages.len();
        let idx = wrap(i, n + 1);
        inner.stage = (idx < n).then_some(idx);
    }

    /// The stage chosen for the next session, if any.
    pub fn selected_stage(&self) -> Option<usize> {
        self.lock().stage
    }

    /// Record a selection for a team.
    ///
    /// The cursor is wrapped to a roster index; while that index denotes
    /// `randomselect` or a dead slot, a uniformly random index and palette
    /// are re-rolled. Returns `Ok(true)` when a selection was recorded,
    /// `Ok(false)` on an empty roster, and `RosterExhausted` if the retry
    /// bound is exceeded: a roster with no selectable concrete entries is
    /// a configuration error, not a silent failure.
    pub fn add_selection(&self, team: usize, char_cursor: i64, palette: i32) -> Result<bool> {
        let team = team & 1;
        let mut inner = self.lock();
        if inner.chars.is_empty() {
            return Ok(false);
        }

        let mut n = wrap(char_cursor, inner.chars.len());
        let mut pal = palette;
        let mut attempts = 0u32;
        while inner.chars[n].def == RANDOM_SELECT || inner.chars[n].def.is_empty() {
            attempts += 1;
            if attempts > MAX_RANDOM_ATTEMPTS {
                return Err(SparError::RosterExhausted);
            }
            n = fastrand::usize(0..inner.chars.len());
            pal = fastrand::i32(1..=12);
        }

        inner.selected[team].push(Pick {
            index: n,
            palette: pal,
        });
        Ok(true)
    }

    /// Clear both teams' selections and the stage choice.
    pub fn clear_selections(&self) {
        let mut inner = self.lock();
        inner.selected = [Vec::new(), Vec::new()];
        inner.stage = None;
    }

    /// Copy of a team's selections so far, taken under the shared lock.
    pub fn team_picks(&self, team: usize) -> Vec<Pick> {
        self.lock().selected[team & 1].clone()
    }

    /// Selection counts for both teams under one lock acquisition.
    pub fn selection_counts(&self) -> [usize; 2] {
        let inner = self.lock();
        [inner.selected[0].len(), inner.selected[1].len()]
    }
}

fn wrap(i: i64, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let n = n as i64;
    (((i % n) + n) % n) as usize
}
