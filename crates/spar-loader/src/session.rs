//! The load-session state machine
//!
//! One `LoadSession` exists for the lifetime of the engine; each match
//! loading pass reuses it by resetting. `run_thread` moves the session
//! from NotStarted to Loading and spawns the background task; the task
//! ends in Complete, Error, or Cancelled and publishes its exit on a
//! one-shot channel that `reset` joins on. Starting a new pass while an
//! old task still touches slot state would be a data race, so the
//! blocking join is mandatory.

use crate::assets::CharacterAssets;
use crate::context::ContextWorker;
use crate::fighter::{Fighter, SlotTable};
use crate::resolve::{resolve_slot, SlotDisposition};
use spar_core::{team, Result, SparError, TeamMode, MAX_PLAYERS};
use spar_script::{CompiledScript, ScriptBackend};
use spar_select::Roster;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

/// Delay between loading iterations, yielding to the rest of the engine.
const LOAD_YIELD: Duration = Duration::from_millis(10);

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Loading,
    Complete,
    Error,
    Cancelled,
}

/// Per-session team configuration, fixed before `run_thread`.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    pub team_mode: [TeamMode; 2],
    pub num_simul: [usize; 2],
    pub num_turns: [usize; 2],
    /// AI level per slot; 0 is human control.
    pub ai_level: [i32; MAX_PLAYERS],
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            team_mode: [TeamMode::Single; 2],
            num_simul: [2, 2],
            num_turns: [2, 2],
            ai_level: [0; MAX_PLAYERS],
        }
    }
}

/// Match bookkeeping that spans sessions: round number, win counts, and
/// how many rounds each team's lineup has already survived (which gates
/// palette re-stamping).
#[derive(Debug)]
pub struct MatchState {
    pub round: u32,
    pub wins: [u32; 2],
    pub rexisted: [u32; 2],
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            round: 1,
            wins: [0, 0],
            rexisted: [0, 0],
        }
    }
}

struct Status {
    state: SessionState,
    err: Option<SparError>,
}

/// The load session.
pub struct LoadSession {
    roster: Arc<Roster>,
    scripts: Arc<dyn ScriptBackend>,
    assets: Arc<dyn CharacterAssets>,
    gfx: Arc<ContextWorker>,
    slots: Arc<Mutex<SlotTable>>,
    match_state: Arc<Mutex<MatchState>>,
    game_end: Arc<AtomicBool>,
    status: Arc<Mutex<Status>>,
    exit_rx: Option<Receiver<()>>,
    handle: Option<JoinHandle<()>>,
}

impl LoadSession {
    pub fn new(
        roster: Arc<Roster>,
        scripts: Arc<dyn ScriptBackend>,
        assets: Arc<dyn CharacterAssets>,
        gfx: Arc<ContextWorker>,
        game_end: Arc<AtomicBool>,
    ) -> Self {
        Self {
            roster,
            scripts,
            assets,
            gfx,
            slots: Arc::new(Mutex::new(SlotTable::new())),
            match_state: Arc::new(Mutex::new(MatchState::default())),
            game_end,
            status: Arc::new(Mutex::new(Status {
                state: SessionState::NotStarted,
                err: None,
            })),
            exit_rx: None,
            handle: None,
        }
    }

    fn status(&self) -> MutexGuard<'_, Status> {
        self.status.lock().unwrap()
    }

    pub fn state(&self) -> SessionState {
        self.status().state
    }

    /// The error that aborted the last session, for UI feedback.
    pub fn last_error(&self) -> Option<String> {
        self.status().err.as_ref().map(|e| e.to_string())
    }

    /// The slot-indexed fighter table. Read-only to callers outside the
    /// session while `Loading`.
    pub fn slots(&self) -> Arc<Mutex<SlotTable>> {
        Arc::clone(&self.slots)
    }

    pub fn match_state(&self) -> Arc<Mutex<MatchState>> {
        Arc::clone(&self.match_state)
    }

    /// Start the background loading task.
    ///
    /// Fails (returns false) unless the session is `NotStarted`, which
    /// guarantees at most one background task ever runs.
    pub fn run_thread(&mut self, cfg: MatchConfig) -> bool {
        {
            let mut status = self.status();
            if status.state != SessionState::NotStarted {
                return false;
            }
            status.state = SessionState::Loading;
        }

        let (exit_tx, exit_rx) = mpsc::channel();
        let mut task = LoaderTask {
            roster: Arc::clone(&self.roster),
            scripts: Arc::clone(&self.scripts),
            assets: Arc::clone(&self.assets),
            gfx: Arc::clone(&self.gfx),
            slots: Arc::clone(&self.slots),
            match_state: Arc::clone(&self.match_state),
            game_end: Arc::clone(&self.game_end),
            status: Arc::clone(&self.status),
            cfg,
        };
        let handle = std::thread::spawn(move || {
            task.run();
            // The one-shot exit signal, published on every exit path.
            let _ = exit_tx.send(());
        });

        self.exit_rx = Some(exit_rx);
        self.handle = Some(handle);
        log::info!("load session started");
        true
    }

    /// Cancel any in-flight session and return to `NotStarted`.
    ///
    /// Blocks until the background task has observed cancellation and
    /// exited; after `reset` returns, no further slot mutations occur.
    pub fn reset(&mut self) {
        let state = self.status().state;
        if state != SessionState::NotStarted {
            self.status().state = SessionState::Cancelled;
            if let Some(rx) = self.exit_rx.take() {
                let _ = rx.recv();
            }
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
            self.status().state = SessionState::NotStarted;
        }
        self.status().err = None;

        let ms = self.match_state.lock().unwrap();
        let mut slots = self.slots.lock().unwrap();
        for pn in 0..MAX_PLAYERS {
            if ms.rexisted[team(pn)] == 0 {
                slots.info[pn].draw_palette = -1;
            }
        }
    }
}

enum SlotOutcome {
    Done,
    Retry,
}

struct LoaderTask {
    roster: Arc<Roster>,
    scripts: Arc<dyn ScriptBackend>,
    assets: Arc<dyn CharacterAssets>,
    gfx: Arc<ContextWorker>,
    slots: Arc<Mutex<SlotTable>>,
    match_state: Arc<Mutex<MatchState>>,
    game_end: Arc<AtomicBool>,
    status: Arc<Mutex<Status>>,
    cfg: MatchConfig,
}

impl LoaderTask {
    fn run(&mut self) {
        let mut char_done = [false; MAX_PLAYERS];
        let mut stage_done = false;
        let mut link_done = false;

        loop {
            for pn in 0..MAX_PLAYERS {
                if char_done[pn] {
                    continue;
                }
                match self.load_slot(pn) {
                    Ok(SlotOutcome::Done) => char_done[pn] = true,
                    Ok(SlotOutcome::Retry) => {}
                    Err(e) => {
                        self.fail(e);
                        return;
                    }
                }
            }

            // Non-simultaneous teams only ever field their first slot: once
            // such a team has selected, clear and finish slots 2+ at stride 2.
            let counts = self.roster.selection_counts();
            for team_no in 0..2 {
                if !char_done[team_no + 2]
                    && counts[team_no] > 0
                    && self.cfg.team_mode[team_no] != TeamMode::Simul
                {
                    let mut slots = self.slots.lock().unwrap();
                    let mut pn = team_no + 2;
                    while pn < MAX_PLAYERS {
                        slots.fighters[pn] = None;
                        slots.code[pn] = None;
                        char_done[pn] = true;
                        pn += 2;
                    }
                }
            }

            if !stage_done {
                if let Some(idx) = self.roster.selected_stage() {
                    if let Err(e) = self.load_stage(idx) {
                        self.fail(e);
                        return;
                    }
                    stage_done = true;
                }
            }

            if !link_done && char_done.iter().all(|&b| b) {
                if let Err(e) = self.link_all() {
                    self.fail(e);
                    return;
                }
                link_done = true;
            }

            std::thread::sleep(LOAD_YIELD);

            if self.game_end.load(Ordering::Acquire) {
                self.status.lock().unwrap().state = SessionState::Cancelled;
            }
            if self.status.lock().unwrap().state == SessionState::Cancelled {
                log::info!("load session cancelled");
                return;
            }

            if char_done.iter().all(|&b| b) && stage_done && link_done {
                break;
            }
        }

        let mut status = self.status.lock().unwrap();
        if status.state == SessionState::Loading {
            status.state = SessionState::Complete;
        }
        drop(status);
        log::info!("load session complete");
    }

    fn fail(&self, err: SparError) {
        log::warn!("load session failed: {err}");
        let mut status = self.status.lock().unwrap();
        status.err = Some(err);
        status.state = SessionState::Error;
    }

    fn load_slot(&self, pn: usize) -> Result<SlotOutcome> {
        let team_no = team(pn);
        let mode = self.cfg.team_mode[team_no];
        let picks = self.roster.team_picks(team_no);
        let opposing_wins = self.match_state.lock().unwrap().wins[team_no ^ 1];

        match resolve_slot(
            pn,
            mode,
            self.cfg.num_simul[team_no],
            self.cfg.num_turns[team_no],
            picks.len(),
            opposing_wins,
        ) {
            SlotDisposition::Inactive => {
                let mut slots = self.slots.lock().unwrap();
                slots.fighters[pn] = None;
                slots.code[pn] = None;
                Ok(SlotOutcome::Done)
            }
            SlotDisposition::Pending => Ok(SlotOutcome::Retry),
            SlotDisposition::Ready { member } => self.load_fighter(pn, &picks, member),
        }
    }

    fn load_fighter(
        &self,
        pn: usize,
        picks: &[spar_select::Pick],
        member: usize,
    ) -> Result<SlotOutcome> {
        let palette = picks[member].palette;
        let indices: Vec<usize> = picks.iter().map(|p| p.index).collect();
        let cdef = self
            .roster
            .char_def(indices[member])
            .filter(|d| !d.is_empty())
            .ok_or_else(|| {
                SparError::DefParseError(format!(
                    "selection {} has no character definition",
                    indices[member]
                ))
            })?;
        let team_no = team(pn);
        let computer = self.cfg.ai_level[pn] != 0;

        // Reuse the in-memory fighter when the definition matches the one
        // loaded in a previous session; otherwise rebuild and force a full
        // compile + asset load.
        let (mut fighter, assets_open) = {
            let mut slots = self.slots.lock().unwrap();
            let reusable = slots.info[pn].def.as_deref() == Some(cdef.as_str())
                && slots.fighters[pn].is_some();
            if reusable {
                let mut f = slots.fighters[pn].take().unwrap();
                f.stamp_control(pn, computer);
                (f, slots.info[pn].assets_open)
            } else {
                slots.info[pn].assets_open = false;
                (Fighter::new(pn, computer), false)
            }
        };

        {
            let ms = self.match_state.lock().unwrap();
            if ms.rexisted[team_no] == 0 {
                self.slots.lock().unwrap().info[pn].palette = palette;
            }
        }

        if !assets_open {
            let def_path = PathBuf::from(&cdef);

            // Both steps create graphics resources; both run on the
            // session's pinned context worker.
            let scripts = Arc::clone(&self.scripts);
            let compile_def = def_path.clone();
            let code = match self.gfx.run(move || scripts.compile(pn, &compile_def)) {
                Ok(code) => code,
                Err(e) => {
                    self.slots.lock().unwrap().fighters[pn] = None;
                    return Err(e);
                }
            };

            let assets = Arc::clone(&self.assets);
            let (returned, result) = self.gfx.run(move || {
                let mut f = fighter;
                let r = assets.load_character(&mut f, &def_path);
                (f, r)
            });
            fighter = returned;
            if let Err(e) = result {
                self.slots.lock().unwrap().fighters[pn] = None;
                return Err(e);
            }

            let mut slots = self.slots.lock().unwrap();
            slots.code[pn] = Some(code);
            slots.info[pn].def = Some(cdef);
            slots.info[pn].assets_open = true;
        }

        self.slots.lock().unwrap().fighters[pn] = Some(fighter);
        log::debug!("slot {pn} loaded");
        Ok(SlotOutcome::Done)
    }

    fn load_stage(&self, index: usize) -> Result<()> {
        let def = self
            .roster
            .stage_def(index)
            .ok_or_else(|| SparError::StageError(format!("no stage at index {index}")))?;
        let assets = Arc::clone(&self.assets);
        let path = PathBuf::from(def);
        self.gfx.run(move || assets.load_stage(&path))
    }

    fn link_all(&self) -> Result<()> {
        let slots = self.slots.lock().unwrap();
        let code: Vec<&CompiledScript> = slots.code.iter().flatten().collect();
        self.scripts.link(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spar_def::Filesystem;
    use spar_select::{Portrait, PortraitLoader};
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::atomic::AtomicUsize;
    use std::time::Instant;

    struct MemoryFs {
        files: HashMap<String, String>,
    }

    impl Filesystem for MemoryFs {
        fn resolve(&self, path: &str) -> Option<PathBuf> {
            self.files.contains_key(path).then(|| PathBuf::from(path))
        }

        fn read_text(&self, path: &Path) -> Result<String> {
            self.files
                .get(path.to_str().unwrap())
                .cloned()
                .ok_or_else(|| SparError::FileNotFound(path.display().to_string()))
        }
    }

    struct StubPortraits;

    impl PortraitLoader for StubPortraits {
        fn load(&self, _sprite: &Path, _group: u16, _image: u16) -> Result<Portrait> {
            Err(SparError::AssetError("no sprites in tests".into()))
        }
    }

    fn fixture_roster() -> Arc<Roster> {
        let mut files = HashMap::new();
        for name in ["alpha", "bravo", "charlie"] {
            files.insert(
                format!("chars/{name}/{name}.def"),
                format!("[info]\nname = {name}\n"),
            );
        }
        files.insert("stages/ring.def".to_string(), "[info]\nname = Ring\n".to_string());
        let fs = MemoryFs { files };

        let roster = Roster::new();
        for name in ["alpha", "bravo", "charlie"] {
            roster.add_character(name, &fs, &StubPortraits);
        }
        roster.add_stage("ring.def", &fs).unwrap();
        Arc::new(roster)
    }

    #[derive(Default)]
    struct FakeScripts {
        compiled: Mutex<Vec<(usize, PathBuf)>>,
        fail_slot: Option<usize>,
        links: AtomicUsize,
    }

    impl ScriptBackend for FakeScripts {
        fn compile(&self, slot: usize, def: &Path) -> Result<CompiledScript> {
            if self.fail_slot == Some(slot) {
                return Err(SparError::CompileError("bad state controller".into()));
            }
            self.compiled.lock().unwrap().push((slot, def.to_path_buf()));
            Ok(CompiledScript::empty(slot))
        }

        fn link(&self, _scripts: &[&CompiledScript]) -> Result<()> {
            self.links.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeAssets {
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        char_loads: AtomicUsize,
        stage_loads: AtomicUsize,
        delay_ms: u64,
        fail_stage: bool,
    }

    impl CharacterAssets for FakeAssets {
        fn load_character(&self, fighter: &mut Fighter, _def: &Path) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(self.delay_ms));
            self.char_loads.fetch_add(1, Ordering::SeqCst);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            fighter.loaded = true;
            Ok(())
        }

        fn load_stage(&self, _def: &Path) -> Result<()> {
            if self.fail_stage {
                return Err(SparError::StageError("corrupt background".into()));
            }
            self.stage_loads.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn session_with(
        roster: Arc<Roster>,
        scripts: Arc<FakeScripts>,
        assets: Arc<FakeAssets>,
    ) -> (LoadSession, Arc<AtomicBool>) {
        let game_end = Arc::new(AtomicBool::new(false));
        let session = LoadSession::new(
            roster,
            scripts,
            assets,
            Arc::new(ContextWorker::new()),
            Arc::clone(&game_end),
        );
        (session, game_end)
    }

    fn wait_for(session: &LoadSession, state: SessionState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while session.state() != state {
            assert!(
                Instant::now() < deadline,
                "timed out waiting for {state:?}, at {:?}",
                session.state()
            );
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn single_vs_single_completes() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(1, 1, 2).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, Arc::clone(&scripts), Arc::clone(&assets));

        assert!(session.run_thread(MatchConfig::default()));
        wait_for(&session, SessionState::Complete);

        let slots = session.slots();
        let slots = slots.lock().unwrap();
        for pn in 0..MAX_PLAYERS {
            if pn < 2 {
                let fighter = slots.fighters[pn].as_ref().unwrap();
                assert!(fighter.loaded);
                assert_eq!(fighter.key, pn as i32);
                assert!(slots.code[pn].is_some());
            } else {
                assert!(slots.fighters[pn].is_none(), "slot {pn} should be inactive");
                assert!(slots.code[pn].is_none());
            }
        }
        assert_eq!(assets.stage_loads.load(Ordering::SeqCst), 1);
        assert_eq!(scripts.links.load(Ordering::SeqCst), 1);
        assert_eq!(scripts.compiled.lock().unwrap().len(), 2);
    }

    #[test]
    fn simul_with_uneven_teams() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(0, 1, 1).unwrap();
        roster.add_selection(1, 2, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, scripts, assets);

        let cfg = MatchConfig {
            team_mode: [TeamMode::Simul; 2],
            num_simul: [2, 1],
            ..MatchConfig::default()
        };
        assert!(session.run_thread(cfg));
        wait_for(&session, SessionState::Complete);

        let slots = session.slots();
        let slots = slots.lock().unwrap();
        for pn in 0..MAX_PLAYERS {
            let loaded = slots.fighters[pn].is_some();
            assert_eq!(loaded, pn < 3, "slot {pn}");
        }
    }

    #[test]
    fn second_start_rejected_and_loads_never_overlap() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(1, 1, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets {
            delay_ms: 20,
            ..FakeAssets::default()
        });
        let (mut session, _) = session_with(roster, scripts, Arc::clone(&assets));

        assert!(session.run_thread(MatchConfig::default()));
        assert!(!session.run_thread(MatchConfig::default()));
        wait_for(&session, SessionState::Complete);

        assert_eq!(assets.max_in_flight.load(Ordering::SeqCst), 1);
        assert_eq!(assets.char_loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn reset_joins_pending_session() {
        // No selections: every first slot stays pending, so the task spins
        // until reset cancels it.
        let roster = fixture_roster();
        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, scripts, Arc::clone(&assets));

        assert!(session.run_thread(MatchConfig::default()));
        std::thread::sleep(Duration::from_millis(30));
        session.reset();

        assert_eq!(session.state(), SessionState::NotStarted);
        assert_eq!(assets.char_loads.load(Ordering::SeqCst), 0);
        // A fresh session can start immediately after the join.
        assert!(session.run_thread(MatchConfig::default()));
        session.reset();
        assert_eq!(session.state(), SessionState::NotStarted);
    }

    #[test]
    fn compile_failure_is_session_fatal() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(1, 1, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts {
            fail_slot: Some(0),
            ..FakeScripts::default()
        });
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, scripts, assets);

        assert!(session.run_thread(MatchConfig::default()));
        wait_for(&session, SessionState::Error);

        assert!(session.last_error().unwrap().contains("compile"));
        assert!(session.slots().lock().unwrap().fighters[0].is_none());

        session.reset();
        assert_eq!(session.state(), SessionState::NotStarted);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn stage_failure_is_session_fatal() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(1, 1, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets {
            fail_stage: true,
            ..FakeAssets::default()
        });
        let (mut session, _) = session_with(roster, scripts, assets);

        assert!(session.run_thread(MatchConfig::default()));
        wait_for(&session, SessionState::Error);
        assert!(session.last_error().unwrap().contains("background"));
    }

    #[test]
    fn unchanged_selection_reuses_fighter() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(1, 1, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, Arc::clone(&scripts), assets);

        assert!(session.run_thread(MatchConfig::default()));
        wait_for(&session, SessionState::Complete);
        assert_eq!(scripts.compiled.lock().unwrap().len(), 2);

        // Same selections, slot 1 handed to the computer: no recompilation,
        // control key re-stamped with the inverted slot index.
        session.reset();
        let mut cfg = MatchConfig::default();
        cfg.ai_level[1] = 4;
        assert!(session.run_thread(cfg));
        wait_for(&session, SessionState::Complete);

        assert_eq!(scripts.compiled.lock().unwrap().len(), 2);
        let slots = session.slots();
        let slots = slots.lock().unwrap();
        assert_eq!(slots.fighters[0].as_ref().unwrap().key, 0);
        assert_eq!(slots.fighters[1].as_ref().unwrap().key, !1);
    }

    #[test]
    fn turns_loads_member_by_opposing_wins() {
        let roster = fixture_roster();
        roster.add_selection(0, 0, 1).unwrap();
        roster.add_selection(0, 2, 1).unwrap();
        roster.add_selection(1, 1, 1).unwrap();
        roster.select_stage(0);

        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, _) = session_with(roster, Arc::clone(&scripts), assets);

        // Team 1 already won a round, so team 0's next turn fields its
        // second pick.
        session.match_state().lock().unwrap().wins[1] = 1;

        let cfg = MatchConfig {
            team_mode: [TeamMode::Turns, TeamMode::Single],
            num_turns: [2, 2],
            ..MatchConfig::default()
        };
        assert!(session.run_thread(cfg));
        wait_for(&session, SessionState::Complete);

        let compiled = scripts.compiled.lock().unwrap();
        let slot0 = compiled.iter().find(|(slot, _)| *slot == 0).unwrap();
        assert!(slot0.1.ends_with("chars/charlie/charlie.def"));
    }

    #[test]
    fn engine_shutdown_cancels_session() {
        let roster = fixture_roster();
        let scripts = Arc::new(FakeScripts::default());
        let assets = Arc::new(FakeAssets::default());
        let (mut session, game_end) = session_with(roster, scripts, assets);

        assert!(session.run_thread(MatchConfig::default()));
        game_end.store(true, Ordering::Release);
        wait_for(&session, SessionState::Cancelled);

        session.reset();
        assert_eq!(session.state(), SessionState::NotStarted);
    }
}
