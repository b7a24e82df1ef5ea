//! The engine context
//!
//! One `Engine` owns the roster, the load session, the pacer, and the
//! match configuration. Components never reach for globals; everything
//! flows through this object.

use crate::config::EngineConfig;
use crate::pacer::{FrameHost, FramePacer};
use crate::video::VideoGeometry;
use spar_core::{TeamMode, MAX_PLAYERS};
use spar_loader::{CharacterAssets, ContextWorker, LoadSession, MatchConfig, MatchState};
use spar_script::ScriptBackend;
use spar_select::Roster;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The engine context object.
pub struct Engine {
    pub config: EngineConfig,
    pub video: VideoGeometry,
    pub roster: Arc<Roster>,
    pub session: LoadSession,
    pub pacer: FramePacer,
    /// Team modes for the next match, set by the select screen.
    pub team_mode: [TeamMode; 2],
    /// AI level per slot; 0 is human control.
    pub ai_level: [i32; MAX_PLAYERS],
    input_remap: [usize; MAX_PLAYERS],
    game_end: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        scripts: Arc<dyn ScriptBackend>,
        assets: Arc<dyn CharacterAssets>,
    ) -> Self {
        let game_end = Arc::new(AtomicBool::new(false));
        let roster = Arc::new(Roster::new());
        let session = LoadSession::new(
            Arc::clone(&roster),
            scripts,
            assets,
            Arc::new(ContextWorker::new()),
            Arc::clone(&game_end),
        );
        let video = VideoGeometry::new(config.window_width, config.window_height);

        Self {
            config,
            video,
            roster,
            session,
            pacer: FramePacer::new(),
            team_mode: [TeamMode::Single; 2],
            ai_level: [0; MAX_PLAYERS],
            input_remap: std::array::from_fn(|i| i),
            game_end,
        }
    }

    fn match_config(&self) -> MatchConfig {
        MatchConfig {
            team_mode: self.team_mode,
            num_simul: self.config.num_simul,
            num_turns: self.config.num_turns,
            ai_level: self.ai_level,
        }
    }

    /// Begin loading the next match: reset round/win bookkeeping and the
    /// session, then start the background loading task.
    pub fn load_start(&mut self) -> bool {
        {
            let match_state = self.session.match_state();
            let mut match_state = match_state.lock().unwrap();
            *match_state = MatchState::default();
        }
        self.session.reset();
        self.session.run_thread(self.match_config())
    }

    /// Run one presentation tick. A window close request raises the
    /// engine's termination flag.
    pub fn tick_frame(&mut self, host: &mut dyn FrameHost) {
        if self.pacer.await_frame(self.config.target_fps, host) {
            self.game_end.store(true, Ordering::Release);
        }
    }

    /// Whether engine shutdown has been requested. The load session's
    /// background task checks the same flag cooperatively.
    pub fn shutting_down(&self) -> bool {
        self.game_end.load(Ordering::Acquire)
    }

    pub fn request_shutdown(&self) {
        self.game_end.store(true, Ordering::Release);
    }

    /// Input source feeding the given slot.
    pub fn input_for(&self, slot: usize) -> usize {
        self.input_remap[slot]
    }

    pub fn remap_input(&mut self, slot: usize, source: usize) {
        self.input_remap[slot] = source;
    }

    /// Restore the identity input mapping.
    pub fn reset_remap(&mut self) {
        self.input_remap = std::array::from_fn(|i| i);
    }
}
