//! Adaptive frame pacer
//!
//! Runs once per presentation tick and decides whether to render or skip,
//! tracking a target frame interval under imprecise sleeps and sporadic
//! stalls without degrading into runaway frame skipping or drift.

use std::time::{Duration, Instant};

/// Sleep headroom above one frame interval that still counts as on-schedule.
const SLEEP_SLACK: f64 = 0.002;

/// If this long has passed since the last actual draw, render no matter
/// how far behind schedule we are.
const STALL_LIMIT: f64 = 0.250;

/// Being behind by up to this much still renders rather than skips.
const LATE_TOLERANCE: f64 = 0.017;

/// Behind by more than this abandons catch-up: the schedule snaps to now
/// instead of accumulating skip debt.
const RESYNC_LIMIT: f64 = 0.150;

/// Host surface the pacer drives each tick. Window, device and input
/// internals are external to this core.
pub trait FrameHost {
    /// Flush any pending audio output.
    fn flush_audio(&mut self);
    /// Present the previously rendered frame.
    fn present(&mut self);
    /// Poll window/input events; true when window close was requested.
    fn poll_events(&mut self) -> bool;
    /// Clear the color buffer and set the viewport for the next draw.
    fn begin_frame(&mut self);
}

/// Outcome of one pacing decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameDecision {
    /// On schedule: sleep out the remainder, then render.
    Render { sleep: Duration },
    /// Slightly behind but within tolerance: render immediately.
    RenderLate,
    /// The engine stalled past the stall limit: render regardless.
    RenderForced,
    /// Significantly behind: skip presentation this frame.
    Skip { resync: bool },
}

/// The pure pacing policy. `diff` is seconds until the scheduled render
/// time (negative when behind), `wait` is the frame interval, and
/// `since_draw` is seconds since the last actual draw. First matching
/// rule wins.
pub fn decide(diff: f64, wait: f64, since_draw: f64) -> FrameDecision {
    if diff >= 0.0 && diff < wait + SLEEP_SLACK {
        FrameDecision::Render {
            sleep: Duration::from_secs_f64(diff),
        }
    } else if since_draw > STALL_LIMIT {
        FrameDecision::RenderForced
    } else if diff >= -LATE_TOLERANCE {
        FrameDecision::RenderLate
    } else {
        FrameDecision::Skip {
            resync: diff < -RESYNC_LIMIT,
        }
    }
}

/// Pacer state. Lives for the whole process, across load sessions.
pub struct FramePacer {
    next_time: Instant,
    last_draw: Instant,
    skip: bool,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePacer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            next_time: now,
            last_draw: now,
            skip: false,
        }
    }

    /// Whether the current frame was skipped.
    pub fn skipping(&self) -> bool {
        self.skip
    }

    /// Run one presentation tick against the target frame rate.
    ///
    /// Flushes audio, presents the previous frame unless it was skipped,
    /// advances the schedule, applies the pacing decision, then polls
    /// events and prepares the next draw. Returns true when the host
    /// requested close.
    pub fn await_frame(&mut self, fps: u32, host: &mut dyn FrameHost) -> bool {
        host.flush_audio();
        if !self.skip {
            host.present();
        }

        let now = Instant::now();
        let wait = 1.0 / f64::from(fps.max(1));
        let diff = secs_between(now, self.next_time);
        let since_draw = now.duration_since(self.last_draw).as_secs_f64();
        self.next_time += Duration::from_secs_f64(wait);

        match decide(diff, wait, since_draw) {
            FrameDecision::Render { sleep } => {
                if !sleep.is_zero() {
                    std::thread::sleep(sleep);
                }
                self.last_draw = now;
                self.skip = false;
            }
            FrameDecision::RenderLate | FrameDecision::RenderForced => {
                self.last_draw = now;
                self.skip = false;
            }
            FrameDecision::Skip { resync } => {
                if resync {
                    log::warn!("frame pacer {:.0}ms behind, resyncing", -diff * 1000.0);
                    self.next_time = now + Duration::from_secs_f64(wait);
                }
                self.skip = true;
            }
        }

        let close_requested = host.poll_events();
        if !self.skip {
            host.begin_frame();
        }
        close_requested
    }

    #[cfg(test)]
    fn force_schedule(&mut self, next_time: Instant, last_draw: Instant) {
        self.next_time = next_time;
        self.last_draw = last_draw;
    }
}

/// Seconds from `a` to `b`, negative when `b` is earlier.
fn secs_between(a: Instant, b: Instant) -> f64 {
    if b >= a {
        (b - a).as_secs_f64()
    } else {
        -(a - b).as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAIT: f64 = 1.0 / 60.0;

    #[test]
    fn on_schedule_sleeps_and_renders() {
        let decision = decide(0.005, WAIT, 0.01);
        assert_eq!(
            decision,
            FrameDecision::Render {
                sleep: Duration::from_secs_f64(0.005)
            }
        );
    }

    #[test]
    fn far_behind_skips_and_resyncs() {
        assert_eq!(
            decide(-0.200, WAIT, 0.05),
            FrameDecision::Skip { resync: true }
        );
    }

    #[test]
    fn moderately_behind_skips_without_resync() {
        assert_eq!(
            decide(-0.050, WAIT, 0.05),
            FrameDecision::Skip { resync: false }
        );
    }

    #[test]
    fn stall_forces_render_regardless_of_debt() {
        assert_eq!(decide(-0.200, WAIT, 0.3), FrameDecision::RenderForced);
    }

    #[test]
    fn slightly_behind_renders_immediately() {
        assert_eq!(decide(-0.005, WAIT, 0.05), FrameDecision::RenderLate);
    }

    #[test]
    fn sleep_window_upper_bound() {
        assert!(matches!(
            decide(WAIT + 0.0019, WAIT, 0.0),
            FrameDecision::Render { .. }
        ));
        // Just past the slack: falls through to the late rule.
        assert_eq!(decide(WAIT + 0.003, WAIT, 0.0), FrameDecision::RenderLate);
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<&'static str>,
        close: bool,
    }

    impl FrameHost for RecordingHost {
        fn flush_audio(&mut self) {
            self.calls.push("audio");
        }
        fn present(&mut self) {
            self.calls.push("present");
        }
        fn poll_events(&mut self) -> bool {
            self.calls.push("poll");
            self.close
        }
        fn begin_frame(&mut self) {
            self.calls.push("begin");
        }
    }

    #[test]
    fn tick_order_when_rendering() {
        let mut pacer = FramePacer::new();
        let mut host = RecordingHost::default();
        let close = pacer.await_frame(60, &mut host);
        assert!(!close);
        assert!(!pacer.skipping());
        assert_eq!(host.calls, vec!["audio", "present", "poll", "begin"]);
    }

    #[test]
    fn skipped_frame_neither_presents_next_nor_begins() {
        let mut pacer = FramePacer::new();
        let mut host = RecordingHost::default();
        let now = Instant::now();
        pacer.force_schedule(now - Duration::from_millis(200), now);

        pacer.await_frame(60, &mut host);
        assert!(pacer.skipping());
        // First tick still presented the prior frame, but did not begin a new one.
        assert_eq!(host.calls, vec!["audio", "present", "poll"]);

        host.calls.clear();
        pacer.await_frame(60, &mut host);
        // While skipping, the previous frame is not presented again.
        assert!(!host.calls.contains(&"present"));
    }

    #[test]
    fn resync_snaps_schedule_forward() {
        let mut pacer = FramePacer::new();
        let mut host = RecordingHost::default();
        let now = Instant::now();
        pacer.force_schedule(now - Duration::from_millis(200), now);

        pacer.await_frame(60, &mut host);
        assert!(pacer.skipping());
        // Schedule abandoned catch-up: next time is in the future again.
        assert!(pacer.next_time > Instant::now() - Duration::from_millis(5));
    }

    #[test]
    fn stalled_engine_renders_catch_up_frame() {
        let mut pacer = FramePacer::new();
        let mut host = RecordingHost::default();
        let now = Instant::now();
        pacer.force_schedule(
            now - Duration::from_millis(200),
            now - Duration::from_millis(300),
        );

        pacer.await_frame(60, &mut host);
        assert!(!pacer.skipping());
    }

    #[test]
    fn close_request_propagates() {
        let mut pacer = FramePacer::new();
        let mut host = RecordingHost {
            close: true,
            ..RecordingHost::default()
        };
        assert!(pacer.await_frame(60, &mut host));
    }
}
