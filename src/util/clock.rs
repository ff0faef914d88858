//! Game time, frame statistics and frame pacing.

use std::fmt;

use web_time::{Duration, Instant};

/// Smoothing factor for the displayed FPS (5% new value, 95% old value).
const FPS_SMOOTHING: f32 = 0.05;

/// Wall clock with pausable game time and frame statistics.
///
/// Statistics only start once `deferred_start` has elapsed so start-up
/// hitches (shader compilation, first uploads) do not skew min/max.
#[derive(Debug, Clone)]
pub struct GameClock {
    name: String,
    created: Instant,
    /// `None` when the deferral cannot be represented; nothing is counted.
    stats_from: Option<Instant>,
    last_tick: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
    frames: u64,
    counted: Duration,
    min_spf: Option<f64>,
    max_spf: Option<f64>,
    smoothed_fps: f32,
}

/// Frame statistics gathered since the deferred start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingReport {
    /// Frames counted.
    pub frames: u64,
    /// Frames per second over the counted period.
    pub average_fps: f64,
    /// Slowest single frame, as a rate.
    pub min_fps: f64,
    /// Fastest single frame, as a rate.
    pub max_fps: f64,
    /// Longest single frame in seconds.
    pub max_spf: f64,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames {}, average FPS {:.1}, min FPS {:.1}, max FPS {:.1}, max SPF {:.4}",
            self.frames, self.average_fps, self.min_fps, self.max_fps, self.max_spf
        )
    }
}

impl GameClock {
    /// Start a clock now; statistics begin after `deferred_start_secs`.
    #[must_use]
    pub fn new(name: impl Into<String>, deferred_start_secs: f32) -> Self {
        Self::started_at(name.into(), deferred_start_secs, Instant::now())
    }

    fn started_at(name: String, deferred_start_secs: f32, now: Instant) -> Self {
        let stats_from = Duration::try_from_secs_f32(deferred_start_secs.max(0.0))
            .ok()
            .and_then(|delay| now.checked_add(delay));
        if stats_from.is_none() {
            log::warn!(
                "deferred start of {deferred_start_secs}s is out of range, \
                 frame statistics disabled"
            );
        }
        Self {
            name,
            created: now,
            stats_from,
            last_tick: now,
            paused_at: None,
            paused_total: Duration::ZERO,
            frames: 0,
            counted: Duration::ZERO,
            min_spf: None,
            max_spf: None,
            smoothed_fps: 60.0,
        }
    }

    /// Clock name used in log output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark the end of a frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - FPS_SMOOTHING) + instant_fps * FPS_SMOOTHING;
        }

        if self.stats_from.is_none_or(|from| now < from) {
            return;
        }
        self.frames += 1;
        self.counted += elapsed;
        let spf = elapsed.as_secs_f64();
        self.min_spf = Some(self.min_spf.map_or(spf, |m| m.min(spf)));
        self.max_spf = Some(self.max_spf.map_or(spf, |m| m.max(spf)));
    }

    /// Resume game time.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn start_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Freeze game time.
    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    fn stop_at(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Whether game time is frozen.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Seconds of wall time since the clock was created.
    #[must_use]
    pub fn actual_time_elapsed(&self) -> f64 {
        self.actual_time_at(Instant::now())
    }

    fn actual_time_at(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.created).as_secs_f64()
    }

    /// Seconds of wall time since creation, minus time spent paused.
    #[must_use]
    pub fn game_time_elapsed(&self) -> f64 {
        self.game_time_at(Instant::now())
    }

    fn game_time_at(&self, now: Instant) -> f64 {
        let mut paused = self.paused_total;
        if let Some(paused_at) = self.paused_at {
            paused += now.saturating_duration_since(paused_at);
        }
        now.saturating_duration_since(self.created)
            .saturating_sub(paused)
            .as_secs_f64()
    }

    /// Exponentially smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// Statistics since the deferred start. All rates are zero until a frame
    /// has been counted.
    #[must_use]
    pub fn report(&self) -> TimingReport {
        let rate = |spf: Option<f64>| match spf {
            Some(s) if s > 0.0 => 1.0 / s,
            _ => 0.0,
        };
        let counted = self.counted.as_secs_f64();
        TimingReport {
            frames: self.frames,
            average_fps: if counted > 0.0 {
                self.frames as f64 / counted
            } else {
                0.0
            },
            min_fps: rate(self.max_spf),
            max_fps: rate(self.min_spf),
            max_spf: self.max_spf.unwrap_or(0.0),
        }
    }

    /// Log the timing report at info level.
    pub fn report_timing_data(&self) {
        log::info!("[{}] {}", self.name, self.report());
    }
}

/// Frame limiter for a target FPS (0 = unlimited).
#[derive(Debug, Clone)]
pub struct FramePacer {
    min_frame_duration: Duration,
    last_frame: Instant,
}

impl FramePacer {
    /// Pacer for `target_fps` frames per second.
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        Self {
            min_frame_duration,
            last_frame: Instant::now(),
        }
    }

    /// Whether pacing is active.
    #[must_use]
    pub fn is_limited(&self) -> bool {
        !self.min_frame_duration.is_zero()
    }

    /// Whether enough time has passed since the last frame to render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Earliest instant the next frame should start.
    #[must_use]
    pub fn next_frame_at(&self) -> Instant {
        self.last_frame + self.min_frame_duration
    }

    /// Record that a frame was rendered.
    pub fn frame_rendered(&mut self) {
        self.last_frame = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn game_time_excludes_paused_spans() {
        let t0 = Instant::now();
        let mut clock = GameClock::started_at("test".into(), 0.0, t0);
        clock.stop_at(t0 + secs(2.0));
        assert!(clock.is_paused());
        assert!((clock.game_time_at(t0 + secs(5.0)) - 2.0).abs() < 1e-6);

        clock.start_at(t0 + secs(5.0));
        assert!(!clock.is_paused());
        assert!((clock.game_time_at(t0 + secs(6.0)) - 3.0).abs() < 1e-6);
        assert!((clock.actual_time_at(t0 + secs(6.0)) - 6.0).abs() < 1e-6);
    }

    #[test]
    fn unrepresentable_deferrals_do_not_panic() {
        let t0 = Instant::now();
        for deferral in [f32::INFINITY, 1e30, f32::NAN, -5.0] {
            let mut clock = GameClock::started_at("test".into(), deferral, t0);
            clock.tick_at(t0 + secs(1.0));
            clock.tick_at(t0 + secs(2.0));
            assert!((clock.game_time_at(t0 + secs(2.0)) - 2.0).abs() < 1e-6);
        }

        let mut never = GameClock::started_at("test".into(), f32::INFINITY, t0);
        never.tick_at(t0 + secs(1.0));
        assert_eq!(never.report().frames, 0);

        let mut immediate = GameClock::started_at("test".into(), -5.0, t0);
        immediate.tick_at(t0 + secs(1.0));
        assert_eq!(immediate.report().frames, 1);
    }

    #[test]
    fn repeated_stop_keeps_the_first_pause_instant() {
        let t0 = Instant::now();
        let mut clock = GameClock::started_at("test".into(), 0.0, t0);
        clock.stop_at(t0 + secs(1.0));
        clock.stop_at(t0 + secs(3.0));
        clock.start_at(t0 + secs(4.0));
        assert!((clock.game_time_at(t0 + secs(4.0)) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn frames_before_the_deferred_start_are_not_counted() {
        let t0 = Instant::now();
        let mut clock = GameClock::started_at("test".into(), 3.0, t0);
        // A slow start-up frame inside the deferral window.
        clock.tick_at(t0 + secs(2.5));
        assert_eq!(clock.report().frames, 0);

        clock.tick_at(t0 + secs(3.0));
        clock.tick_at(t0 + secs(3.25));
        let report = clock.report();
        assert_eq!(report.frames, 2);
        assert!((report.max_spf - 0.5).abs() < 1e-6);
        assert!((report.min_fps - 2.0).abs() < 1e-6);
        assert!((report.max_fps - 4.0).abs() < 1e-6);
        assert!((report.average_fps - 2.0 / 0.75).abs() < 1e-6);
    }

    #[test]
    fn empty_report_is_all_zero() {
        let clock = GameClock::new("idle", 3.0);
        let report = clock.report();
        assert_eq!(report.frames, 0);
        assert_eq!(report.average_fps, 0.0);
        assert_eq!(report.max_spf, 0.0);
    }

    #[test]
    fn fps_smoothing_moves_towards_the_frame_rate() {
        let t0 = Instant::now();
        let mut clock = GameClock::started_at("test".into(), 0.0, t0);
        let mut t = t0;
        for _ in 0..200 {
            t += secs(0.01);
            clock.tick_at(t);
        }
        assert!((clock.fps() - 100.0).abs() < 1.0);
    }

    #[test]
    fn unlimited_pacer_always_renders() {
        let pacer = FramePacer::new(0);
        assert!(!pacer.is_limited());
        assert!(pacer.should_render());
    }

    #[test]
    fn limited_pacer_schedules_the_next_frame() {
        let pacer = FramePacer::new(50);
        assert!(pacer.is_limited());
        let gap = pacer.next_frame_at().duration_since(pacer.last_frame);
        assert_eq!(gap, secs(0.02));
    }
}
