//! Timeline playback
//!
//! The host render loop owns the clock: it feeds frame deltas to a
//! [`TimelinePlayer`] and samples the current values once per frame. The
//! timeline itself stays immutable and can be shared between players.

use std::sync::Arc;

use crate::error::Result;
use crate::timeline::{EvaluationResult, Timeline};

/// Plays one shared timeline from a caller-driven clock
#[derive(Clone, Debug)]
pub struct TimelinePlayer {
    timeline: Arc<Timeline>,
    /// Seconds into the current cycle
    elapsed: f32,
    playing: bool,
    trigger: Option<u64>,
}

impl TimelinePlayer {
    /// Create a stopped player positioned at the start of `timeline`
    pub fn new(timeline: Arc<Timeline>) -> Self {
        Self {
            timeline,
            elapsed: 0.0,
            playing: false,
            trigger: None,
        }
    }

    pub fn timeline(&self) -> &Arc<Timeline> {
        &self.timeline
    }

    /// Start playing from the beginning
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// Stop playing, keeping the current position
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn restart(&mut self) {
        tracing::debug!(elapsed = self.elapsed, "Restarting timeline playback");
        self.start();
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Seconds into the current cycle
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Position within the current cycle (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        let duration = self.timeline.total_duration();
        if duration > 0.0 {
            (self.elapsed / duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Restart playback when `trigger` differs from the last value seen.
    ///
    /// Returns true if playback restarted. The first trigger always starts
    /// playback.
    pub fn set_trigger(&mut self, trigger: u64) -> bool {
        if self.trigger == Some(trigger) {
            return false;
        }
        self.trigger = Some(trigger);
        self.restart();
        true
    }

    /// Advance by `dt_secs` seconds of wall-clock time
    pub fn tick(&mut self, dt_secs: f32) {
        if !self.playing {
            return;
        }
        if !(dt_secs.is_finite() && dt_secs >= 0.0) {
            tracing::warn!(dt_secs, "Ignoring invalid frame delta");
            return;
        }

        self.elapsed += dt_secs;

        let duration = self.timeline.total_duration();
        if self.elapsed >= duration {
            if self.timeline.is_repeating() {
                self.elapsed = self.elapsed.rem_euclid(duration);
            } else {
                self.elapsed = duration;
                self.playing = false;
            }
        }
    }

    /// Current values of every property
    pub fn sample(&self) -> Result<EvaluationResult> {
        self.timeline.evaluate(self.elapsed)
    }
}
