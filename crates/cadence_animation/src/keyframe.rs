//! Keyframes and single-property tracks
//!
//! A [`Track`] is an initial value followed by timed segments. Each
//! [`Keyframe`] names the value reached at the end of its segment, how long
//! the segment lasts, and how the value travels there.

use smallvec::SmallVec;

use crate::easing::Easing;
use crate::error::{Result, TimelineError};
use crate::spring::SpringConfig;

/// How a segment travels from its start value to its target
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interpolation {
    /// Constant-speed blend
    Linear,
    /// Cubic ease-in-out blend
    Cubic,
    /// Damped spring released at rest from the start value
    Spring(SpringConfig),
}

impl Interpolation {
    /// Progress through a segment of `duration` seconds at local time `t`.
    ///
    /// Returns 0.0 at the start and exactly 1.0 at the end; spring segments
    /// may leave [0, 1] in between.
    pub fn progress(&self, t: f32, duration: f32) -> f32 {
        let u = (t / duration).clamp(0.0, 1.0);
        match self {
            Interpolation::Linear => Easing::Linear.apply(u),
            Interpolation::Cubic => Easing::EaseInOutCubic.apply(u),
            Interpolation::Spring(config) => config.settled_response(t, duration),
        }
    }
}

/// A single keyframe: the value reached after `duration` seconds
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Value at the end of the segment
    pub target: f32,
    /// Segment length in seconds
    pub duration: f32,
    /// Interpolation used when travelling to `target`
    pub mode: Interpolation,
}

impl Keyframe {
    pub fn new(target: f32, duration: f32, mode: Interpolation) -> Self {
        Self {
            target,
            duration,
            mode,
        }
    }

    pub fn linear(target: f32, duration: f32) -> Self {
        Self::new(target, duration, Interpolation::Linear)
    }

    pub fn cubic(target: f32, duration: f32) -> Self {
        Self::new(target, duration, Interpolation::Cubic)
    }

    pub fn spring(target: f32, duration: f32, config: SpringConfig) -> Self {
        Self::new(target, duration, Interpolation::Spring(config))
    }

    /// Value at local time `t` when the segment starts from `from`
    pub fn sample(&self, from: f32, t: f32) -> f32 {
        if t >= self.duration {
            return self.target;
        }
        let p = self.mode.progress(t, self.duration);
        from + (self.target - from) * p
    }
}

/// Ordered keyframes for one animated property
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    initial: f32,
    keyframes: SmallVec<[Keyframe; 4]>,
}

impl Track {
    /// Create an empty track starting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            initial,
            keyframes: SmallVec::new(),
        }
    }

    /// Create a track from an existing keyframe list
    pub fn from_keyframes(initial: f32, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        Self {
            initial,
            keyframes: keyframes.into_iter().collect(),
        }
    }

    /// Builder: append a keyframe
    pub fn keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }

    /// Builder: append a linear segment
    pub fn linear(self, target: f32, duration: f32) -> Self {
        self.keyframe(Keyframe::linear(target, duration))
    }

    /// Builder: append a cubic ease-in-out segment
    pub fn cubic(self, target: f32, duration: f32) -> Self {
        self.keyframe(Keyframe::cubic(target, duration))
    }

    /// Builder: append a spring segment
    pub fn spring(self, target: f32, duration: f32, config: SpringConfig) -> Self {
        self.keyframe(Keyframe::spring(target, duration, config))
    }

    /// Value before the first segment starts
    pub fn initial(&self) -> f32 {
        self.initial
    }

    /// Get the keyframes
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Sum of all segment durations in seconds
    pub fn duration(&self) -> f32 {
        self.keyframes.iter().map(|kf| kf.duration).sum()
    }

    /// Value once every segment has played
    pub fn final_value(&self) -> f32 {
        self.keyframes
            .last()
            .map(|kf| kf.target)
            .unwrap_or(self.initial)
    }

    /// Value at `t` seconds from the track start.
    ///
    /// Times before the start give the initial value; times past the end
    /// hold the final target.
    pub fn value_at(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return self.initial;
        }

        let mut from = self.initial;
        let mut segment_start = 0.0;
        for kf in &self.keyframes {
            let segment_end = segment_start + kf.duration;
            if t < segment_end {
                return kf.sample(from, t - segment_start);
            }
            from = kf.target;
            segment_start = segment_end;
        }

        self.final_value()
    }

    /// Check the track can be evaluated. `property` only labels errors.
    pub(crate) fn validate(&self, property: &str) -> Result<()> {
        if self.keyframes.is_empty() {
            return Err(TimelineError::EmptyTrack {
                property: property.to_string(),
            });
        }
        if !self.initial.is_finite() {
            return Err(TimelineError::NonFiniteValue {
                property: property.to_string(),
                value: self.initial,
            });
        }

        for (index, kf) in self.keyframes.iter().enumerate() {
            if !(kf.duration.is_finite() && kf.duration > 0.0) {
                return Err(TimelineError::NonPositiveDuration {
                    property: property.to_string(),
                    index,
                    duration: kf.duration,
                });
            }
            if !kf.target.is_finite() {
                return Err(TimelineError::NonFiniteValue {
                    property: property.to_string(),
                    value: kf.target,
                });
            }
            if let Interpolation::Spring(config) = kf.mode {
                config
                    .validate()
                    .map_err(|reason| TimelineError::InvalidSpring {
                        property: property.to_string(),
                        index,
                        reason,
                    })?;
            }
        }

        Ok(())
    }
}
