//! Timeline error types

use thiserror::Error;

/// Errors raised while building or evaluating a timeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// The timeline declares no tracks at all
    #[error("invalid timeline: no tracks declared")]
    NoTracks,

    /// A track has zero keyframes
    #[error("invalid timeline: track `{property}` has no keyframes")]
    EmptyTrack { property: String },

    /// A keyframe duration is zero, negative or not finite
    #[error(
        "invalid timeline: keyframe {index} of track `{property}` has non-positive duration {duration}"
    )]
    NonPositiveDuration {
        property: String,
        index: usize,
        duration: f32,
    },

    /// An initial value or keyframe target is NaN or infinite
    #[error("invalid timeline: track `{property}` contains non-finite value {value}")]
    NonFiniteValue { property: String, value: f32 },

    /// A spring keyframe carries unusable physics parameters
    #[error("invalid timeline: keyframe {index} of track `{property}` has invalid spring: {reason}")]
    InvalidSpring {
        property: String,
        index: usize,
        reason: String,
    },

    /// Evaluation time is negative or NaN for a timeline that cannot wrap it
    #[error("invalid input: elapsed time {elapsed} is outside the timeline")]
    InvalidInput { elapsed: f32 },
}

impl TimelineError {
    /// True for errors describing a malformed timeline (a setup bug)
    pub fn is_invalid_timeline(&self) -> bool {
        !self.is_invalid_input()
    }

    /// True when the caller passed a time the timeline cannot evaluate
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TimelineError::InvalidInput { .. })
    }
}

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;
