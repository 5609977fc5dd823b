//! Cadence Animation
//!
//! Keyframe timelines evaluated as pure functions of time.
//!
//! # Features
//!
//! - **Keyframes**: Linear, cubic ease-in-out and spring segments
//! - **Spring Physics**: Closed-form damped oscillator that lands on its target
//! - **Timelines**: Named tracks sharing one time origin, clamped or repeating
//! - **Playback**: Caller-driven player with trigger-based restarts
//! - **Presets**: Demo scene timelines ready to sample
//! - **Documents**: Timelines written in TOML or JSON

pub mod document;
pub mod easing;
pub mod error;
pub mod keyframe;
pub mod player;
pub mod presets;
pub mod spring;
pub mod timeline;

pub use document::TimelineDocument;
pub use easing::Easing;
pub use error::{Result, TimelineError};
pub use keyframe::{Interpolation, Keyframe, Track};
pub use player::TimelinePlayer;
pub use presets::{CameraState, MapLeg, ScenePreset};
pub use spring::SpringConfig;
pub use timeline::{EvaluationResult, Timeline, TimelineBuilder};
