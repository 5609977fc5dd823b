//! Multi-property timelines
//!
//! A [`Timeline`] groups named [`Track`]s that share one time origin. It is
//! built once, validated, and then evaluated as a pure function of elapsed
//! time (or of progress through its total duration).

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, TimelineError};
use crate::keyframe::Track;

/// Interpolated values for every property of a timeline, in declaration order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EvaluationResult {
    values: IndexMap<String, f32>,
}

impl EvaluationResult {
    /// Value of `property`, if the timeline animates it
    pub fn get(&self, property: &str) -> Option<f32> {
        self.values.get(property).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, f32> {
        self.values
    }
}

/// An immutable set of tracks sharing one time origin
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    tracks: IndexMap<String, Track>,
    repeating: bool,
    duration: f32,
}

impl Timeline {
    /// Validate `tracks` and build a timeline from them
    pub fn new(tracks: IndexMap<String, Track>, repeating: bool) -> Result<Self> {
        if tracks.is_empty() {
            return Err(TimelineError::NoTracks);
        }
        for (property, track) in &tracks {
            track.validate(property)?;
        }

        let duration = tracks
            .values()
            .map(Track::duration)
            .fold(0.0_f32, f32::max);

        tracing::debug!(
            tracks = tracks.len(),
            duration,
            repeating,
            "Timeline built"
        );

        Ok(Self {
            tracks,
            repeating,
            duration,
        })
    }

    /// Create a new builder
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    /// Longest track duration in seconds
    pub fn total_duration(&self) -> f32 {
        self.duration
    }

    /// Whether evaluation wraps time instead of clamping it
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Iterate over `(property, track)` in declaration order
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &Track)> {
        self.tracks.iter().map(|(name, track)| (name.as_str(), track))
    }

    pub fn track(&self, property: &str) -> Option<&Track> {
        self.tracks.get(property)
    }

    /// Every property's value `elapsed_secs` after the timeline starts.
    ///
    /// Non-repeating timelines clamp to the total duration and reject
    /// negative times. Repeating timelines wrap any finite time into one
    /// cycle, so the end of a cycle reads the same as its start.
    pub fn evaluate(&self, elapsed_secs: f32) -> Result<EvaluationResult> {
        let t = self.local_time(elapsed_secs)?;
        tracing::trace!(elapsed_secs, local = t, "Evaluating timeline");

        let values = self
            .tracks
            .iter()
            .map(|(name, track)| (name.clone(), track.value_at(t)))
            .collect();

        Ok(EvaluationResult { values })
    }

    /// Every property's value at `progress` (0.0 to 1.0) through the timeline
    pub fn evaluate_progress(&self, progress: f32) -> Result<EvaluationResult> {
        self.evaluate(self.progress_to_elapsed(progress)?)
    }

    /// Value of a single property, `None` if the timeline does not animate it
    pub fn value(&self, property: &str, elapsed_secs: f32) -> Result<Option<f32>> {
        let t = self.local_time(elapsed_secs)?;
        Ok(self.tracks.get(property).map(|track| track.value_at(t)))
    }

    fn progress_to_elapsed(&self, progress: f32) -> Result<f32> {
        if progress.is_nan() {
            return Err(TimelineError::InvalidInput { elapsed: progress });
        }
        Ok(progress * self.duration)
    }

    /// Map caller time onto the timeline's own `[0, duration]` range
    fn local_time(&self, elapsed_secs: f32) -> Result<f32> {
        if elapsed_secs.is_nan() {
            return Err(TimelineError::InvalidInput {
                elapsed: elapsed_secs,
            });
        }

        if self.repeating {
            if elapsed_secs.is_infinite() {
                return Err(TimelineError::InvalidInput {
                    elapsed: elapsed_secs,
                });
            }
            let wrapped = elapsed_secs.rem_euclid(self.duration);
            // rem_euclid can round up to the divisor for tiny negative inputs
            return Ok(if wrapped >= self.duration { 0.0 } else { wrapped });
        }

        if elapsed_secs < 0.0 {
            return Err(TimelineError::InvalidInput {
                elapsed: elapsed_secs,
            });
        }
        Ok(elapsed_secs.min(self.duration))
    }
}

/// Fluent builder for [`Timeline`]
///
/// # Example
///
/// ```
/// use cadence_animation::{SpringConfig, Timeline, Track};
///
/// let timeline = Timeline::builder()
///     .track("scale", Track::new(1.0).cubic(1.1, 1.5).spring(0.9, 1.5, SpringConfig::bouncy()))
///     .track("opacity", Track::new(1.0).linear(0.4, 3.0))
///     .repeating(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(timeline.total_duration(), 3.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    tracks: IndexMap<String, Track>,
    repeating: bool,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track for `property`. A repeated name replaces the earlier track.
    pub fn track(mut self, property: impl Into<String>, track: Track) -> Self {
        let property = property.into();
        if self.tracks.insert(property.clone(), track).is_some() {
            tracing::warn!(property = %property, "Duplicate track replaced");
        }
        self
    }

    /// Wrap time at the end of each cycle instead of holding the last frame
    pub fn repeating(mut self, repeating: bool) -> Self {
        self.repeating = repeating;
        self
    }

    /// Validate and build the timeline
    pub fn build(self) -> Result<Timeline> {
        Timeline::new(self.tracks, self.repeating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spring::SpringConfig;

    fn two_tracks(repeating: bool) -> Timeline {
        Timeline::builder()
            .track("x", Track::new(0.0).linear(10.0, 1.0).linear(20.0, 1.0))
            .track("y", Track::new(5.0).linear(-5.0, 1.0))
            .repeating(repeating)
            .build()
            .unwrap()
    }

    #[test]
    fn test_total_duration_is_longest_track() {
        let timeline = two_tracks(false);
        assert_eq!(timeline.total_duration(), 2.0);
    }

    #[test]
    fn test_shorter_track_holds_final_value() {
        let timeline = two_tracks(false);
        let result = timeline.evaluate(1.5).unwrap();
        assert_eq!(result.get("x"), Some(15.0));
        assert_eq!(result.get("y"), Some(-5.0));
    }

    #[test]
    fn test_clamps_past_end() {
        let timeline = two_tracks(false);
        let result = timeline.evaluate(10.0).unwrap();
        assert_eq!(result.get("x"), Some(20.0));
        assert_eq!(timeline.evaluate(f32::INFINITY).unwrap(), result);
    }

    #[test]
    fn test_negative_time_is_rejected_without_repeat() {
        let timeline = two_tracks(false);
        let err = timeline.evaluate(-0.1).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(timeline.evaluate(f32::NAN).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_repeating_wraps() {
        let timeline = two_tracks(true);
        assert_eq!(
            timeline.evaluate(2.5).unwrap(),
            timeline.evaluate(0.5).unwrap()
        );
        assert_eq!(
            timeline.evaluate(-1.5).unwrap(),
            timeline.evaluate(0.5).unwrap()
        );
        assert_eq!(timeline.evaluate(2.0).unwrap().get("x"), Some(0.0));
        assert!(timeline.evaluate(f32::INFINITY).is_err());
    }

    #[test]
    fn test_results_keep_declaration_order() {
        let timeline = Timeline::builder()
            .track("zeta", Track::new(0.0).linear(1.0, 1.0))
            .track("alpha", Track::new(0.0).linear(1.0, 1.0))
            .build()
            .unwrap();
        let names: Vec<&str> = timeline.tracks().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let result = timeline.evaluate(0.0).unwrap();
        let names: Vec<&str> = result.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_duplicate_track_replaces() {
        let timeline = Timeline::builder()
            .track("x", Track::new(0.0).linear(1.0, 1.0))
            .track("x", Track::new(3.0).linear(4.0, 2.0))
            .build()
            .unwrap();
        assert_eq!(timeline.tracks().count(), 1);
        assert_eq!(timeline.total_duration(), 2.0);
        assert_eq!(timeline.value("x", 0.0).unwrap(), Some(3.0));
    }

    #[test]
    fn test_value_lookup() {
        let timeline = two_tracks(false);
        assert_eq!(timeline.value("x", 0.5).unwrap(), Some(5.0));
        assert_eq!(timeline.value("missing", 0.5).unwrap(), None);
    }

    #[test]
    fn test_builder_validation() {
        assert_eq!(Timeline::builder().build(), Err(TimelineError::NoTracks));

        let err = Timeline::builder()
            .track("x", Track::new(0.0))
            .build()
            .unwrap_err();
        assert!(err.is_invalid_timeline());

        let err = Timeline::builder()
            .track("x", Track::new(0.0).spring(1.0, 0.0, SpringConfig::smooth()))
            .build()
            .unwrap_err();
        assert!(matches!(err, TimelineError::NonPositiveDuration { .. }));
    }

    #[test]
    fn test_progress_maps_to_elapsed() {
        let timeline = two_tracks(false);
        assert_eq!(
            timeline.evaluate_progress(0.25).unwrap(),
            timeline.evaluate(0.5).unwrap()
        );
        assert_eq!(
            timeline.evaluate_progress(1.5).unwrap(),
            timeline.evaluate(2.0).unwrap()
        );
        assert!(timeline.evaluate_progress(-0.5).is_err());
        assert!(timeline.evaluate_progress(f32::NAN).is_err());
    }
}
