//! Serializable timeline documents
//!
//! Timelines can be written by hand in TOML or JSON:
//!
//! ```toml
//! repeating = true
//!
//! [tracks.scale]
//! initial = 1.0
//! keyframes = [
//!     { target = 1.1, duration = 1.5, mode = "cubic" },
//!     { target = 0.9, duration = 1.5, mode = { spring = "bouncy" } },
//!     { target = 1.0, duration = 3.0 },
//! ]
//! ```
//!
//! `mode` defaults to `"linear"`. A spring is either a preset name or a
//! `{ stiffness, damping, mass }` table. Documents go through the same
//! validation as [`TimelineBuilder`](crate::TimelineBuilder).

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TimelineError;
use crate::keyframe::{Interpolation, Keyframe, Track};
use crate::spring::SpringConfig;
use crate::timeline::Timeline;

/// Top-level timeline document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineDocument {
    #[serde(default)]
    pub repeating: bool,
    pub tracks: IndexMap<String, TrackDocument>,
}

/// One property's track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackDocument {
    #[serde(default)]
    pub initial: f32,
    pub keyframes: Vec<KeyframeDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyframeDocument {
    pub target: f32,
    pub duration: f32,
    #[serde(default)]
    pub mode: ModeDocument,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeDocument {
    #[default]
    Linear,
    Cubic,
    Spring(SpringDocument),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpringDocument {
    /// `"smooth"`, `"snappy"` or `"bouncy"`
    Preset(String),
    Custom(SpringConfig),
}

impl TryFrom<TimelineDocument> for Timeline {
    type Error = TimelineError;

    fn try_from(doc: TimelineDocument) -> Result<Self, Self::Error> {
        let mut tracks = IndexMap::with_capacity(doc.tracks.len());

        for (property, track) in doc.tracks {
            let mut keyframes = Vec::with_capacity(track.keyframes.len());
            for (index, kf) in track.keyframes.into_iter().enumerate() {
                let mode = match kf.mode {
                    ModeDocument::Linear => Interpolation::Linear,
                    ModeDocument::Cubic => Interpolation::Cubic,
                    ModeDocument::Spring(SpringDocument::Custom(config)) => {
                        Interpolation::Spring(config)
                    }
                    ModeDocument::Spring(SpringDocument::Preset(name)) => {
                        let config = SpringConfig::preset(&name).ok_or_else(|| {
                            TimelineError::InvalidSpring {
                                property: property.clone(),
                                index,
                                reason: format!("unknown spring preset `{}`", name),
                            }
                        })?;
                        Interpolation::Spring(config)
                    }
                };
                keyframes.push(Keyframe::new(kf.target, kf.duration, mode));
            }
            tracks.insert(property, Track::from_keyframes(track.initial, keyframes));
        }

        Timeline::new(tracks, doc.repeating)
    }
}

impl From<&Timeline> for TimelineDocument {
    fn from(timeline: &Timeline) -> Self {
        let tracks = timeline
            .tracks()
            .map(|(property, track)| {
                let keyframes = track
                    .keyframes()
                    .iter()
                    .map(|kf| KeyframeDocument {
                        target: kf.target,
                        duration: kf.duration,
                        mode: match kf.mode {
                            Interpolation::Linear => ModeDocument::Linear,
                            Interpolation::Cubic => ModeDocument::Cubic,
                            Interpolation::Spring(config) => {
                                ModeDocument::Spring(SpringDocument::Custom(config))
                            }
                        },
                    })
                    .collect();
                (
                    property.to_string(),
                    TrackDocument {
                        initial: track.initial(),
                        keyframes,
                    },
                )
            })
            .collect();

        Self {
            repeating: timeline.is_repeating(),
            tracks,
        }
    }
}

impl Serialize for Timeline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TimelineDocument::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let doc = TimelineDocument::deserialize(deserializer)?;
        Timeline::try_from(doc).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELIX_TILT: &str = r#"
repeating = true

[tracks.rotation_x]
keyframes = [
    { target = 15.0, duration = 2.0, mode = { spring = "bouncy" } },
    { target = -15.0, duration = 2.0, mode = "cubic" },
    { target = 0.0, duration = 2.0 },
]

[tracks.scale]
initial = 1.0
keyframes = [
    { target = 1.1, duration = 1.5, mode = { spring = { stiffness = 200.0, damping = 20.0 } } },
]
"#;

    #[test]
    fn test_parse_toml_document() {
        let timeline: Timeline = toml::from_str(HELIX_TILT).unwrap();
        assert!(timeline.is_repeating());
        assert_eq!(timeline.total_duration(), 6.0);

        let tilt = timeline.track("rotation_x").unwrap();
        assert_eq!(tilt.initial(), 0.0);
        assert_eq!(
            tilt.keyframes()[0].mode,
            Interpolation::Spring(SpringConfig::bouncy())
        );
        assert_eq!(tilt.keyframes()[1].mode, Interpolation::Cubic);
        assert_eq!(tilt.keyframes()[2].mode, Interpolation::Linear);

        let scale = timeline.track("scale").unwrap();
        assert_eq!(
            scale.keyframes()[0].mode,
            Interpolation::Spring(SpringConfig::new(200.0, 20.0))
        );
    }

    #[test]
    fn test_json_round_trip_preserves_timeline() {
        let timeline: Timeline = toml::from_str(HELIX_TILT).unwrap();
        let json = serde_json::to_string(&timeline).unwrap();
        let back: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, timeline);
    }

    #[test]
    fn test_invalid_documents_are_rejected() {
        let empty = r#"{ "tracks": { "x": { "keyframes": [] } } }"#;
        let err = serde_json::from_str::<Timeline>(empty).unwrap_err();
        assert!(err.to_string().contains("no keyframes"), "{}", err);

        let zero = r#"{ "tracks": { "x": { "keyframes": [ { "target": 1.0, "duration": 0.0 } ] } } }"#;
        let err = serde_json::from_str::<Timeline>(zero).unwrap_err();
        assert!(err.to_string().contains("non-positive duration"), "{}", err);

        let preset = r#"{ "tracks": { "x": { "keyframes": [
            { "target": 1.0, "duration": 1.0, "mode": { "spring": "wobbly" } } ] } } }"#;
        let err = serde_json::from_str::<Timeline>(preset).unwrap_err();
        assert!(err.to_string().contains("wobbly"), "{}", err);
    }
}
