//! Scene presets
//!
//! Ready-made timelines for a handful of demo scenes: a weightlifter doing a
//! pull, cloud puffs and a "PULL!" caption around it, a progress bar, one
//! base pair of a rotating DNA helix, and camera legs of a map fly-through.

use crate::error::Result;
use crate::keyframe::Track;
use crate::spring::SpringConfig;
use crate::timeline::Timeline;

/// Camera position for the map fly-through
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub latitude: f32,
    pub longitude: f32,
    /// Distance from the ground in metres
    pub distance: f32,
    /// Tilt in degrees (0 = looking straight down)
    pub pitch: f32,
}

impl CameraState {
    /// Zoomed-out view over central London
    pub fn overview() -> Self {
        Self {
            latitude: 51.5077,
            longitude: -0.13,
            distance: 12_000.0,
            pitch: 0.0,
        }
    }
}

/// One leg of the map fly-through
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MapLeg {
    /// Nothing was selected before; zoom in on the first stop
    FirstStop { latitude: f32, longitude: f32 },
    /// Fly from the current stop to the next one with a tilted dive
    Hop { latitude: f32, longitude: f32 },
    /// Selection cleared; return to the overview
    Deselect,
}

/// Pre-built timelines for the demo scenes
pub struct ScenePreset;

impl ScenePreset {
    /// Names accepted by [`ScenePreset::by_name`]
    pub const NAMES: &'static [&'static str] = &[
        "weightlifter",
        "cloud",
        "pull_caption",
        "progress_bar",
        "dna_base_pair",
        "map_hop",
    ];

    /// Build a preset with its default parameters, `None` for unknown names
    pub fn by_name(name: &str) -> Option<Result<Timeline>> {
        let timeline = match name {
            "weightlifter" => Self::weightlifter(),
            "cloud" => Self::cloud(0.0),
            "pull_caption" => Self::pull_caption(),
            "progress_bar" => Self::progress_bar(),
            "dna_base_pair" => Self::dna_base_pair(0, 10),
            "map_hop" => Self::map_camera(
                CameraState {
                    latitude: 51.496_25,
                    longitude: -0.144_825,
                    distance: 4_000.0,
                    pitch: 0.0,
                },
                MapLeg::Hop {
                    latitude: 51.499_94,
                    longitude: -0.133_711,
                },
            ),
            _ => return None,
        };
        Some(timeline)
    }

    // ========================================================================
    // Weightlifter scene
    // ========================================================================

    /// Squash-and-stretch pull, one second per rep
    pub fn weightlifter() -> Result<Timeline> {
        Timeline::builder()
            .track(
                "vertical_scale",
                Track::new(1.0)
                    .linear(0.5, 0.25)
                    .linear(1.0, 0.25)
                    .linear(1.3, 0.25)
                    .linear(1.0, 0.25),
            )
            .track(
                "vertical_offset",
                Track::new(0.0)
                    .linear(20.0, 0.25)
                    .spring(-40.0, 0.5, SpringConfig::snappy())
                    .cubic(0.0, 0.25),
            )
            .repeating(true)
            .build()
    }

    /// Cloud puff that flashes at the top of the rep.
    ///
    /// `delay` staggers neighbouring clouds and must stay below 0.25s.
    pub fn cloud(delay: f32) -> Result<Timeline> {
        Timeline::builder()
            .track(
                "opacity",
                Track::new(0.0)
                    .cubic(0.0, 0.5 + delay)
                    .cubic(0.8, 0.25)
                    .cubic(0.0, 0.25 - delay),
            )
            .track(
                "scale",
                Track::new(1.0)
                    .spring(1.0, 0.5 + delay, SpringConfig::smooth())
                    .spring(0.6, 0.25, SpringConfig::bouncy())
                    .spring(1.0, 0.25 - delay, SpringConfig::smooth()),
            )
            .repeating(true)
            .build()
    }

    /// "PULL!" caption popping in time with the rep
    pub fn pull_caption() -> Result<Timeline> {
        Timeline::builder()
            .track(
                "opacity",
                Track::new(0.0)
                    .cubic(0.0, 0.5)
                    .cubic(1.0, 0.25)
                    .cubic(0.0, 0.25),
            )
            .track(
                "scale",
                Track::new(1.0)
                    .spring(1.0, 0.5, SpringConfig::smooth())
                    .spring(1.3, 0.25, SpringConfig::bouncy())
                    .spring(1.0, 0.25, SpringConfig::smooth()),
            )
            .repeating(true)
            .build()
    }

    // ========================================================================
    // Progress bar
    // ========================================================================

    /// Eased run to 80%, then a slow linear crawl to 100%
    pub fn progress_bar() -> Result<Timeline> {
        Timeline::builder()
            .track("progress", Track::new(0.0).cubic(0.8, 2.0).linear(1.0, 3.0))
            .build()
    }

    // ========================================================================
    // DNA helix
    // ========================================================================

    /// One base pair of the helix.
    ///
    /// `index` sets the pair's phase (36° of rotation and 30° of hue per
    /// pair) and its resting height; pairs are 25px apart and centred on
    /// the middle of a `base_pair_count` tall helix.
    pub fn dna_base_pair(index: usize, base_pair_count: usize) -> Result<Timeline> {
        let base_angle = index as f32 * 36.0;
        let phase = index as f32 * 30.0;
        let center_offset = base_pair_count as f32 * 25.0 / 2.0;
        let base_offset = index as f32 * -25.0 + center_offset;

        Timeline::builder()
            .track(
                "rotation_y",
                Track::new(0.0)
                    .linear(base_angle + 90.0, 2.0)
                    .cubic(base_angle + 180.0, 2.0)
                    .spring(base_angle + 270.0, 2.0, SpringConfig::smooth())
                    .linear(base_angle + 360.0, 2.0),
            )
            .track(
                "rotation_x",
                Track::new(0.0)
                    .spring(15.0, 2.0, SpringConfig::bouncy())
                    .cubic(-15.0, 2.0)
                    .linear(0.0, 2.0),
            )
            .track(
                "scale",
                Track::new(1.0)
                    .cubic(1.1, 1.5)
                    .spring(0.9, 1.5, SpringConfig::bouncy())
                    .linear(1.0, 3.0),
            )
            .track(
                "offset_y",
                Track::new(0.0)
                    .linear(base_offset + 10.0, 2.0)
                    .cubic(base_offset - 10.0, 2.0)
                    .spring(base_offset, 2.0, SpringConfig::smooth()),
            )
            .track(
                "opacity",
                Track::new(1.0)
                    .cubic(0.4, 1.5)
                    .spring(1.0, 1.5, SpringConfig::bouncy())
                    .linear(0.7, 3.0),
            )
            .track(
                "hue",
                Track::new(0.0)
                    .linear(phase + 60.0, 2.0)
                    .cubic(phase + 180.0, 2.0)
                    .spring(phase + 300.0, 2.0, SpringConfig::smooth()),
            )
            .repeating(true)
            .build()
    }

    // ========================================================================
    // Map fly-through
    // ========================================================================

    /// Camera timeline for one leg, starting from the camera's current state
    pub fn map_camera(from: CameraState, leg: MapLeg) -> Result<Timeline> {
        let (latitude, longitude) = match leg {
            MapLeg::FirstStop {
                latitude,
                longitude,
            }
            | MapLeg::Hop {
                latitude,
                longitude,
            } => (latitude, longitude),
            MapLeg::Deselect => {
                let overview = CameraState::overview();
                (overview.latitude, overview.longitude)
            }
        };
        let travel = if matches!(leg, MapLeg::Hop { .. }) {
            6.0
        } else {
            1.0
        };

        let distance = Track::new(from.distance);
        let distance = match leg {
            MapLeg::FirstStop { .. } => distance.cubic(4_000.0, 1.0),
            MapLeg::Deselect => distance.cubic(12_000.0, 1.0),
            MapLeg::Hop { .. } => distance
                .cubic(600.0, 2.0)
                .linear(600.0, 3.0)
                .spring(4_000.0, 1.0, SpringConfig::default()),
        };

        let pitch = Track::new(from.pitch);
        let pitch = match leg {
            MapLeg::Hop { .. } => pitch.linear(45.0, 2.5).linear(0.0, 2.5),
            _ => pitch.linear(0.0, 1.0),
        };

        Timeline::builder()
            .track("latitude", Track::new(from.latitude).cubic(latitude, travel))
            .track("longitude", Track::new(from.longitude).cubic(longitude, travel))
            .track("distance", distance)
            .track("pitch", pitch)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_preset_builds() {
        for name in ScenePreset::NAMES {
            let timeline = ScenePreset::by_name(name)
                .unwrap_or_else(|| panic!("missing preset {}", name))
                .unwrap();
            assert!(timeline.total_duration() > 0.0, "{}", name);
        }
        assert!(ScenePreset::by_name("nope").is_none());
    }

    #[test]
    fn test_weightlifter_rep_is_one_second() {
        let timeline = ScenePreset::weightlifter().unwrap();
        assert!(timeline.is_repeating());
        assert_eq!(timeline.total_duration(), 1.0);

        let bottom = timeline.evaluate(0.25).unwrap();
        assert_eq!(bottom.get("vertical_scale"), Some(0.5));
        assert_eq!(bottom.get("vertical_offset"), Some(20.0));

        let top = timeline.evaluate(0.75).unwrap();
        assert_eq!(top.get("vertical_scale"), Some(1.3));
        assert_eq!(top.get("vertical_offset"), Some(-40.0));
    }

    #[test]
    fn test_cloud_delay_must_leave_room() {
        assert!(ScenePreset::cloud(0.2).is_ok());
        let err = ScenePreset::cloud(0.25).unwrap_err();
        assert!(err.is_invalid_timeline());
    }

    #[test]
    fn test_progress_bar_shape() {
        let timeline = ScenePreset::progress_bar().unwrap();
        assert!(!timeline.is_repeating());
        assert_eq!(timeline.total_duration(), 5.0);
        assert_eq!(timeline.value("progress", 2.0).unwrap(), Some(0.8));
        let crawl = timeline.value("progress", 3.5).unwrap().unwrap();
        assert!((crawl - 0.9).abs() < 1e-6);
        assert_eq!(timeline.value("progress", 5.0).unwrap(), Some(1.0));
    }

    #[test]
    fn test_dna_pairs_are_phase_shifted() {
        let first = ScenePreset::dna_base_pair(0, 10).unwrap();
        let third = ScenePreset::dna_base_pair(2, 10).unwrap();
        assert_eq!(first.total_duration(), 8.0);

        let a = first.evaluate(2.0).unwrap();
        let b = third.evaluate(2.0).unwrap();
        assert_eq!(a.get("rotation_y"), Some(90.0));
        assert_eq!(b.get("rotation_y"), Some(162.0));
        assert_eq!(a.get("hue"), Some(60.0));
        assert_eq!(b.get("hue"), Some(120.0));
        // 10 pairs: centre is 125px, pair 2 rests at 75px
        assert_eq!(a.get("offset_y"), Some(135.0));
        assert_eq!(b.get("offset_y"), Some(85.0));
    }

    #[test]
    fn test_map_hop_dives_and_recovers() {
        let from = CameraState {
            distance: 4_000.0,
            ..CameraState::overview()
        };
        let timeline = ScenePreset::map_camera(
            from,
            MapLeg::Hop {
                latitude: 51.5,
                longitude: -0.12,
            },
        )
        .unwrap();

        assert_eq!(timeline.total_duration(), 6.0);
        let mid = timeline.evaluate(2.5).unwrap();
        assert_eq!(mid.get("pitch"), Some(45.0));
        assert_eq!(mid.get("distance"), Some(600.0));

        let end = timeline.evaluate(6.0).unwrap();
        assert_eq!(end.get("distance"), Some(4_000.0));
        assert_eq!(end.get("latitude"), Some(51.5));
        assert_eq!(end.get("pitch"), Some(0.0));
    }

    #[test]
    fn test_map_deselect_returns_to_overview() {
        let from = CameraState {
            latitude: 51.49,
            longitude: -0.14,
            distance: 4_000.0,
            pitch: 0.0,
        };
        let timeline = ScenePreset::map_camera(from, MapLeg::Deselect).unwrap();
        assert_eq!(timeline.total_duration(), 1.0);

        let end = timeline.evaluate(1.0).unwrap();
        let overview = CameraState::overview();
        assert_eq!(end.get("distance"), Some(overview.distance));
        assert_eq!(end.get("latitude"), Some(overview.latitude));
        assert_eq!(end.get("longitude"), Some(overview.longitude));
    }
}
