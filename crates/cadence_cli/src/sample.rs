//! Sampling timelines and formatting the results

use anyhow::Result;
use cadence_animation::{EvaluationResult, Timeline};
use serde::Serialize;
use std::fmt::Write;

/// Values of every property at one point in time
#[derive(Debug, Serialize)]
pub struct Sample {
    pub time: f32,
    pub values: EvaluationResult,
}

/// Which times to sample
#[derive(Debug, Default)]
pub struct SamplePlan {
    /// Elapsed times in seconds
    pub at: Vec<f32>,
    /// Progress fractions, 0.0 to 1.0
    pub progress: Vec<f32>,
    /// Sweep one cycle at this frame rate
    pub fps: Option<u32>,
}

impl SamplePlan {
    pub fn is_empty(&self) -> bool {
        self.at.is_empty() && self.progress.is_empty() && self.fps.is_none()
    }
}

/// Evaluate `timeline` at every time in `plan`, in the order given
pub fn sample(timeline: &Timeline, plan: &SamplePlan) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();

    for &time in &plan.at {
        let values = timeline.evaluate(time)?;
        samples.push(Sample { time, values });
    }

    for &progress in &plan.progress {
        let values = timeline.evaluate_progress(progress)?;
        samples.push(Sample {
            time: progress * timeline.total_duration(),
            values,
        });
    }

    if let Some(fps) = plan.fps {
        for time in frame_times(timeline, fps) {
            let values = timeline.evaluate(time)?;
            samples.push(Sample { time, values });
        }
    }

    tracing::debug!(samples = samples.len(), "Sampled timeline");
    Ok(samples)
}

/// Frame timestamps covering one cycle.
///
/// One-shot timelines include their final frame; repeating timelines stop
/// one frame short since the end of a cycle is the start of the next.
pub fn frame_times(timeline: &Timeline, fps: u32) -> Vec<f32> {
    let fps = fps.max(1) as f32;
    let duration = timeline.total_duration();
    let frames = (duration * fps).ceil() as usize;

    if timeline.is_repeating() {
        (0..frames).map(|i| i as f32 / fps).collect()
    } else {
        (0..=frames)
            .map(|i| (i as f32 / fps).min(duration))
            .collect()
    }
}

/// Render samples as an aligned text table, one column per property
pub fn render_table(samples: &[Sample], precision: usize) -> String {
    let Some(first) = samples.first() else {
        return String::new();
    };

    let mut header = vec!["time".to_string()];
    header.extend(first.values.iter().map(|(name, _)| name.to_string()));

    let rows: Vec<Vec<String>> = samples
        .iter()
        .map(|sample| {
            let mut row = vec![format!("{:.*}", precision, sample.time)];
            row.extend(
                sample
                    .values
                    .iter()
                    .map(|(_, value)| format!("{:.*}", precision, value)),
            );
            row
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].len())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect();
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", line.join("  "));
    }
    out
}

pub fn render_json(samples: &[Sample]) -> Result<String> {
    Ok(serde_json::to_string_pretty(samples)?)
}
