use crate::errors::BenchError;
use crate::types::{Extreme, Statistics};

/// Reduce a completed sample set to its summary statistics.
///
/// The median is taken from a sorted copy; `samples` itself keeps run order so
/// the fastest and slowest indices refer to the original runs. Ties keep the
/// earliest index.
pub fn summarize(samples: &[f64]) -> Result<Statistics, BenchError> {
    if samples.is_empty() {
        return Err(BenchError::NoSamples);
    }

    let sum: f64 = samples.iter().sum();
    let (fastest, slowest) = extremes(samples);

    Ok(Statistics {
        sample_count: samples.len(),
        average: sum / samples.len() as f64,
        median: median(samples),
        fastest,
        slowest,
    })
}

/// Median of a non-empty slice. Even lengths average the two middle values.
pub fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// First-occurring minimum and maximum of a non-empty slice.
pub fn extremes(samples: &[f64]) -> (Extreme, Extreme) {
    let mut fast = 0;
    let mut slow = 0;

    // Strict comparisons: a later equal value never displaces an earlier one.
    for (i, &value) in samples.iter().enumerate().skip(1) {
        if value < samples[fast] {
            fast = i;
        }
        if value > samples[slow] {
            slow = i;
        }
    }

    (
        Extreme {
            value: samples[fast],
            index: fast,
        },
        Extreme {
            value: samples[slow],
            index: slow,
        },
    )
}
