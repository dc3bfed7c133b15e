//! Interpolation over sampled curves
//!
//! This module provides:
//! - Linear interpolation (1D)
//! - Fractional position lookup in a monotonic sample sequence

/// Linear interpolation between two values
///
/// Returns a + t * (b - a) for t in [0, 1]
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

/// Single-precision [`lerp`]
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// Fractional index at which `value` falls in `samples`
///
/// `samples` must be non-decreasing. Values below the first sample clamp to
/// position 0 and values above the last clamp to the final index. Between two
/// bracketing samples the position is interpolated linearly.
pub fn monotonic_position(samples: &[f64], value: f64) -> f64 {
    let Some(last) = samples.len().checked_sub(1) else {
        return 0.0;
    };

    let idx = samples.partition_point(|&s| s < value);
    if idx > last {
        return last as f64;
    }
    if samples[idx] == value || idx == 0 {
        return idx as f64;
    }

    let vl = samples[idx - 1];
    let vh = samples[idx];
    (idx - 1) as f64 + (value - vl) / (vh - vl)
}
