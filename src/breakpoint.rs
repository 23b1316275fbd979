//! Percentile-based break thresholds.
//!
//! A fixed similarity cutoff behaves differently for terse product sheets and
//! flowing marketing copy. Instead, the threshold is a quantile of the
//! document's own distance distribution, so break density adapts to each
//! document:
//!
//! ```text
//! distances:  0.10  0.20  0.90  0.15
//! p = 0.9  -> threshold 0.69
//!                         ^ only this boundary exceeds it
//! ```
//!
//! Quantiles use linear interpolation between order statistics
//! (`rank = p * (n - 1)`), the default method in NumPy and R type 7.

/// Linear-interpolation quantile of `values` at fraction `p` in `[0, 1]`.
///
/// Returns `None` for an empty slice. `p` is clamped into `[0, 1]`; NaN values
/// sort last.
///
/// ```rust
/// use chunkwise::breakpoint::percentile;
///
/// let q = percentile(&[0.1, 0.2, 0.9, 0.15], 0.5).unwrap();
/// assert!((q - 0.175).abs() < 1e-6);
/// ```
#[must_use]
pub fn percentile(values: &[f32], p: f32) -> Option<f32> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
    let rank = f64::from(p) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let frac = (rank - lower as f64) as f32;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Break threshold for a document's distances.
///
/// Returns `None` when fewer than two distances exist (two sentences or
/// fewer): such documents produce no candidate breaks.
#[must_use]
pub fn select_threshold(distances: &[f32], percentile_p: f32) -> Option<f32> {
    if distances.len() < 2 {
        return None;
    }
    percentile(distances, percentile_p)
}

/// Whether a boundary with `distance` is a candidate break under `threshold`.
#[must_use]
pub fn is_candidate_break(distance: f32, threshold: Option<f32>) -> bool {
    threshold.is_some_and(|t| distance > t)
}

/// Indices `i` whose `distances[i]` exceeds the threshold.
#[must_use]
pub fn candidate_breaks(distances: &[f32], percentile_p: f32) -> Vec<usize> {
    let threshold = select_threshold(distances, percentile_p);
    distances
        .iter()
        .enumerate()
        .filter(|(_, d)| is_candidate_break(**d, threshold))
        .map(|(i, _)| i)
        .collect()
}
