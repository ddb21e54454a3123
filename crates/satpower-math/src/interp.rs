//! 1-D linear interpolation on sorted breakpoints.
//!
//! Clamps to the table endpoints outside the covered range; battery OCV
//! tables depend on that behavior at SoC excursions past [0, 1].

/// Linearly interpolate `ys` over sorted `xs` at position `x`.
///
/// Outside the table the nearest endpoint value is returned. `xs` must be
/// strictly ascending and at least 2 long; callers validate their tables at
/// construction.
pub fn interp1_clamped(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    debug_assert!(xs.len() >= 2 && xs.len() == ys.len());

    if x <= xs[0] {
        return ys[0];
    }
    let last = xs.len() - 1;
    if x >= xs[last] {
        return ys[last];
    }

    // partition_point returns the first index with xs[i] > x; the segment
    // [i-1, i] brackets x.
    let i = xs.partition_point(|&v| v <= x);
    let t = (x - xs[i - 1]) / (xs[i] - xs[i - 1]);
    ys[i - 1] + t * (ys[i] - ys[i - 1])
}

/// True when `ys` is monotone non-decreasing.
pub fn is_monotone_non_decreasing(ys: &[f64]) -> bool {
    ys.windows(2).all(|w| w[1] >= w[0])
}
