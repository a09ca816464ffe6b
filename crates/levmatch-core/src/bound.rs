//! Length-only similarity bound
//!
//! The length difference of two sequences is a lower bound on their edit
//! distance, so `1 - |m - n| / max(m, n)` is an upper bound on the
//! normalized similarity. Used to skip the O(m·n) distance computation.

/// Best similarity reachable between sequences of the given lengths.
///
/// Two empty sequences are identical, so the bound is 1.0.
#[inline]
pub fn max_similarity_len(x_len: usize, y_len: usize) -> f64 {
    let longest = x_len.max(y_len);
    if longest == 0 {
        return 1.0;
    }
    let diff = x_len.abs_diff(y_len);
    1.0 - (diff as f64 / longest as f64)
}

/// Best similarity reachable between `x` and `y`, from their lengths alone.
#[inline]
pub fn max_similarity<T>(x: &[T], y: &[T]) -> f64 {
    max_similarity_len(x.len(), y.len())
}
