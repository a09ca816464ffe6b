//! Edit distance engine
//!
//! Classic Levenshtein distance with unit costs, generic over the compared
//! unit so that word mode (characters) and sentence mode (tokens) share one
//! routine. Only two rows of the DP table are alive at any time, both owned
//! by the call frame.

/// Levenshtein distance between two sequences.
///
/// Row width follows `y`, so callers that know the lengths pass the shorter
/// sequence first. The result does not depend on argument order.
pub fn levenshtein<T: PartialEq>(x: &[T], y: &[T]) -> usize {
    let m = x.len();
    let n = y.len();

    if n == 0 {
        return m;
    }
    if m == 0 {
        return n;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if x[i - 1] == y[j - 1] { 0 } else { 1 };

            let up = prev[j] + 1;
            let left = curr[j - 1] + 1;
            let up_left = prev[j - 1] + cost;

            curr[j] = up.min(left).min(up_left);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    // After the final swap the last computed row sits in `prev`.
    prev[n]
}

/// Character-level distance between two strings.
pub fn levenshtein_str(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() <= b.len() {
        levenshtein(&a, &b)
    } else {
        levenshtein(&b, &a)
    }
}
