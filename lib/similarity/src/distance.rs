//! Similarity functions used by the gate
//!
//! All functions return a similarity score in range [0.0, 1.0] where 1.0 means identical.

use ahash::{AHashMap, AHashSet};
use std::hash::Hash;

/// Matching-blocks ratio between two strings
///
/// `2 * M / (len(a) + len(b))` where `M` is the number of characters covered
/// by the matching blocks found by repeatedly taking the longest common
/// substring and recursing on both sides of it. Lengths are counted in
/// Unicode scalar values. No junk heuristic is applied.
///
/// The arguments are ordered canonically first so the result never depends
/// on which side was passed first.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b2j.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest common block in `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns `(i, j, size)`. Ties resolve to the earliest block in `a`, then
/// the earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &AHashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // j -> length of the match ending at a[i - 1], b[j]
    let mut j2len: AHashMap<usize, usize> = AHashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_j2len = AHashMap::new();
        if let Some(positions) = b2j.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}

/// Jaccard index of two token sets
///
/// Two empty sets are identical (1.0); one empty set against a non-empty one
/// shares nothing (0.0).
pub fn jaccard<T: Eq + Hash>(a: &AHashSet<T>, b: &AHashSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> AHashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_sequence_ratio_identical_and_empty() {
        assert_eq!(sequence_ratio("hello", "hello"), 1.0);
        assert_eq!(sequence_ratio("", ""), 1.0);
        assert_eq!(sequence_ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_sequence_ratio_disjoint() {
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_known_values() {
        // one shared block "bcd" of 3 over 8 characters
        assert!((sequence_ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
        // "you " + "hate animals" = 16 matched chars over 37
        let sim = sequence_ratio("you hate animals", "you just hate animals");
        assert!((sim - 32.0 / 37.0).abs() < 1e-12);
    }

    #[test]
    fn test_sequence_ratio_decreases_with_divergence() {
        let base = "the quick brown fox";
        let near = sequence_ratio(base, "the quick brown fax");
        let far = sequence_ratio(base, "a slow green turtle");
        assert!(near > far);
        assert!(near < 1.0);
    }

    #[test]
    fn test_sequence_ratio_is_symmetric() {
        let pairs = [("abxcd", "abcd"), ("aaab", "abaa"), ("kitten", "sitting"), ("ab", "ba")];
        for (a, b) in pairs {
            assert_eq!(sequence_ratio(a, b), sequence_ratio(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn test_sequence_ratio_counts_chars_not_bytes() {
        assert_eq!(sequence_ratio("café", "café"), 1.0);
        assert!((sequence_ratio("café", "cafe") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&["you", "hate", "animals"]), &set(&["you", "just", "hate", "animals"])), 0.75);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 1.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&["b"])), 0.0);
    }
}
