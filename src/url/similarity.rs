//! Ratcliff/Obershelp string similarity
//!
//! Computes `2 * M / T`, where `M` is the number of characters in the
//! matching blocks found by recursively taking the longest common substring
//! and `T` is the combined length of both strings. When the second string is
//! 200 characters or longer, characters occurring in more than 1% of it
//! (plus one) are not used to seed matches.

use std::collections::HashMap;

/// Similarity ratio between two strings, in `[0, 1]`
///
/// Two empty strings are identical (`1.0`).
///
/// # Examples
///
/// ```
/// use linkmend::url::sequence_ratio;
///
/// assert_eq!(sequence_ratio("abcd", "abcd"), 1.0);
/// assert_eq!(sequence_ratio("abcd", "wxyz"), 0.0);
/// assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
/// ```
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matches = BlockMatcher::new(&a, &b).matched_chars();
    2.0 * matches as f64 / total as f64
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending; popular characters removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        let n = b.len();
        if n >= 200 {
            let popular_limit = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= popular_limit);
        }

        Self { a, b, b2j }
    }

    /// Total size of all matching blocks
    fn matched_chars(&self) -> usize {
        let mut total = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
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

        // Popular characters never seed a match but may still extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}
