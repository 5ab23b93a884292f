//! Precomputed choose-k-of-n index tuples.
//!
//! The win test and the heuristic both iterate over fixed subsets of a
//! side's four pieces. The tables are built once on first use and are
//! read-only afterwards.

use once_cell::sync::Lazy;
use super::piece::PIECES_PER_SIDE;

/// All 2-element subsets of the piece indices (6 entries)
pub static PAIRS: Lazy<Vec<[usize; 2]>> = Lazy::new(|| {
    combinations(PIECES_PER_SIDE, 2)
        .into_iter()
        .map(|c| [c[0], c[1]])
        .collect()
});

/// All 3-element subsets of the piece indices (4 entries)
pub static TRIPLES: Lazy<Vec<[usize; 3]>> = Lazy::new(|| {
    combinations(PIECES_PER_SIDE, 3)
        .into_iter()
        .map(|c| [c[0], c[1], c[2]])
        .collect()
});

/// Every `r`-element subset of `0..n` in lexicographic order.
pub fn combinations(n: usize, r: usize) -> Vec<Vec<usize>> {
    let mut res = Vec::new();
    if r > n {
        return res;
    }

    let mut idx: Vec<usize> = (0..r).collect();
    loop {
        res.push(idx.clone());

        // Rightmost index that can still be advanced
        let mut i = r;
        while i > 0 && idx[i - 1] == n - r + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            return res;
        }
        idx[i - 1] += 1;
        for j in i..r {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial_counts() {
        assert_eq!(combinations(4, 2).len(), 6);
        assert_eq!(combinations(4, 3).len(), 4);
        assert_eq!(combinations(8, 4).len(), 70);
        assert_eq!(combinations(3, 0), vec![Vec::<usize>::new()]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn test_lexicographic_order() {
        assert_eq!(
            combinations(4, 2),
            vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
        );
    }

    #[test]
    fn test_static_tables() {
        assert_eq!(PAIRS.len(), 6);
        assert_eq!(TRIPLES.as_slice(), &[[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]]);
    }
}
