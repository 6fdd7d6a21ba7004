//! Lazy enumeration of the symmetric group `S_n`.
//!
//! Every permutation of `[0, n)` is built by inserting `0, 1, …, n - 1` one
//! after another into a growing arrangement, value `k` going to one of the
//! `k + 1` gaps. The gap choices form a mixed-radix counter; stepping it
//! yields the next permutation, so only one arrangement is alive at a time.
//! Appending every value gives the identity, which comes first.

use std::iter::FusedIterator;

use crate::{permutation::Permutation, ranking::Ranking, tracing_helpers::debug_log};

/// `S_n`, the group of all permutations of `[0, n)`.
///
/// Iteration is lazy and can be restarted any number of times.
///
/// ```
/// use perm_algebra::group::symmetric_group;
///
/// let s3 = symmetric_group(3);
/// assert_eq!(s3.order(), Some(6));
/// assert_eq!(s3.iter().count(), 6);
/// assert_eq!(s3.iter().filter(|p| p.signature() == -1).count(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymmetricGroup {
    degree: usize,
}

pub fn symmetric_group(n: usize) -> SymmetricGroup {
    SymmetricGroup::new(n)
}

impl SymmetricGroup {
    pub fn new(degree: usize) -> Self {
        SymmetricGroup { degree }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// `n!`, or `None` if it overflows `usize`.
    pub fn order(&self) -> Option<usize> {
        (1..=self.degree).try_fold(1usize, |acc, k| acc.checked_mul(k))
    }

    /// Every element, as raw image tables of length `n`.
    pub fn rankings(&self) -> Rankings {
        debug_log!(degree = self.degree, "enumerating symmetric group");
        Rankings {
            gaps: vec![0; self.degree],
            done: false,
        }
    }

    pub fn iter(&self) -> Elements {
        Elements {
            rankings: self.rankings(),
        }
    }
}

impl IntoIterator for SymmetricGroup {
    type Item = Permutation;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

impl IntoIterator for &SymmetricGroup {
    type Item = Permutation;
    type IntoIter = Elements;

    fn into_iter(self) -> Elements {
        self.iter()
    }
}

/// Image tables of every permutation of `[0, n)`.
#[derive(Debug, Clone)]
pub struct Rankings {
    /// `gaps[k]` is how far from the end value `k` is inserted, in `0..=k`.
    gaps: Vec<usize>,
    done: bool,
}

impl Rankings {
    fn arrangement(&self) -> Vec<usize> {
        let mut arrangement = Vec::with_capacity(self.gaps.len());
        for (value, &gap) in self.gaps.iter().enumerate() {
            arrangement.insert(value - gap, value);
        }
        arrangement
    }

    fn step(&mut self) {
        for k in (1..self.gaps.len()).rev() {
            if self.gaps[k] < k {
                self.gaps[k] += 1;
                self.gaps[k + 1..].fill(0);
                return;
            }
        }
        self.done = true;
    }
}

impl Iterator for Rankings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }
        let arrangement = self.arrangement();
        self.step();
        Some(arrangement)
    }
}

impl FusedIterator for Rankings {}

/// Every permutation of `[0, n)`, as [`Permutation`] values.
#[derive(Debug, Clone)]
pub struct Elements {
    rankings: Rankings,
}

impl Iterator for Elements {
    type Item = Permutation;

    fn next(&mut self) -> Option<Permutation> {
        self.rankings
            .next()
            .map(|map| Permutation::Ranking(Ranking::from_vec_unchecked(map)))
    }
}

impl FusedIterator for Elements {}

#[cfg(test)]
mod tests {
    use ahash::AHashSet;

    use super::*;

    #[test]
    fn sizes_are_factorials() {
        let factorials = [1, 1, 2, 6, 24, 120, 720, 5040];
        for (n, &f) in factorials.iter().enumerate() {
            let group = symmetric_group(n);
            assert_eq!(group.order(), Some(f));
            assert_eq!(group.iter().count(), f);
            assert_eq!(group.rankings().collect::<AHashSet<_>>().len(), f);
        }
        assert_eq!(symmetric_group(40).order(), None);
    }

    #[test]
    fn degree_zero_yields_the_identity_once() {
        let all: Vec<Permutation> = symmetric_group(0).into_iter().collect();
        assert_eq!(all, vec![Permutation::identity()]);
    }

    #[test]
    fn every_table_is_a_full_ranking() {
        for table in symmetric_group(5).rankings() {
            assert_eq!(table.len(), 5);
            assert!(Ranking::is_valid(&table));
        }
    }

    #[test]
    fn closed_under_composition_and_inversion() {
        for n in 1..=5 {
            let elements: AHashSet<Permutation> = symmetric_group(n).iter().collect();
            for p in &elements {
                assert!(elements.contains(&p.invert()));
                for q in &elements {
                    assert!(elements.contains(&p.compose(q)));
                }
            }
        }
    }

    #[test]
    fn closed_under_the_generators_up_to_degree_seven() {
        for n in 5..=7 {
            let swap = Permutation::cycle([0, 1]).unwrap();
            let rotate = Permutation::cycle(0..n).unwrap();
            let elements: AHashSet<Permutation> = symmetric_group(n).iter().collect();
            for p in &elements {
                assert!(elements.contains(&p.compose(&swap)));
                assert!(elements.contains(&p.compose(&rotate)));
            }
        }
    }

    #[test]
    fn odd_permutations_do_not_form_a_subgroup() {
        let odd: Vec<Permutation> = symmetric_group(5)
            .iter()
            .filter(|p| p.signature() == -1)
            .collect();
        assert_eq!(odd.len(), 60);
        for p in odd.iter().step_by(7) {
            for q in &odd {
                assert_eq!(p.compose(q).signature(), 1);
            }
        }
    }

    #[test]
    fn half_of_s5_is_even() {
        let total: i32 = symmetric_group(5)
            .iter()
            .map(|p| i32::from(p.signature()))
            .sum();
        assert_eq!(total, 0);
    }

    #[test]
    fn restartable_and_lazy() {
        let group = symmetric_group(4);
        let first: Vec<_> = group.iter().collect();
        let second: Vec<_> = (&group).into_iter().collect();
        assert_eq!(first, second);

        let head: Vec<_> = symmetric_group(20).iter().take(3).collect();
        assert_eq!(head.len(), 3);
        assert!(head[0].is_identity());
    }

    #[test]
    fn matches_the_span_of_generators() {
        let swap = Permutation::cycle([0, 1]).unwrap();
        let rotate = Permutation::cycle([0, 1, 2, 3]).unwrap();
        let spanned: AHashSet<Permutation> =
            Permutation::span(&[swap, rotate]).into_iter().collect();
        let enumerated: AHashSet<Permutation> = symmetric_group(4).iter().collect();
        assert_eq!(spanned, enumerated);
    }
}
