//! Permutations derived from sequences: the ranking that sorts a sequence,
//! and the ranking that rearranges one sequence into another.
//!
//! Both look elements up by binary search in a sorted copy. Equal values
//! share a run in that copy, so each lookup claims the next free slot of the
//! run, walking forward from where the search landed and then backward.

use std::cmp::Ordering;

use crate::{error::PermutationError, ranking::Ranking, tracing_helpers::trace_log};

/// The ranking that sorts `seq`: `sorting(seq).apply_slice(seq)` is sorted.
///
/// Equal elements get distinct slots; which element gets which slot is
/// deterministic but not guaranteed to preserve their relative order.
///
/// ```
/// use perm_algebra::sequence::sorting;
///
/// let seq = ['c', 'a', 'b'];
/// let r = sorting(&seq).unwrap();
/// assert_eq!(r.map(), &[2, 0, 1]);
/// assert_eq!(r.apply_slice(seq).unwrap(), vec!['a', 'b', 'c']);
/// ```
pub fn sorting<T: Ord>(seq: &[T]) -> Result<Ranking, PermutationError> {
    sorting_by(seq, Ord::cmp)
}

/// [`sorting`] under a caller-supplied total order.
///
/// # Errors
///
/// [`PermutationError::ExhaustedRun`] if `compare` is not a consistent total
/// order, so that a value cannot find its run in the sorted copy.
pub fn sorting_by<T, F>(seq: &[T], mut compare: F) -> Result<Ranking, PermutationError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut sorted: Vec<&T> = seq.iter().collect();
    sorted.sort_by(|a, b| compare(*a, *b));

    let mut occupancy = Occupancy::new(sorted.len());
    let mut map = Vec::with_capacity(seq.len());

    for el in seq {
        let idx = sorted
            .binary_search_by(|candidate| compare(*candidate, el))
            .map_err(|slot| PermutationError::ExhaustedRun { slot })?;
        let slot = occupancy
            .claim(&sorted, idx, |a, b| compare(*a, *b) == Ordering::Equal)
            .ok_or(PermutationError::ExhaustedRun { slot: idx })?;
        map.push(slot);
    }

    trace_log!(len = seq.len(), "computed sorting ranking");
    Ok(Ranking::from_vec_unchecked(map))
}

/// [`sorting`] by a key extracted from each element.
pub fn sorting_by_key<T, K, F>(seq: &[T], mut key: F) -> Result<Ranking, PermutationError>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sorting_by(seq, |a, b| {
        let ka = key(a);
        let kb = key(b);
        ka.cmp(&kb)
    })
}

/// The ranking that rearranges `a` into `b`: `from(a, b)?.apply_slice(a)`
/// equals `b`.
///
/// # Errors
///
/// * [`PermutationError::LengthMismatch`] if the lengths differ.
/// * [`PermutationError::NotRearrangement`] if `b` is not a rearrangement of
///   `a`, including when a value occurs more often in `a` than in `b`.
///
/// ```
/// use perm_algebra::sequence::from;
///
/// let r = from(&[1, 2, 3], &[2, 3, 1]).unwrap();
/// assert_eq!(r.apply_slice([1, 2, 3]).unwrap(), vec![2, 3, 1]);
/// assert!(from(&[1, 1, 2], &[1, 2, 2]).is_err());
/// ```
pub fn from<T: Ord>(a: &[T], b: &[T]) -> Result<Ranking, PermutationError> {
    from_by(a, b, Ord::cmp)
}

/// [`from`] under a caller-supplied total order.
pub fn from_by<T, F>(a: &[T], b: &[T], mut compare: F) -> Result<Ranking, PermutationError>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if a.len() != b.len() {
        return Err(PermutationError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let sort = sorting_by(b, &mut compare)?;
    let unsort = sort.invert();
    let sorted: Vec<&T> = sort.apply_slice(b.iter().collect::<Vec<&T>>())?;

    let mut occupancy = Occupancy::new(sorted.len());
    let mut map = Vec::with_capacity(a.len());

    for (position, el) in a.iter().enumerate() {
        let idx = sorted
            .binary_search_by(|candidate| compare(*candidate, el))
            .map_err(|_| PermutationError::NotRearrangement { position })?;
        let slot = occupancy
            .claim(&sorted, idx, |x, y| compare(*x, *y) == Ordering::Equal)
            .ok_or(PermutationError::NotRearrangement { position })?;
        map.push(unsort.apply(slot));
    }

    Ok(Ranking::from_vec_unchecked(map))
}

/// Builder for `taking(a).to(b)`, the same as [`from`]`(a, b)`.
///
/// ```
/// use perm_algebra::sequence::taking;
///
/// let r = taking(&["x", "y", "z"]).to(&["z", "x", "y"]).unwrap();
/// assert_eq!(r.apply_slice(["x", "y", "z"]).unwrap(), vec!["z", "x", "y"]);
/// ```
pub fn taking<T: Ord>(from: &[T]) -> Taking<'_, T> {
    Taking { from }
}

#[derive(Debug, Clone, Copy)]
pub struct Taking<'a, T> {
    from: &'a [T],
}

impl<T: Ord> Taking<'_, T> {
    pub fn to(&self, to: &[T]) -> Result<Ranking, PermutationError> {
        from(self.from, to)
    }
}

/// Walk state per base slot of a sorted copy.
///
/// `None` means nobody has landed on the slot yet. `Some(offset)` is the
/// offset from the slot that was handed out last: `0, 1, 2, …` while the run
/// continues forward, then `-1, -2, …` backward.
#[derive(Debug)]
struct Occupancy {
    last: Vec<Option<isize>>,
}

impl Occupancy {
    fn new(len: usize) -> Self {
        Occupancy {
            last: vec![None; len],
        }
    }

    /// Claims the next free slot in the run of values equal to `sorted[idx]`,
    /// or `None` once the run is used up.
    fn claim<E>(
        &mut self,
        sorted: &[E],
        idx: usize,
        mut same: impl FnMut(&E, &E) -> bool,
    ) -> Option<usize> {
        let offset = match self.last[idx] {
            None => 0,
            Some(offset) => next_offset(sorted, idx, offset, &mut same)?,
        };
        self.last[idx] = Some(offset);
        idx.checked_add_signed(offset)
    }
}

/// The offset after `offset` within the run around `idx`, or `None` when
/// the run is used up in both directions.
fn next_offset<E>(
    sorted: &[E],
    idx: usize,
    offset: isize,
    same: &mut impl FnMut(&E, &E) -> bool,
) -> Option<isize> {
    if offset >= 0 {
        let forward = offset + 1;
        if in_run(sorted, idx, idx.checked_add_signed(forward), same) {
            return Some(forward);
        }
        return in_run(sorted, idx, idx.checked_sub(1), same).then_some(-1);
    }

    let backward = offset - 1;
    in_run(sorted, idx, idx.checked_add_signed(backward), same).then_some(backward)
}

/// Whether slot `at` exists and holds a value equal to `sorted[idx]`.
fn in_run<E>(
    sorted: &[E],
    idx: usize,
    at: Option<usize>,
    same: &mut impl FnMut(&E, &E) -> bool,
) -> bool {
    at.and_then(|at| sorted.get(at))
        .is_some_and(|e| same(e, &sorted[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: &i32, b: &i32) -> bool {
        a == b
    }

    const RUNS: [i32; 8] = [0, 0, 1, 3, 3, 3, 4, 4];

    #[test]
    fn offsets_walk_forward_then_backward() {
        let mut eq = same;
        assert_eq!(next_offset(&RUNS, 0, 0, &mut eq), Some(1));
        assert_eq!(next_offset(&RUNS, 1, 0, &mut eq), Some(-1));
        assert_eq!(next_offset(&RUNS, 2, 0, &mut eq), None);
        assert_eq!(next_offset(&RUNS, 3, 0, &mut eq), Some(1));
        assert_eq!(next_offset(&RUNS, 3, 1, &mut eq), Some(2));
        assert_eq!(next_offset(&RUNS, 3, 2, &mut eq), None);
        assert_eq!(next_offset(&RUNS, 4, 1, &mut eq), Some(-1));
        assert_eq!(next_offset(&RUNS, 5, 0, &mut eq), Some(-1));
        assert_eq!(next_offset(&RUNS, 5, -1, &mut eq), Some(-2));
        assert_eq!(next_offset(&RUNS, 5, -2, &mut eq), None);
        assert_eq!(next_offset(&RUNS, 7, 0, &mut eq), Some(-1));
    }

    #[test]
    fn occupancy_hands_out_each_slot_of_a_run_once() {
        let mut occupancy = Occupancy::new(RUNS.len());
        let mut claimed: Vec<usize> = (0..3)
            .map(|_| occupancy.claim(&RUNS, 4, same).unwrap())
            .collect();
        assert_eq!(occupancy.claim(&RUNS, 4, same), None);
        claimed.sort_unstable();
        assert_eq!(claimed, vec![3, 4, 5]);
    }

    #[test]
    fn sorting_distinct_values() {
        let r = sorting(&[30, 10, 20]).unwrap();
        assert_eq!(r.map(), &[2, 0, 1]);
        assert!(sorting(&[1, 2, 3]).unwrap().is_identity());
        assert!(sorting::<u8>(&[]).unwrap().is_identity());
    }

    #[test]
    fn sorting_with_ties() {
        let seq = [4, 1, 3, 1, 4, 4, 0, 3];
        let r = sorting(&seq).unwrap();
        assert!(Ranking::is_valid(r.map()));
        assert!(r.sorts(&seq).unwrap());
        assert_eq!(r.apply_slice(seq).unwrap(), vec![0, 1, 1, 3, 3, 4, 4, 4]);
        assert_eq!(sorting(&seq).unwrap(), r);
    }

    #[test]
    fn all_equal_values_still_get_distinct_slots() {
        let seq = ["a"; 6];
        let r = sorting(&seq).unwrap();
        assert!(Ranking::is_valid(r.map()));
        assert!(r.sorts(&seq).unwrap());
    }

    #[test]
    fn sorting_by_comparator_and_key() {
        let seq = [1, 3, 2];
        let r = sorting_by(&seq, |a, b| b.cmp(a)).unwrap();
        assert_eq!(r.apply_slice(seq).unwrap(), vec![3, 2, 1]);

        let words = ["ccc", "a", "bb"];
        let r = sorting_by_key(&words, |w| w.len()).unwrap();
        assert_eq!(r.apply_slice(words).unwrap(), vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn inconsistent_comparator_is_reported() {
        // every element compares below every other, so no lookup lands
        let r = sorting_by(&[1, 2, 3], |_, _| Ordering::Less);
        assert!(matches!(r, Err(PermutationError::ExhaustedRun { .. })));
        assert!(matches!(
            from_by(&[1, 2], &[2, 1], |_, _| Ordering::Less),
            Err(PermutationError::ExhaustedRun { .. })
        ));
    }

    #[test]
    fn from_rearranges() {
        let a = [5, 7, 5, 9, 7];
        let b = [7, 5, 9, 7, 5];
        let r = from(&a, &b).unwrap();
        assert_eq!(r.apply_slice(a).unwrap(), b.to_vec());
        assert_eq!(taking(&a).to(&b).unwrap(), r);

        let r = from(&b, &a).unwrap();
        assert_eq!(r.apply_slice(b).unwrap(), a.to_vec());
    }

    #[test]
    fn from_rejects_non_rearrangements() {
        assert_eq!(
            from(&[1, 1, 2], &[1, 2, 2]),
            Err(PermutationError::NotRearrangement { position: 1 })
        );
        assert_eq!(
            from(&[1, 4], &[1, 2]),
            Err(PermutationError::NotRearrangement { position: 1 })
        );
        assert_eq!(
            from(&[1, 2], &[1, 2, 3]),
            Err(PermutationError::LengthMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn from_identical_sequences_is_identity_without_ties() {
        assert!(from(&[3, 1, 2], &[3, 1, 2]).unwrap().is_identity());
        assert!(from::<i32>(&[], &[]).unwrap().is_identity());
    }
}
