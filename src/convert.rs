//! Conversion between the dense and sparse encodings.

use std::hash::{Hash, Hasher};

use bitvec::vec::BitVec;

use crate::{cycles::Cycles, ranking::Ranking, tracing_helpers::trace_log};

/// Disjoint orbits of the bijection `f` on `[0, len)`, fixed points skipped.
///
/// Orbits come out ordered by their smallest element, each starting there.
/// `f` must map `[0, len)` onto itself.
pub fn chase_cycles(len: usize, f: impl Fn(usize) -> usize) -> Vec<Vec<usize>> {
    let mut visited: BitVec = BitVec::repeat(false, len);
    let mut orbits = Vec::new();

    for start in 0..len {
        if visited.replace(start, true) {
            continue;
        }
        let mut next = f(start);
        if next == start {
            continue;
        }
        let mut orbit = vec![start];
        while next != start {
            visited.set(next, true);
            orbit.push(next);
            next = f(next);
        }
        orbits.push(orbit);
    }

    trace_log!(len, orbits = orbits.len(), "chased cycles");
    orbits
}

/// The orbits of `ranking`, found by following `i → r[i]`.
pub fn ranking_to_cycles(ranking: &Ranking) -> Cycles {
    let map = ranking.map();
    Cycles::from_orbits_unchecked(chase_cycles(map.len(), |i| map[i]))
}

/// The dense table of `cycles`: the identity table of length
/// `max_moved_index + 1` with every orbit's swaps applied start to end.
pub fn cycles_to_ranking(cycles: &Cycles) -> Ranking {
    let mut map: Vec<usize> = (0..cycles.domain_len()).collect();
    cycles.unclobber(&mut map);
    Ranking::from_vec_unchecked(map)
}

impl From<&Ranking> for Cycles {
    fn from(ranking: &Ranking) -> Self {
        ranking_to_cycles(ranking)
    }
}

impl From<&Cycles> for Ranking {
    fn from(cycles: &Cycles) -> Self {
        cycles_to_ranking(cycles)
    }
}

/// Cycles compare by effect: orbit order and rotation do not matter.
impl PartialEq for Cycles {
    fn eq(&self, other: &Self) -> bool {
        self.max_moved_index() == other.max_moved_index()
            && cycles_to_ranking(self) == cycles_to_ranking(other)
    }
}

impl Eq for Cycles {}

impl Hash for Cycles {
    fn hash<H: Hasher>(&self, state: &mut H) {
        cycles_to_ranking(self).hash(state);
    }
}
