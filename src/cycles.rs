//! Sparse encoding: a permutation as a list of disjoint orbits.
//!
//! An orbit `[a, b, c]` sends `a → b → c → a`. Only indexes that move are
//! stored, which makes this the cheap form for permutations touching a few
//! indexes of a large domain.

use std::fmt;

use ahash::AHashSet;
use itertools::Itertools;

use crate::{error::PermutationError, index::PermIndex};

/// Disjoint cycles, with the largest moved index cached.
///
/// Orbits of length 0 or 1 are never stored.
///
/// # Examples
///
/// ```
/// use perm_algebra::cycles::Cycles;
///
/// let c = Cycles::new([[0, 1, 2]]).unwrap();
/// assert_eq!(c.apply(0), 1);
/// assert_eq!(c.apply(2), 0);
/// assert_eq!(c.apply_slice(&['a', 'b', 'c']).unwrap(), vec!['c', 'a', 'b']);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<usize>>", into = "Vec<Vec<usize>>")
)]
pub struct Cycles {
    orbits: Vec<Vec<usize>>,
    max_moved_index: usize,
}

impl Cycles {
    pub const IDENTITY: Cycles = Cycles {
        orbits: Vec::new(),
        max_moved_index: 0,
    };

    /// Validates and stores the given orbits.
    ///
    /// # Errors
    ///
    /// * [`PermutationError::NegativeIndex`] for a negative entry.
    /// * [`PermutationError::IndexTooLarge`] for `usize::MAX`, which no
    ///   container is long enough to hold.
    /// * [`PermutationError::DuplicateIndex`] if an index appears twice,
    ///   within one orbit or across orbits.
    pub fn new<I, O>(orbits: impl IntoIterator<Item = O>) -> Result<Self, PermutationError>
    where
        I: PermIndex,
        O: IntoIterator<Item = I>,
    {
        let mut seen = AHashSet::new();
        let mut kept = Vec::new();

        for orbit in orbits {
            let mut indexes = Vec::new();
            for i in orbit {
                let index = i
                    .to_index()
                    .ok_or(PermutationError::NegativeIndex(i.widen()))?;
                if index == usize::MAX {
                    return Err(PermutationError::IndexTooLarge(index));
                }
                if !seen.insert(index) {
                    return Err(PermutationError::DuplicateIndex(index));
                }
                indexes.push(index);
            }
            if indexes.len() > 1 {
                kept.push(indexes);
            }
        }

        Ok(Self::from_orbits_unchecked(kept))
    }

    /// Wraps orbits already known to be disjoint and of length at least two.
    pub(crate) fn from_orbits_unchecked(orbits: Vec<Vec<usize>>) -> Self {
        debug_assert!(orbits.iter().all(|o| o.len() > 1 && !o.contains(&usize::MAX)));
        let max_moved_index = orbits.iter().flatten().copied().max().unwrap_or(0);
        Cycles {
            orbits,
            max_moved_index,
        }
    }

    pub fn orbits(&self) -> &[Vec<usize>] {
        &self.orbits
    }

    pub fn into_orbits(self) -> Vec<Vec<usize>> {
        self.orbits
    }

    pub fn num_cycles(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_identity(&self) -> bool {
        self.orbits.is_empty()
    }

    /// The largest index that is not fixed, or 0 for the identity.
    pub fn max_moved_index(&self) -> usize {
        self.max_moved_index
    }

    /// Smallest container length this permutation can act on.
    pub fn domain_len(&self) -> usize {
        if self.is_identity() {
            0
        } else {
            self.max_moved_index + 1
        }
    }

    // --------------------------------------------------------------------------------------------
    // Single indexes
    // --------------------------------------------------------------------------------------------

    /// The image of `i`.
    ///
    /// Replays the transpositions of every orbit backwards, so the cost is
    /// the total orbit length. Indexes above the max are returned at once.
    pub fn apply(&self, i: usize) -> usize {
        if i > self.max_moved_index {
            return i;
        }
        let mut n = i;
        for orbit in &self.orbits {
            for w in orbit.windows(2).rev() {
                n = swap_through(n, w[0], w[1]);
            }
        }
        n
    }

    /// The preimage of `i`.
    pub fn un_apply(&self, i: usize) -> usize {
        if i > self.max_moved_index {
            return i;
        }
        let mut n = i;
        for orbit in &self.orbits {
            for w in orbit.windows(2) {
                n = swap_through(n, w[0], w[1]);
            }
        }
        n
    }

    // --------------------------------------------------------------------------------------------
    // Containers
    // --------------------------------------------------------------------------------------------

    /// Moves every element of `slice` along its orbit, in place.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `slice` is shorter than [`Cycles::domain_len`].
    pub fn apply_in_place<T>(&self, slice: &mut [T]) -> Result<(), PermutationError> {
        self.check_len(slice.len())?;
        self.clobber(slice);
        Ok(())
    }

    /// Moves every element of `slice` one step back along its orbit, in place.
    pub fn un_apply_in_place<T>(&self, slice: &mut [T]) -> Result<(), PermutationError> {
        self.check_len(slice.len())?;
        self.unclobber(slice);
        Ok(())
    }

    pub fn apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        let mut result = slice.as_ref().to_vec();
        self.apply_in_place(&mut result)?;
        Ok(result)
    }

    pub fn un_apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        let mut result = slice.as_ref().to_vec();
        self.un_apply_in_place(&mut result)?;
        Ok(result)
    }

    pub fn apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let mut chars: Vec<char> = s.chars().collect();
        self.apply_in_place(&mut chars)?;
        Ok(chars.into_iter().collect())
    }

    pub fn un_apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let mut chars: Vec<char> = s.chars().collect();
        self.un_apply_in_place(&mut chars)?;
        Ok(chars.into_iter().collect())
    }

    /// Swaps along each orbit from its end to its start.
    pub(crate) fn clobber<T>(&self, slice: &mut [T]) {
        for orbit in &self.orbits {
            for w in orbit.windows(2).rev() {
                slice.swap(w[0], w[1]);
            }
        }
    }

    /// Swaps along each orbit from its start to its end.
    pub(crate) fn unclobber<T>(&self, slice: &mut [T]) {
        for orbit in &self.orbits {
            for w in orbit.windows(2) {
                slice.swap(w[0], w[1]);
            }
        }
    }

    fn check_len(&self, found: usize) -> Result<(), PermutationError> {
        let expected = self.domain_len();
        if found < expected {
            Err(PermutationError::LengthMismatch { expected, found })
        } else {
            Ok(())
        }
    }

    // --------------------------------------------------------------------------------------------
    // Algebra
    // --------------------------------------------------------------------------------------------

    /// Reverses every orbit.
    pub fn invert(&self) -> Self {
        Cycles {
            orbits: self
                .orbits
                .iter()
                .map(|o| o.iter().rev().copied().collect())
                .collect(),
            max_moved_index: self.max_moved_index,
        }
    }

    /// `+1` for an even permutation, `-1` for an odd one.
    ///
    /// An orbit of length `k` is a product of `k - 1` transpositions, so only
    /// the even-length orbits flip the sign.
    pub fn signature(&self) -> i8 {
        let even = self.orbits.iter().filter(|o| o.len() % 2 == 0).count();
        if even % 2 == 0 {
            1
        } else {
            -1
        }
    }

    /// Each orbit rotated to start at its smallest index, orbits sorted by it.
    pub fn canonical(&self) -> Self {
        let mut orbits: Vec<Vec<usize>> = self
            .orbits
            .iter()
            .map(|o| {
                let start = o.iter().position_min().unwrap_or(0);
                o[start..].iter().chain(&o[..start]).copied().collect()
            })
            .collect();
        orbits.sort_unstable_by_key(|o| o[0]);
        Cycles {
            orbits,
            max_moved_index: self.max_moved_index,
        }
    }
}

/// `n` after swapping the values `a` and `b`.
#[inline]
pub(crate) fn swap_through(n: usize, a: usize, b: usize) -> usize {
    if n == a {
        b
    } else if n == b {
        a
    } else {
        n
    }
}

impl fmt::Display for Cycles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return write!(f, "id");
        }
        let rendered = self
            .canonical()
            .orbits
            .iter()
            .map(|orbit| format!("({})", orbit.iter().join(" ")))
            .join(" ");
        f.write_str(&rendered)
    }
}

impl TryFrom<Vec<Vec<usize>>> for Cycles {
    type Error = PermutationError;

    fn try_from(orbits: Vec<Vec<usize>>) -> Result<Self, Self::Error> {
        Cycles::new(orbits)
    }
}

impl From<Cycles> for Vec<Vec<usize>> {
    fn from(cycles: Cycles) -> Self {
        cycles.orbits
    }
}

#[cfg(feature = "bincode")]
impl ::bincode::Encode for Cycles {
    fn encode<__E: ::bincode::enc::Encoder>(
        &self,
        encoder: &mut __E,
    ) -> core::result::Result<(), ::bincode::error::EncodeError> {
        ::bincode::Encode::encode(&self.orbits, encoder)
    }
}

// The max moved index is recomputed rather than trusted from the input.
#[cfg(feature = "bincode")]
impl<__Context> ::bincode::Decode<__Context> for Cycles {
    fn decode<__D: ::bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let orbits: Vec<Vec<usize>> = ::bincode::Decode::decode(decoder)?;
        Cycles::new(orbits)
            .map_err(|e| ::bincode::error::DecodeError::OtherString(e.to_string()))
    }
}

#[cfg(feature = "bincode")]
impl<'__de, __Context> ::bincode::BorrowDecode<'__de, __Context> for Cycles {
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        <Self as ::bincode::Decode<__Context>>::decode(decoder)
    }
}
