//! Two-element swaps.

use std::fmt;

use rand::Rng;

use crate::{
    cycles::{swap_through, Cycles},
    error::PermutationError,
    index::PermIndex,
    permutation::Permutation,
    ranking::Ranking,
};

/// The permutation exchanging two distinct indexes and fixing the rest.
///
/// Stored with the smaller index first, so `(2 5)` and `(5 2)` are the
/// same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "(usize, usize)", into = "(usize, usize)")
)]
pub struct Transposition {
    low: usize,
    high: usize,
}

impl Transposition {
    /// # Errors
    ///
    /// * [`PermutationError::NegativeIndex`] if either index is negative.
    /// * [`PermutationError::IndexTooLarge`] if either index is `usize::MAX`.
    /// * [`PermutationError::EqualTransposition`] if `a == b`.
    pub fn new<I: PermIndex>(a: I, b: I) -> Result<Self, PermutationError> {
        let a = a
            .to_index()
            .ok_or(PermutationError::NegativeIndex(a.widen()))?;
        let b = b
            .to_index()
            .ok_or(PermutationError::NegativeIndex(b.widen()))?;
        if a.max(b) == usize::MAX {
            return Err(PermutationError::IndexTooLarge(usize::MAX));
        }
        if a == b {
            return Err(PermutationError::EqualTransposition(a));
        }
        Ok(Self::new_unchecked(a, b))
    }

    pub(crate) fn new_unchecked(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b);
        Transposition {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// A uniformly random transposition of `[0, len)`.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `len < 2`.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self, PermutationError> {
        if len < 2 {
            return Err(PermutationError::LengthMismatch {
                expected: 2,
                found: len,
            });
        }
        let a = rng.gen_range(0..len);
        let mut b = rng.gen_range(0..len - 1);
        if b >= a {
            b += 1;
        }
        Ok(Self::new_unchecked(a, b))
    }

    pub fn low(&self) -> usize {
        self.low
    }

    pub fn high(&self) -> usize {
        self.high
    }

    pub fn apply(&self, i: usize) -> usize {
        swap_through(i, self.low, self.high)
    }

    /// Two transpositions commute iff they are equal or share no index.
    pub fn commutes_with(&self, other: &Transposition) -> bool {
        self == other
            || (self.low != other.low
                && self.low != other.high
                && self.high != other.low
                && self.high != other.high)
    }

    pub fn to_permutation(&self) -> Permutation {
        Permutation::Cycles(Cycles::from_orbits_unchecked(vec![vec![self.low, self.high]]))
    }

    /// `self ∘ other`.
    pub fn compose(&self, other: &Transposition) -> Permutation {
        Self::product(&[*self, *other])
    }

    /// `ts[0] ∘ ts[1] ∘ …`, built by swapping entries of an identity table.
    ///
    /// ```
    /// use perm_algebra::{permutation::Permutation, transposition::Transposition};
    ///
    /// let ts = [Transposition::new(0, 1).unwrap(), Transposition::new(1, 2).unwrap()];
    /// assert_eq!(Transposition::product(&ts), Permutation::cycle([0, 1, 2]).unwrap());
    /// ```
    pub fn product(ts: &[Transposition]) -> Permutation {
        let len = ts.iter().map(|t| t.high + 1).max().unwrap_or(0);
        let mut map: Vec<usize> = (0..len).collect();
        for t in ts {
            map.swap(t.low, t.high);
        }
        Permutation::Ranking(Ranking::from_vec_unchecked(map))
    }
}

impl From<Transposition> for Permutation {
    fn from(t: Transposition) -> Self {
        t.to_permutation()
    }
}

impl TryFrom<(usize, usize)> for Transposition {
    type Error = PermutationError;

    fn try_from((a, b): (usize, usize)) -> Result<Self, Self::Error> {
        Transposition::new(a, b)
    }
}

impl From<Transposition> for (usize, usize) {
    fn from(t: Transposition) -> Self {
        (t.low, t.high)
    }
}

#[cfg(feature = "bincode")]
impl ::bincode::Encode for Transposition {
    fn encode<__E: ::bincode::enc::Encoder>(
        &self,
        encoder: &mut __E,
    ) -> core::result::Result<(), ::bincode::error::EncodeError> {
        ::bincode::Encode::encode(&(self.low, self.high), encoder)
    }
}

#[cfg(feature = "bincode")]
impl<__Context> ::bincode::Decode<__Context> for Transposition {
    fn decode<__D: ::bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let (a, b): (usize, usize) = ::bincode::Decode::decode(decoder)?;
        Transposition::new(a, b)
            .map_err(|e| ::bincode::error::DecodeError::OtherString(e.to_string()))
    }
}

#[cfg(feature = "bincode")]
impl<'__de, __Context> ::bincode::BorrowDecode<'__de, __Context> for Transposition {
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        <Self as ::bincode::Decode<__Context>>::decode(decoder)
    }
}

impl fmt::Display for Transposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.low, self.high)
    }
}
