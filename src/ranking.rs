//! Dense encoding: a ranking is the image table `r` of a bijection on
//! `[0, len)`, where index `i` is sent to `r[i]`.
//!
//! Rankings are stored trimmed: trailing fixed points are dropped, so two
//! rankings with the same effect have identical tables and the identity is
//! the empty table.

use bitvec::vec::BitVec;
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{InvalidRanking, PermutationError},
    index::PermIndex,
};

/// A bijection on `[0, len)`, stored as its image table.
///
/// Applying a ranking to a container moves the element at position `i` to
/// position `r[i]`.
///
/// # Examples
///
/// ```
/// use perm_algebra::ranking::Ranking;
///
/// let r = Ranking::new([1, 2, 0]).unwrap();
/// assert_eq!(r.apply_slice(&['a', 'b', 'c']).unwrap(), vec!['c', 'a', 'b']);
/// assert_eq!(r.apply(0), 1);
/// assert_eq!(r.apply(17), 17);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct Ranking {
    map: Vec<usize>,
}

impl Ranking {
    /// The identity, as the empty table.
    pub const IDENTITY: Ranking = Ranking { map: Vec::new() };

    // --------------------------------------------------------------------------------------------
    // Construction
    // --------------------------------------------------------------------------------------------

    /// Validates `values` as a ranking of `[0, values.len())` and trims it.
    ///
    /// # Errors
    ///
    /// [`PermutationError::InvalidRanking`] if a value is negative, not below
    /// the length, or repeated.
    ///
    /// ```
    /// # use perm_algebra::ranking::Ranking;
    /// assert!(Ranking::new([1, 2, 3]).is_err());
    /// assert!(Ranking::new([0, 0]).is_err());
    /// assert!(Ranking::new([-1, 0]).is_err());
    /// assert!(Ranking::new([0, 1, 2]).unwrap().is_identity());
    /// ```
    pub fn new<I: PermIndex>(
        values: impl IntoIterator<Item = I>,
    ) -> Result<Self, PermutationError> {
        let values: Vec<I> = values.into_iter().collect();
        let len = values.len();
        let mut seen: BitVec = BitVec::repeat(false, len);
        let mut map = Vec::with_capacity(len);

        for (position, value) in values.into_iter().enumerate() {
            let Some(v) = value.to_index() else {
                return Err(InvalidRanking::NegativeValue {
                    position,
                    value: value.widen(),
                }
                .into());
            };
            if v >= len {
                return Err(InvalidRanking::OutOfBounds {
                    position,
                    value: v,
                    len,
                }
                .into());
            }
            if seen.replace(v, true) {
                return Err(InvalidRanking::Duplicate { position, value: v }.into());
            }
            map.push(v);
        }

        Ok(Self::from_vec_unchecked(map))
    }

    /// Wraps a table already known to be a bijection, trimming it.
    pub(crate) fn from_vec_unchecked(mut map: Vec<usize>) -> Self {
        debug_assert!(Self::is_valid(&map));
        while let Some(&last) = map.last() {
            if last + 1 == map.len() {
                map.pop();
            } else {
                break;
            }
        }
        Ranking { map }
    }

    /// Whether `values` is a ranking of `[0, values.len())`.
    pub fn is_valid(values: &[usize]) -> bool {
        let mut seen: BitVec = BitVec::repeat(false, values.len());
        values
            .iter()
            .all(|&v| v < values.len() && !seen.replace(v, true))
    }

    /// A uniformly random ranking of `[0, len)`, trimmed.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut map: Vec<usize> = (0..len).collect();
        map.shuffle(rng);
        Self::from_vec_unchecked(map)
    }

    // --------------------------------------------------------------------------------------------
    // Accessors
    // --------------------------------------------------------------------------------------------

    /// The trimmed image table.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.map
    }

    /// Length of the trimmed table; every index at or above it is fixed.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.map.is_empty()
    }

    /// The largest index that is not fixed, or 0 for the identity.
    pub fn max_moved_index(&self) -> usize {
        self.map.len().saturating_sub(1)
    }

    // --------------------------------------------------------------------------------------------
    // Application
    // --------------------------------------------------------------------------------------------

    /// The image of `i`. Indexes beyond the table are fixed.
    #[inline]
    pub fn apply(&self, i: usize) -> usize {
        self.map.get(i).copied().unwrap_or(i)
    }

    /// Returns a copy of `slice` with the element at `i` moved to `r[i]`.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `slice` is shorter than the table.
    pub fn apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        let slice = slice.as_ref();
        self.check_len(slice.len())?;
        let mut result = slice.to_vec();
        for (i, &target) in self.map.iter().enumerate() {
            result[target] = slice[i].clone();
        }
        Ok(result)
    }

    /// Inverse of [`Ranking::apply_slice`]: the element at `r[i]` moves back to `i`.
    pub fn un_apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        let slice = slice.as_ref();
        self.check_len(slice.len())?;
        let mut result = slice.to_vec();
        for (i, &source) in self.map.iter().enumerate() {
            result[i] = slice[source].clone();
        }
        Ok(result)
    }

    /// [`Ranking::apply_slice`] over the characters of `s`.
    pub fn apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let chars: Vec<char> = s.chars().collect();
        Ok(self.apply_slice(chars)?.into_iter().collect())
    }

    /// Whether applying this ranking to `seq` leaves it in non-decreasing order.
    pub fn sorts<T: Ord + Clone>(&self, seq: &[T]) -> Result<bool, PermutationError> {
        let applied = self.apply_slice(seq)?;
        Ok(applied.windows(2).all(|w| w[0] <= w[1]))
    }

    fn check_len(&self, found: usize) -> Result<(), PermutationError> {
        if found < self.map.len() {
            Err(PermutationError::LengthMismatch {
                expected: self.map.len(),
                found,
            })
        } else {
            Ok(())
        }
    }

    // --------------------------------------------------------------------------------------------
    // Algebra
    // --------------------------------------------------------------------------------------------

    /// The inverse table: `inv[r[i]] = i`.
    pub fn invert(&self) -> Self {
        let mut inv = vec![0; self.map.len()];
        for (i, &j) in self.map.iter().enumerate() {
            inv[j] = i;
        }
        Ranking { map: inv }
    }

    /// `self ∘ other`: the ranking sending `i` to `self(other(i))`.
    ///
    /// The operands may have different lengths; the shorter one is fixed on
    /// the tail of the longer one.
    ///
    /// ```
    /// # use perm_algebra::ranking::Ranking;
    /// let a = Ranking::new([1, 0]).unwrap();
    /// let b = Ranking::new([0, 2, 1]).unwrap();
    /// assert_eq!(a.compose(&b).map(), &[1, 2, 0]);
    /// ```
    pub fn compose(&self, other: &Ranking) -> Self {
        let len = self.map.len().max(other.map.len());
        let map = (0..len).map(|i| self.apply(other.apply(i))).collect();
        Self::from_vec_unchecked(map)
    }
}

impl TryFrom<Vec<usize>> for Ranking {
    type Error = PermutationError;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        Ranking::new(values)
    }
}

impl From<Ranking> for Vec<usize> {
    fn from(ranking: Ranking) -> Self {
        ranking.map
    }
}

#[cfg(feature = "bincode")]
impl ::bincode::Encode for Ranking {
    fn encode<__E: ::bincode::enc::Encoder>(
        &self,
        encoder: &mut __E,
    ) -> core::result::Result<(), ::bincode::error::EncodeError> {
        ::bincode::Encode::encode(&self.map, encoder)
    }
}

// Decoding goes through `Ranking::new`, so a malformed table never becomes a value.
#[cfg(feature = "bincode")]
impl<__Context> ::bincode::Decode<__Context> for Ranking {
    fn decode<__D: ::bincode::de::Decoder<Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        let values: Vec<usize> = ::bincode::Decode::decode(decoder)?;
        Ranking::new(values)
            .map_err(|e| ::bincode::error::DecodeError::OtherString(e.to_string()))
    }
}

#[cfg(feature = "bincode")]
impl<'__de, __Context> ::bincode::BorrowDecode<'__de, __Context> for Ranking {
    fn borrow_decode<__D: ::bincode::de::BorrowDecoder<'__de, Context = __Context>>(
        decoder: &mut __D,
    ) -> core::result::Result<Self, ::bincode::error::DecodeError> {
        <Self as ::bincode::Decode<__Context>>::decode(decoder)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;

    #[test]
    fn trailing_fixed_points_are_trimmed() {
        let r = Ranking::new([1, 0, 2, 3]).unwrap();
        assert_eq!(r.map(), &[1, 0]);
        assert_eq!(r.max_moved_index(), 1);

        let id = Ranking::new([0usize, 1, 2]).unwrap();
        assert!(id.is_identity());
        assert_eq!(id, Ranking::IDENTITY);
        assert_eq!(id.max_moved_index(), 0);
    }

    #[test]
    fn inner_fixed_points_are_kept() {
        let r = Ranking::new([2, 1, 0]).unwrap();
        assert_eq!(r.map(), &[2, 1, 0]);
        assert_eq!(r.apply(1), 1);
    }

    #[test]
    fn rejects_malformed_tables() {
        assert_eq!(
            Ranking::new([1, 2, 3]),
            Err(InvalidRanking::OutOfBounds {
                position: 2,
                value: 3,
                len: 3
            }
            .into())
        );
        assert_eq!(
            Ranking::new([0, 2, 2]),
            Err(InvalidRanking::Duplicate {
                position: 2,
                value: 2
            }
            .into())
        );
        assert_eq!(
            Ranking::new([0i64, -4]),
            Err(InvalidRanking::NegativeValue {
                position: 1,
                value: -4
            }
            .into())
        );
    }

    #[test]
    fn validity_check() {
        assert!(Ranking::is_valid(&[]));
        assert!(Ranking::is_valid(&[2, 0, 1]));
        assert!(!Ranking::is_valid(&[2, 0, 0]));
        assert!(!Ranking::is_valid(&[1]));
    }

    #[test]
    fn apply_moves_elements_to_their_rank() {
        let r = Ranking::new([2, 0, 1]).unwrap();
        assert_eq!(r.apply_slice([10, 20, 30]).unwrap(), vec![20, 30, 10]);
        assert_eq!(r.apply_slice([10, 20, 30, 40]).unwrap(), vec![20, 30, 10, 40]);
        assert_eq!(r.apply_str("abc").unwrap(), "bca");
    }

    #[test]
    fn apply_rejects_short_input() {
        let r = Ranking::new([2, 0, 1]).unwrap();
        assert_eq!(
            r.apply_slice([1, 2]),
            Err(PermutationError::LengthMismatch {
                expected: 3,
                found: 2
            })
        );
        assert!(Ranking::IDENTITY.apply_slice::<u8, _>([]).unwrap().is_empty());
    }

    #[test]
    fn un_apply_reverses_apply() {
        let r = Ranking::new([3, 0, 4, 1, 2]).unwrap();
        let data = ["a", "b", "c", "d", "e", "f"];
        let moved = r.apply_slice(data).unwrap();
        assert_eq!(r.un_apply_slice(&moved).unwrap(), data.to_vec());
        assert_eq!(r.invert().apply_slice(&moved).unwrap(), data.to_vec());
    }

    #[test]
    fn invert_and_compose() {
        let r = Ranking::new([1, 2, 0]).unwrap();
        let inv = r.invert();
        assert_eq!(inv.map(), &[2, 0, 1]);
        assert!(r.compose(&inv).is_identity());
        assert!(inv.compose(&r).is_identity());
        assert_eq!(r.compose(&Ranking::IDENTITY), r);
        assert_eq!(Ranking::IDENTITY.compose(&r), r);
    }

    #[test]
    fn sorts_checks_the_result() {
        let r = Ranking::new([2, 0, 1]).unwrap();
        assert!(r.sorts(&['c', 'a', 'b']).unwrap());
        assert!(!r.sorts(&['a', 'b', 'c']).unwrap());
    }

    #[test]
    fn random_rankings_are_valid() {
        let mut rng = SmallRng::seed_from_u64(7);
        for len in 0..20 {
            let r = Ranking::random(len, &mut rng);
            assert!(r.len() <= len);
            assert!(Ranking::is_valid(r.map()));
        }
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn decoding_validates_the_table() {
        let config = bincode::config::standard();
        let bytes = bincode::encode_to_vec(vec![5usize], config).unwrap();
        assert!(bincode::decode_from_slice::<Ranking, _>(&bytes, config).is_err());
        assert!(bincode::serde::decode_from_slice::<Ranking, _>(&bytes, config).is_err());

        // untrimmed input comes back trimmed
        let bytes = bincode::encode_to_vec(vec![1usize, 0, 2], config).unwrap();
        let (r, _) = bincode::decode_from_slice::<Ranking, _>(&bytes, config).unwrap();
        assert_eq!(r.map(), &[1, 0]);
        let (r, _) = bincode::serde::decode_from_slice::<Ranking, _>(&bytes, config).unwrap();
        assert_eq!(r.map(), &[1, 0]);

        let r = Ranking::new([2, 0, 1]).unwrap();
        let bytes = bincode::serde::encode_to_vec(&r, config).unwrap();
        let (back, _) = bincode::decode_from_slice::<Ranking, _>(&bytes, config).unwrap();
        assert_eq!(back, r);
    }
}
