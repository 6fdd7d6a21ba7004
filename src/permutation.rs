//! The permutation value type.
//!
//! A [`Permutation`] is a bijection on the non-negative integers that moves
//! only finitely many of them. It is held either as a dense [`Ranking`] or
//! as sparse [`Cycles`]; every operation accepts either form and two
//! permutations are equal exactly when they have the same effect.

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

use ahash::AHashSet;
use rand::Rng;

use crate::{
    convert::{chase_cycles, cycles_to_ranking, ranking_to_cycles},
    cycles::Cycles,
    error::PermutationError,
    group::SymmetricGroup,
    index::PermIndex,
    ranking::Ranking,
    sequence::{self, Taking},
    tracing_helpers::debug_log,
    transposition::Transposition,
};

/// A finitely supported bijection on `usize`, in ranking or cycle form.
///
/// Applying a permutation to a container moves the element at position `i`
/// to position `p(i)`. Composition reads right to left:
/// `p.compose(&q).apply(i) == p.apply(q.apply(i))`.
///
/// # Examples
///
/// ```
/// use perm_algebra::permutation::Permutation;
///
/// let p = Permutation::cycle([0, 1, 2]).unwrap();
/// let q = Permutation::from_ranking([1, 2, 0]).unwrap();
/// assert_eq!(p, q);
/// assert_eq!(p.apply_str("abc").unwrap(), "cab");
/// assert_eq!(p.to_string(), "(0 1 2)");
/// assert_eq!(p.pow(3), Permutation::identity());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub enum Permutation {
    Ranking(Ranking),
    Cycles(Cycles),
}

impl Default for Permutation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Permutation {
    /// The identity. Every computation that ends up fixing everything
    /// returns this value.
    pub const IDENTITY: Permutation = Permutation::Cycles(Cycles::IDENTITY);

    // --------------------------------------------------------------------------------------------
    // Construction
    // --------------------------------------------------------------------------------------------

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// A permutation from its image table, see [`Ranking::new`].
    pub fn from_ranking<I: PermIndex>(
        values: impl IntoIterator<Item = I>,
    ) -> Result<Self, PermutationError> {
        Ok(Permutation::Ranking(Ranking::new(values)?))
    }

    /// A permutation from disjoint orbits, see [`Cycles::new`].
    pub fn from_cycles<I, O>(orbits: impl IntoIterator<Item = O>) -> Result<Self, PermutationError>
    where
        I: PermIndex,
        O: IntoIterator<Item = I>,
    {
        Ok(Permutation::Cycles(Cycles::new(orbits)?))
    }

    /// The single cycle `a → b → … → a`.
    ///
    /// ```
    /// # use perm_algebra::permutation::Permutation;
    /// let p = Permutation::cycle([3, 5]).unwrap();
    /// assert_eq!(p.apply(3), 5);
    /// assert_eq!(p.apply(5), 3);
    /// assert!(Permutation::cycle([1, 1]).is_err());
    /// ```
    pub fn cycle<I: PermIndex>(
        indexes: impl IntoIterator<Item = I>,
    ) -> Result<Self, PermutationError> {
        Self::from_cycles(std::iter::once(indexes))
    }

    /// A uniformly random permutation of `[0, len)`.
    pub fn random<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        Permutation::Ranking(Ranking::random(len, rng))
    }

    /// The permutation that sorts `seq`, see [`sequence::sorting`].
    pub fn sorting<T: Ord>(seq: &[T]) -> Result<Self, PermutationError> {
        sequence::sorting(seq).map(Permutation::Ranking)
    }

    pub fn sorting_by<T, F>(seq: &[T], compare: F) -> Result<Self, PermutationError>
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        sequence::sorting_by(seq, compare).map(Permutation::Ranking)
    }

    pub fn sorting_by_key<T, K, F>(seq: &[T], key: F) -> Result<Self, PermutationError>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        sequence::sorting_by_key(seq, key).map(Permutation::Ranking)
    }

    /// The permutation rearranging `from` into `to`, see [`sequence::from`].
    pub fn from_to<T: Ord>(from: &[T], to: &[T]) -> Result<Self, PermutationError> {
        sequence::from(from, to).map(Permutation::Ranking)
    }

    /// Starts a `taking(a).to(b)` query.
    pub fn taking<T: Ord>(from: &[T]) -> Taking<'_, T> {
        sequence::taking(from)
    }

    /// Every permutation of `[0, n)`, lazily.
    pub fn symmetric_group(n: usize) -> SymmetricGroup {
        SymmetricGroup::new(n)
    }

    // --------------------------------------------------------------------------------------------
    // Representation
    // --------------------------------------------------------------------------------------------

    /// The dense form, borrowed when already dense.
    pub fn dense(&self) -> Cow<'_, Ranking> {
        match self {
            Permutation::Ranking(r) => Cow::Borrowed(r),
            Permutation::Cycles(c) => Cow::Owned(cycles_to_ranking(c)),
        }
    }

    /// The sparse form, borrowed when already sparse.
    pub fn sparse(&self) -> Cow<'_, Cycles> {
        match self {
            Permutation::Ranking(r) => Cow::Owned(ranking_to_cycles(r)),
            Permutation::Cycles(c) => Cow::Borrowed(c),
        }
    }

    pub fn to_ranking(&self) -> Ranking {
        self.dense().into_owned()
    }

    pub fn to_cycles(&self) -> Cycles {
        self.sparse().into_owned()
    }

    pub fn into_ranking(self) -> Ranking {
        match self {
            Permutation::Ranking(r) => r,
            Permutation::Cycles(c) => cycles_to_ranking(&c),
        }
    }

    pub fn into_cycles(self) -> Cycles {
        match self {
            Permutation::Ranking(r) => ranking_to_cycles(&r),
            Permutation::Cycles(c) => c,
        }
    }

    pub fn is_identity(&self) -> bool {
        match self {
            Permutation::Ranking(r) => r.is_identity(),
            Permutation::Cycles(c) => c.is_identity(),
        }
    }

    /// The largest index that is not fixed, or 0 for the identity.
    pub fn max_moved_index(&self) -> usize {
        match self {
            Permutation::Ranking(r) => r.max_moved_index(),
            Permutation::Cycles(c) => c.max_moved_index(),
        }
    }

    /// Smallest container length this permutation can act on:
    /// `max_moved_index() + 1`, or 0 for the identity.
    pub fn domain_len(&self) -> usize {
        match self {
            Permutation::Ranking(r) => r.len(),
            Permutation::Cycles(c) => c.domain_len(),
        }
    }

    /// Number of orbits of length at least two.
    pub fn num_cycles(&self) -> usize {
        self.sparse().num_cycles()
    }

    // --------------------------------------------------------------------------------------------
    // Application
    // --------------------------------------------------------------------------------------------

    /// The image of `i`; every index beyond the moved range is fixed.
    pub fn apply(&self, i: usize) -> usize {
        match self {
            Permutation::Ranking(r) => r.apply(i),
            Permutation::Cycles(c) => c.apply(i),
        }
    }

    /// [`Permutation::apply`] for any primitive integer.
    ///
    /// # Errors
    ///
    /// [`PermutationError::NegativeIndex`] if `i` is negative.
    pub fn try_apply<I: PermIndex>(&self, i: I) -> Result<usize, PermutationError> {
        let index = i
            .to_index()
            .ok_or(PermutationError::NegativeIndex(i.widen()))?;
        Ok(self.apply(index))
    }

    /// The preimage of `i`. Linear in the size of a dense table.
    pub fn un_apply(&self, i: usize) -> usize {
        match self {
            Permutation::Ranking(r) => r.map().iter().position(|&j| j == i).unwrap_or(i),
            Permutation::Cycles(c) => c.un_apply(i),
        }
    }

    /// A copy of `slice` with the element at `i` moved to `p(i)`.
    ///
    /// # Errors
    ///
    /// [`PermutationError::LengthMismatch`] if `slice` is shorter than
    /// [`Permutation::domain_len`].
    pub fn apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        match self {
            Permutation::Ranking(r) => r.apply_slice(slice),
            Permutation::Cycles(c) => c.apply_slice(slice),
        }
    }

    pub fn un_apply_slice<T: Clone, S: AsRef<[T]>>(
        &self,
        slice: S,
    ) -> Result<Vec<T>, PermutationError> {
        match self {
            Permutation::Ranking(r) => r.un_apply_slice(slice),
            Permutation::Cycles(c) => c.un_apply_slice(slice),
        }
    }

    /// Rearranges `slice` in place, without cloning its elements.
    pub fn apply_in_place<T>(&self, slice: &mut [T]) -> Result<(), PermutationError> {
        self.sparse().apply_in_place(slice)
    }

    pub fn un_apply_in_place<T>(&self, slice: &mut [T]) -> Result<(), PermutationError> {
        self.sparse().un_apply_in_place(slice)
    }

    /// [`Permutation::apply_slice`] over the characters of `s`.
    pub fn apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let mut chars: Vec<char> = s.chars().collect();
        self.apply_in_place(&mut chars)?;
        Ok(chars.into_iter().collect())
    }

    /// [`Permutation::un_apply_slice`] over the characters of `s`.
    pub fn un_apply_str(&self, s: &str) -> Result<String, PermutationError> {
        let mut chars: Vec<char> = s.chars().collect();
        self.un_apply_in_place(&mut chars)?;
        Ok(chars.into_iter().collect())
    }

    /// Whether applying this permutation to `seq` leaves it sorted.
    pub fn sorts<T: Ord + Clone>(&self, seq: &[T]) -> Result<bool, PermutationError> {
        self.dense().sorts(seq)
    }

    // --------------------------------------------------------------------------------------------
    // Algebra
    // --------------------------------------------------------------------------------------------

    pub fn invert(&self) -> Self {
        match self {
            Permutation::Ranking(r) => Permutation::Ranking(r.invert()),
            Permutation::Cycles(c) => Permutation::Cycles(c.invert()),
        }
    }

    /// `self ∘ other`, sending `i` to `self(other(i))`.
    ///
    /// Two dense operands give a dense result; anything involving cycles is
    /// chased into cycle form.
    ///
    /// ```
    /// # use perm_algebra::permutation::Permutation;
    /// let p = Permutation::cycle([0, 1]).unwrap();
    /// let q = Permutation::cycle([1, 2]).unwrap();
    /// assert_eq!(p.compose(&q), Permutation::cycle([0, 1, 2]).unwrap());
    /// assert_eq!(q.compose(&p), Permutation::cycle([0, 2, 1]).unwrap());
    /// ```
    pub fn compose(&self, other: &Permutation) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        match (self, other) {
            (Permutation::Ranking(p), Permutation::Ranking(q)) => {
                Permutation::Ranking(p.compose(q))
            }
            _ => {
                let (outer, inner) = (self.dense(), other.dense());
                let len = outer.len().max(inner.len());
                let orbits = chase_cycles(len, |i| outer.apply(inner.apply(i)));
                Permutation::Cycles(Cycles::from_orbits_unchecked(orbits))
            }
        }
    }

    /// `self ∘ (indexes)`, for the cycle through `indexes`.
    pub fn compose_cycle<I: PermIndex>(
        &self,
        indexes: impl IntoIterator<Item = I>,
    ) -> Result<Self, PermutationError> {
        Ok(self.compose(&Self::cycle(indexes)?))
    }

    /// `by ∘ self ∘ by⁻¹`: the same cycle structure with every index `i`
    /// renamed to `by(i)`.
    pub fn conjugate(&self, by: &Permutation) -> Self {
        by.compose(self).compose(&by.invert())
    }

    /// Left fold of [`Permutation::compose`] from the identity, so that
    /// `product([p, q]).apply(i) == p.apply(q.apply(i))`.
    pub fn product<'a>(factors: impl IntoIterator<Item = &'a Permutation>) -> Self {
        factors
            .into_iter()
            .fold(Self::IDENTITY, |acc, p| acc.compose(p))
    }

    /// `self` composed with itself `k` times; negative `k` uses the inverse.
    ///
    /// ```
    /// # use perm_algebra::permutation::Permutation;
    /// let p = Permutation::cycle([0, 1, 2, 3]).unwrap();
    /// assert_eq!(p.pow(2), p.compose(&p));
    /// assert_eq!(p.pow(-1), p.invert());
    /// assert!(p.pow(0).is_identity());
    /// assert!(p.pow(8).is_identity());
    /// ```
    pub fn pow(&self, k: isize) -> Self {
        if k == 0 || self.is_identity() {
            return Self::IDENTITY;
        }
        let mut base = (if k < 0 { self.invert() } else { self.clone() }).into_ranking();
        let mut exp = k.unsigned_abs();
        let mut result = Ranking::IDENTITY;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.compose(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.compose(&base);
            }
        }
        Permutation::Ranking(result)
    }

    /// The smallest `k ≥ 1` with `self^k = id`, found by repeated composition.
    pub fn order(&self) -> usize {
        let step = self.to_ranking();
        let mut current = step.clone();
        let mut order = 1;
        while !current.is_identity() {
            current = current.compose(&step);
            order += 1;
        }
        debug_log!(order, "computed permutation order");
        order
    }

    /// `+1` if this is a product of an even number of transpositions, else `-1`.
    pub fn signature(&self) -> i8 {
        self.sparse().signature()
    }

    /// Transpositions whose [`Transposition::product`] is `self`.
    ///
    /// An orbit `[a, b, c, …]` contributes `(a b), (b c), …` in that order.
    pub fn transpositions(&self) -> Vec<Transposition> {
        self.sparse()
            .orbits()
            .iter()
            .flat_map(|orbit| {
                orbit
                    .windows(2)
                    .map(|w| Transposition::new_unchecked(w[0], w[1]))
            })
            .collect()
    }

    /// Every element of the group generated by `generators`, identity included.
    pub fn span(generators: &[Permutation]) -> Vec<Permutation> {
        let mut seen = AHashSet::new();
        seen.insert(Self::IDENTITY);
        let mut stack = vec![Self::IDENTITY];

        while let Some(current) = stack.pop() {
            for g in generators {
                let next = current.compose(g);
                if seen.insert(next.clone()) {
                    stack.push(next);
                }
            }
        }

        debug_log!(size = seen.len(), "spanned group");
        seen.into_iter().collect()
    }
}

impl From<Ranking> for Permutation {
    fn from(ranking: Ranking) -> Self {
        Permutation::Ranking(ranking)
    }
}

impl From<Cycles> for Permutation {
    fn from(cycles: Cycles) -> Self {
        Permutation::Cycles(cycles)
    }
}

impl PartialEq for Permutation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Permutation::Cycles(a), Permutation::Cycles(b)) => a == b,
            _ => self.max_moved_index() == other.max_moved_index() && self.dense() == other.dense(),
        }
    }
}

impl Eq for Permutation {}

impl Hash for Permutation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dense().hash(state);
    }
}

/// Canonical cycle notation, `id` for the identity.
impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sparse())
    }
}
