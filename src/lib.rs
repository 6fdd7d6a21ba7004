//! # perm-algebra
//!
//! Permutations of `[0, n)` in two interchangeable encodings: a dense
//! [`ranking::Ranking`] (the image table) and sparse [`cycles::Cycles`]
//! (disjoint orbits). The [`permutation::Permutation`] type wraps either one
//! and provides composition, inversion, powers, order and signature.
//!
//! Permutations can also be derived from data: [`sequence::sorting`] finds
//! the ranking that sorts a sequence and [`sequence::from`] the one that
//! rearranges a sequence into another. [`group::symmetric_group`] enumerates
//! all of `S_n` lazily.
//!
//! ```
//! use perm_algebra::Permutation;
//!
//! let sort = Permutation::sorting(&[30, 10, 20]).unwrap();
//! assert_eq!(sort.apply_slice([30, 10, 20]).unwrap(), vec![10, 20, 30]);
//! assert_eq!(sort.to_string(), "(0 2 1)");
//! assert_eq!(sort.order(), 3);
//! ```

pub mod convert;
pub mod cycles;
pub mod error;
pub mod group;
pub mod index;
pub mod permutation;
pub mod ranking;
pub mod sequence;
pub mod transposition;

mod tracing_helpers;

pub use error::{InvalidRanking, PermutationError};
pub use permutation::Permutation;
