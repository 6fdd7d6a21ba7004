//! Integer types accepted wherever an index enters the crate.
//!
//! Everything is `usize` internally. Signed callers can still hand over
//! their own integers; negative values are caught here and reported
//! instead of wrapping.

use duplicate::duplicate;

/// A primitive integer usable as a permutation index.
pub trait PermIndex: Copy {
    /// The value as a `usize`, or `None` if it is negative or does not fit.
    fn to_index(self) -> Option<usize>;

    /// The value widened losslessly, for error reports.
    fn widen(self) -> i128;
}

duplicate! {
    [types; [i8]; [i16]; [i32]; [i64]; [isize]; [u8]; [u16]; [u32]; [u64]; [usize]]
    impl PermIndex for types {
        #[inline]
        fn to_index(self) -> Option<usize> {
            usize::try_from(self).ok()
        }

        #[inline]
        fn widen(self) -> i128 {
            self as i128
        }
    }
}
