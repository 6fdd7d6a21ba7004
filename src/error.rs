use thiserror::Error;

/// Why a sequence of integers is not a ranking of `[0, len)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidRanking {
    #[error("negative value {value} at position {position}")]
    NegativeValue { position: usize, value: i128 },
    #[error("value {value} at position {position} is out of bounds for length {len}")]
    OutOfBounds {
        position: usize,
        value: usize,
        len: usize,
    },
    #[error("value {value} at position {position} appears more than once")]
    Duplicate { position: usize, value: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermutationError {
    #[error("not a ranking: {0}")]
    InvalidRanking(#[from] InvalidRanking),
    #[error("negative index: {0}")]
    NegativeIndex(i128),
    #[error("index {0} is too large: no container can hold it")]
    IndexTooLarge(usize),
    #[error("index {0} appears in more than one place")]
    DuplicateIndex(usize),
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("not a rearrangement: element at position {position} has no free match in the target")]
    NotRearrangement { position: usize },
    #[error("run of equal values around slot {slot} is exhausted")]
    ExhaustedRun { slot: usize },
    #[error("a transposition needs two distinct indexes, got {0} twice")]
    EqualTransposition(usize),
}
