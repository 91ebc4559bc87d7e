use std::fmt;
use thiserror::Error;

/// The coarse reason a source sequence was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A code-unit run that is not a well-formed encoding of any scalar value.
    IllFormedSequence,
    /// A surrogate that is not one half of a well-formed UTF-16 pair.
    UnpairedSurrogate,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::IllFormedSequence => write!(f, "ill-formed sequence"),
            ErrorKind::UnpairedSurrogate => write!(f, "unpaired surrogate"),
        }
    }
}

/// Where decoding stopped and why.
///
/// `offset` counts source code units, not bytes or code points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} at code unit {offset}")]
pub struct ErrorRecord {
    /// Offset of the first unit of the malformed span.
    pub offset: usize,
    /// What was wrong with it.
    pub kind: ErrorKind,
}

/// The memory strategy refused to hand out storage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("memory strategy refused storage for {requested} more elements")]
pub struct AllocFailure {
    /// How many additional elements were being reserved.
    pub requested: usize,
}

/// A strict-mode pipeline stopped early.
///
/// `Malformed` keeps whatever output was produced for the well-formed prefix
/// of the source.
#[derive(Error, Debug)]
pub enum StrictError<T> {
    /// The source contained a malformed span.
    #[error("{record}")]
    Malformed {
        /// Position and kind of the first malformed span.
        record: ErrorRecord,
        /// Output for the source prefix before `record.offset`.
        partial: T,
    },
    /// The memory strategy failed.
    #[error(transparent)]
    Alloc(#[from] AllocFailure),
}

impl<T> StrictError<T> {
    /// The decode failure, if this is one.
    pub fn record(&self) -> Option<ErrorRecord> {
        match self {
            StrictError::Malformed { record, .. } => Some(*record),
            StrictError::Alloc(_) => None,
        }
    }

    /// Takes the partial output, if this is a decode failure.
    pub fn into_partial(self) -> Option<T> {
        match self {
            StrictError::Malformed { partial, .. } => Some(partial),
            StrictError::Alloc(_) => None,
        }
    }
}

/// Every failure the crate can report, without any partial output attached.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Strict decoding met a malformed span.
    #[error(transparent)]
    Malformed(#[from] ErrorRecord),
    /// The memory strategy failed.
    #[error(transparent)]
    Alloc(#[from] AllocFailure),
}

impl<T> From<StrictError<T>> for Error {
    fn from(err: StrictError<T>) -> Self {
        match err {
            StrictError::Malformed { record, .. } => Error::Malformed(record),
            StrictError::Alloc(failure) => Error::Alloc(failure),
        }
    }
}

/// Result type alias
pub type Result<T, E = Error> = std::result::Result<T, E>;
