//! Error types shared by the index, the query engine and the CLI.

use std::path::PathBuf;

/// Result type for index and query operations
pub type Result<T> = std::result::Result<T, IndexError>;

/// Broad classification of an [`IndexError`], used to pick a process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad query or index parameters
    Configuration,
    /// Reference input missing or unreadable
    Io,
    /// An allocation could not be satisfied
    ResourceExhaustion,
}

impl ErrorKind {
    /// Process exit code for this kind of failure
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Configuration => 1,
            ErrorKind::ResourceExhaustion => 3,
            ErrorKind::Io => 8,
        }
    }
}

/// Errors that can occur while building or querying an index
#[derive(Debug)]
pub enum IndexError {
    /// Query length is not a multiple of 4
    QueryLengthNotMultipleOfFour { len: usize },
    /// Query is shorter than the configured minimum
    QueryTooShort { len: usize, min: usize },
    /// Query is longer than the configured maximum
    QueryTooLong { len: usize, max: usize },
    /// Query length differs from the window length the index was built for
    QueryLengthMismatch { len: usize, window_len: usize },
    /// Query could not be decoded as hex
    InvalidHex(String),
    /// Index parameters are unusable
    InvalidConfig(String),
    /// Reference file could not be opened or read
    Reference { path: PathBuf, source: std::io::Error },
    /// Allocation failure while building or querying
    ResourceExhausted { what: &'static str, requested: usize },
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexError::QueryLengthNotMultipleOfFour { .. }
            | IndexError::QueryTooShort { .. }
            | IndexError::QueryTooLong { .. }
            | IndexError::QueryLengthMismatch { .. }
            | IndexError::InvalidHex(_)
            | IndexError::InvalidConfig(_) => ErrorKind::Configuration,
            IndexError::Reference { .. } => ErrorKind::Io,
            IndexError::ResourceExhausted { .. } => ErrorKind::ResourceExhaustion,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::QueryLengthNotMultipleOfFour { len } => {
                write!(f, "query length should be a multiple of 4 (got {})", len)
            }
            IndexError::QueryTooShort { len, min } => {
                write!(f, "query is {} bytes, minimum is {}", len, min)
            }
            IndexError::QueryTooLong { len, max } => {
                write!(f, "query is {} bytes, maximum is {}", len, max)
            }
            IndexError::QueryLengthMismatch { len, window_len } => write!(
                f,
                "query is {} bytes but the index was built for {}-byte windows",
                len, window_len
            ),
            IndexError::InvalidHex(msg) => write!(f, "invalid hex query: {}", msg),
            IndexError::InvalidConfig(msg) => write!(f, "invalid index configuration: {}", msg),
            IndexError::Reference { path, source } => {
                write!(f, "unable to open {}: {}", path.display(), source)
            }
            IndexError::ResourceExhausted { what, requested } => {
                write!(f, "out of memory allocating {} ({} items)", what, requested)
            }
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IndexError::Reference { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Reserve `additional` slots in `vec`, mapping allocation failure to
/// [`IndexError::ResourceExhausted`].
pub(crate) fn try_reserve<T>(vec: &mut Vec<T>, additional: usize, what: &'static str) -> Result<()> {
    vec.try_reserve(additional)
        .map_err(|_| IndexError::ResourceExhausted {
            what,
            requested: additional,
        })
}
