//! Errors raised while validating entries or performing a draw.

/// Errors for drawings.
///
/// None of these are transient: given the same inputs the same error comes
/// back, so callers should not retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// Malformed input: a zero bound, zero weight, empty id, zero count or a
    /// duplicate id.
    InvalidArgument(String),
    /// More picks were requested than the population holds.
    OutOfRange {
        /// Number of picks asked for.
        requested: usize,
        /// Total weight available.
        available: u64,
    },
    /// A population slot referred to an id the repository could not resolve.
    ///
    /// This means the repository changed underneath a draw (or reports ids it
    /// cannot look up), which is a contract violation on the repository side.
    NotFound(String),
    /// The entropy source failed to produce bytes.
    Entropy(String),
}

impl DrawError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::OutOfRange {
                requested,
                available,
            } => write!(
                f,
                "cannot select {requested} entries from a population of {available}"
            ),
            Self::NotFound(id) => write!(f, "entry {id:?} not found in repository"),
            Self::Entropy(msg) => write!(f, "entropy source failed: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {}
