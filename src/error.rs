//! Anifetch error types

/// Anifetch error types.
///
/// Variants carry rendered messages rather than foreign error values so the
/// enum stays `Clone`: a coalesced cache miss hands the same failure to every
/// waiting caller.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AnifetchError {
    // Remote service errors
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with anything other than `200 OK`.
    ///
    /// Redirect targets, rate limits and server errors all land here.
    #[error("not found (HTTP {status})")]
    NotFound { status: u16 },

    #[error("decode error: {0}")]
    Decode(String),

    // Aggregation errors
    /// A unit of a concurrent batch failed. `index` is the input position of
    /// the unit whose error is reported.
    #[error("batch item {index} failed: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<AnifetchError>,
    },

    #[error("{failed} of {total} downloads failed")]
    MultipleFailures { failed: usize, total: usize },

    // Local errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl AnifetchError {
    /// Whether the remote reported the entity as unavailable.
    ///
    /// Looks through [`Batch`](Self::Batch) wrappers.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Batch { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Whether the remote could not be reached at all.
    ///
    /// Looks through [`Batch`](Self::Batch) wrappers.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Batch { source, .. } => source.is_transport(),
            _ => false,
        }
    }

    /// The innermost error, unwrapping any [`Batch`](Self::Batch) layers.
    pub fn root(&self) -> &AnifetchError {
        match self {
            Self::Batch { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<std::io::Error> for AnifetchError {
    fn from(err: std::io::Error) -> Self {
        AnifetchError::Io(err.to_string())
    }
}

/// Result type alias for anifetch operations
pub type Result<T> = std::result::Result<T, AnifetchError>;
