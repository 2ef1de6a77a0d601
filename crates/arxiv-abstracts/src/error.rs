//! Error types for the abstract corpus pipelines.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::path::PathBuf;
use std::time::Duration;

/// Errors from the arXiv API client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the arXiv API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response, or an error entry in the feed)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The Atom document could not be parsed
    #[error("Failed to parse feed: {0}")]
    Feed(#[from] quick_xml::DeError),

    /// A feed entry is missing data or carries an unparseable value
    #[error("Malformed entry {id}: {message}")]
    MalformedEntry {
        /// Entry identifier as reported by the feed
        id: String,
        /// What was wrong with it
        message: String,
    },

    /// A page came back empty before the advertised total was reached
    #[error("Empty page at offset {offset} (expected {expected} results)")]
    EmptyPage {
        /// Offset of the empty page
        offset: usize,
        /// Total results the feed advertised
        expected: usize,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },

    /// Every retry for a single page failed
    #[error("Giving up on {category} at offset {offset} after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Category being retrieved
        category: String,
        /// Offset of the failing page
        offset: usize,
        /// Number of attempts made
        attempts: u32,
        /// Last error observed
        #[source]
        source: Box<ClientError>,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Create a malformed entry error.
    #[must_use]
    pub fn malformed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedEntry { id: id.into(), message: message.into() }
    }

    /// Returns true if a page fetch that failed with this error may be attempted again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.is_request()
                    || err.is_body()
                    || err.is_decode()
            }
            Self::RateLimited { .. }
            | Self::Timeout(_)
            | Self::Server { .. }
            | Self::EmptyPage { .. } => true,
            _ => false,
        }
    }

    /// Get the retry-after duration if this is a rate limit error.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

/// Errors from the corpus building and cleaning pipelines.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Retrieval from the external index failed
    #[error("Retrieval failed: {0}")]
    Client(#[from] ClientError),

    /// Reading or writing a pipeline file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a JSON array of paper records
    #[error("Invalid dataset {path}: {source}")]
    Dataset {
        /// Dataset file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the corpus failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The taxonomy document could not be parsed
    #[error("Invalid taxonomy: {0}")]
    Taxonomy(#[from] toml::de::Error),

    /// The input path has no usable file stem
    #[error("Cannot derive an output name from {0}")]
    InvalidPath(PathBuf),
}

impl PipelineError {
    /// Create an I/O error bound to a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
