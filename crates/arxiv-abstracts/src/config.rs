//! Configuration for the arXiv retrieval client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// arXiv Atom query endpoint.
    pub const QUERY_URL: &str = "http://export.arxiv.org/api/query";

    /// Results requested per page. arXiv accepts up to 2000 per call.
    pub const PAGE_SIZE: usize = 2000;

    /// Upper bound on results collected for a single category.
    pub const MAX_RESULTS: usize = 50_000;

    /// Fixed delay before every page request (arXiv asks for at least 3s).
    pub const PAGE_DELAY: Duration = Duration::from_secs(5);

    /// Retries allowed for a single page before the run is aborted.
    pub const MAX_RETRIES: u32 = 50;

    /// Request timeout. Full pages of 2000 entries are several megabytes.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// User agent sent with every request.
    pub const USER_AGENT: &str = concat!("arxiv-abstracts/", env!("CARGO_PKG_VERSION"));
}

/// Retrieval client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Query endpoint (overridable for testing with mock servers).
    pub query_url: String,

    /// Results requested per page.
    pub page_size: usize,

    /// Result cap per category.
    pub max_results: usize,

    /// Delay before each page request.
    pub page_delay: Duration,

    /// Retry budget per page.
    pub max_retries: u32,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration with the production defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query_url: api::QUERY_URL.to_string(),
            page_size: api::PAGE_SIZE,
            max_results: api::MAX_RESULTS,
            page_delay: api::PAGE_DELAY,
            max_retries: api::MAX_RETRIES,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            query_url: format!("{}/api/query", base_url),
            page_size: 10,
            max_results: 1000,
            page_delay: Duration::from_millis(0), // No delay in tests
            max_retries: 2,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables, falling back to defaults.
    ///
    /// Recognised variables: `ARXIV_API_URL`, `ARXIV_PAGE_SIZE`, `ARXIV_MAX_RESULTS`,
    /// `ARXIV_PAGE_DELAY_SECS`, `ARXIV_MAX_RETRIES`.
    ///
    /// # Errors
    ///
    /// Returns error if a numeric variable does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::new();

        if let Ok(url) = std::env::var("ARXIV_API_URL") {
            config.query_url = url;
        }
        if let Some(size) = env_number("ARXIV_PAGE_SIZE")? {
            config.page_size = size;
        }
        if let Some(cap) = env_number("ARXIV_MAX_RESULTS")? {
            config.max_results = cap;
        }
        if let Some(secs) = env_number("ARXIV_PAGE_DELAY_SECS")? {
            config.page_delay = Duration::from_secs(secs);
        }
        if let Some(retries) = env_number("ARXIV_MAX_RETRIES")? {
            config.max_retries = retries;
        }

        anyhow::ensure!(config.page_size > 0, "ARXIV_PAGE_SIZE must be positive");
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn env_number<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid value for {name}: {e}"))?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
