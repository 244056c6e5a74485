use std::path::PathBuf;

use gadget_core::ValidationError;
use thiserror::Error;

/// Error type for dataset fetches.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("Failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Invalid dataset: {0}")]
    Invalid(#[from] ValidationError),
}

/// Trait for retrieving the raw dataset document.
pub trait DatasetSource: Send + Sync {
    fn fetch_document(
        &self,
    ) -> impl std::future::Future<Output = Result<String, FetchError>> + Send;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Dataset document served over HTTP(S).
pub struct HttpDatasetSource {
    client: reqwest::Client,
    url: String,
}

impl HttpDatasetSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl DatasetSource for HttpDatasetSource {
    async fn fetch_document(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Dataset document on the local filesystem.
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileDatasetSource {
    async fn fetch_document(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A source picked at runtime from a URL or a path.
pub enum SourceLocation {
    Http(HttpDatasetSource),
    File(FileDatasetSource),
}

impl SourceLocation {
    /// `http://` and `https://` locations are fetched over the network,
    /// anything else is read as a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            SourceLocation::Http(HttpDatasetSource::new(location))
        } else {
            SourceLocation::File(FileDatasetSource::new(location))
        }
    }
}

impl DatasetSource for SourceLocation {
    async fn fetch_document(&self) -> Result<String, FetchError> {
        match self {
            SourceLocation::Http(source) => source.fetch_document().await,
            SourceLocation::File(source) => source.fetch_document().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            SourceLocation::Http(source) => source.describe(),
            SourceLocation::File(source) => source.describe(),
        }
    }
}
