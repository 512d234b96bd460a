use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// The URL is malformed or not http(s); rejected before any request
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The uploaded document type cannot be turned into text
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Input is empty or otherwise unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The page did not answer within the configured timeout
    #[error("Import failed: {url} did not respond within {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// DNS or connection failure
    #[error("Import failed: could not reach {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("Import failed: {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Any other transport failure (body read, redirects, TLS)
    #[error("Import failed: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Neither structured data nor the fallbacks produced a titled recipe
    #[error("Could not extract recipe data")]
    NoRecipeFound,

    /// The OCR backend failed to produce text
    #[error("OCR failed: {0}")]
    OcrError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ImportError {
    /// Bad input from the caller; retrying the same request will not help.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ImportError::InvalidUrl(_)
                | ImportError::UnsupportedMediaType(_)
                | ImportError::InvalidInput(_)
        )
    }

    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ImportError::Timeout { .. }
                | ImportError::Unreachable { .. }
                | ImportError::HttpStatus { .. }
                | ImportError::FetchError(_)
        )
    }

    /// The source was read but held no usable recipe; a different input
    /// should be suggested.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, ImportError::NoRecipeFound | ImportError::OcrError(_))
    }
}
