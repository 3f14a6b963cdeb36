//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Framework config error: {0}")]
    Framework(#[from] FrameworkError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// HTTP-layer errors.
///
/// Transport failures are passed through untouched; the remaining variants
/// are raised before anything is sent.
#[cfg(feature = "http")]
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Path must not begin with a slash when using a base URL: {0}")]
    LeadingSlash(String),

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Body serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Before-request hook failed: {0}")]
    Hook(String),

    #[error("XSRF token rejected: {0}")]
    Xsrf(#[from] XsrfTokenError),
}

/// Reasons an `XSRF-TOKEN` cookie cannot be forwarded.
#[derive(Error, Debug)]
pub enum XsrfTokenError {
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },

    #[error("decoded token is not UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("decoded token is not a valid header value")]
    InvalidHeaderValue,
}

/// Errors loading or validating a [`FrameworkConfig`](crate::framework::FrameworkConfig).
#[derive(Error, Debug)]
pub enum FrameworkError {
    #[error("Failed to parse framework config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read framework config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Module name must not be empty")]
    EmptyModuleName,

    #[error("Module declared twice: {0}")]
    DuplicateModule(String),

    #[error("Section `{section}` requires module `{module}`")]
    MissingModule {
        section: &'static str,
        module: &'static str,
    },

    #[error("shadcn.componentDir must not be empty")]
    EmptyComponentDir,
}
