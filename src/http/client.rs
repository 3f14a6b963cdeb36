//! Low-level HTTP client — `ApiHttp`.
//!
//! Resolves relative paths against the base URL, applies per-call options,
//! runs the before-request hooks and hands the request to reqwest. The
//! response comes back untouched: no status branching, no body parsing, no
//! retry.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Response, Url};

use crate::error::HttpError;
use crate::http::hooks::Hooks;
use crate::http::options::{RequestBody, RequestOptions};
use crate::shared::CredentialMode;
use crate::xsrf::XSRF_HEADER;

/// Low-level client shared by every clone of [`ApiClient`](crate::client::ApiClient).
#[derive(Clone)]
pub struct ApiHttp {
    /// Normalized, always ends with exactly one `/`.
    base_url: String,
    client: Client,
    credentials: CredentialMode,
    hooks: Hooks,
}

impl ApiHttp {
    pub(crate) fn new(
        base_url: String,
        client: Client,
        credentials: CredentialMode,
        hooks: Hooks,
    ) -> Self {
        Self {
            base_url,
            client,
            credentials,
            hooks,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> CredentialMode {
        self.credentials
    }

    /// Resolve a relative path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        join_path(&self.base_url, path)
    }

    /// Build the request exactly as it would be sent, hooks included.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Request, HttpError> {
        let url = self.resolve(path)?;
        let RequestOptions {
            headers,
            query,
            body,
        } = options;

        let has_content_type = headers.contains_key(CONTENT_TYPE);
        let mut req = self.client.request(method, url);

        if !headers.is_empty() {
            req = req.headers(headers);
        }
        if !query.is_empty() {
            req = req.query(&query);
        }

        req = match body {
            Some(RequestBody::Json(value)) => req.json(&value),
            Some(RequestBody::Text(text)) if has_content_type => req.body(text),
            Some(RequestBody::Text(text)) => req
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/plain;charset=UTF-8"),
                )
                .body(text),
            Some(RequestBody::Bytes(bytes)) => req.body(bytes),
            None => req,
        };

        // Native transports get cookie policy from the client's cookie provider.
        #[cfg(target_arch = "wasm32")]
        {
            req = match self.credentials {
                CredentialMode::Omit => req.fetch_credentials_omit(),
                CredentialMode::SameOrigin => req.fetch_credentials_same_origin(),
                CredentialMode::Include => req.fetch_credentials_include(),
            };
        }

        let mut request = req.build()?;
        self.hooks.run_before_request(&mut request)?;
        Ok(request)
    }

    /// Build, hook and send a request; the response is returned unmodified.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, HttpError> {
        let request = self.build_request(method, path, options)?;

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            xsrf = request.headers().contains_key(XSRF_HEADER),
            "Sending request"
        );

        Ok(self.client.execute(request).await?)
    }
}

impl std::fmt::Debug for ApiHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiHttp")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("hooks", &self.hooks)
            .finish()
    }
}

/// Validate a base URL and normalize it to end with a single `/`.
///
/// Only absolute `http`/`https` URLs without query or fragment are accepted,
/// since paths are appended to the string form.
pub fn normalize_base_url(base_url: &str) -> Result<String, HttpError> {
    let invalid = |reason: &str| HttpError::InvalidUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(base_url.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment"));
    }

    Ok(format!("{}/", url.as_str().trim_end_matches('/')))
}

/// Append a relative path to a normalized base URL.
///
/// A leading `/` is rejected rather than silently resolved against the host
/// root, so `users/1` and `/users/1` cannot mean different things by accident.
pub fn join_path(base_url: &str, path: &str) -> Result<Url, HttpError> {
    if path.starts_with('/') {
        return Err(HttpError::LeadingSlash(path.to_string()));
    }

    let joined = format!("{}{}", base_url, path);
    Url::parse(&joined).map_err(|e| HttpError::InvalidUrl {
        url: joined,
        reason: e.to_string(),
    })
}
