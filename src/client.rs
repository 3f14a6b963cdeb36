//! High-level client — `ApiClient` and its builder.
//!
//! Construct one client at startup and hand clones to whatever needs to talk
//! to the backend. Clones share the transport, the cookie state and the hook
//! list.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method, Request, Response};

#[cfg(not(target_arch = "wasm32"))]
use reqwest::cookie::Jar;

use crate::cookie::CookieSource;
use crate::error::{HttpError, SdkError};
use crate::http::client::normalize_base_url;
use crate::http::{ApiHttp, BeforeRequestHook, Hooks, RequestOptions, XsrfHook};
use crate::shared::CredentialMode;

/// Media type sent in `Accept` on every request.
pub const ACCEPT_JSON: &str = "application/json";

/// The application's API client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) http: ApiHttp,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Client with every default: base URL from `API_URL` (or
    /// `http://localhost:8000`), credentials `include`, platform cookie source.
    pub fn from_env() -> Result<Self, SdkError> {
        Self::builder().build()
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn credentials(&self) -> CredentialMode {
        self.http.credentials()
    }

    /// The low-level client, for building requests without sending them.
    pub fn http(&self) -> &ApiHttp {
        &self.http
    }

    // ── Requests ─────────────────────────────────────────────────────────

    /// Send `method` to `path` (relative to the base URL).
    ///
    /// Transport errors are returned as [`HttpError::Transport`] untouched.
    /// Non-2xx responses are not errors; check the status yourself.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, HttpError> {
        self.http.send(method, path, options).await
    }

    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::POST, path, options).await
    }

    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::PUT, path, options).await
    }

    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::PATCH, path, options).await
    }

    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::DELETE, path, options).await
    }

    pub async fn head(&self, path: &str, options: RequestOptions) -> Result<Response, HttpError> {
        self.request(Method::HEAD, path, options).await
    }

    /// Build the request `request` would send, hooks applied.
    pub fn prepare(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Request, HttpError> {
        self.http.build_request(method, path, options)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ApiClientBuilder {
    base_url: Option<String>,
    env_lookup: Box<dyn Fn(&str) -> Option<String>>,
    credentials: CredentialMode,
    headers: Vec<(String, String)>,
    cookie_source: Option<Arc<dyn CookieSource>>,
    #[cfg(not(target_arch = "wasm32"))]
    cookie_jar: Option<Arc<Jar>>,
    hooks: Vec<Arc<dyn BeforeRequestHook>>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            env_lookup: Box::new(|key| std::env::var(key).ok()),
            credentials: CredentialMode::default(),
            headers: Vec::new(),
            cookie_source: None,
            #[cfg(not(target_arch = "wasm32"))]
            cookie_jar: None,
            hooks: Vec::new(),
        }
    }
}

impl ApiClientBuilder {
    /// Explicit base URL; takes precedence over `API_URL`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Replace the environment lookup used to read `API_URL`.
    pub fn env_lookup(mut self, lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.env_lookup = Box::new(lookup);
        self
    }

    pub fn credentials(mut self, mode: CredentialMode) -> Self {
        self.credentials = mode;
        self
    }

    /// Extra default header. `Accept: application/json` is always sent and
    /// cannot be replaced here; override it per call instead.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Where the XSRF hook reads cookies from.
    ///
    /// Defaults to the transport's cookie jar on native targets and to
    /// `document.cookie` in the browser (`wasm` feature).
    pub fn cookie_source(mut self, source: Arc<dyn CookieSource>) -> Self {
        self.cookie_source = Some(source);
        self
    }

    /// Share a cookie jar with the transport (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn cookie_jar(mut self, jar: Arc<Jar>) -> Self {
        self.cookie_jar = Some(jar);
        self
    }

    /// Register a hook that runs after the XSRF hook.
    pub fn before_request(mut self, hook: impl BeforeRequestHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<ApiClient, SdkError> {
        let raw_base = match self.base_url {
            Some(url) => url,
            None => crate::network::api_url_from_lookup(&self.env_lookup),
        };
        let base_url = normalize_base_url(&raw_base)?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SdkError::Validation(format!("header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| SdkError::Validation(format!("header {}: {}", name, e)))?;
            default_headers.append(name, value);
        }
        default_headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
        let mut builder = Client::builder().default_headers(default_headers);

        #[cfg(not(target_arch = "wasm32"))]
        let default_source: Arc<dyn CookieSource> = {
            use crate::cookie::{JarCookies, OriginScopedJar};

            let base = reqwest::Url::parse(&base_url)
                .map_err(|e| SdkError::Validation(format!("base URL {}: {}", base_url, e)))?;
            let jar = self.cookie_jar.unwrap_or_default();
            builder = match self.credentials {
                CredentialMode::Include => builder.cookie_provider(jar.clone()),
                CredentialMode::SameOrigin => builder
                    .cookie_provider(Arc::new(OriginScopedJar::new(base.clone(), jar.clone()))),
                CredentialMode::Omit => builder,
            };
            Arc::new(JarCookies::new(jar, base))
        };

        #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
        let default_source: Arc<dyn CookieSource> = Arc::new(crate::cookie::DocumentCookies);

        #[cfg(all(target_arch = "wasm32", not(feature = "wasm")))]
        let default_source: Arc<dyn CookieSource> =
            Arc::new(crate::cookie::StaticCookies::empty());

        let client = builder
            .build()
            .map_err(|e| SdkError::Validation(format!("failed to build HTTP client: {}", e)))?;

        let mut hooks = Hooks::new();
        hooks.push(Arc::new(XsrfHook::new(
            self.cookie_source.unwrap_or(default_source),
        )));
        for hook in self.hooks {
            hooks.push(hook);
        }

        tracing::debug!(
            base_url = %base_url,
            credentials = %self.credentials,
            hooks = hooks.len(),
            "Built API client"
        );

        Ok(ApiClient {
            http: ApiHttp::new(base_url, client, self.credentials, hooks),
        })
    }
}
