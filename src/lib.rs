//! # webapp-api
//!
//! Client-side plumbing for the web application: the API client every part
//! of the app talks to the backend through, and the front-end framework
//! declaration. Builds for native targets and for `wasm32` in the browser.
//!
//! ## Architecture
//!
//! 1. **Core** — shared enums, XSRF cookie parsing, framework declaration (always available, WASM-safe)
//! 2. **Cookies** — `CookieSource` capability: static string, reqwest jar (native), `document.cookie` (WASM)
//! 3. **HTTP** — `ApiHttp`: base-URL resolution, per-call options, before-request hooks
//! 4. **Client** — `ApiClient` + builder: `Accept: application/json`, credentials, XSRF forwarding
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use webapp_api::prelude::*;
//!
//! // Base URL from `API_URL`, else http://localhost:8000
//! let api = ApiClient::from_env()?;
//!
//! let resp = api.get("users/1", RequestOptions::new()).await?;
//! let user: serde_json::Value = resp.json().await?;
//!
//! api.post("users", RequestOptions::new().json(&serde_json::json!({ "name": "ada" }))?)
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared enums used across modules.
pub mod shared;

/// Unified SDK error types.
pub mod error;

/// Base URL constants and environment lookup.
pub mod network;

/// XSRF token extraction from a cookie string.
pub mod xsrf;

/// Front-end framework module declaration.
pub mod framework;

// ── Layer 2: Cookies ─────────────────────────────────────────────────────────

/// Cookie sources read by the XSRF hook.
pub mod cookie;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Low-level HTTP client, request options and hooks.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Client ──────────────────────────────────────────────────────────

/// `ApiClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::{ColorMode, CredentialMode};

    pub use crate::error::{FrameworkError, SdkError, XsrfTokenError};
    #[cfg(feature = "http")]
    pub use crate::error::HttpError;

    pub use crate::network::{API_URL_ENV, DEFAULT_API_URL};

    pub use crate::xsrf::{XSRF_COOKIE, XSRF_HEADER};

    pub use crate::framework::{ColorModeConfig, FrameworkConfig, ShadcnConfig};

    pub use crate::cookie::{CookieSource, StaticCookies};
    #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
    pub use crate::cookie::{JarCookies, OriginScopedJar};
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub use crate::cookie::DocumentCookies;

    #[cfg(feature = "http")]
    pub use crate::client::{ApiClient, ApiClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{BeforeRequestHook, RequestBody, RequestOptions, XsrfHook};
}
