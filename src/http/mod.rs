//! HTTP client layer — `ApiHttp`, request options and before-request hooks.

pub mod client;
pub mod hooks;
pub mod options;

pub use client::ApiHttp;
pub use hooks::{BeforeRequestHook, Hooks, XsrfHook};
pub use options::{RequestBody, RequestOptions};
