//! Before-request hooks.
//!
//! Hooks run on the built request: URL, query, per-call headers and body are
//! in place. The client's default headers (`Accept` and any builder headers)
//! and jar cookies are merged by the transport afterwards, and only where the
//! request does not already carry that header. Hooks run in registration
//! order; the first error aborts the request.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Request;

use crate::cookie::CookieSource;
use crate::error::{HttpError, XsrfTokenError};
use crate::xsrf::{xsrf_token, XSRF_HEADER};

/// A function invoked immediately before a request is sent.
pub trait BeforeRequestHook: Send + Sync {
    fn before_request(&self, request: &mut Request) -> Result<(), HttpError>;
}

impl<F> BeforeRequestHook for F
where
    F: Fn(&mut Request) -> Result<(), HttpError> + Send + Sync,
{
    fn before_request(&self, request: &mut Request) -> Result<(), HttpError> {
        self(request)
    }
}

/// Ordered hook list shared by all clones of a client.
#[derive(Clone, Default)]
pub struct Hooks {
    before_request: Vec<Arc<dyn BeforeRequestHook>>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: Arc<dyn BeforeRequestHook>) {
        self.before_request.push(hook);
    }

    pub fn len(&self) -> usize {
        self.before_request.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before_request.is_empty()
    }

    pub fn run_before_request(&self, request: &mut Request) -> Result<(), HttpError> {
        for hook in &self.before_request {
            hook.before_request(request)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("before_request", &self.before_request.len())
            .finish()
    }
}

/// Copies the `XSRF-TOKEN` cookie into the `X-XSRF-TOKEN` header.
///
/// The cookie string is read from the source on every request. A token with a
/// malformed escape, non-UTF-8 bytes, or characters a header cannot carry
/// aborts the request with [`HttpError::Xsrf`].
pub struct XsrfHook {
    cookies: Arc<dyn CookieSource>,
}

impl XsrfHook {
    pub fn new(cookies: Arc<dyn CookieSource>) -> Self {
        Self { cookies }
    }

    /// Set the header on `headers`. Returns whether a token was found.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<bool, XsrfTokenError> {
        let Some(cookies) = self.cookies.cookie_string() else {
            return Ok(false);
        };
        let Some(token) = xsrf_token(&cookies)? else {
            return Ok(false);
        };

        let value =
            HeaderValue::from_str(&token).map_err(|_| XsrfTokenError::InvalidHeaderValue)?;
        headers.insert(XSRF_HEADER, value);
        Ok(true)
    }
}

impl BeforeRequestHook for XsrfHook {
    fn before_request(&self, request: &mut Request) -> Result<(), HttpError> {
        if let Err(e) = self.apply(request.headers_mut()) {
            tracing::warn!(url = %request.url(), "Refusing to send request: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::StaticCookies;
    use reqwest::{Method, Url};

    fn request() -> Request {
        Request::new(
            Method::GET,
            Url::parse("http://localhost:8000/users/1").unwrap(),
        )
    }

    fn hook(cookies: &str) -> XsrfHook {
        XsrfHook::new(Arc::new(StaticCookies::new(cookies)))
    }

    #[test]
    fn test_xsrf_hook_sets_decoded_header() {
        let mut req = request();
        hook("XSRF-TOKEN=abc%2Fdef").before_request(&mut req).unwrap();
        assert_eq!(req.headers().get(XSRF_HEADER).unwrap(), "abc/def");
    }

    #[test]
    fn test_xsrf_hook_without_cookie_leaves_request_alone() {
        let mut req = request();
        hook("FOO=1").before_request(&mut req).unwrap();
        assert!(req.headers().get(XSRF_HEADER).is_none());

        let mut req = request();
        XsrfHook::new(Arc::new(StaticCookies::empty()))
            .before_request(&mut req)
            .unwrap();
        assert!(req.headers().is_empty());
    }

    #[test]
    fn test_xsrf_hook_replaces_caller_header() {
        let mut req = request();
        req.headers_mut()
            .insert(XSRF_HEADER, HeaderValue::from_static("stale"));
        hook("XSRF-TOKEN=fresh").before_request(&mut req).unwrap();
        assert_eq!(req.headers().get(XSRF_HEADER).unwrap(), "fresh");
    }

    #[test]
    fn test_xsrf_hook_rejects_malformed_token() {
        for cookies in [
            "XSRF-TOKEN=%zz",
            "XSRF-TOKEN=abc%E0%A4%A",
            "XSRF-TOKEN=%FF",
            // Decodes to a newline, which a header value cannot carry.
            "XSRF-TOKEN=a%0Ab",
        ] {
            let mut req = request();
            let err = hook(cookies).before_request(&mut req).unwrap_err();
            assert!(matches!(err, HttpError::Xsrf(_)), "{cookies}: {err}");
            assert!(req.headers().get(XSRF_HEADER).is_none());
        }
    }

    #[test]
    fn test_xsrf_hook_apply_reports_presence() {
        let mut headers = HeaderMap::new();
        assert!(!hook("FOO=1").apply(&mut headers).unwrap());
        assert!(hook("XSRF-TOKEN=t").apply(&mut headers).unwrap());
        assert!(matches!(
            hook("XSRF-TOKEN=%FF").apply(&mut headers),
            Err(XsrfTokenError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_xsrf_hook_reads_cookies_per_request() {
        let cookies = Arc::new(StaticCookies::empty());
        let hook = XsrfHook::new(cookies.clone());

        let mut first = request();
        hook.before_request(&mut first).unwrap();
        assert!(first.headers().get(XSRF_HEADER).is_none());

        cookies.set("XSRF-TOKEN=later");
        let mut second = request();
        hook.before_request(&mut second).unwrap();
        assert_eq!(second.headers().get(XSRF_HEADER).unwrap(), "later");
    }

    #[test]
    fn test_hooks_run_in_order_and_stop_on_error() {
        let mut hooks = Hooks::new();
        hooks.push(Arc::new(|req: &mut Request| -> Result<(), HttpError> {
            req.headers_mut()
                .insert("x-order", HeaderValue::from_static("first"));
            Ok(())
        }));
        hooks.push(Arc::new(|req: &mut Request| -> Result<(), HttpError> {
            req.headers_mut()
                .insert("x-order", HeaderValue::from_static("second"));
            Ok(())
        }));
        let mut req = request();
        hooks.run_before_request(&mut req).unwrap();
        assert_eq!(req.headers().get("x-order").unwrap(), "second");

        hooks.push(Arc::new(|_: &mut Request| -> Result<(), HttpError> {
            Err(HttpError::Hook("refused".into()))
        }));
        hooks.push(Arc::new(|req: &mut Request| -> Result<(), HttpError> {
            req.headers_mut()
                .insert("x-after", HeaderValue::from_static("unreachable"));
            Ok(())
        }));
        let mut req = request();
        assert!(matches!(
            hooks.run_before_request(&mut req),
            Err(HttpError::Hook(_))
        ));
        assert!(req.headers().get("x-after").is_none());
        assert_eq!(hooks.len(), 4);
    }
}
