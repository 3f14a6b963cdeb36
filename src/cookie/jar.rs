//! Native cookie handling on top of reqwest's cookie jar.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::cookie::CookieSource;

/// Reads the cookies a [`Jar`] would send to `url`.
///
/// With the client's own jar this behaves like `document.cookie` on a page
/// served from the API origin: a `Set-Cookie: XSRF-TOKEN=…` from one response
/// is visible to the next request's hook.
#[derive(Debug, Clone)]
pub struct JarCookies {
    jar: Arc<Jar>,
    url: Url,
}

impl JarCookies {
    pub fn new(jar: Arc<Jar>, url: Url) -> Self {
        Self { jar, url }
    }
}

impl CookieSource for JarCookies {
    fn cookie_string(&self) -> Option<String> {
        let value = self.jar.cookies(&self.url)?;
        String::from_utf8(value.as_bytes().to_vec()).ok()
    }
}

/// Cookie store that only stores and sends cookies for one origin.
///
/// Backs [`CredentialMode::SameOrigin`](crate::shared::CredentialMode) on
/// native targets.
#[derive(Debug)]
pub struct OriginScopedJar {
    base: Url,
    inner: Arc<Jar>,
}

impl OriginScopedJar {
    pub fn new(base: Url, inner: Arc<Jar>) -> Self {
        Self { base, inner }
    }

    fn same_origin(&self, url: &Url) -> bool {
        self.base.origin() == url.origin()
    }
}

impl CookieStore for OriginScopedJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        if self.same_origin(url) {
            self.inner.set_cookies(cookie_headers, url);
        } else {
            tracing::debug!(%url, "Dropping cross-origin Set-Cookie");
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        if self.same_origin(url) {
            self.inner.cookies(url)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_jar_cookies_reads_cookie_string() {
        let jar = Arc::new(Jar::default());
        let base = url("http://localhost:8000/");
        jar.add_cookie_str("FOO=1", &base);
        jar.add_cookie_str("XSRF-TOKEN=abc%2Fdef", &base);

        let source = JarCookies::new(jar, base);
        let cookies = source.cookie_string().unwrap();
        assert!(cookies.contains("FOO=1"));
        assert!(cookies.contains("XSRF-TOKEN=abc%2Fdef"));
        assert!(cookies.contains("; "));
    }

    #[test]
    fn test_jar_cookies_empty_jar() {
        let source = JarCookies::new(Arc::new(Jar::default()), url("http://localhost:8000/"));
        assert_eq!(source.cookie_string(), None);
    }

    #[test]
    fn test_origin_scoped_jar_blocks_other_origins() {
        let inner = Arc::new(Jar::default());
        let base = url("http://localhost:8000/");
        inner.add_cookie_str("session=1", &base);

        let scoped = OriginScopedJar::new(base.clone(), inner.clone());
        assert!(scoped.cookies(&url("http://localhost:8000/users/1")).is_some());
        // Same host, different port: jar would send it, origin scoping must not.
        assert!(scoped.cookies(&url("http://localhost:9000/")).is_none());
        assert!(scoped.cookies(&url("https://localhost:8000/")).is_none());
    }

    #[test]
    fn test_origin_scoped_jar_ignores_cross_origin_set_cookie() {
        let inner = Arc::new(Jar::default());
        let base = url("http://localhost:8000/");
        let scoped = OriginScopedJar::new(base.clone(), inner.clone());

        let header = HeaderValue::from_static("tracker=1");
        let other = url("http://tracker.example/");
        scoped.set_cookies(&mut std::iter::once(&header), &other);
        assert!(inner.cookies(&other).is_none());

        let header = HeaderValue::from_static("XSRF-TOKEN=t");
        scoped.set_cookies(&mut std::iter::once(&header), &base);
        assert!(scoped.cookies(&base).is_some());
    }
}
