//! Cookie sources, the place the XSRF hook reads the cookie string from.
//!
//! The hook never touches ambient state directly; it is handed a
//! [`CookieSource`] and asks it for a fresh string on every request.
//!
//! | Source             | Target            | Reads                                  |
//! |--------------------|-------------------|----------------------------------------|
//! | [`StaticCookies`]  | any               | a string the caller sets               |
//! | `JarCookies`       | native            | the transport's jar, for the base URL  |
//! | `DocumentCookies`  | wasm32 + `wasm`   | `document.cookie`                      |

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub mod jar;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod browser;

#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub use jar::{JarCookies, OriginScopedJar};

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use browser::DocumentCookies;

use std::sync::RwLock;

/// Capability returning the full cookie string (`a=1; b=2`) visible to the
/// client at the moment of the call.
pub trait CookieSource: Send + Sync {
    fn cookie_string(&self) -> Option<String>;
}

impl<F> CookieSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn cookie_string(&self) -> Option<String> {
        self()
    }
}

/// Caller-managed cookie string.
///
/// Useful in tests and when a server-side renderer forwards the `Cookie`
/// header of the incoming page request.
#[derive(Debug, Default)]
pub struct StaticCookies {
    cookies: RwLock<Option<String>>,
}

impl StaticCookies {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: RwLock::new(Some(cookies.into())),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the cookie string seen by subsequent requests.
    pub fn set(&self, cookies: impl Into<String>) {
        *self.cookies.write().unwrap_or_else(|e| e.into_inner()) = Some(cookies.into());
    }

    pub fn clear(&self) {
        *self.cookies.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl CookieSource for StaticCookies {
    fn cookie_string(&self) -> Option<String> {
        self.cookies
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_cookies_set_and_clear() {
        let cookies = StaticCookies::empty();
        assert_eq!(cookies.cookie_string(), None);

        cookies.set("XSRF-TOKEN=abc");
        assert_eq!(cookies.cookie_string().as_deref(), Some("XSRF-TOKEN=abc"));

        cookies.clear();
        assert_eq!(cookies.cookie_string(), None);
    }

    #[test]
    fn test_closure_is_a_cookie_source() {
        let source = || Some("FOO=1".to_string());
        assert_eq!(source.cookie_string().as_deref(), Some("FOO=1"));
    }
}
