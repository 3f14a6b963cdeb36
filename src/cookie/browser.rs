//! Browser cookie source backed by `document.cookie`.

use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::cookie::CookieSource;

/// Reads `document.cookie` of the current window on every call.
///
/// HTTP-only cookies are invisible here, exactly as they are to page scripts;
/// the backend must issue `XSRF-TOKEN` without the `HttpOnly` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentCookies;

impl CookieSource for DocumentCookies {
    fn cookie_string(&self) -> Option<String> {
        let document = web_sys::window()?.document()?;
        let html_doc = document.dyn_ref::<HtmlDocument>()?;
        html_doc.cookie().ok()
    }
}
