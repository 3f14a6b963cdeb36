//! XSRF token extraction from a cookie string.
//!
//! Pure string handling, available on every target. The HTTP hook that puts
//! the token on outgoing requests lives in [`crate::http::hooks`].

use std::borrow::Cow;

use crate::error::XsrfTokenError;

/// Cookie the backend sets with the CSRF token.
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header the backend expects the token back in.
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Separator between entries of a `document.cookie`-style string.
pub const COOKIE_SEPARATOR: &str = "; ";

/// Find the raw (still encoded) value of the first cookie named `name`.
///
/// Entries are split on `"; "`; the name must match exactly and the value is
/// everything after the first `=`, so values containing `=` survive intact.
pub fn find_cookie<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(COOKIE_SEPARATOR)
        .filter_map(|entry| entry.split_once('='))
        .find(|(entry_name, _)| *entry_name == name)
        .map(|(_, value)| value)
}

/// Extract and URL-decode the XSRF token.
///
/// `Ok(None)` when no `XSRF-TOKEN` cookie is present. Decoding is strict:
/// every `%` must start a two-hex-digit escape and the decoded bytes must be
/// UTF-8. `+` is kept as is.
pub fn xsrf_token(cookies: &str) -> Result<Option<Cow<'_, str>>, XsrfTokenError> {
    find_cookie(cookies, XSRF_COOKIE)
        .map(decode_component)
        .transpose()
}

/// Percent-decode a single cookie value, rejecting malformed escapes.
pub fn decode_component(raw: &str) -> Result<Cow<'_, str>, XsrfTokenError> {
    let bytes = raw.as_bytes();
    for (position, _) in raw.match_indices('%') {
        let escape = bytes.get(position + 1..position + 3);
        if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
            return Err(XsrfTokenError::MalformedEscape { position });
        }
    }
    urlencoding::decode(raw).map_err(XsrfTokenError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(cookies: &str) -> Option<String> {
        xsrf_token(cookies).unwrap().map(Cow::into_owned)
    }

    #[test]
    fn test_encoded_token_is_decoded() {
        assert_eq!(token("XSRF-TOKEN=abc%2Fdef").as_deref(), Some("abc/def"));
    }

    #[test]
    fn test_selects_matching_entry_among_several() {
        assert_eq!(token("FOO=1; XSRF-TOKEN=xyz").as_deref(), Some("xyz"));
        assert_eq!(
            token("a=b; XSRF-TOKEN=first; XSRF-TOKEN=second").as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_missing_cookie_yields_none() {
        assert_eq!(token(""), None);
        assert_eq!(token("FOO=1; BAR=2"), None);
    }

    #[test]
    fn test_name_must_match_exactly() {
        assert_eq!(token("XSRF-TOKEN2=nope; xsrf-token=nope"), None);
        assert_eq!(token("MY-XSRF-TOKEN=nope"), None);
    }

    #[test]
    fn test_entry_without_equals_is_skipped() {
        assert_eq!(token("XSRF-TOKEN; XSRF-TOKEN=ok").as_deref(), Some("ok"));
    }

    #[test]
    fn test_value_keeps_embedded_equals() {
        assert_eq!(token("XSRF-TOKEN=a=b%3D%3D").as_deref(), Some("a=b=="));
    }

    #[test]
    fn test_plus_is_not_a_space() {
        assert_eq!(token("XSRF-TOKEN=a+b").as_deref(), Some("a+b"));
    }

    #[test]
    fn test_separator_requires_space() {
        // `;` without the following space does not start a new entry.
        assert_eq!(find_cookie("FOO=1;XSRF-TOKEN=xyz", XSRF_COOKIE), None);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        assert!(xsrf_token("XSRF-TOKEN=%FF%FE").is_err());
    }

    #[test]
    fn test_escape_needs_two_hex_digits() {
        assert!(matches!(
            xsrf_token("XSRF-TOKEN=ab%zz"),
            Err(XsrfTokenError::MalformedEscape { position: 2 })
        ));
        assert!(matches!(
            xsrf_token("XSRF-TOKEN=abc%E0%A4%A"),
            Err(XsrfTokenError::MalformedEscape { position: 9 })
        ));
        assert!(matches!(
            xsrf_token("XSRF-TOKEN=100%"),
            Err(XsrfTokenError::MalformedEscape { .. })
        ));
    }

    #[test]
    fn test_lone_high_byte_is_an_error() {
        assert!(matches!(
            xsrf_token("XSRF-TOKEN=%FF"),
            Err(XsrfTokenError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_multibyte_escape_decodes() {
        assert_eq!(token("XSRF-TOKEN=%E0%A4%A4").as_deref(), Some("\u{924}"));
        assert_eq!(token("XSRF-TOKEN=%2f%2F").as_deref(), Some("//"));
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(token("XSRF-TOKEN=").as_deref(), Some(""));
    }
}
