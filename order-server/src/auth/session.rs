//! Session cookie
//!
//! The staff session travels in an http-only `jwt` cookie. Header values are
//! built by hand: the format is small and fixed.

use http::{HeaderMap, HeaderValue, header};

pub const SESSION_COOKIE: &str = "jwt";

/// Extract the session token from the `Cookie` headers
pub fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> HeaderValue {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| clear_cookie(secure))
}

/// `Set-Cookie` value that removes the session
pub fn clear_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("jwt=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("jwt=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
    }
}
