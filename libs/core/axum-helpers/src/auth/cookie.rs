//! `Set-Cookie` values for the session token.

use super::token::TOKEN_TTL;

pub const AUTH_COOKIE: &str = "Authorization";

/// `Authorization=<token>; Path=/; Max-Age=604800; HttpOnly[; Secure]`
pub fn session_cookie(token: &str, secure: bool) -> String {
    build(token, TOKEN_TTL, secure)
}

/// Expire the session cookie immediately.
pub fn clear_session_cookie(secure: bool) -> String {
    build("", 0, secure)
}

fn build(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!("{AUTH_COOKIE}={value}; Path=/; Max-Age={max_age}; HttpOnly");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Value of the session cookie in a `Cookie` header, if present and non-empty.
pub fn find_session_token(cookie_header: &str) -> Option<&str> {
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == AUTH_COOKIE && !value.is_empty()).then_some(value)
    })
}
