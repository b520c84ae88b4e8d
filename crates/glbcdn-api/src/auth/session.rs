//! Admin session cookie.
//!
//! Opaque token: base64 of `"<unix_millis>-<random>"`. Validation re-checks
//! the embedded timestamp against the 24 hour window; there is no server-side
//! session store.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};

pub const ADMIN_COOKIE_NAME: &str = "glb-viewer-admin-session";

const SESSION_MAX_AGE_SECS: i64 = 24 * 60 * 60;

pub fn create_session_token() -> String {
    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();
    BASE64.encode(format!("{}-{}", Utc::now().timestamp_millis(), suffix))
}

/// A token is valid when it decodes, carries a parseable timestamp, and that
/// timestamp is within the session window (tokens from the future fail).
pub fn is_valid_session(token: &str) -> bool {
    let Ok(decoded) = BASE64.decode(token) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((millis, _)) = decoded.split_once('-') else {
        return false;
    };
    let Ok(issued) = millis.parse::<i64>() else {
        return false;
    };
    let age = Utc::now().timestamp_millis() - issued;
    (0..SESSION_MAX_AGE_SECS * 1000).contains(&age)
}

/// Pull the admin session token out of a `Cookie` request header.
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        pair.trim()
            .strip_prefix(ADMIN_COOKIE_NAME)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

/// `Set-Cookie` value establishing the admin session.
pub fn session_cookie(token: &str, secure: bool) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
        ADMIN_COOKIE_NAME,
        token,
        SESSION_MAX_AGE_SECS,
        if secure { "; Secure" } else { "" }
    )
}

/// `Set-Cookie` value clearing the admin session.
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        ADMIN_COOKIE_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_valid() {
        let token = create_session_token();
        assert!(is_valid_session(&token));
    }

    #[test]
    fn test_garbage_tokens_are_invalid() {
        assert!(!is_valid_session(""));
        assert!(!is_valid_session("not-base64!!"));
        assert!(!is_valid_session(&BASE64.encode("no-timestamp-here")));
        assert!(!is_valid_session(&BASE64.encode("12345nodash")));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let issued = Utc::now().timestamp_millis() - (SESSION_MAX_AGE_SECS * 1000 + 1);
        let token = BASE64.encode(format!("{}-abc", issued));
        assert!(!is_valid_session(&token));
    }

    #[test]
    fn test_future_token_is_invalid() {
        let issued = Utc::now().timestamp_millis() + 60_000;
        let token = BASE64.encode(format!("{}-abc", issued));
        assert!(!is_valid_session(&token));
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            token_from_cookie_header("glb-viewer-admin-session=abc123"),
            Some("abc123")
        );
        assert_eq!(
            token_from_cookie_header("theme=dark; glb-viewer-admin-session=abc123; lang=en"),
            Some("abc123")
        );
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("glb-viewer-admin-session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("tok", true).contains("; Secure"));

        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
