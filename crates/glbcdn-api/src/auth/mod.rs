//! Authentication: the API-key guard on mutating routes and the admin
//! session cookie.

pub mod api_key;
pub mod session;

pub use api_key::RequireApiKey;

use subtle::ConstantTimeEq;

/// Constant-time string comparison for secrets. Length is not secret here
/// (both sides are caller-supplied or configuration).
pub(crate) fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
