//! Filename policy: sanitization, traversal checks, and collision naming.

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// The result is always safe to join onto a collection directory: `/`,
/// `\` and anything else exotic become underscores. Note that `..` alone
/// survives sanitization as a name, which is why [`is_safe_name`] is a
/// separate check applied to caller-supplied names on delete/serve.
pub fn sanitize_filename(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Path-traversal check for caller-supplied names. Rejects empty names and
/// anything containing `..`, `/`, or `\`.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

/// Split a filename into (stem, extension-with-dot). A name without an
/// extension yields an empty extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// The `counter`-th collision candidate for `name`: `foo.glb` -> `foo_1.glb`.
pub fn numbered_candidate(name: &str, counter: u32) -> String {
    let (stem, ext) = split_extension(name);
    format!("{}_{}{}", stem, counter, ext)
}
