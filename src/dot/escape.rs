//! Escaping of arbitrary diagnostic text for DOT record labels.

/// Left-justified line break inside a DOT record label.
pub const LINE_BREAK: &str = "\\l";

/// Escape arbitrary diagnostic text for use inside a quoted record label.
///
/// Literal backslashes are removed up front so the escape characters
/// introduced below are never stripped. This is lossy, but it matches the
/// diagnostic output existing tooling expects byte for byte.
pub fn escape(text: &str) -> String {
    text.replace('\\', "")
        .replace('/', "\\/")
        .replace('>', "\\>")
        .replace('<', "\\<")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('"', "\\\"")
        .replace('-', "\\-")
        .replace('|', "\\|")
        .replace('\n', LINE_BREAK)
}

/// Map a method short id to a filesystem-safe file stem.
///
/// Signatures contain characters like `(`, `;` and `/` that are not welcome
/// in file names, so everything outside a small safe set becomes `_`.
pub fn file_name(short_id: &str) -> String {
    short_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
