//! Sorted `key=value` properties encoding.
//!
//! One entry per line, keys in lexicographic order, UTF-8, `\n` line endings.
//! No timestamp or comment header is written, so the output depends only on
//! the mapping.

use std::fmt::Write as _;

use confnorm_model::FlatConfig;

/// Render `map` as sorted properties text.
pub fn render(map: &FlatConfig) -> String {
    let mut out = String::new();
    for (key, value) in map.sorted() {
        escape_into(&mut out, key, true);
        out.push('=');
        escape_into(&mut out, value, false);
        out.push('\n');
    }
    out
}

/// Escape one key or value. Spaces are escaped everywhere in keys and only in
/// leading position in values.
fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for (i, ch) in text.chars().enumerate() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
}
