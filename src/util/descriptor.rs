//! Reader for the `build.config` project descriptor.
//!
//! The descriptor is plain key/value text:
//!
//! ```text
//! # comment
//! build_type = lib
//! ignore = "test.c", "scratch.c"
//! ```
//!
//! Keys and values may be separated by `=` or `:`. Lines starting with `#`,
//! `;` or `//` are comments. The reader does not interpret values; every
//! entry is handed to a callback in file order.

/// Stream every `(key, value)` pair of `text` to `on_entry`.
///
/// Keys are trimmed and lowercased, values are trimmed. Lines without a
/// separator or with an empty key are skipped with a debug note.
pub fn parse_entries<F>(text: &str, mut on_entry: F)
where
    F: FnMut(&str, &str),
{
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || is_comment(line) {
            continue;
        }

        let Some(split) = line.find(['=', ':']) else {
            tracing::debug!("build.config:{}: ignoring line without a key", lineno + 1);
            continue;
        };

        let key = line[..split].trim().to_ascii_lowercase();
        let value = line[split + 1..].trim();
        if key.is_empty() {
            tracing::debug!("build.config:{}: ignoring empty key", lineno + 1);
            continue;
        }

        on_entry(&key, value);
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#') || line.starts_with(';') || line.starts_with("//")
}

/// Split a comma-separated list, dropping empty entries.
pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Strip one layer of matching surrounding quotes (`"` or `'`).
pub fn strip_quotes(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
