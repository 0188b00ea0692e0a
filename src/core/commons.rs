// src/core/commons.rs

//! Helpers for placing values in generated shell code.

use shlex::QuoteError;

/// Quotes a value as a single shell word. Safe words are left untouched.
pub fn quote(value: &str) -> Result<String, QuoteError> {
    shlex::try_quote(value).map(|q| q.into_owned())
}

/// Escapes text for an unquoted here-document, where `\`, `$` and backquotes are still expanded.
pub fn heredoc_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
