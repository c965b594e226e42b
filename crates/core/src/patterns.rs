//! Line classification predicates.
//!
//! Each predicate looks at one line of text in isolation. Nesting depth and the previous
//! line are the extractor's business, not theirs.

/// Keyword that keeps a definition out of the header.
const STATIC_KEYWORD: &str = "static";

/// True if the first character can start a C identifier (`[A-Za-z0-9_]`).
pub fn starts_with_identifier(line: &str) -> bool {
    line.as_bytes().first().is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Declaration-only pattern: identifier start, not `static`. No brace required.
///
/// Any line starting with the letters `static` is rejected, including identifiers such
/// as `staticky`.
pub fn is_declaration_line(line: &str) -> bool {
    starts_with_identifier(line) && !line.starts_with(STATIC_KEYWORD)
}

/// Direct pattern: a declaration with its opening brace on the same line.
pub fn is_function_line(line: &str) -> bool {
    is_declaration_line(line) && line.contains('{')
}

/// Break pattern: the line opens with `{` once surrounding whitespace is ignored.
pub fn is_brace_line(line: &str) -> bool {
    line.trim_start().starts_with('{')
}

/// Text before the first `{`, trimmed. The whole line (trimmed) when there is no brace.
pub fn signature_prefix(line: &str) -> &str {
    match line.find('{') {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}
