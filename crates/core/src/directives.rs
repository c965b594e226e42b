//! Preprocessor directives at the top of a generated header.
//!
//! An existing header keeps the directives its author wrote (guards, includes, macros)
//! up to the first declaration. A new header gets a synthesized include guard.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::patterns::is_declaration_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveSource {
    Preserved,
    Synthesized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directives {
    /// Directive lines without terminators.
    pub lines: Vec<String>,
    pub source: DirectiveSource,
}

/// Include-guard symbol for a header: file name uppercased, `.` replaced by `_`, then
/// `suffix`. `include/vec.h` with suffix `_` gives `VEC_H_`.
pub fn guard_symbol(header: &Path, suffix: &str) -> String {
    let name = header
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| header.to_string_lossy().into_owned());
    format!("{}{}", name.to_uppercase().replace('.', "_"), suffix)
}

/// `#ifndef` / `#define` pair for a header that does not exist yet.
pub fn synthesize(header: &Path, suffix: &str) -> Directives {
    let guard = guard_symbol(header, suffix);
    Directives {
        lines: vec![format!("#ifndef {guard}"), format!("#define {guard}")],
        source: DirectiveSource::Synthesized,
    }
}

/// Collect directive lines from header text.
///
/// Every non-blank line containing `#` is kept verbatim, up to and including the first
/// line that looks like a declaration; that line ends the scan. Brace nesting is not
/// tracked here. If the text has no declaration at all, a final `#endif` is dropped,
/// since the writer closes the header itself.
pub fn collect_directives(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut reached_declaration = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if line.contains('#') {
            lines.push(line.trim_end().to_string());
        }
        if is_declaration_line(trimmed) {
            reached_declaration = true;
            break;
        }
    }

    if !reached_declaration && lines.last().is_some_and(|l| l.trim().starts_with("#endif")) {
        lines.pop();
    }
    lines
}

/// Directives preserved from an existing header file.
pub fn read_preserved(header: &Path) -> Result<Directives> {
    let content = fs::read_to_string(header).map_err(|e| Error::from_io(header, e))?;
    Ok(Directives { lines: collect_directives(&content), source: DirectiveSource::Preserved })
}

/// Preserved directives if `header` exists, otherwise a synthesized guard.
pub fn prepare(header: &Path, guard_suffix: &str) -> Result<Directives> {
    if header.exists() {
        read_preserved(header)
    } else {
        Ok(synthesize(header, guard_suffix))
    }
}
