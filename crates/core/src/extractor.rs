//! Top-level function extraction: the single-pass boundary detector.
//!
//! A line is a candidate only while the nesting depth is zero, measured *before* the
//! line's own braces are counted. Two shapes are recognized:
//!
//! - direct: `int add(int x, int y) {`, signature and brace on one line
//! - break: `int add(int x, int y)` followed by a line starting with `{`
//!
//! Unbalanced input is not an error. Once the depth leaves zero for good, no further
//! candidates are recognized; the result reports the final depth so callers can tell.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::nesting::NestingTracker;
use crate::patterns::{is_brace_line, is_declaration_line, is_function_line, signature_prefix};
use crate::types::{Extraction, FunctionSignature, LineMode};

/// Scanner state for one file. Use a fresh instance (or [`FunctionExtractor::reset`])
/// per file.
#[derive(Debug, Clone, Default)]
pub struct FunctionExtractor {
    mode: LineMode,
    nesting: NestingTracker,
    previous_line: String,
    previous_line_no: usize,
    line_no: usize,
    signatures: Vec<FunctionSignature>,
}

impl FunctionExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: LineMode) -> Self {
        Self { mode, ..Self::default() }
    }

    pub fn mode(&self) -> LineMode {
        self.mode
    }

    pub fn depth(&self) -> i32 {
        self.nesting.depth()
    }

    pub fn signatures(&self) -> &[FunctionSignature] {
        &self.signatures
    }

    /// Feed the next physical line of the file. Returns the signature captured by this
    /// line, if any.
    pub fn process_line(&mut self, raw: &str) -> Option<&FunctionSignature> {
        self.line_no += 1;
        let line = self.mode.normalize(raw);
        if line.trim().is_empty() {
            return None;
        }

        let mut captured = None;
        if self.nesting.depth() == 0 {
            if is_function_line(line) {
                captured = Some((signature_prefix(line).to_string(), self.line_no));
            } else if is_brace_line(line) && is_declaration_line(&self.previous_line) {
                captured =
                    Some((signature_prefix(&self.previous_line).to_string(), self.previous_line_no));
            }
        }

        self.previous_line.clear();
        self.previous_line.push_str(line);
        self.previous_line_no = self.line_no;
        self.nesting.feed(line);

        let (signature, line) = captured?;
        debug!(line, signature = signature.as_str(), "Captured function signature");
        self.signatures.push(FunctionSignature { signature, line });
        self.signatures.last()
    }

    /// Return to the initial state, keeping the line mode.
    pub fn reset(&mut self) {
        *self = Self::with_mode(self.mode);
    }

    pub fn finish(self) -> Extraction {
        Extraction {
            signatures: self.signatures,
            final_depth: self.nesting.depth(),
            lines_scanned: self.line_no,
        }
    }
}

/// Extract signatures from in-memory source text.
pub fn extract_str(content: &str, mode: LineMode) -> Extraction {
    let mut extractor = FunctionExtractor::with_mode(mode);
    for line in content.lines() {
        extractor.process_line(line);
    }
    extractor.finish()
}

/// Read `path` and extract its signatures.
pub fn extract_file(path: &Path, mode: LineMode) -> Result<Extraction> {
    let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    let extraction = extract_str(&content, mode);
    if !extraction.is_balanced() {
        warn!(
            path = %path.display(),
            depth = extraction.final_depth,
            "Unbalanced braces or comments; signatures after the imbalance may be missing"
        );
    }
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sigs(content: &str) -> Vec<String> {
        extract_str(content, LineMode::Trimmed)
            .signatures
            .into_iter()
            .map(|s| s.signature)
            .collect()
    }

    #[test]
    fn test_direct_pattern() {
        let out = extract_str("int add(int x, int y) {\n    return x + y;\n}\n", LineMode::Trimmed);
        assert_eq!(out.signatures.len(), 1);
        assert_eq!(out.signatures[0].signature, "int add(int x, int y)");
        assert_eq!(out.signatures[0].line, 1);
        assert_eq!(out.final_depth, 0);
    }

    #[test]
    fn test_break_pattern_matches_direct() {
        let broken = sigs("int add(int x, int y)\n{\n    return x + y;\n}\n");
        let direct = sigs("int add(int x, int y) {\n    return x + y;\n}\n");
        assert_eq!(broken, direct);
        assert_eq!(broken, vec!["int add(int x, int y)"]);
    }

    #[test]
    fn test_break_pattern_reports_declaration_line() {
        let out = extract_str("\nint add(int x, int y)\n{\n}\n", LineMode::Trimmed);
        assert_eq!(out.signatures[0].line, 2);
    }

    #[test]
    fn test_static_excluded() {
        assert!(sigs("static int helper(void) {\n    return 0;\n}\n").is_empty());
        assert!(sigs("static int helper(void)\n{\n    return 0;\n}\n").is_empty());
    }

    #[test]
    fn test_nested_block_not_extracted() {
        let out = sigs("int f() {\nif (x) {\n}\n}\n");
        assert_eq!(out, vec!["int f()"]);
    }

    #[test]
    fn test_calls_inside_body_ignored() {
        let src = "void run(void)\n{\n    setup();\n    while (go())\n    {\n        step();\n    }\n}\n";
        assert_eq!(sigs(src), vec!["void run(void)"]);
    }

    #[test]
    fn test_blank_line_does_not_reset_previous_line() {
        let out = sigs("int add(int x, int y)\n\n{\n}\n");
        assert_eq!(out, vec!["int add(int x, int y)"]);
    }

    #[test]
    fn test_comment_with_brace_does_not_block_extraction() {
        let src = "/*\n * usage: call() {\n */\nint main(void) {\n    return 0;\n}\n";
        let out = extract_str(src, LineMode::Trimmed);
        assert_eq!(out.signatures.len(), 1);
        assert_eq!(out.signatures[0].signature, "int main(void)");
        assert_eq!(out.signatures[0].line, 4);
        assert!(out.is_balanced());
    }

    #[test]
    fn test_declaration_inside_comment_is_skipped_by_depth() {
        let src = "/*\nint fake(void) {\n*/\nint real(void) {\n}\n";
        assert_eq!(sigs(src), vec!["int real(void)"]);
    }

    #[test]
    fn test_prototype_and_struct_lines() {
        // A prototype followed by a struct: the struct opens with an identifier and a
        // brace, so it looks like a definition. The heuristic accepts this.
        let src = "int proto(void);\nstruct point {\n    int x;\n};\n";
        assert_eq!(sigs(src), vec!["struct point"]);
    }

    #[test]
    fn test_unbalanced_input_degrades_silently() {
        let src = "int a() {\n    if (x) {\n}\nint b() {\n}\n";
        let out = extract_str(src, LineMode::Trimmed);
        assert_eq!(out.signatures.len(), 1);
        assert_eq!(out.signatures[0].signature, "int a()");
        assert_eq!(out.final_depth, 1);
        assert!(!out.is_balanced());
    }

    #[test]
    fn test_negative_depth_blocks_candidates() {
        let out = extract_str("}\nint a() {\n}\n", LineMode::Trimmed);
        assert!(out.signatures.is_empty());
        assert_eq!(out.final_depth, -1);
    }

    #[test]
    fn test_raw_mode_requires_column_zero() {
        let src = "  int indented(void) {\n  }\nint flush(void) {\n}\n";
        let raw: Vec<_> =
            extract_str(src, LineMode::Raw).signatures.into_iter().map(|s| s.signature).collect();
        assert_eq!(raw, vec!["int flush(void)"]);
        assert_eq!(sigs(src), vec!["int indented(void)", "int flush(void)"]);
    }

    #[test]
    fn test_indented_brace_line_in_trimmed_mode() {
        assert_eq!(sigs("int add(int x, int y)\n    {\n    }\n"), vec!["int add(int x, int y)"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let src = "int a() {\n}\nvoid b(void)\n{\n}\nstatic void c() {\n}\n";
        assert_eq!(extract_str(src, LineMode::Trimmed), extract_str(src, LineMode::Trimmed));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut ex = FunctionExtractor::with_mode(LineMode::Raw);
        ex.process_line("int a() {");
        assert_eq!(ex.depth(), 1);
        ex.reset();
        assert_eq!(ex.depth(), 0);
        assert!(ex.signatures().is_empty());
        assert_eq!(ex.mode(), LineMode::Raw);
        assert!(ex.process_line("int b() {").is_some());
        assert_eq!(ex.finish().signatures[0].line, 1);
    }

    #[test]
    fn test_process_line_returns_capture() {
        let mut ex = FunctionExtractor::new();
        assert!(ex.process_line("int sum(int n)").is_none());
        let captured = ex.process_line("{").map(|s| s.signature.clone());
        assert_eq!(captured.as_deref(), Some("int sum(int n)"));
        assert!(ex.process_line("}").is_none());
    }

    #[test]
    fn test_final_depth_is_sum_of_deltas() {
        let src = "int f() {\n/* {\n*/\n}\n}\n";
        let expected: i32 = {
            let mut t = NestingTracker::new();
            src.lines().map(|l| t.delta(l)).sum()
        };
        assert_eq!(extract_str(src, LineMode::Trimmed).final_depth, expected);
    }

    #[test]
    fn test_missing_file() {
        let err = extract_file(Path::new("/nonexistent/dir/missing.c"), LineMode::Trimmed)
            .unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }
}
