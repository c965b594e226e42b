//! Core types shared across cheader: line normalization modes, extracted signatures,
//! extraction results, export reports, and runtime configuration.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Line normalization
// ---------------------------------------------------------------------------

/// How raw source lines are normalized before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// Strip surrounding whitespace. Indented definitions are still recognized.
    #[default]
    Trimmed,
    /// Strip only the line terminator. Only definitions starting in column 0 match.
    Raw,
}

impl LineMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "trimmed" | "trim" => Some(LineMode::Trimmed),
            "raw" => Some(LineMode::Raw),
            _ => None,
        }
    }

    pub fn normalize<'a>(&self, line: &'a str) -> &'a str {
        match self {
            LineMode::Trimmed => line.trim(),
            LineMode::Raw => line.trim_end_matches(['\n', '\r']),
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction results
// ---------------------------------------------------------------------------

/// A top-level function signature: the definition line up to its opening brace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    pub signature: String,
    /// 1-based line the signature text was taken from.
    pub line: usize,
}

impl FunctionSignature {
    /// The signature as a header declaration, terminated with `;`.
    pub fn declaration(&self) -> String {
        format!("{};", self.signature)
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}

/// Everything one scan of a source file produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub signatures: Vec<FunctionSignature>,
    /// Nesting depth after the last line. Non-zero means unbalanced braces or comments.
    pub final_depth: i32,
    pub lines_scanned: usize,
}

impl Extraction {
    pub fn is_balanced(&self) -> bool {
        self.final_depth == 0
    }
}

/// Outcome of exporting one source file to its header.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub source: PathBuf,
    pub header: PathBuf,
    pub signatures: usize,
    /// True when directives were carried over from an existing header.
    pub preserved_directives: bool,
    pub final_depth: i32,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Runtime configuration. Loaded from `.cheader.toml` or defaults.
#[derive(Debug, Clone)]
pub struct HeaderConfig {
    pub line_mode: LineMode,
    /// Appended to synthesized include-guard symbols.
    pub guard_suffix: String,
    /// Source extensions picked up when walking directories.
    pub extensions: HashSet<String>,
    /// Directory names to skip during walk.
    pub skip_dirs: HashSet<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            line_mode: LineMode::default(),
            guard_suffix: "_".to_string(),
            extensions: ["c"].iter().map(|s| s.to_string()).collect(),
            skip_dirs: [".git", "build", "target", "node_modules"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
