//! cheader: generate C headers from the top-level functions of a source file.
//!
//! The extractor is a line-oriented heuristic, not a C parser. It tracks brace and block
//! comment nesting and treats a line as a function boundary only at depth zero.
//!
//! # Modules
//!
//! - [`nesting`]: Brace and block-comment depth tracking
//! - [`patterns`]: Line classification predicates
//! - [`extractor`]: Single-pass function signature extraction
//! - [`directives`]: Include guards and preserved preprocessor lines
//! - [`header`]: Header rendering and writing
//! - [`batch`]: Directory discovery and parallel export
//! - [`types`]: Shared types and configuration
//! - [`error`]: Error type

pub mod batch;
pub mod directives;
pub mod error;
pub mod extractor;
pub mod header;
pub mod nesting;
pub mod patterns;
pub mod types;

use std::path::Path;

use tracing::{debug, warn};

pub use error::{Error, Result};
pub use extractor::{extract_file, extract_str, FunctionExtractor};
pub use header::{export_file, header_path_for, HeaderPlan};
pub use types::*;

// ---------------------------------------------------------------------------
// .cheader.toml config loading
// ---------------------------------------------------------------------------

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = ".cheader.toml";

/// Known keys in `.cheader.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["line_mode", "guard_suffix", "extensions", "skip_dirs"];

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Load `.cheader.toml` from `project_root`. See [`load_config`].
pub fn load_project_config(project_root: &Path) -> HeaderConfig {
    load_config(&project_root.join(CONFIG_FILE_NAME))
}

/// Load configuration from a TOML file.
///
/// Returns defaults merged with any overrides from the file. A missing file yields plain
/// defaults; an unreadable or unparsable one yields defaults with a warning. Unknown keys
/// trigger a warning with a typo suggestion.
pub fn load_config(config_path: &Path) -> HeaderConfig {
    let mut config = HeaderConfig::default();
    if !config_path.exists() {
        return config;
    }

    debug!(path = %config_path.display(), "Loading config");
    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "Could not read config; using defaults");
            return config;
        }
    };
    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %config_path.display(), error = %e, "Invalid TOML in config; using defaults");
            return config;
        }
    };

    // Validate keys, warn on unknown
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS
            .iter()
            .min_by_key(|k| edit_distance(key, k))
            .copied()
            .unwrap_or_default();
        if edit_distance(key, suggestion) <= 3 {
            warn!(
                key = key.as_str(),
                suggestion,
                "Unknown key in {CONFIG_FILE_NAME}; did you mean '{suggestion}'?"
            );
        } else {
            warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            );
        }
    }

    if let Some(mode) = table.get("line_mode").and_then(|v| v.as_str()) {
        match LineMode::from_name(mode) {
            Some(m) => config.line_mode = m,
            None => warn!(value = mode, "Unknown line_mode (expected 'trimmed' or 'raw')"),
        }
    }

    if let Some(suffix) = table.get("guard_suffix").and_then(|v| v.as_str()) {
        config.guard_suffix = suffix.to_string();
    }

    // extensions replace the defaults
    if let Some(exts) = table.get("extensions").and_then(|v| v.as_array()) {
        config.extensions = exts
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.trim_start_matches('.').to_string()))
            .collect();
    }

    // skip_dirs merge with the defaults
    if let Some(dirs) = table.get("skip_dirs").and_then(|v| v.as_array()) {
        for d in dirs {
            if let Some(s) = d.as_str() {
                config.skip_dirs.insert(s.to_string());
            }
        }
    }

    config
}
