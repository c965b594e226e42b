//! Multi-file export: directory discovery and parallel processing.
//!
//! Every file gets its own [`HeaderPlan`] and therefore its own extractor, so files can
//! be processed in parallel without sharing scanner state.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::header::HeaderPlan;
use crate::types::{ExportReport, HeaderConfig};

/// Expand command-line paths into source files.
///
/// Directories are walked (hidden entries, `.gitignore`d files and `skip_dirs` are
/// left out) for files with a configured extension. Other paths are passed through
/// unchanged, even if they do not exist, so the caller sees a missing-file error for
/// them. The result is sorted and deduplicated.
pub fn collect_sources(paths: &[PathBuf], config: &HeaderConfig) -> Vec<PathBuf> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, config, &mut sources);
        } else {
            sources.push(path.clone());
        }
    }
    sources.sort();
    sources.dedup();
    sources
}

fn walk_dir(dir: &Path, config: &HeaderConfig, out: &mut Vec<PathBuf>) {
    let skip = config.skip_dirs.clone();
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .filter_entry(move |entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !skip.contains(name.as_ref());
            }
            true
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let ext = entry.path().extension().and_then(|e| e.to_str()).unwrap_or("");
        if config.extensions.contains(ext) {
            out.push(entry.into_path());
        }
    }
}

/// Build a header plan for every source, in parallel. Output order matches `sources`.
pub fn plan_all(sources: &[PathBuf], config: &HeaderConfig) -> Vec<(PathBuf, Result<HeaderPlan>)> {
    sources.par_iter().map(|s| (s.clone(), HeaderPlan::build(s, config))).collect()
}

/// Export every source to its header, in parallel. Output order matches `sources`.
pub fn export_all(
    sources: &[PathBuf],
    config: &HeaderConfig,
) -> Vec<(PathBuf, Result<ExportReport>)> {
    sources
        .par_iter()
        .map(|s| (s.clone(), HeaderPlan::build(s, config).and_then(|plan| plan.write())))
        .collect()
}
