//! Header rendering and export.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::directives::{self, DirectiveSource, Directives};
use crate::error::{Error, Result};
use crate::extractor::extract_file;
use crate::types::{ExportReport, Extraction, FunctionSignature, HeaderConfig};

/// Closing marker of every generated header.
pub const HEADER_END: &str = "#endif";

/// Header path for a source file: every `.c` in the file name becomes `.h`.
///
/// Only the file name is rewritten, so `lib.core/x.c` maps to `lib.core/x.h`. Within
/// the name the substitution is not anchored: `a.c.c` maps to `a.h.h`.
pub fn header_path_for(source: &Path) -> PathBuf {
    let Some(name) = source.file_name() else {
        return source.to_path_buf();
    };
    let header_name = name.to_string_lossy().replace(".c", ".h");
    match source.parent() {
        Some(parent) => parent.join(header_name),
        None => PathBuf::from(header_name),
    }
}

/// Directives, then each signature as `sig;` followed by a blank line, then `#endif`.
pub fn render(directives: &Directives, signatures: &[FunctionSignature]) -> String {
    let mut out = String::new();
    for line in &directives.lines {
        out.push_str(line);
        out.push('\n');
    }
    if !directives.lines.is_empty() {
        out.push('\n');
    }
    for sig in signatures {
        out.push_str(&sig.declaration());
        out.push_str("\n\n");
    }
    out.push_str(HEADER_END);
    out.push('\n');
    out
}

pub fn write_header(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::from_io(path, e))
}

/// Everything needed to produce one header, computed but not yet written.
#[derive(Debug, Clone)]
pub struct HeaderPlan {
    pub source: PathBuf,
    pub header: PathBuf,
    pub extraction: Extraction,
    pub directives: Directives,
}

impl HeaderPlan {
    /// Scan `source` and prepare directives for its header.
    pub fn build(source: &Path, config: &HeaderConfig) -> Result<Self> {
        let header = header_path_for(source);
        if header == source {
            return Err(Error::SameOutputPath(source.to_path_buf()));
        }
        let extraction = extract_file(source, config.line_mode)?;
        let directives = directives::prepare(&header, &config.guard_suffix)?;
        Ok(Self { source: source.to_path_buf(), header, extraction, directives })
    }

    pub fn render(&self) -> String {
        render(&self.directives, &self.extraction.signatures)
    }

    pub fn write(&self) -> Result<ExportReport> {
        write_header(&self.header, &self.render())?;
        info!(
            header = %self.header.display(),
            signatures = self.extraction.signatures.len(),
            "Wrote header"
        );
        Ok(self.report())
    }

    pub fn report(&self) -> ExportReport {
        ExportReport {
            source: self.source.clone(),
            header: self.header.clone(),
            signatures: self.extraction.signatures.len(),
            preserved_directives: self.directives.source == DirectiveSource::Preserved,
            final_depth: self.extraction.final_depth,
        }
    }
}

/// Scan `source` and write its header next to it.
pub fn export_file(source: &Path, config: &HeaderConfig) -> Result<ExportReport> {
    HeaderPlan::build(source, config)?.write()
}
