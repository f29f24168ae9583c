//! Parallel extraction over collected files
//!
//! Files are read and extracted on the rayon pool, one tree-sitter parser per
//! file, sharing a single [`Extractor`]. Results are merged in input order so
//! the output document is the same from run to run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{HtmlDataError, Result};
use crate::extract::Extractor;
use crate::html_data::{ExtractResult, HtmlData};
use crate::lang::Lang;
use crate::syntax::ParsedSource;

/// Result of extracting a set of files
#[derive(Debug, Default)]
pub struct ExtractionReport {
    /// Merged document
    pub data: HtmlData,
    /// Files that were read and parsed
    pub files_processed: usize,
    /// Files that could not be read or parsed
    pub files_failed: usize,
    /// Source bytes read
    pub total_bytes: usize,
}

/// Extract one file, choosing the grammar from its extension
pub fn extract_file(path: &Path, extractor: &Extractor) -> Result<ExtractResult> {
    let source = fs::read_to_string(path)?;
    extract_file_source(path, &source, extractor)
}

fn extract_file_source(path: &Path, source: &str, extractor: &Extractor) -> Result<ExtractResult> {
    let lang = Lang::from_path(path)?;
    let parsed = ParsedSource::parse(source, lang)?;
    if parsed.has_errors() {
        debug!(path = %path.display(), lang = lang.name(), "syntax errors, extracting what parsed");
    }
    Ok(extractor.extract(&parsed))
}

/// Extract every file in parallel and merge the results in `files` order.
///
/// A file that cannot be read or parsed is logged and counted in
/// [`ExtractionReport::files_failed`]; the rest still contribute.
pub fn extract_files_parallel(files: &[PathBuf], extractor: &Extractor) -> ExtractionReport {
    let total_bytes = AtomicUsize::new(0);

    let results: Vec<Option<ExtractResult>> = files
        .par_iter()
        .map(|path| {
            let extracted = fs::read_to_string(path)
                .map_err(HtmlDataError::from)
                .and_then(|source| {
                    total_bytes.fetch_add(source.len(), Ordering::Relaxed);
                    extract_file_source(path, &source, extractor)
                });

            match extracted {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file");
                    None
                }
            }
        })
        .collect();

    let mut report = ExtractionReport {
        total_bytes: total_bytes.load(Ordering::Relaxed),
        ..Default::default()
    };
    for result in results {
        match result {
            Some(result) => {
                report.files_processed += 1;
                report.data.merge(result);
            }
            None => report.files_failed += 1,
        }
    }

    info!(
        processed = report.files_processed,
        failed = report.files_failed,
        bytes = report.total_bytes,
        tags = report.data.tags.len(),
        global_attributes = report.data.global_attributes.len(),
        "extraction complete"
    );
    report
}

/// Write the document as pretty-printed JSON, creating parent directories
pub fn write_html_data(path: &Path, data: &HtmlData) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, data.to_json_pretty()?)?;
    debug!(path = %path.display(), "wrote html data");
    Ok(())
}
