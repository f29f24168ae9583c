//! File collection and parallel extraction
//!
//! Used by the CLI to turn a file pattern into one [`HtmlData`] document.
//!
//! # Key Features
//!
//! - **Glob selection**: include/exclude globs via the `ignore` crate
//! - **Parallel Processing**: Uses Rayon for multi-threaded extraction
//! - **Error Handling**: Counts unreadable files without stopping the run
//!
//! # Example
//!
//! ```ignore
//! use ng_html_data::indexing::{collect_files, extract_files_parallel, write_html_data};
//! use ng_html_data::Extractor;
//!
//! let files = collect_files(&cwd, "src/**/*.ts", &["**/*.spec.ts".to_string()])?;
//! let report = extract_files_parallel(&files, &Extractor::new());
//! write_html_data(&cwd.join("custom.html-data.json"), &report.data)?;
//! ```
//!
//! [`HtmlData`]: crate::html_data::HtmlData

mod files;
mod generation;

pub use files::{collect_files, should_skip_path, split_glob_root};
pub use generation::{extract_file, extract_files_parallel, write_html_data, ExtractionReport};
