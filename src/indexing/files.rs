//! File collection for extraction
//!
//! Files are selected with a gitignore-style glob relative to a root
//! directory, minus any exclude globs. The include glob is anchored at the
//! root, so `src/*.ts` only picks direct children of `src`. Hidden entries
//! and common build or dependency directories are never entered.
//!
//! `.gitignore`, `.ignore` and git exclude files are not consulted: a file
//! matching the glob is extracted whether or not git tracks it.

use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{HtmlDataError, Result};
use crate::Lang;

/// Collect the TypeScript files matching `pattern` under `root`.
///
/// # Arguments
///
/// * `root` - Directory a relative `pattern` is resolved against
/// * `pattern` - Include glob, e.g. `src/**/*.ts` or an absolute glob
/// * `excludes` - Globs removed from the selection, matched relative to the
///   literal directory prefix of `pattern`
///
/// # Returns
///
/// Matching files sorted by path. Declaration files (`.d.ts`) are left out.
pub fn collect_files(root: &Path, pattern: &str, excludes: &[String]) -> Result<Vec<PathBuf>> {
    let (base, glob) = split_glob_root(pattern);
    let walk_root = if base.is_absolute() {
        base
    } else if base == Path::new(".") {
        root.to_path_buf()
    } else {
        root.join(base)
    };

    if !walk_root.is_dir() {
        return Err(HtmlDataError::FileNotFound {
            path: walk_root.display().to_string(),
        });
    }

    let mut overrides = OverrideBuilder::new(&walk_root);
    overrides
        .add(&anchored(&glob))
        .map_err(|e| invalid_pattern(pattern, e))?;
    for exclude in excludes {
        overrides
            .add(&format!("!{exclude}"))
            .map_err(|e| invalid_pattern(exclude, e))?;
    }
    let overrides = overrides.build().map_err(|e| invalid_pattern(pattern, e))?;

    let walker = WalkBuilder::new(&walk_root)
        .standard_filters(false)
        .overrides(overrides)
        .filter_entry(|entry| entry.depth() == 0 || !should_skip_path(entry.path()))
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| Lang::from_path(path).is_ok() && !Lang::is_declaration_file(path))
        .collect();

    files.sort();
    debug!(root = %walk_root.display(), glob = %glob, count = files.len(), "collected files");
    Ok(files)
}

/// Split a glob into its literal leading directory and the remaining glob.
///
/// `src/app/**/*.ts` becomes (`src/app`, `**/*.ts`); a pattern with no
/// literal prefix is rooted at `.`. The last component always stays in the
/// glob, so `src/main.ts` becomes (`src`, `main.ts`).
pub fn split_glob_root(pattern: &str) -> (PathBuf, String) {
    let normalized = pattern.replace('\\', "/");
    let components: Vec<&str> = normalized.split('/').collect();

    let literal = components
        .iter()
        .take_while(|component| !has_glob_meta(component))
        .count()
        .min(components.len().saturating_sub(1));

    let root = components[..literal].join("/");
    let glob = components[literal..].join("/");

    let root = match root.as_str() {
        "" if normalized.starts_with('/') => PathBuf::from("/"),
        "" => PathBuf::from("."),
        _ => PathBuf::from(root),
    };
    (root, glob)
}

/// Check if a path should be skipped during file collection.
///
/// Skips:
/// - Hidden files/directories (starting with '.')
/// - Dependency and build output directories: node_modules, dist, build, etc.
pub fn should_skip_path(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        name.starts_with('.')
            || name == "node_modules"
            || name == "target"
            || name == "dist"
            || name == "build"
            || name == "coverage"
            || name == "out-tsc"
    } else {
        false
    }
}

/// Gitignore globs without a slash match at any depth; pin them to the root.
fn anchored(glob: &str) -> String {
    if glob.starts_with("**") || glob.starts_with('/') {
        glob.to_string()
    } else {
        format!("/{glob}")
    }
}

fn has_glob_meta(component: &str) -> bool {
    component.contains(['*', '?', '[', '{'])
}

fn invalid_pattern(pattern: &str, error: ignore::Error) -> HtmlDataError {
    HtmlDataError::InvalidPattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    }
}
