use crate::utils::{is_source_file, normalize_path};
use anyhow::Result;
use ignore::{DirEntry, WalkBuilder};
use log::{debug, warn};
use std::path::Path;

/// Collects every `.h`/`.cpp` file below `search_root`, depth first.
///
/// Hidden files and ignore files are not special: the walk sees the whole
/// tree. Within a directory its files come first, then its subdirectories,
/// each group in file-name order, so repeated runs over the same tree
/// produce the same sequence. `exclude` (normally the output file)
/// is never returned.
pub fn collect_sources(search_root: &Path, exclude: Option<&Path>) -> Result<Vec<DirEntry>> {
    let mut builder = WalkBuilder::new(search_root);

    builder
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_path(|a, b| (a.is_dir(), a.file_name()).cmp(&(b.is_dir(), b.file_name())));

    let exclude = exclude.map(normalize_path);
    let walker = builder.build();
    let mut entries = Vec::new();

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();

                if !path.is_file() || !is_source_file(path) {
                    continue;
                }

                if exclude
                    .as_deref()
                    .is_some_and(|excluded| normalize_path(path) == excluded)
                {
                    debug!("Skipping output file: {}", path.display());
                    continue;
                }

                entries.push(entry);
            }
            Err(err) => {
                warn!("Error walking path: {err}");
            }
        }
    }

    debug!(
        "Collected {} source files under {}",
        entries.len(),
        search_root.display()
    );
    Ok(entries)
}
