//! Walk sources that feed tree construction.

use std::path::Path;

use walkstat_core::{ScanError, WalkEntry, WalkOptions};

/// Produces the entry stream for one walker's root and options. The tree
/// builder consumes entries only through this seam, so tests and embedders
/// can substitute any entry source.
pub trait WalkSource {
    /// Start a walk of `root` with the given options.
    fn walk(
        &self,
        root: &Path,
        options: &WalkOptions,
    ) -> Box<dyn Iterator<Item = Result<WalkEntry, ScanError>> + Send>;
}

/// Default source backed by jwalk, sorted for deterministic entry order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwalkSource;

impl WalkSource for JwalkSource {
    fn walk(
        &self,
        root: &Path,
        options: &WalkOptions,
    ) -> Box<dyn Iterator<Item = Result<WalkEntry, ScanError>> + Send> {
        let walker = jwalk::WalkDir::new(root)
            .sort(true)
            .skip_hidden(!options.include_hidden)
            .follow_links(options.follow_symlinks)
            .max_depth(options.max_depth.map(|d| d as usize).unwrap_or(usize::MAX));

        let options = options.clone();
        Box::new(walker.into_iter().filter_map(move |result| match result {
            Ok(entry) => {
                let path = entry.path();
                let name = entry.file_name().to_string_lossy().to_string();
                if options.should_skip(&name) {
                    return None;
                }
                let is_file = entry.file_type().is_file();
                if is_file && !options.matches_ext(&name) {
                    return None;
                }
                Some(Ok(WalkEntry::new(path, is_file)))
            }
            Err(err) => {
                let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                Some(Err(ScanError::walk_source(path, err.to_string())))
            }
        }))
    }
}
