//! Path segmentation relative to a walker root.

use std::path::{Component, Path};

use compact_str::CompactString;

use crate::config::WalkerDescriptor;
use crate::error::TreeError;

/// Split a walked path into ordered path units relative to the walker root.
///
/// When the walker root is absolute the path is made relative to the root
/// first. Units are the non-empty normal path components; the last unit is
/// the terminal segment. Yielding zero units (e.g. the path equals the
/// root) is [`TreeError::InvalidPath`].
pub fn segment_units(
    walker: &WalkerDescriptor,
    path: &Path,
) -> Result<Vec<CompactString>, TreeError> {
    let relative = if walker.root_is_absolute {
        path.strip_prefix(&walker.root)
            .map_err(|_| TreeError::InvalidPath {
                path: path.to_path_buf(),
            })?
    } else {
        path
    };

    let units: Vec<CompactString> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(unit) => Some(CompactString::new(unit.to_string_lossy())),
            _ => None,
        })
        .collect();

    if units.is_empty() {
        return Err(TreeError::InvalidPath {
            path: path.to_path_buf(),
        });
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn walker(root: &str, absolute: bool) -> WalkerDescriptor {
        WalkerDescriptor::builder()
            .identity("test")
            .root(root)
            .root_is_absolute(absolute)
            .build()
            .unwrap()
    }

    #[test]
    fn test_segments_relative_to_absolute_root() {
        let walker = walker("/repo", true);
        let units = segment_units(&walker, &PathBuf::from("/repo/src/lib/mod.rs")).unwrap();
        assert_eq!(units, vec!["src", "lib", "mod.rs"]);
    }

    #[test]
    fn test_segments_relative_root_keeps_path() {
        let walker = walker("content", false);
        let units = segment_units(&walker, &PathBuf::from("content/a/b.txt")).unwrap();
        assert_eq!(units, vec!["content", "a", "b.txt"]);
    }

    #[test]
    fn test_single_unit() {
        let walker = walker("/repo", true);
        let units = segment_units(&walker, &PathBuf::from("/repo/README")).unwrap();
        assert_eq!(units, vec!["README"]);
    }

    #[test]
    fn test_zero_units_is_invalid() {
        let walker = walker("/repo", true);
        let err = segment_units(&walker, &PathBuf::from("/repo")).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath { .. }));
    }

    #[test]
    fn test_path_outside_root_is_invalid() {
        let walker = walker("/repo", true);
        let err = segment_units(&walker, &PathBuf::from("/elsewhere/a.txt")).unwrap_err();
        assert!(matches!(err, TreeError::InvalidPath { .. }));
    }
}
