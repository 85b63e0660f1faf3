//! Walker configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Tuning for one walker's directory walk.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct WalkOptions {
    /// Maximum walk depth (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Follow symbolic links.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// File extensions to include (empty = all). With or without leading dot.
    #[builder(default)]
    #[serde(default)]
    pub exts: Vec<String>,

    /// Entry names to skip (exact, `prefix*`, or `*suffix`).
    #[builder(default)]
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl WalkOptions {
    /// Create a new options builder.
    pub fn builder() -> WalkOptionsBuilder {
        WalkOptionsBuilder::default()
    }

    /// Check if an entry name matches a skip pattern.
    pub fn should_skip(&self, name: &str) -> bool {
        for pattern in &self.skip_patterns {
            if name == pattern {
                return true;
            }
            if let Some(prefix) = pattern.strip_suffix('*') {
                if !prefix.is_empty() && name.starts_with(prefix) {
                    return true;
                }
            }
            if let Some(suffix) = pattern.strip_prefix('*') {
                if name.ends_with(suffix) {
                    return true;
                }
            }
        }
        false
    }

    /// Check if a file name passes the extension filter.
    pub fn matches_ext(&self, name: &str) -> bool {
        if self.exts.is_empty() {
            return true;
        }
        self.exts.iter().any(|ext| {
            if ext.starts_with('.') {
                name.ends_with(ext.as_str())
            } else {
                name.ends_with(&format!(".{ext}"))
            }
        })
    }
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            include_hidden: true,
            follow_symlinks: false,
            exts: Vec::new(),
            skip_patterns: Vec::new(),
        }
    }
}

/// Identity and root of one configured walker. One descriptor produces one
/// tree of nodes under a single walker root.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkerDescriptor {
    /// Identity used as the analytics scope label.
    pub identity: String,

    /// Root path of the walk.
    pub root: PathBuf,

    /// Whether walked paths are absolute and must be made relative to the
    /// root before segmentation.
    #[builder(default = "false")]
    #[serde(default)]
    pub root_is_absolute: bool,

    /// Walk tuning.
    #[builder(default)]
    #[serde(default)]
    pub options: WalkOptions,

    /// Free-form remarks about this walker.
    #[builder(default)]
    #[serde(default)]
    pub remarks: Option<String>,
}

impl WalkerDescriptorBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.identity.as_ref().is_none_or(|i| i.is_empty()) {
            return Err("Walker identity is required".to_string());
        }
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl WalkerDescriptor {
    /// Create a new descriptor builder.
    pub fn builder() -> WalkerDescriptorBuilder {
        WalkerDescriptorBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let descriptor = WalkerDescriptor::builder()
            .identity("content")
            .root("/var/content")
            .root_is_absolute(true)
            .build()
            .unwrap();

        assert_eq!(descriptor.identity, "content");
        assert_eq!(descriptor.root, PathBuf::from("/var/content"));
        assert!(descriptor.root_is_absolute);
        assert!(descriptor.remarks.is_none());
    }

    #[test]
    fn test_descriptor_requires_identity_and_root() {
        assert!(WalkerDescriptor::builder().root("/tmp").build().is_err());
        assert!(WalkerDescriptor::builder().identity("x").build().is_err());
        assert!(
            WalkerDescriptor::builder()
                .identity("")
                .root("/tmp")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_should_skip_patterns() {
        let options = WalkOptions::builder()
            .skip_patterns(vec![
                "node_modules".to_string(),
                "tmp*".to_string(),
                "*.bak".to_string(),
            ])
            .build()
            .unwrap();

        assert!(options.should_skip("node_modules"));
        assert!(options.should_skip("tmp_build"));
        assert!(options.should_skip("notes.bak"));
        assert!(!options.should_skip("src"));
    }

    #[test]
    fn test_matches_ext() {
        let options = WalkOptions::builder()
            .exts(vec!["ts".to_string(), ".md".to_string()])
            .build()
            .unwrap();

        assert!(options.matches_ext("mod.ts"));
        assert!(options.matches_ext("README.md"));
        assert!(!options.matches_ext("style.css"));

        let all = WalkOptions::default();
        assert!(all.matches_ext("anything"));
    }
}
