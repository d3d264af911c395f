//! Per-directory ordering manifests (`meta.json`).
//!
//! Any directory in the content tree may carry a `meta.json`:
//!
//! ```json
//! {
//!   "pages": { "installation": 1, "configuration": 2 },
//!   "sections": { "get-started": 1, "components": 2 }
//! }
//! ```
//!
//! `pages` maps a bare filename (no extension) to an explicit order for the
//! files in that directory. `sections` is only read from the content root
//! and orders the top-level sections. Both keys are optional.
//!
//! A page's own front-matter `order` always wins over the manifest.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const MANIFEST_FILE: &str = "meta.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid manifest {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirManifest {
    /// File stem → order for files in this directory.
    pub pages: BTreeMap<String, i64>,
    /// Section name → order (content root only).
    pub sections: BTreeMap<String, i64>,
}

impl DirManifest {
    pub fn page_order(&self, stem: &str) -> Option<i64> {
        self.pages.get(stem).copied()
    }

    pub fn section_order(&self, section: &str) -> Option<i64> {
        self.sections.get(section).copied()
    }
}

/// Load `meta.json` from a directory.
///
/// Returns `Ok(None)` if the directory has no manifest.
pub fn load_manifest(dir: &Path) -> Result<Option<DirManifest>, ManifestError> {
    let path = dir.join(MANIFEST_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ManifestError::Io { path, source }),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ManifestError::Json { path, source })
}

/// Load `meta.json`, treating any failure as "no manifest".
pub fn read_manifest_lenient(dir: &Path) -> Option<DirManifest> {
    match load_manifest(dir) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(error = %e, "ignoring unreadable manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_manifest(tmp.path()).unwrap(), None);
    }

    #[test]
    fn reads_pages_and_sections() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(MANIFEST_FILE),
            r#"{"pages": {"intro": 1, "setup": 3}, "sections": {"guides": 2}}"#,
        )
        .unwrap();

        let manifest = load_manifest(tmp.path()).unwrap().unwrap();
        assert_eq!(manifest.page_order("setup"), Some(3));
        assert_eq!(manifest.page_order("missing"), None);
        assert_eq!(manifest.section_order("guides"), Some(2));
    }

    #[test]
    fn both_keys_optional() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "{}").unwrap();
        assert_eq!(
            load_manifest(tmp.path()).unwrap(),
            Some(DirManifest::default())
        );
    }

    #[test]
    fn malformed_manifest_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "{ not json").unwrap();
        assert!(matches!(
            load_manifest(tmp.path()),
            Err(ManifestError::Json { .. })
        ));
    }

    #[test]
    fn non_integer_order_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), r#"{"pages": {"a": "first"}}"#).unwrap();
        assert!(load_manifest(tmp.path()).is_err());
    }

    #[test]
    fn lenient_read_swallows_errors() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), "[1, 2]").unwrap();
        assert_eq!(read_manifest_lenient(tmp.path()), None);
    }
}
