//! In-memory static asset store.
//!
//! The static site is read once at startup and held in memory, keyed by URL
//! path. This mirrors the opaque key→content store the gate fronts: lookup
//! is exact, except that directory paths (trailing `/`, including the root)
//! resolve to their `index.html`.

use anyhow::{Context, Result};
use axum::body::Bytes;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Document name resolved for directory paths.
pub const INDEX_DOCUMENT: &str = "index.html";

/// URL path of the root document served as the SPA fallback.
pub const ROOT_DOCUMENT: &str = "/index.html";

/// A stored asset: body bytes plus the content type guessed from the file
/// extension.
#[derive(Debug, Clone)]
pub struct Asset {
    pub body: Bytes,
    pub content_type: String,
}

/// Maps URL paths to static assets.
#[derive(Debug, Default)]
pub struct AssetStore {
    assets: HashMap<String, Asset>,
}

impl AssetStore {
    /// Load every file under `root` into memory, keyed by URL path.
    ///
    /// # Errors
    /// Returns an error if the directory or any file within it cannot be read.
    pub fn load(root: &Path) -> Result<Self> {
        let mut store = Self::default();
        collect_files(root, root, &mut store)?;
        Ok(store)
    }

    /// Insert an asset under `path`.
    pub fn insert(&mut self, path: &str, body: impl Into<Bytes>) {
        // Files come in with relative paths ("style.css") but HTTP requests
        // use absolute ones ("/style.css"). Ensure a leading slash.
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let content_type = mime_guess::from_path(&path)
            .first_or_octet_stream()
            .to_string();
        self.assets.insert(
            path,
            Asset {
                body: body.into(),
                content_type,
            },
        );
    }

    /// Look up the asset for a request path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Asset> {
        if path.ends_with('/') {
            self.assets.get(&format!("{path}{INDEX_DOCUMENT}"))
        } else {
            self.assets.get(path)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

fn collect_files(root: &Path, dir: &Path, store: &mut AssetStore) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read directory entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, store)?;
        } else {
            let bytes =
                fs::read(&path).with_context(|| format!("Failed to read file {}", path.display()))?;
            let key = path
                .strip_prefix(root)
                .with_context(|| format!("File {} escapes the asset root", path.display()))?
                .to_string_lossy()
                .replace('\\', "/");
            store.insert(&key, bytes);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_store() -> AssetStore {
        let mut store = AssetStore::default();
        store.insert("index.html", "<html>app</html>");
        store.insert("unlock.html", "<html>unlock</html>");
        store.insert("assets/app.js", "console.log('hi')");
        store.insert("assets/style.css", "body{}");
        store.insert("docs/index.html", "<html>docs</html>");
        store
    }

    #[test]
    fn lookup_is_by_absolute_url_path() {
        let store = sample_store();
        assert!(store.get("/assets/app.js").is_some());
        assert!(store.get("assets/app.js").is_none());
        assert!(store.get("/missing.js").is_none());
    }

    #[test]
    fn directory_paths_resolve_to_index_document() {
        let store = sample_store();
        let root = store.get("/").expect("root should resolve");
        assert_eq!(root.body, Bytes::from("<html>app</html>"));
        let docs = store.get("/docs/").expect("docs dir should resolve");
        assert_eq!(docs.body, Bytes::from("<html>docs</html>"));
        // Without the trailing slash there is no file at that key.
        assert!(store.get("/docs").is_none());
    }

    #[test]
    fn content_type_is_guessed_from_extension() {
        let store = sample_store();
        assert_eq!(
            store.get("/index.html").map(|a| a.content_type.as_str()),
            Some("text/html")
        );
        assert_eq!(
            store
                .get("/assets/style.css")
                .map(|a| a.content_type.as_str()),
            Some("text/css")
        );
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let mut store = AssetStore::default();
        store.insert("blob.xyzzy", "data");
        assert_eq!(
            store.get("/blob.xyzzy").map(|a| a.content_type.as_str()),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn load_walks_nested_directories() {
        let root = scratch_dir("load_walks_nested_directories");
        fs::create_dir_all(root.join("assets/img")).expect("create nested dirs");
        fs::write(root.join("index.html"), "<html>app</html>").expect("write index");
        fs::write(root.join("assets/img/logo.svg"), "<svg/>").expect("write asset");

        let store = AssetStore::load(&root).expect("load should succeed");
        assert_eq!(store.len(), 2);
        assert!(store.get("/index.html").is_some());
        assert_eq!(
            store
                .get("/assets/img/logo.svg")
                .map(|a| a.content_type.as_str()),
            Some("image/svg+xml")
        );

        fs::remove_dir_all(&root).expect("cleanup");
    }

    #[test]
    fn load_fails_on_missing_root() {
        let root = scratch_dir("load_fails_on_missing_root");
        let err = AssetStore::load(&root).expect_err("missing dir should fail");
        assert!(err.to_string().contains("Failed to read directory"));
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gatehouse-{}-{}", name, std::process::id()))
    }
}
