//! Frontend asset lookup for the Elements preview server.
//!
//! The viewer shell needs three files that are not part of the user's project:
//!
//! - `web-components.min.js` and `styles.min.css` from the `@stoplight/elements` package
//! - `livereload.js` from the `livereload-js` package (only when watching)
//!
//! They are read from an assets directory at runtime. [`AssetSet::locate`]
//! checks every required file up front so that a broken installation fails at
//! startup instead of on the first request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reload client script.
pub const LIVERELOAD_JS: &str = "livereload.js";
/// Elements stylesheet.
pub const STYLES_CSS: &str = "styles.min.css";
/// Elements web component bundle.
pub const WEB_COMPONENTS_JS: &str = "web-components.min.js";

/// Assets of the Elements bundle, always required.
const BUNDLE: [&str; 2] = [STYLES_CSS, WEB_COMPONENTS_JS];

/// Asset lookup error.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// A required asset file does not exist.
    #[error("Asset {name} not found at {}", .path.display())]
    Missing {
        /// Logical asset name.
        name: &'static str,
        /// Path that was checked.
        path: PathBuf,
    },
}

/// Fixed mapping of logical asset name to file path.
#[derive(Clone, Debug)]
pub struct AssetSet {
    files: BTreeMap<&'static str, PathBuf>,
}

impl AssetSet {
    /// Locate the assets inside `dir`.
    ///
    /// `livereload.js` is only required when `with_reload_client` is set.
    pub fn locate(dir: &Path, with_reload_client: bool) -> Result<Self, AssetError> {
        let names = BUNDLE
            .iter()
            .copied()
            .chain(with_reload_client.then_some(LIVERELOAD_JS));

        let mut files = BTreeMap::new();
        for name in names {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(AssetError::Missing { name, path });
            }
            files.insert(name, path);
        }

        Ok(Self { files })
    }

    /// File path of a logical asset.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.files.get(name).map(PathBuf::as_path)
    }

    /// Resolve a request path to an asset by its last segment.
    ///
    /// Matching by basename keeps lookups independent of the base path depth.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<&Path> {
        let basename = request_path.rsplit('/').next()?;
        self.get(basename)
    }

    /// Logical names of all located assets.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.files.keys().copied()
    }
}

/// Versioned CDN URL of an Elements bundle file, used by exported pages.
#[must_use]
pub fn cdn_url(version: &str, name: &str) -> String {
    format!("https://unpkg.com/@stoplight/elements@{version}/{name}")
}
