//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use elements_assets::AssetSet;
use elements_config::Config;
use elements_template::ShellRenderer;

use crate::live_reload::ReloadHub;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Resolved configuration.
    pub(crate) config: Config,
    /// Located frontend assets.
    pub(crate) assets: AssetSet,
    /// Viewer shell renderer.
    pub(crate) renderer: ShellRenderer,
    /// Reload client registry (if watching).
    pub(crate) live_reload: Option<Arc<ReloadHub>>,
    /// Client used by the CORS proxy.
    pub(crate) http: reqwest::Client,
}
