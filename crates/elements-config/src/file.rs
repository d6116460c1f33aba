//! Optional `elements.toml` configuration file.
//!
//! Every field is optional; values present here sit between environment
//! variables and built-in defaults in resolution order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::expand::expand_env;
use crate::{ConfigError, CredentialsPolicy, Env, Layout, RouterMode};

/// Raw delimiters as written in the file.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct FileDelimiters {
    pub open: String,
    pub close: String,
}

/// Configuration file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FileConfig {
    pub base_path: Option<String>,
    pub credentials_policy: Option<CredentialsPolicy>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub layout: Option<Layout>,
    pub logo: Option<String>,
    pub router: Option<RouterMode>,
    pub style: Option<String>,
    pub title: Option<String>,
    pub variables: BTreeMap<String, String>,
    pub delimiters: Option<FileDelimiters>,
    pub virtual_host: Option<String>,
    pub virtual_port: Option<String>,
    pub working_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub filter_internal: Option<bool>,
    pub hide_try_it: Option<bool>,
    pub with_cors_proxy: Option<bool>,
    pub watch: Option<bool>,
    pub poll: Option<bool>,
    pub cors_proxy: Option<String>,
    pub elements_version: Option<String>,
}

impl FileConfig {
    /// Load a configuration file.
    ///
    /// String values are expanded against `env`, relative paths are resolved
    /// against the file's directory.
    pub fn load(path: &Path, env: &Env) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars(env)?;
        config.resolve_paths(path.parent().unwrap_or(Path::new(".")));
        Ok(config)
    }

    /// Search for `filename` in `start` and its parents.
    pub(crate) fn discover(start: &Path, filename: &str) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(filename);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn expand_env_vars(&mut self, env: &Env) -> Result<(), ConfigError> {
        let strings = [
            (&mut self.base_path, "base-path"),
            (&mut self.hostname, "hostname"),
            (&mut self.logo, "logo"),
            (&mut self.title, "title"),
            (&mut self.virtual_host, "virtual-host"),
            (&mut self.virtual_port, "virtual-port"),
            (&mut self.cors_proxy, "cors-proxy"),
        ];
        for (slot, field) in strings {
            if let Some(value) = slot.as_deref() {
                *slot = Some(expand_env(value, field, env)?);
            }
        }

        let paths = [
            (&mut self.working_dir, "working-dir"),
            (&mut self.assets_dir, "assets-dir"),
            (&mut self.template, "template"),
        ];
        for (slot, field) in paths {
            if let Some(value) = slot.as_deref().and_then(Path::to_str) {
                *slot = Some(PathBuf::from(expand_env(value, field, env)?));
            }
        }

        for (name, value) in &mut self.variables {
            *value = expand_env(value, &format!("variables.{name}"), env)?;
        }

        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        for slot in [&mut self.working_dir, &mut self.assets_dir, &mut self.template] {
            if let Some(path) = slot.as_deref() {
                *slot = Some(config_dir.join(path));
            }
        }
    }
}
