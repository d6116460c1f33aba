//! Configuration management for the Elements preview server.
//!
//! Resolves one immutable [`Config`] from three layers, highest precedence first:
//!
//! 1. Explicit command-line flags ([`CliSettings`])
//! 2. Environment variables ([`Env`])
//! 3. An optional `elements.toml` file ([`FileConfig`])
//!
//! Anything left unset falls back to built-in defaults.
//!
//! ## Environment Variable Expansion
//!
//! String values in the configuration file support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod env;
mod expand;
mod file;
mod options;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

pub use env::Env;
pub use file::{FileConfig, FileDelimiters};
pub use options::{CredentialsPolicy, Delimiters, Layout, RouterMode};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "elements.toml";

/// Elements release referenced by exported pages.
pub const DEFAULT_ELEMENTS_VERSION: &str = "8.4.2";

const DEFAULT_HOSTNAME: &str = "localhost";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STYLE: &str = "flex: 1 0 0; overflow: hidden;";
const DEFAULT_TITLE: &str = "My API Docs";
const DEFAULT_ASSETS_DIR: &str = "assets";

static REMOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// CLI settings that override environment, file and default values.
///
/// All fields except the document are optional. Boolean flags are `Some(true)`
/// when given on the command line and `None` otherwise.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Path or URL of the OpenAPI document.
    pub document: String,
    pub base_path: Option<String>,
    pub credentials_policy: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub layout: Option<String>,
    pub logo: Option<String>,
    pub router: Option<String>,
    pub style: Option<String>,
    pub title: Option<String>,
    /// `NAME=VALUE` entries; when non-empty they replace the environment list.
    pub variables: Vec<String>,
    pub delimiters: Option<String>,
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

/// Resolved, immutable configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Normalized base href: `/` for root, otherwise `/segment/.../` with
    /// exactly one leading and one trailing slash.
    pub base_href: String,
    pub hostname: String,
    pub port: u16,
    /// Path or URL of the OpenAPI document.
    pub document: String,
    pub layout: Layout,
    pub router: RouterMode,
    pub style: String,
    pub title: String,
    pub logo: Option<String>,
    pub filter_internal: bool,
    pub hide_try_it: bool,
    pub with_cors_proxy: bool,
    /// Watch mode; always false for remote documents.
    pub watch: bool,
    pub poll: bool,
    pub credentials_policy: CredentialsPolicy,
    /// Template variables substituted inside the OpenAPI document.
    pub variables: BTreeMap<String, String>,
    pub delimiters: Delimiters,
    pub working_dir: PathBuf,
    /// Reported hostname (display only).
    pub virtual_host: String,
    /// Reported port (display only).
    pub virtual_port: String,
    /// Directory holding the Elements bundle and the reload client.
    pub assets_dir: PathBuf,
    /// Replacement page template (`None` uses the built-in one).
    pub template: Option<PathBuf>,
    /// CORS proxy URL advertised by exported pages.
    pub cors_proxy: Option<String>,
    /// Elements version referenced by exported pages.
    pub elements_version: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// A setting had a value outside its domain.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue {
        /// Setting name (e.g., "layout").
        field: String,
        /// Offending value.
        value: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`title`").
        field: String,
        /// Error message (e.g., "${`DOCS_TITLE`} not set").
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }
}

/// Collapse repeated slashes and strip a trailing slash, then append `suffix`.
///
/// ```
/// use elements_config::sanitize;
///
/// assert_eq!(sanitize("//docs//v1/", ""), "/docs/v1");
/// assert_eq!(sanitize("/docs", "/"), "/docs/");
/// assert_eq!(sanitize("/", ""), "");
/// ```
#[must_use]
pub fn sanitize(input: &str, suffix: &str) -> String {
    let mut out = String::with_capacity(input.len() + suffix.len());
    for c in input.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.ends_with('/') {
        out.pop();
    }
    out.push_str(suffix);
    out
}

/// Whether a document reference is a remote `http(s)://` URL.
#[must_use]
pub fn is_remote(reference: &str) -> bool {
    REMOTE_RE.is_match(reference)
}

/// Parse `NAME=VALUE` entries into a variable mapping.
///
/// Entries are split on the first `=`. Blank entries are skipped, an entry
/// without `=` maps to an empty value, later entries win.
pub fn parse_variables<'a, I>(entries: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a str>,
{
    entries
        .into_iter()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) => (name.to_owned(), value.to_owned()),
            None => (entry.to_owned(), String::new()),
        })
        .collect()
}

impl Config {
    /// Load configuration with the optional file layer.
    ///
    /// If `config_path` is provided, loads that file. Otherwise searches for
    /// `elements.toml` in the working directory given by flag or
    /// `ELEMENTS_WORKING_DIR` (or the current directory) and its parents; no
    /// file found means no file layer.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, the file cannot be
    /// parsed, or any layer holds an invalid value.
    pub fn load(
        config_path: Option<&Path>,
        settings: &CliSettings,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let file = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(FileConfig::load(path, env)?)
        } else {
            let start = settings
                .working_dir
                .clone()
                .or_else(|| env.first(&["ELEMENTS_WORKING_DIR"]).map(PathBuf::from))
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_default();
            FileConfig::discover(&start, CONFIG_FILENAME)
                .map(|path| FileConfig::load(&path, env))
                .transpose()?
        };

        Self::resolve(settings, env, file.unwrap_or_default())
    }

    /// Merge flags, environment and file values into one configuration.
    ///
    /// Pure function of its inputs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unparsable ports, enums or
    /// delimiters, and for base paths containing route pattern braces.
    pub fn resolve(
        settings: &CliSettings,
        env: &Env,
        file: FileConfig,
    ) -> Result<Self, ConfigError> {
        let base_path = pick(
            settings.base_path.as_deref(),
            env.first(&["ELEMENTS_BASE_PATH", "BASE_PATH"]),
            file.base_path,
            "/",
        );
        if base_path.contains(['{', '}']) {
            return Err(ConfigError::invalid("base path", &base_path));
        }

        let port = match (settings.port, env.first(&["ELEMENTS_PORT"])) {
            (Some(port), _) => port,
            (None, Some(raw)) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("port", raw))?,
            (None, None) => file.port.unwrap_or(DEFAULT_PORT),
        };

        let layout = pick_parsed(
            settings.layout.as_deref(),
            env.first(&["ELEMENTS_LAYOUT", "LAYOUT"]),
            file.layout,
        )?;
        let router = pick_parsed(
            settings.router.as_deref(),
            env.first(&["ELEMENTS_ROUTER", "ROUTER"]),
            file.router,
        )?;
        let credentials_policy = pick_parsed(
            settings.credentials_policy.as_deref(),
            env.first(&["ELEMENTS_CREDENTIALS_POLICY", "CREDENTIALS_POLICY"]),
            file.credentials_policy,
        )?;

        let delimiters = match settings
            .delimiters
            .as_deref()
            .or_else(|| env.first(&["ELEMENTS_DELIMITERS"]))
        {
            Some(raw) => raw.parse()?,
            None => file
                .delimiters
                .map(|d| Delimiters {
                    open: d.open,
                    close: d.close,
                })
                .unwrap_or_default(),
        };

        let variables = if !settings.variables.is_empty() {
            parse_variables(settings.variables.iter().map(String::as_str))
        } else if let Some(raw) = env.first(&["ELEMENTS_VARIABLE", "VARIABLE"]) {
            parse_variables(raw.split('\n'))
        } else {
            file.variables
        };

        let flag = |cli: Option<bool>, name: &str, file: Option<bool>| {
            cli.or_else(|| env.flag(&[name])).or(file).unwrap_or(false)
        };

        let document = settings.document.clone();
        let watch = flag(settings.watch, "ELEMENTS_WATCH", file.watch) && !is_remote(&document);

        Ok(Self {
            base_href: sanitize(&format!("/{base_path}"), "/"),
            hostname: pick(
                settings.hostname.as_deref(),
                env.first(&["ELEMENTS_HOSTNAME"]),
                file.hostname,
                DEFAULT_HOSTNAME,
            ),
            port,
            document,
            layout,
            router,
            style: pick(
                settings.style.as_deref(),
                env.first(&["ELEMENTS_STYLE", "STYLE"]),
                file.style,
                DEFAULT_STYLE,
            ),
            title: pick(
                settings.title.as_deref(),
                env.first(&["ELEMENTS_TITLE", "TITLE"]),
                file.title,
                DEFAULT_TITLE,
            ),
            logo: settings
                .logo
                .clone()
                .or_else(|| env.first(&["ELEMENTS_LOGO", "LOGO"]).map(str::to_owned))
                .or(file.logo),
            filter_internal: flag(
                settings.filter_internal,
                "ELEMENTS_FILTER_INTERNAL",
                file.filter_internal,
            ),
            hide_try_it: flag(settings.hide_try_it, "ELEMENTS_HIDE_TRY_IT", file.hide_try_it),
            with_cors_proxy: flag(
                settings.with_cors_proxy,
                "ELEMENTS_WITH_CORS_PROXY",
                file.with_cors_proxy,
            ),
            watch,
            poll: flag(settings.poll, "ELEMENTS_POLL", file.poll),
            credentials_policy,
            variables,
            delimiters,
            working_dir: settings
                .working_dir
                .clone()
                .or_else(|| env.first(&["ELEMENTS_WORKING_DIR"]).map(PathBuf::from))
                .or(file.working_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            virtual_host: pick(
                settings.virtual_host.as_deref(),
                env.first(&["ELEMENTS_VIRTUAL_HOST"]),
                file.virtual_host,
                DEFAULT_HOSTNAME,
            ),
            virtual_port: pick(
                settings.virtual_port.as_deref(),
                env.first(&["ELEMENTS_VIRTUAL_PORT"]),
                file.virtual_port,
                &port.to_string(),
            ),
            assets_dir: settings
                .assets_dir
                .clone()
                .or_else(|| env.first(&["ELEMENTS_ASSETS_DIR"]).map(PathBuf::from))
                .or(file.assets_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            template: settings
                .template
                .clone()
                .or_else(|| env.first(&["ELEMENTS_TEMPLATE"]).map(PathBuf::from))
                .or(file.template),
            cors_proxy: settings.cors_proxy.clone().or(file.cors_proxy),
            elements_version: pick(
                settings.elements_version.as_deref(),
                env.first(&["ELEMENTS_VERSION"]),
                file.elements_version,
                DEFAULT_ELEMENTS_VERSION,
            ),
        })
    }

    /// Base path without the trailing slash (empty for root).
    ///
    /// Used to build route patterns: `format!("{}/{asset}", config.base_path())`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        self.base_href.trim_end_matches('/')
    }

    /// Whether the CORS proxy is active (requested and the "Try It" panel is visible).
    #[must_use]
    pub fn proxy_enabled(&self) -> bool {
        self.with_cors_proxy && !self.hide_try_it
    }

    /// `host:port` the server binds to.
    #[must_use]
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Address printed for users (virtual host and port).
    #[must_use]
    pub fn visit_url(&self) -> String {
        format!(
            "http://{}:{}{}",
            self.virtual_host, self.virtual_port, self.base_href
        )
    }
}

/// First present value among flag, environment and file, else `default`.
fn pick(cli: Option<&str>, env: Option<&str>, file: Option<String>, default: &str) -> String {
    cli.or(env)
        .map(str::to_owned)
        .or(file)
        .unwrap_or_else(|| default.to_owned())
}

/// Like [`pick`] for values parsed from strings, defaulting to `T::default()`.
fn pick_parsed<T>(cli: Option<&str>, env: Option<&str>, file: Option<T>) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ConfigError> + Default,
{
    match cli.or(env) {
        Some(raw) => raw.parse(),
        None => Ok(file.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(document: &str) -> CliSettings {
        CliSettings {
            document: document.to_owned(),
            ..Default::default()
        }
    }

    fn resolve(settings: &CliSettings, env: &Env) -> Config {
        Config::resolve(settings, env, FileConfig::default()).unwrap()
    }

    #[test]
    fn test_sanitize_collapses_and_strips() {
        assert_eq!(sanitize("///a//b///", ""), "/a/b");
        assert_eq!(sanitize("", ""), "");
        assert_eq!(sanitize("/", "/"), "/");
        assert_eq!(sanitize("a", "/x"), "a/x");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["", "/", "//", "/docs/", "//docs//v1//", "docs", "a//b/c/"] {
            let once = sanitize(input, "");
            assert_eq!(sanitize(&once, ""), once, "input: {input:?}");
            assert!(!once.contains("//"));
            assert!(!once.ends_with('/'));
        }
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://petstore.swagger.io/v2/swagger.json"));
        assert!(is_remote("HTTP://example.com/openapi.json"));
        assert!(!is_remote("openapi.json"));
        assert!(!is_remote("ftp://example.com/openapi.json"));
        assert!(!is_remote("docs/http://x"));
    }

    #[test]
    fn test_parse_variables() {
        let vars = parse_variables(["host=api.example.com", "", " token=a=b ", "flag"]);
        assert_eq!(vars["host"], "api.example.com");
        assert_eq!(vars["token"], "a=b");
        assert_eq!(vars["flag"], "");
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn test_default_config() {
        let config = resolve(&settings("openapi.json"), &Env::default());
        assert_eq!(config.base_href, "/");
        assert_eq!(config.base_path(), "");
        assert_eq!(config.hostname, "localhost");
        assert_eq!(config.port, 8000);
        assert_eq!(config.layout, Layout::Sidebar);
        assert_eq!(config.router, RouterMode::History);
        assert_eq!(config.credentials_policy, CredentialsPolicy::Omit);
        assert_eq!(config.style, "flex: 1 0 0; overflow: hidden;");
        assert_eq!(config.title, "My API Docs");
        assert_eq!(config.virtual_host, "localhost");
        assert_eq!(config.virtual_port, "8000");
        assert_eq!(config.delimiters, Delimiters::default());
        assert_eq!(config.elements_version, DEFAULT_ELEMENTS_VERSION);
        assert!(config.logo.is_none());
        assert!(!config.watch);
        assert!(!config.proxy_enabled());
    }

    #[test]
    fn test_base_href_normalization() {
        for (input, expected) in [
            ("/", "/"),
            ("docs", "/docs/"),
            ("/docs/", "/docs/"),
            ("//docs//v1//", "/docs/v1/"),
        ] {
            let settings = CliSettings {
                base_path: Some(input.to_owned()),
                ..settings("openapi.json")
            };
            let config = resolve(&settings, &Env::default());
            assert_eq!(config.base_href, expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_flag_beats_env_beats_file() {
        let env: Env = [("ELEMENTS_TITLE", "From Env"), ("ELEMENTS_HOSTNAME", "0.0.0.0")]
            .into_iter()
            .collect();
        let file = FileConfig {
            title: Some("From File".to_owned()),
            hostname: Some("file-host".to_owned()),
            logo: Some("logo.png".to_owned()),
            ..Default::default()
        };
        let settings = CliSettings {
            title: Some("From Flag".to_owned()),
            ..settings("openapi.json")
        };

        let config = Config::resolve(&settings, &env, file).unwrap();

        assert_eq!(config.title, "From Flag");
        assert_eq!(config.hostname, "0.0.0.0");
        assert_eq!(config.logo.as_deref(), Some("logo.png"));
    }

    #[test]
    fn test_base_path_rejects_braces() {
        for base_path in ["/docs/{id}", "/{*rest}", "/a}"] {
            let settings = CliSettings {
                base_path: Some(base_path.to_owned()),
                ..settings("openapi.json")
            };
            let err = Config::resolve(&settings, &Env::default(), FileConfig::default())
                .unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { field, .. } if field == "base path"),
                "{base_path}: {err}"
            );
        }

        let env: Env = [("ELEMENTS_BASE_PATH", "/{v}")].into_iter().collect();
        assert!(Config::resolve(&settings("openapi.json"), &env, FileConfig::default()).is_err());
    }

    #[test]
    fn test_working_dir_precedence() {
        let env: Env = [("ELEMENTS_WORKING_DIR", "/srv/api")].into_iter().collect();
        let file = || FileConfig {
            working_dir: Some(PathBuf::from("/srv/file")),
            ..Default::default()
        };

        let config = Config::resolve(&settings("openapi.json"), &env, file()).unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/srv/api"));

        let config = Config::resolve(&settings("openapi.json"), &Env::default(), file()).unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/srv/file"));

        let settings = CliSettings {
            working_dir: Some(PathBuf::from("/srv/flag")),
            ..settings("openapi.json")
        };
        let config = Config::resolve(&settings, &env, file()).unwrap();
        assert_eq!(config.working_dir, PathBuf::from("/srv/flag"));

        let config = resolve(&self::settings("openapi.json"), &Env::default());
        assert_eq!(config.working_dir, PathBuf::from("."));
    }

    #[test]
    fn test_generic_env_names_are_fallbacks() {
        let env: Env = [("BASE_PATH", "/api"), ("LAYOUT", "stacked")]
            .into_iter()
            .collect();
        let config = resolve(&settings("openapi.json"), &env);
        assert_eq!(config.base_href, "/api/");
        assert_eq!(config.layout, Layout::Stacked);
    }

    #[test]
    fn test_env_port_must_be_numeric() {
        let env: Env = [("ELEMENTS_PORT", "eighty")].into_iter().collect();
        let err = Config::resolve(&settings("openapi.json"), &env, FileConfig::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_virtual_port_defaults_to_port() {
        let settings = CliSettings {
            port: Some(9001),
            ..settings("openapi.json")
        };
        let config = resolve(&settings, &Env::default());
        assert_eq!(config.virtual_port, "9001");
        assert_eq!(config.visit_url(), "http://localhost:9001/");
        assert_eq!(config.listen_address(), "localhost:9001");
    }

    #[test]
    fn test_remote_document_forces_watch_off() {
        for document in [
            "https://petstore.swagger.io/v2/swagger.json",
            "http://localhost:3000/openapi.json",
            "HTTPS://EXAMPLE.COM/spec.yaml",
        ] {
            let settings = CliSettings {
                watch: Some(true),
                ..settings(document)
            };
            assert!(!resolve(&settings, &Env::default()).watch, "{document}");
        }

        let env: Env = [("ELEMENTS_WATCH", "1")].into_iter().collect();
        assert!(!resolve(&settings("https://example.com/a.json"), &env).watch);
    }

    #[test]
    fn test_local_document_keeps_watch() {
        let settings = CliSettings {
            watch: Some(true),
            ..settings("openapi.json")
        };
        assert!(resolve(&settings, &Env::default()).watch);
    }

    #[test]
    fn test_proxy_requires_try_it() {
        let settings = CliSettings {
            with_cors_proxy: Some(true),
            hide_try_it: Some(true),
            ..settings("openapi.json")
        };
        assert!(!resolve(&settings, &Env::default()).proxy_enabled());

        let settings = CliSettings {
            with_cors_proxy: Some(true),
            ..self::settings("openapi.json")
        };
        assert!(resolve(&settings, &Env::default()).proxy_enabled());
    }

    #[test]
    fn test_variables_from_flags_replace_env() {
        let env: Env = [("ELEMENTS_VARIABLE", "a=1\nb=2")].into_iter().collect();
        let config = resolve(&settings("openapi.json"), &env);
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.variables["b"], "2");

        let settings = CliSettings {
            variables: vec!["c=3".to_owned()],
            ..settings("openapi.json")
        };
        let config = resolve(&settings, &env);
        assert_eq!(config.variables.len(), 1);
        assert_eq!(config.variables["c"], "3");
    }

    #[test]
    fn test_delimiters_from_env() {
        let env: Env = [("ELEMENTS_DELIMITERS", "<% %>")].into_iter().collect();
        let config = resolve(&settings("openapi.json"), &env);
        assert_eq!(config.delimiters.open, "<%");
        assert_eq!(config.delimiters.close, "%>");
    }

    #[test]
    fn test_invalid_router_is_rejected() {
        let settings = CliSettings {
            router: Some("teleport".to_owned()),
            ..settings("openapi.json")
        };
        let err = Config::resolve(&settings, &Env::default(), FileConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("router"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(
            Some(Path::new("/nonexistent/elements.toml")),
            &settings("openapi.json"),
            &Env::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_discovers_file_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("elements.toml"), "title = \"Discovered\"\n").unwrap();
        let settings = CliSettings {
            working_dir: Some(dir.path().to_path_buf()),
            ..settings("openapi.json")
        };

        let config = Config::load(None, &settings, &Env::default()).unwrap();

        assert_eq!(config.title, "Discovered");
        assert_eq!(config.working_dir, dir.path());
    }

    #[test]
    fn test_load_discovers_file_in_env_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("elements.toml"), "title = \"From Env Dir\"\n").unwrap();
        let env: Env = [("ELEMENTS_WORKING_DIR", dir.path().to_str().unwrap())]
            .into_iter()
            .collect();

        let config = Config::load(None, &settings("openapi.json"), &env).unwrap();

        assert_eq!(config.title, "From Env Dir");
        assert_eq!(config.working_dir, dir.path());
    }
}
