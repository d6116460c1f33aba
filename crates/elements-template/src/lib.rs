//! HTML viewer shell for the Elements web component.
//!
//! Renders one page that loads the Elements bundle and mounts an
//! `elements-api` element configured from [`Config`]. Two modes:
//!
//! - [`RenderMode::Export`]: self-contained page, bundle loaded from the CDN,
//!   no reload client
//! - [`RenderMode::Serve`]: bundle loaded from the preview server, reload
//!   client included when watching

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use elements_assets::{LIVERELOAD_JS, STYLES_CSS, WEB_COMPONENTS_JS, cdn_url};
use elements_config::Config;
use minijinja::{Environment, Value};
use serde::Serialize;

/// Name the template is registered under (the `.html` suffix enables auto-escaping).
const TEMPLATE_NAME: &str = "index.html";

/// Built-in page template.
const BUILTIN_TEMPLATE: &str = include_str!("../templates/index.html");

/// Template error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Template could not be compiled or rendered.
    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

/// How the page is going to be delivered.
#[derive(Clone, Copy, Debug)]
pub enum RenderMode<'a> {
    /// One-shot static export.
    Export,
    /// Served by the preview server; `host` is the request's `Host` header.
    Serve { host: Option<&'a str> },
}

/// Configuration handed to the `elements-api` element.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ElementsOptions<'a> {
    api_description_url: &'a str,
    base_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_internal: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hide_try_it: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    try_it_cors_proxy: Option<String>,
    try_it_credentials_policy: &'static str,
    layout: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo: Option<&'a str>,
    router: &'static str,
    style: &'a str,
}

#[derive(Serialize)]
struct DelimitersContext<'a> {
    open: &'a str,
    close: &'a str,
}

/// Everything the template can reference.
#[derive(Serialize)]
struct PageContext<'a> {
    base_href: &'a str,
    title: &'a str,
    elements_css: String,
    elements_js: String,
    elements: ElementsOptions<'a>,
    delimiters: DelimitersContext<'a>,
    variables: &'a BTreeMap<String, String>,
    livereload_js: Option<&'static str>,
    livereload_path: String,
}

impl<'a> PageContext<'a> {
    fn new(config: &'a Config, mode: RenderMode<'_>) -> Self {
        let (elements_css, elements_js, try_it_cors_proxy, livereload_js) = match mode {
            RenderMode::Export => (
                cdn_url(&config.elements_version, STYLES_CSS),
                cdn_url(&config.elements_version, WEB_COMPONENTS_JS),
                config.cors_proxy.clone().filter(|_| !config.hide_try_it),
                None,
            ),
            RenderMode::Serve { host } => {
                let proxy = config.proxy_enabled().then(|| {
                    let host = host.map_or_else(|| config.listen_address(), str::to_owned);
                    format!("http://{host}{}_/", config.base_href)
                });
                (
                    STYLES_CSS.to_owned(),
                    WEB_COMPONENTS_JS.to_owned(),
                    proxy,
                    config.watch.then_some(LIVERELOAD_JS),
                )
            }
        };

        Self {
            base_href: &config.base_href,
            title: &config.title,
            elements_css,
            elements_js,
            elements: ElementsOptions {
                api_description_url: &config.document,
                base_path: &config.base_href,
                hide_internal: config.filter_internal.then_some("true"),
                hide_try_it: config.hide_try_it.then_some("true"),
                try_it_cors_proxy,
                try_it_credentials_policy: config.credentials_policy.as_str(),
                layout: config.layout.as_str(),
                logo: config.logo.as_deref(),
                router: config.router.as_str(),
                style: &config.style,
            },
            delimiters: DelimitersContext {
                open: &config.delimiters.open,
                close: &config.delimiters.close,
            },
            variables: &config.variables,
            livereload_js,
            livereload_path: format!("{}livereload", config.base_href.trim_start_matches('/')),
        }
    }
}

/// Compiled viewer shell template.
pub struct ShellRenderer {
    env: Environment<'static>,
}

impl ShellRenderer {
    /// Renderer using the built-in template.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::from_source(BUILTIN_TEMPLATE.to_owned())
    }

    /// Renderer using a template file.
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_source(source)
    }

    /// Renderer for the template selected by `config`.
    pub fn for_config(config: &Config) -> Result<Self, TemplateError> {
        match &config.template {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    fn from_source(source: String) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_filter("attr", attr);
        env.add_template_owned(TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Render the page for `config`.
    pub fn render(&self, config: &Config, mode: RenderMode<'_>) -> Result<String, TemplateError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(PageContext::new(config, mode))?)
    }
}

/// `attr` filter: escape for HTML text and attribute values, leaving `/` intact.
fn attr(value: &str) -> Value {
    Value::from_safe_string(escape(value))
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
