//! CLI command implementations.

pub(crate) mod export;
pub(crate) mod preview;

use std::path::PathBuf;

use clap::Args;
use elements_config::CliSettings;

pub(crate) use export::ExportArgs;
pub(crate) use preview::PreviewArgs;

/// Options shared by `export` and `preview`.
#[derive(Args, Debug)]
pub(crate) struct DocumentArgs {
    /// OpenAPI document (local path or http(s) URL).
    #[arg(value_name = "OPENAPI_JSON")]
    document: String,

    /// Path to configuration file (default: auto-discover elements.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the given base path [default: "/"].
    #[arg(long, value_name = "BASE_PATH")]
    base_path: Option<String>,

    /// Credentials policy for "Try It" feature: omit, include, same-origin [default: "omit"].
    #[arg(long, value_name = "CREDENTIALS_POLICY")]
    credentials_policy: Option<String>,

    /// Filter out any content which has been marked as internal with x-internal.
    #[arg(short, long)]
    filter_internal: bool,

    /// Hide the "Try It" panel (the interactive API console).
    #[arg(short = 'n', long)]
    no_try_it: bool,

    /// Layout for Elements: sidebar, stacked [default: "sidebar"].
    #[arg(long)]
    layout: Option<String>,

    /// URL of an image that will show as a small square logo next to the title.
    #[arg(long)]
    logo: Option<String>,

    /// Determines how navigation should work: history, hash, memory, static [default: "history"].
    #[arg(long)]
    router: Option<String>,

    /// Additional style for Elements [default: "flex: 1 0 0; overflow: hidden;"].
    #[arg(long)]
    style: Option<String>,

    /// API docs title [default: "My API Docs"].
    #[arg(long)]
    title: Option<String>,

    /// Variable to be replaced in the OpenAPI document (NAME=VALUE, repeatable).
    #[arg(long = "variable", value_name = "VARIABLE")]
    variables: Vec<String>,

    /// Variable delimiters as "OPEN CLOSE" [default: "{{ }}"].
    #[arg(long)]
    delimiters: Option<String>,

    /// Replacement page template.
    #[arg(long)]
    template: Option<PathBuf>,
}

impl DocumentArgs {
    /// Convert into settings plus the explicit configuration file path.
    pub(crate) fn into_settings(self) -> (CliSettings, Option<PathBuf>) {
        let settings = CliSettings {
            document: self.document,
            base_path: self.base_path,
            credentials_policy: self.credentials_policy,
            layout: self.layout,
            logo: self.logo,
            router: self.router,
            style: self.style,
            title: self.title,
            variables: self.variables,
            delimiters: self.delimiters,
            template: self.template,
            filter_internal: flag(self.filter_internal),
            hide_try_it: flag(self.no_try_it),
            ..CliSettings::default()
        };
        (settings, self.config)
    }
}

/// Map a boolean switch to an override: given means `Some(true)`, absent
/// leaves lower layers in charge.
pub(crate) fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}
