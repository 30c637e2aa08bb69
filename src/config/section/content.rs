//! `[content]` section: content module options.
//!
//! # Example
//!
//! ```toml
//! [content]
//! liveEdit = false
//!
//! [content.markdown.prism]
//! theme = "prism-themes/themes/prism-base16-ateliersulphurpool.light.css"
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// Content module options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "content", rename_all = "camelCase")]
pub struct ContentConfig {
    /// Edit content in place from the development server.
    #[config(default = "true")]
    pub live_edit: Option<bool>,

    /// Markdown rendering options.
    #[config(sub)]
    pub markdown: MarkdownConfig,
}

/// Markdown rendering options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "content.markdown", rename_all = "camelCase")]
pub struct MarkdownConfig {
    /// Syntax highlighting of code blocks.
    #[config(sub)]
    pub prism: PrismConfig,
}

/// Code block syntax highlighting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "content.markdown.prism", rename_all = "camelCase")]
pub struct PrismConfig {
    /// Stylesheet of the highlight theme, passed through to the asset pipeline.
    #[config(example = "\"prism-themes/themes/prism-one-light.css\"")]
    pub theme: Option<String>,
}

impl ContentConfig {
    /// Live edit defaults to on.
    pub fn live_edit(&self) -> bool {
        self.live_edit.unwrap_or(true)
    }

    /// Highlight theme asset, if one is configured.
    pub fn highlight_theme(&self) -> Option<&str> {
        self.markdown.prism.theme.as_deref()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(theme) = &self.markdown.prism.theme else {
            return;
        };

        if theme.trim().is_empty() {
            diag.error_with_hint(
                PrismConfig::FIELDS.theme,
                "theme path is empty",
                "remove the key to use the default highlight theme",
            );
        } else if !theme.ends_with(".css") {
            diag.warn(
                PrismConfig::FIELDS.theme,
                format!("'{theme}' does not look like a stylesheet"),
            );
        }
    }
}
