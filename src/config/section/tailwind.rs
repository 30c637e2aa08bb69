//! `[tailwindcss]` section: CSS utility compiler integration.
//!
//! These keys tell the build module how to drive the compiler. The
//! compiler's own options (fonts, typography, plugins) live in the theme
//! document, see [`crate::theme`].
//!
//! # Example
//!
//! ```toml
//! [tailwindcss]
//! jit = true
//! cssPath = "assets/css/tailwind.css"
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use serde::{Deserialize, Serialize};

/// CSS utility compiler integration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "tailwindcss", rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Generate utility rules on demand from observed usage.
    #[config(default = "false")]
    pub jit: Option<bool>,

    /// Compiler config file handed to the CSS compiler.
    #[config(example = "\"theme.toml\"")]
    pub config_path: Option<String>,

    /// Entry stylesheet with the framework directives.
    #[config(example = "\"assets/css/tailwind.css\"")]
    pub css_path: Option<String>,

    /// Expose the resolved theme to page code at runtime.
    #[config(default = "false")]
    pub expose_config: Option<bool>,
}

impl TailwindConfig {
    pub fn jit(&self) -> bool {
        self.jit.unwrap_or(false)
    }

    pub fn expose_config(&self) -> bool {
        self.expose_config.unwrap_or(false)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [
            (Self::FIELDS.config_path, &self.config_path),
            (Self::FIELDS.css_path, &self.css_path),
        ] {
            if let Some(path) = value
                && path.trim().is_empty()
            {
                diag.error(field, format!("`{}` is empty", field.key()));
            }
        }

        if let Some(path) = &self.css_path
            && !path.trim().is_empty()
            && !path.ends_with(".css")
        {
            diag.warn(
                Self::FIELDS.css_path,
                format!("'{path}' does not look like a stylesheet"),
            );
        }
    }
}
