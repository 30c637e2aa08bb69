//! Top-level build keys: render target and module lists.
//!
//! # Example
//!
//! ```toml
//! target = "static"
//! components = true
//! buildModules = ["@nuxtjs/tailwindcss"]
//! modules = ["@nuxt/content"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the render driver emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    /// Pre-rendered files, servable from any static host.
    #[default]
    Static,
    /// A server-rendered application.
    Server,
}

crate::replace_merge!(RenderTarget);

impl RenderTarget {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check an ordered plugin/module list.
///
/// Blank identifiers are errors. Duplicates only warn: registration runs
/// in listed order, so the later entry wins downstream.
pub fn validate_module_list(field: FieldPath, modules: &[String], diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();

    for (i, id) in modules.iter().enumerate() {
        if id.trim().is_empty() {
            diag.error(field, format!("entry #{}: identifier is empty", i + 1));
        } else if !seen.insert(id.as_str()) {
            diag.warn_with_hint(
                field,
                format!("'{id}' is listed more than once"),
                "the later registration overrides the earlier one",
            );
        }
    }
}
