//! Site build configuration (`site.toml` / `site.json`).
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Schema sections
//! │   ├── build      # target, buildModules, modules
//! │   ├── content    # [content]
//! │   ├── head       # [head]
//! │   └── tailwind   # [tailwindcss]
//! ├── types/         # ConfigError, diagnostics, FieldPath
//! ├── document       # RawDocument, schema validation
//! ├── files          # On-disk layout discovery
//! ├── merge          # Merge trait and rules
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key                             | Purpose                                  |
//! |---------------------------------|------------------------------------------|
//! | `target`                        | `static` or `server` rendering           |
//! | `components`                    | automatic component discovery            |
//! | `buildModules`, `modules`       | ordered module identifiers               |
//! | `[head]`                        | title, lang, meta and link tags          |
//! | `[content]`                     | live edit, highlight theme               |
//! | `[tailwindcss]`                 | CSS compiler integration                 |

pub mod document;
pub mod files;
pub mod merge;
pub mod section;
pub mod types;
mod util;

pub use document::{ConfigDocument, Format, RawDocument, validate};
pub use files::ConfigFiles;
pub use merge::Merge;
pub use section::{
    ContentConfig, HeadConfig, HtmlAttrsConfig, LinkTag, MetaTag, RenderTarget, TailwindConfig,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use macros::Config;
use serde::{Deserialize, Serialize};

// ============================================================================
// root configuration
// ============================================================================

/// Site build configuration.
///
/// Every key is optional: a document only states what it sets, and the
/// accessors below supply defaults once documents are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "", rename_all = "camelCase")]
pub struct SiteConfig {
    /// Render target: "static" pre-renders every page, "server" emits a server-rendered app.
    #[config(default = "\"static\"")]
    pub target: Option<RenderTarget>,

    /// Discover components automatically.
    #[config(default = "false")]
    pub components: Option<bool>,

    /// Modules that run at build time, in registration order.
    #[config(default = r#"["@nuxtjs/tailwindcss"]"#)]
    pub build_modules: Option<Vec<String>>,

    /// Modules that run at build time and at runtime, in registration order.
    #[config(default = r#"["@nuxt/content"]"#)]
    pub modules: Option<Vec<String>>,

    /// Page `<head>` metadata.
    #[config(sub)]
    pub head: HeadConfig,

    /// Content module options.
    #[config(sub)]
    pub content: ContentConfig,

    /// CSS utility compiler integration.
    #[config(sub)]
    pub tailwindcss: TailwindConfig,
}

impl SiteConfig {
    pub fn target(&self) -> RenderTarget {
        self.target.unwrap_or_default()
    }

    pub fn components(&self) -> bool {
        self.components.unwrap_or(false)
    }

    pub fn build_modules(&self) -> &[String] {
        self.build_modules.as_deref().unwrap_or_default()
    }

    pub fn modules(&self) -> &[String] {
        self.modules.as_deref().unwrap_or_default()
    }

    /// Copy with every defaulted key spelled out.
    pub fn with_defaults(&self) -> Self {
        let mut config = self.clone();
        config.target = Some(self.target());
        config.components = Some(self.components());
        config.build_modules = Some(self.build_modules().to_vec());
        config.modules = Some(self.modules().to_vec());
        config.content.live_edit = Some(self.content.live_edit());
        config.tailwindcss.jit = Some(self.tailwindcss.jit());
        config.tailwindcss.expose_config = Some(self.tailwindcss.expose_config());
        config
    }

    /// Whether a module is registered in either list.
    pub fn has_module(&self, id: &str) -> bool {
        self.build_modules()
            .iter()
            .chain(self.modules())
            .any(|m| m == id)
    }
}

impl ConfigDocument for SiteConfig {
    const KIND: &'static str = "site";

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(modules) = &self.build_modules {
            section::validate_module_list(Self::FIELDS.build_modules, modules, diag);
        }
        if let Some(modules) = &self.modules {
            section::validate_module_list(Self::FIELDS.modules, modules, diag);
        }
        self.head.validate(diag);
        self.content.validate(diag);
        self.tailwindcss.validate(diag);
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a site document from TOML.
/// Panics on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_site(content: &str) -> SiteConfig {
    match RawDocument::from_toml_str("test.toml", content)
        .and_then(|doc| doc.validate::<SiteConfig>())
    {
        Ok(config) => config,
        Err(ConfigError::UnknownKey { keys, .. }) => {
            panic!("test config has unknown fields: {keys:?}")
        }
        Err(e) => panic!("test config rejected: {e}"),
    }
}

// ============================================================================
// tests
// ============================================================================
