//! Theme document (`theme.toml` / `theme.json`) and theme resolution.
//!
//! The theme configures the CSS utility compiler: font families,
//! typography plugin overrides and the plugin list.
//!
//! ```toml
//! important = false
//! plugins = ["@tailwindcss/typography"]
//!
//! [theme.fontFamily]
//! sans = ["IBM Plex Sans", "ui-sans-serif", "system-ui", "sans-serif"]
//! mono = ["IBM Plex Mono", "monospace"]
//!
//! [theme.extend.typography.DEFAULT.css]
//! pre = false
//! code = false
//! ```
//!
//! [`resolve_theme`] layers overrides on top of [`ThemeConfig::base`], so
//! categories a document does not mention keep the framework defaults.

mod font;
mod typography;

pub use font::FontStack;
pub use typography::{StyleRecord, TypographyRule, TypographyVariant};

use crate::config::{ConfigDiagnostics, ConfigDocument, section::validate_module_list};
use crate::resolve::merge;
use macros::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variant whose resets apply to plain `prose` content.
pub const DEFAULT_VARIANT: &str = "DEFAULT";

/// Compiler theme configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "", rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Mark every generated utility `!important`.
    #[config(default = "false")]
    pub important: Option<bool>,

    /// Compiler plugins. Lists from later documents are appended.
    #[config(additive, default = r#"["@tailwindcss/typography"]"#)]
    pub plugins: Option<Vec<String>>,

    /// Design tokens.
    #[config(sub)]
    pub theme: ThemeSection,
}

/// Replaces the framework's token scales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "theme", rename_all = "camelCase")]
pub struct ThemeSection {
    /// Font category -> fallback list, most preferred first.
    #[config(example = r#"{ sans = ["IBM Plex Sans", "sans-serif"], mono = ["IBM Plex Mono", "monospace"] }"#)]
    pub font_family: BTreeMap<String, FontStack>,

    /// Additions to the framework's token scales.
    #[config(sub)]
    pub extend: ThemeExtend,
}

/// Extends the framework's token scales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "theme.extend", rename_all = "camelCase")]
pub struct ThemeExtend {
    /// Typography variant -> selector overrides. `false` resets a selector.
    #[config(example = r#"{ DEFAULT = { css = { pre = false, code = false } } }"#)]
    pub typography: BTreeMap<String, TypographyVariant>,
}

impl ThemeConfig {
    /// Built-in base theme: the framework's default font stacks.
    pub fn base() -> Self {
        let font_family = BTreeMap::from([
            (
                "sans".to_string(),
                FontStack::new([
                    "ui-sans-serif",
                    "system-ui",
                    "-apple-system",
                    "BlinkMacSystemFont",
                    "Segoe UI",
                    "Roboto",
                    "Helvetica Neue",
                    "Arial",
                    "Noto Sans",
                    "sans-serif",
                    "Apple Color Emoji",
                    "Segoe UI Emoji",
                    "Segoe UI Symbol",
                    "Noto Color Emoji",
                ]),
            ),
            (
                "serif".to_string(),
                FontStack::new([
                    "ui-serif",
                    "Georgia",
                    "Cambria",
                    "Times New Roman",
                    "Times",
                    "serif",
                ]),
            ),
            (
                "mono".to_string(),
                FontStack::new([
                    "ui-monospace",
                    "SFMono-Regular",
                    "Menlo",
                    "Monaco",
                    "Consolas",
                    "Liberation Mono",
                    "Courier New",
                    "monospace",
                ]),
            ),
        ]);

        Self {
            theme: ThemeSection {
                font_family,
                ..ThemeSection::default()
            },
            ..Self::default()
        }
    }

    pub fn important(&self) -> bool {
        self.important.unwrap_or(false)
    }

    pub fn plugins(&self) -> &[String] {
        self.plugins.as_deref().unwrap_or_default()
    }

    /// Copy with `important` and `plugins` spelled out.
    pub fn with_defaults(&self) -> Self {
        Self {
            important: Some(self.important()),
            plugins: Some(self.plugins().to_vec()),
            ..self.clone()
        }
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins().iter().any(|p| p == id)
    }

    pub fn font_families(&self) -> &BTreeMap<String, FontStack> {
        &self.theme.font_family
    }

    pub fn font_family(&self, category: &str) -> Option<&FontStack> {
        self.theme.font_family.get(category)
    }

    pub fn typography(&self, variant: &str) -> Option<&TypographyVariant> {
        self.theme.extend.typography.get(variant)
    }

    pub fn typography_rule(&self, variant: &str, selector: &str) -> Option<&TypographyRule> {
        self.typography(variant)?.rule(selector)
    }

    /// Whether the `DEFAULT` variant resets `selector`.
    pub fn is_reset(&self, selector: &str) -> bool {
        self.typography_rule(DEFAULT_VARIANT, selector)
            .is_some_and(TypographyRule::is_reset)
    }
}

impl ConfigDocument for ThemeConfig {
    const KIND: &'static str = "theme";

    fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(plugins) = &self.plugins {
            validate_module_list(Self::FIELDS.plugins, plugins, diag);
        }
        self.theme.validate(diag);
    }
}

impl ThemeSection {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = Self::FIELDS.font_family;

        for (category, stack) in &self.font_family {
            if category.trim().is_empty() {
                diag.error(field, "category name is empty");
                continue;
            }
            if stack.is_empty() {
                diag.error_with_hint(
                    field,
                    format!("'{category}' has no fonts"),
                    "list at least one family, ending with a generic one such as \"sans-serif\"",
                );
            }
            for (i, name) in stack.names().iter().enumerate() {
                if name.trim().is_empty() {
                    diag.error(field, format!("'{category}' entry #{}: font name is empty", i + 1));
                }
            }
        }

        self.extend.validate(diag);
    }
}

impl ThemeExtend {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let field = Self::FIELDS.typography;

        for (variant, rules) in &self.typography {
            if variant.trim().is_empty() {
                diag.error(field, "variant name is empty");
            }
            for (selector, rule) in &rules.css {
                if selector.trim().is_empty() {
                    diag.error(field, format!("'{variant}': selector is empty"));
                } else if rule.style().is_some_and(|style| style.is_empty()) {
                    diag.warn_with_hint(
                        field,
                        format!("'{variant}' selector '{selector}' has an empty style table"),
                        "use `false` (TOML) or `null` (JSON) to reset the selector",
                    );
                }
            }
        }
    }
}

/// Merge theme overrides, in order, on top of the built-in base theme.
pub fn resolve_theme(overrides: impl IntoIterator<Item = ThemeConfig>) -> ThemeConfig {
    merge(ThemeConfig::base(), overrides)
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse a theme document from TOML.
/// Panics on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_theme(content: &str) -> ThemeConfig {
    use crate::config::{ConfigError, RawDocument};

    match RawDocument::from_toml_str("theme.toml", content)
        .and_then(|doc| doc.validate::<ThemeConfig>())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, Merge, RawDocument};

    #[test]
    fn test_field_paths() {
        assert_eq!(ThemeConfig::FIELDS.plugins.as_str(), "plugins");
        assert_eq!(ThemeSection::FIELDS.font_family.as_str(), "theme.fontFamily");
        assert_eq!(
            ThemeExtend::FIELDS.typography.as_str(),
            "theme.extend.typography"
        );
    }

    #[test]
    fn test_base_has_framework_stacks() {
        let base = ThemeConfig::base();
        for category in ["sans", "serif", "mono"] {
            let stack = base.font_family(category).unwrap();
            assert!(!stack.is_empty(), "{category}");
        }
        assert!(!base.important());
        assert!(base.plugins().is_empty());
    }

    #[test]
    fn test_resolve_keeps_unmentioned_categories() {
        let over = test_parse_theme(
            r#"[theme.fontFamily]
sans = ["IBM Plex Sans", "ui-sans-serif", "system-ui", "sans-serif"]
mono = ["IBM Plex Mono", "monospace"]"#,
        );
        let theme = resolve_theme([over]);
        assert_eq!(theme.font_family("sans").unwrap().primary(), Some("IBM Plex Sans"));
        assert_eq!(
            theme.font_family("mono").unwrap().names(),
            ["IBM Plex Mono", "monospace"]
        );
        assert_eq!(
            theme.font_family("serif"),
            ThemeConfig::base().font_family("serif")
        );
    }

    #[test]
    fn test_resets_from_toml() {
        let theme = test_parse_theme(
            r#"plugins = ["@tailwindcss/typography"]
[theme.extend.typography.DEFAULT.css]
pre = false
code = false
"pre code::after" = false"#,
        );
        assert!(theme.is_reset("pre"));
        assert!(theme.is_reset("pre code::after"));
        assert!(!theme.is_reset("a"));
        assert!(theme.has_plugin("@tailwindcss/typography"));
    }

    #[test]
    fn test_plugins_are_appended() {
        let a = test_parse_theme(r#"plugins = ["@tailwindcss/typography"]"#);
        let b = test_parse_theme(r#"plugins = ["@tailwindcss/forms", "@tailwindcss/typography"]"#);
        let theme = resolve_theme([a, b]);
        assert_eq!(
            theme.plugins(),
            ["@tailwindcss/typography", "@tailwindcss/forms"]
        );
    }

    #[test]
    fn test_empty_font_stack_is_invalid() {
        let doc = RawDocument::from_toml_str("theme.toml", "[theme.fontFamily]\nsans = []").unwrap();
        match doc.validate::<ThemeConfig>() {
            Err(ConfigError::Invalid(diag)) => {
                assert_eq!(diag.len(), 1);
                assert_eq!(diag.errors()[0].field.as_str(), "theme.fontFamily");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_font_name_is_invalid() {
        let doc =
            RawDocument::from_json_str("theme.json", r#"{ "theme": { "fontFamily": { "mono": ["", "monospace"] } } }"#)
                .unwrap();
        assert!(matches!(
            doc.validate::<ThemeConfig>(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_theme_key() {
        let doc = RawDocument::from_toml_str("theme.toml", "[theme.extend]\ncolours = {}").unwrap();
        match doc.validate::<ThemeConfig>() {
            Err(ConfigError::UnknownKey { keys, .. }) => {
                assert_eq!(keys, vec!["theme.extend.colours".to_string()]);
            }
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }

    #[test]
    fn test_font_family_conflict_path() {
        let a = test_parse_theme("[theme.fontFamily]\nmono = [\"Menlo\"]");
        let b = test_parse_theme("[theme.fontFamily]\nmono = [\"Consolas\"]");
        let mut out = Vec::new();
        a.conflicts(&b, "", &mut out);
        assert_eq!(out, vec!["theme.fontFamily.mono".to_string()]);
    }
}
