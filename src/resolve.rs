//! Layered resolution of site and theme documents.
//!
//! A [`Layer`] is one document with its origin and precedence. Layers are
//! applied in ascending precedence; layers that share a precedence must
//! agree on every key they both set.
//!
//! ```text
//! site.toml ─┐
//! site.d/*   ├─ validate ─> merge_layers ─┐
//! site.prod ─┘                            ├─> ResolvedBuild ─> render driver
//! theme.*   ─── validate ─> merge_layers ─┘   (Arc, immutable)
//! ```

use crate::config::{
    ConfigDiagnostics, ConfigDocument, ConfigError, Merge, RawDocument, SiteConfig,
    section::PrismConfig,
};
use crate::debug;
use crate::theme::{ThemeConfig, ThemeExtend};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Build module that wires the CSS utility compiler into the build.
pub const TAILWIND_MODULE: &str = "@nuxtjs/tailwindcss";
/// Compiler plugin that reads `theme.extend.typography`.
pub const TYPOGRAPHY_PLUGIN: &str = "@tailwindcss/typography";

/// Selectors whose plugin styling clashes with a highlight theme.
const HIGHLIGHT_SELECTORS: &[&str] = &["pre", "code"];

// ============================================================================
// Layer
// ============================================================================

/// One configuration document and where it sits in the override order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer<T> {
    /// File path or label, used in messages.
    pub origin: String,
    /// Higher precedence is applied later.
    pub precedence: u32,
    pub document: T,
}

impl<T> Layer<T> {
    pub fn new(origin: impl Into<String>, precedence: u32, document: T) -> Self {
        Self {
            origin: origin.into(),
            precedence,
            document,
        }
    }
}

impl Layer<RawDocument> {
    /// Layer labelled with the document's own origin.
    pub fn from_document(precedence: u32, document: RawDocument) -> Self {
        Self::new(document.origin().to_string(), precedence, document)
    }

    fn validate<T: ConfigDocument>(&self) -> Result<Layer<T>, ConfigError> {
        Ok(Layer::new(
            self.origin.clone(),
            self.precedence,
            self.document.validate::<T>()?,
        ))
    }
}

// ============================================================================
// merge
// ============================================================================

/// Apply `overrides` on top of `base`, in order.
pub fn merge<T: Merge>(base: T, overrides: impl IntoIterator<Item = T>) -> T {
    overrides.into_iter().fold(base, Merge::merged)
}

/// Apply layers on top of `base` in ascending precedence.
///
/// Layers with equal precedence keep their given order, and fail with
/// `Conflict` when two of them set a key to different values.
pub fn merge_layers<T: Merge>(base: T, mut layers: Vec<Layer<T>>) -> Result<T, ConfigError> {
    layers.sort_by_key(|layer| layer.precedence);

    for group in layers.chunk_by(|a, b| a.precedence == b.precedence) {
        check_conflicts(group)?;
    }

    Ok(layers.into_iter().fold(base, |acc, layer| {
        debug!("merge"; "{} (precedence {})", layer.origin, layer.precedence);
        acc.merged(layer.document)
    }))
}

fn check_conflicts<T: Merge>(group: &[Layer<T>]) -> Result<(), ConfigError> {
    for (i, first) in group.iter().enumerate() {
        for second in &group[i + 1..] {
            let mut paths = Vec::new();
            first.document.conflicts(&second.document, "", &mut paths);
            if !paths.is_empty() {
                return Err(ConfigError::Conflict {
                    precedence: first.precedence,
                    first: first.origin.clone(),
                    second: second.origin.clone(),
                    paths,
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// ResolvedBuild
// ============================================================================

/// The resolved configuration of one build invocation.
///
/// Cloning shares the underlying documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBuild {
    site: Arc<SiteConfig>,
    theme: Arc<ThemeConfig>,
}

impl ResolvedBuild {
    /// Validate every layer, then merge and check the result.
    ///
    /// Nothing is merged unless every document is valid. The site layers
    /// merge onto an empty document, the theme layers onto
    /// [`ThemeConfig::base`].
    pub fn resolve(
        site: &[Layer<RawDocument>],
        theme: &[Layer<RawDocument>],
    ) -> Result<Self, ConfigError> {
        let site_docs = site
            .iter()
            .map(Layer::validate::<SiteConfig>)
            .collect::<Result<Vec<_>, _>>()?;
        let theme_docs = theme
            .iter()
            .map(Layer::validate::<ThemeConfig>)
            .collect::<Result<Vec<_>, _>>()?;

        let build = Self::new(
            merge_layers(SiteConfig::default(), site_docs)?,
            merge_layers(ThemeConfig::base(), theme_docs)?,
        );

        build.check(!theme.is_empty()).print_warnings();
        Ok(build)
    }

    pub fn new(site: SiteConfig, theme: ThemeConfig) -> Self {
        Self {
            site: Arc::new(site),
            theme: Arc::new(theme),
        }
    }

    pub fn site(&self) -> &Arc<SiteConfig> {
        &self.site
    }

    pub fn theme(&self) -> &Arc<ThemeConfig> {
        &self.theme
    }

    /// Checks spanning both documents. Only warnings are produced.
    pub fn check(&self, theme_supplied: bool) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        let (site, theme) = (&*self.site, &*self.theme);

        if site.content.highlight_theme().is_some() {
            let missing: Vec<_> = HIGHLIGHT_SELECTORS
                .iter()
                .filter(|selector| !theme.is_reset(selector))
                .copied()
                .collect();
            if !missing.is_empty() {
                diag.warn_with_hint(
                    PrismConfig::FIELDS.theme,
                    format!(
                        "highlight theme is set but typography still styles {}",
                        missing.join(", ")
                    ),
                    "reset them under [theme.extend.typography.DEFAULT.css] in the theme document",
                );
            }
        }

        if theme_supplied && !site.has_module(TAILWIND_MODULE) {
            diag.warn_with_hint(
                SiteConfig::FIELDS.build_modules,
                "a theme document is present but the CSS compiler module is not registered",
                format!("add \"{TAILWIND_MODULE}\" to buildModules"),
            );
        }

        if !theme.theme.extend.typography.is_empty() && !theme.has_plugin(TYPOGRAPHY_PLUGIN) {
            diag.warn_with_hint(
                ThemeExtend::FIELDS.typography,
                "typography overrides have no effect without the typography plugin",
                format!("add \"{TYPOGRAPHY_PLUGIN}\" to plugins"),
            );
        }

        let build_modules: FxHashSet<&str> =
            site.build_modules().iter().map(String::as_str).collect();
        for id in site.modules() {
            if build_modules.contains(id.as_str()) {
                diag.warn(
                    SiteConfig::FIELDS.modules,
                    format!("'{id}' is registered in both buildModules and modules"),
                );
            }
        }

        diag
    }

    /// Serialize for the render driver, unset keys at their defaults.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "site": self.site.with_defaults(),
            "theme": self.theme.with_defaults(),
        })
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RenderTarget, test_parse_site};
    use crate::theme::{resolve_theme, test_parse_theme};

    fn raw(origin: &str, precedence: u32, toml: &str) -> Layer<RawDocument> {
        Layer::from_document(precedence, RawDocument::from_toml_str(origin, toml).unwrap())
    }

    #[test]
    fn test_merge_without_overrides_is_identity() {
        let base = test_parse_site("target = \"server\"\n[head]\ntitle = \"Docs\"");
        assert_eq!(merge(base.clone(), []), base);
    }

    #[test]
    fn test_merge_layers_sorts_by_precedence() {
        let layers = vec![
            Layer::new("profile", 2, test_parse_site("target = \"server\"")),
            Layer::new("base", 0, test_parse_site("target = \"static\"\ncomponents = true")),
        ];
        let merged = merge_layers(SiteConfig::default(), layers).unwrap();
        assert_eq!(merged.target(), RenderTarget::Server);
        assert!(merged.components());
    }

    #[test]
    fn test_equal_values_at_same_precedence_do_not_conflict() {
        let layers = vec![
            Layer::new("a", 1, test_parse_site("components = true")),
            Layer::new("b", 1, test_parse_site("components = true\ntarget = \"server\"")),
        ];
        assert!(merge_layers(SiteConfig::default(), layers).is_ok());
    }

    #[test]
    fn test_conflict_names_both_origins() {
        let layers = vec![
            Layer::new("a.toml", 1, test_parse_site("target = \"static\"")),
            Layer::new("b.toml", 1, test_parse_site("target = \"server\"")),
        ];
        match merge_layers(SiteConfig::default(), layers) {
            Err(ConfigError::Conflict {
                precedence,
                first,
                second,
                paths,
            }) => {
                assert_eq!(precedence, 1);
                assert_eq!((first.as_str(), second.as_str()), ("a.toml", "b.toml"));
                assert_eq!(paths, vec!["target".to_string()]);
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_rejects_before_merging() {
        let site = [
            raw("site.toml", 0, "target = \"static\""),
            raw("site.d/a.toml", 1, "target = \"server\""),
            raw("site.d/b.toml", 1, "target = \"static\"\n[tailwindcss]\nexperimentalFlag = true"),
        ];
        // the unknown key wins over the conflict between the fragments
        assert!(matches!(
            ResolvedBuild::resolve(&site, &[]),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_resolve_theme_onto_base() {
        let site = [raw("site.toml", 0, "buildModules = [\"@nuxtjs/tailwindcss\"]")];
        let theme = [raw("theme.toml", 0, "[theme.fontFamily]\nmono = [\"IBM Plex Mono\", \"monospace\"]")];
        let build = ResolvedBuild::resolve(&site, &theme).unwrap();
        assert_eq!(
            build.theme().font_family("mono").unwrap().primary(),
            Some("IBM Plex Mono")
        );
        assert!(build.theme().font_family("serif").is_some());
    }

    #[test]
    fn test_check_highlight_theme_without_resets() {
        let site = test_parse_site(
            "buildModules = [\"@nuxtjs/tailwindcss\"]\n[content.markdown.prism]\ntheme = \"prism-themes/themes/prism-one-light.css\"",
        );
        let build = ResolvedBuild::new(site.clone(), ThemeConfig::base());
        let diag = build.check(false);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(
            diag.warnings()[0].field.as_str(),
            "content.markdown.prism.theme"
        );

        let theme = test_parse_theme(
            "plugins = [\"@tailwindcss/typography\"]\n[theme.extend.typography.DEFAULT.css]\npre = false\ncode = false",
        );
        let build = ResolvedBuild::new(site, resolve_theme([theme]));
        assert!(build.check(true).warnings().is_empty());
    }

    #[test]
    fn test_check_missing_compiler_module_and_plugin() {
        let theme = test_parse_theme("[theme.extend.typography.DEFAULT.css]\npre = false");
        let build = ResolvedBuild::new(SiteConfig::default(), theme);
        let fields: Vec<_> = build
            .check(true)
            .warnings()
            .iter()
            .map(|w| w.field.as_str())
            .collect();
        assert_eq!(fields, vec!["buildModules", "theme.extend.typography"]);
    }

    #[test]
    fn test_check_module_in_both_lists() {
        let site = test_parse_site(
            "buildModules = [\"@nuxt/content\"]\nmodules = [\"@nuxt/content\"]",
        );
        let diag = ResolvedBuild::new(site, ThemeConfig::base()).check(false);
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].field.as_str(), "modules");
    }

    #[test]
    fn test_to_json_passes_assets_through() {
        let site = test_parse_site(
            "[head]\nlink = [{ rel = \"icon\", type = \"image/x-icon\", href = \"/favicon.ico\" }]",
        );
        let json = ResolvedBuild::new(site, ThemeConfig::base()).to_json();
        assert_eq!(json["site"]["head"]["link"][0]["href"], "/favicon.ico");
        assert_eq!(json["site"]["head"]["link"][0]["type"], "image/x-icon");
        assert!(json["theme"]["theme"]["fontFamily"]["sans"].is_array());
    }

    #[test]
    fn test_to_json_fills_defaults() {
        let site = [raw("site.toml", 0, "[head]\ntitle = \"Docs\"")];
        let json = ResolvedBuild::resolve(&site, &[]).unwrap().to_json();

        assert_eq!(json["site"]["target"], "static");
        assert_eq!(json["site"]["components"], false);
        assert_eq!(json["site"]["buildModules"], serde_json::json!([]));
        assert_eq!(json["site"]["modules"], serde_json::json!([]));
        assert_eq!(json["site"]["content"]["liveEdit"], true);
        assert_eq!(json["site"]["tailwindcss"]["jit"], false);
        assert_eq!(json["site"]["tailwindcss"]["exposeConfig"], false);
        assert_eq!(json["theme"]["important"], false);
        assert_eq!(json["theme"]["plugins"], serde_json::json!([]));
    }
}
