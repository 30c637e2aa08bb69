//! `[head]` section: page `<head>` metadata.
//!
//! # Example
//!
//! ```toml
//! [head]
//! title = "Laravel Arcanist"
//! meta = [
//!     { charset = "utf-8" },
//!     { name = "viewport", content = "width=device-width, initial-scale=1" },
//!     { hid = "description", name = "description", content = "Multi-step wizards" },
//! ]
//! link = [
//!     { rel = "icon", type = "image/x-icon", href = "/favicon.ico" },
//!     { rel = "preconnect", href = "https://fonts.gstatic.com" },
//! ]
//!
//! [head.htmlAttrs]
//! lang = "en"
//! ```

use crate::config::ConfigDiagnostics;
use macros::Config;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Link relations that are meaningless without a target.
const REL_REQUIRES_HREF: &[&str] = &[
    "icon",
    "shortcut",
    "apple-touch-icon",
    "stylesheet",
    "preconnect",
    "preload",
    "prefetch",
    "dns-prefetch",
    "manifest",
    "canonical",
    "alternate",
];

/// Page `<head>` metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "head", rename_all = "camelCase")]
pub struct HeadConfig {
    /// Document title.
    #[config(example = "\"My Docs\"")]
    pub title: Option<String>,

    /// `<meta>` tags, in output order.
    #[config(
        example = r#"[{ charset = "utf-8" }, { name = "viewport", content = "width=device-width, initial-scale=1" }]"#
    )]
    pub meta: Option<Vec<MetaTag>>,

    /// `<link>` tags (icon, stylesheet, preconnect), in output order.
    #[config(example = r#"[{ rel = "icon", type = "image/x-icon", href = "/favicon.ico" }]"#)]
    pub link: Option<Vec<LinkTag>>,

    /// Attributes of the `<html>` element.
    #[config(sub)]
    pub html_attrs: HtmlAttrsConfig,
}

/// `<html>` element attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Config)]
#[serde(default, rename_all = "camelCase")]
#[config(section = "head.htmlAttrs", rename_all = "camelCase")]
pub struct HtmlAttrsConfig {
    /// Document language (BCP 47 tag).
    #[config(default = "\"en\"")]
    pub lang: Option<String>,
}

/// A `<meta>` tag.
///
/// Valid shapes: `charset` alone, or `content` with exactly one of
/// `name`, `property` or `httpEquiv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTag {
    /// Identifier used by the render driver to dedupe tags across pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_equiv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MetaTag {
    /// The attribute naming this tag (`name`, `property` or `httpEquiv`).
    pub fn key(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.property.as_deref())
            .or(self.http_equiv.as_deref())
    }

    /// Describe why this tag cannot be rendered, if it cannot.
    fn problem(&self) -> Option<&'static str> {
        let keys = [&self.name, &self.property, &self.http_equiv]
            .iter()
            .filter(|k| k.is_some())
            .count();

        match (&self.charset, keys, &self.content) {
            (Some(charset), 0, None) if charset.trim().is_empty() => Some("`charset` is empty"),
            (Some(_), 0, None) => None,
            (Some(_), _, _) => Some("`charset` cannot be combined with other attributes"),
            (None, 0, None) => Some("tag has neither `charset` nor `content`"),
            (None, 0, Some(_)) => Some("`content` requires `name`, `property` or `httpEquiv`"),
            (None, 1, None) => Some("tag requires `content`"),
            (None, 1, Some(_)) => None,
            (None, _, _) => Some("use only one of `name`, `property` or `httpEquiv`"),
        }
    }
}

/// A `<link>` tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTag {
    /// Relation, may list several space-separated values.
    pub rel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossorigin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid: Option<String>,
}

impl LinkTag {
    /// Iterate the individual relations (`"preload stylesheet"` -> 2).
    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.rel.split_ascii_whitespace()
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels().any(|r| r.eq_ignore_ascii_case(rel))
    }

    pub fn is_stylesheet(&self) -> bool {
        self.has_rel("stylesheet")
    }
}

impl HeadConfig {
    /// Validate meta/link entries and the language tag.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            diag.warn(Self::FIELDS.title, "title is empty");
        }

        if let Some(meta) = &self.meta {
            self.validate_meta(meta, diag);
        }
        if let Some(link) = &self.link {
            self.validate_link(link, diag);
        }
        self.html_attrs.validate(diag);
    }

    fn validate_meta(&self, meta: &[MetaTag], diag: &mut ConfigDiagnostics) {
        let mut hids = FxHashSet::default();
        let mut charsets = 0;

        for (i, tag) in meta.iter().enumerate() {
            if let Some(problem) = tag.problem() {
                diag.error(Self::FIELDS.meta, format!("entry #{}: {}", i + 1, problem));
            }
            if tag.charset.is_some() {
                charsets += 1;
            }
            if let Some(hid) = &tag.hid
                && !hids.insert(hid.as_str())
            {
                diag.error_with_hint(
                    Self::FIELDS.meta,
                    format!("entry #{}: duplicate hid '{}'", i + 1, hid),
                    "hid identifies one tag, give each tag its own",
                );
            }
        }

        if charsets > 1 {
            diag.warn(Self::FIELDS.meta, "more than one `charset` tag declared");
        }
    }

    fn validate_link(&self, link: &[LinkTag], diag: &mut ConfigDiagnostics) {
        let mut hids = FxHashSet::default();

        for (i, tag) in link.iter().enumerate() {
            let n = i + 1;
            if tag.rel.trim().is_empty() {
                diag.error(Self::FIELDS.link, format!("entry #{n}: `rel` is empty"));
                continue;
            }

            match tag.href.as_deref().map(str::trim) {
                None | Some("") => {
                    if let Some(rel) = tag
                        .rels()
                        .find(|r| REL_REQUIRES_HREF.contains(&r.to_ascii_lowercase().as_str()))
                    {
                        diag.error_with_hint(
                            Self::FIELDS.link,
                            format!("entry #{n}: {rel} link requires `href`"),
                            "set href to the asset path or URL",
                        );
                    }
                }
                Some(href) => {
                    if let Some(problem) = check_href(href) {
                        diag.error(Self::FIELDS.link, format!("entry #{n}: {problem}"));
                    }
                }
            }

            if let Some(hid) = &tag.hid
                && !hids.insert(hid.as_str())
            {
                diag.error(
                    Self::FIELDS.link,
                    format!("entry #{n}: duplicate hid '{hid}'"),
                );
            }
        }
    }

    /// Stylesheet links, in declaration order.
    pub fn stylesheets(&self) -> impl Iterator<Item = &LinkTag> {
        self.link.iter().flatten().filter(|l| l.is_stylesheet())
    }
}

impl HtmlAttrsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        // primary subtag, or a private-use (`x-`) / grandfathered (`i-`) prefix
        static RE_LANG: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(?:[A-Za-z]{2,8}(?:-[A-Za-z0-9]{1,8})*|[xXiI](?:-[A-Za-z0-9]{1,8})+)$")
                .unwrap()
        });

        if let Some(lang) = &self.lang
            && !RE_LANG.is_match(lang)
        {
            diag.error_with_hint(
                Self::FIELDS.lang,
                format!("'{lang}' is not a language tag"),
                "use a BCP 47 tag such as \"en\" or \"zh-Hans\"",
            );
        }
    }
}

/// Check an `href`: relative paths pass through, absolute ones must parse.
fn check_href(href: &str) -> Option<String> {
    // Protocol-relative URLs borrow the page scheme
    let candidate = match href.strip_prefix("//") {
        Some(rest) => format!("https://{rest}"),
        None => href.to_string(),
    };

    match url::Url::parse(&candidate) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_none() => {
            Some(format!("'{href}' has no host"))
        }
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => None,
        Err(e) => Some(format!("invalid URL '{href}': {e}")),
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_site;

    fn diagnose(head: &HeadConfig) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();
        head.validate(&mut diag);
        diag
    }

    #[test]
    fn test_defaults() {
        let config = test_parse_site("");
        assert!(config.head.title.is_none());
        assert!(config.head.meta.is_none());
        assert!(config.head.link.is_none());
        assert!(config.head.html_attrs.lang.is_none());
    }

    #[test]
    fn test_parse_head() {
        let config = test_parse_site(
            r#"[head]
title = "Laravel Arcanist"
meta = [
    { charset = "utf-8" },
    { hid = "description", name = "description", content = "Wizards" },
]
link = [
    { rel = "icon", type = "image/x-icon", href = "/favicon.ico" },
    { rel = "stylesheet", href = "https://fonts.googleapis.com/css2?family=IBM+Plex+Sans" },
]

[head.htmlAttrs]
lang = "en"
"#,
        );
        let head = &config.head;
        assert_eq!(head.title.as_deref(), Some("Laravel Arcanist"));
        assert_eq!(head.html_attrs.lang.as_deref(), Some("en"));

        let meta = head.meta.as_ref().unwrap();
        assert_eq!(meta[0].charset.as_deref(), Some("utf-8"));
        assert_eq!(meta[1].key(), Some("description"));

        let link = head.link.as_ref().unwrap();
        assert_eq!(link[0].mime_type.as_deref(), Some("image/x-icon"));
        assert_eq!(head.stylesheets().count(), 1);
        assert!(diagnose(head).into_result().is_ok());
    }

    #[test]
    fn test_stylesheet_requires_href() {
        let head = HeadConfig {
            link: Some(vec![LinkTag {
                rel: "stylesheet".into(),
                ..LinkTag::default()
            }]),
            ..HeadConfig::default()
        };
        let diag = diagnose(&head);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("requires `href`"));
    }

    #[test]
    fn test_multi_rel_requires_href() {
        let head = HeadConfig {
            link: Some(vec![LinkTag {
                rel: "author preload".into(),
                href: Some("  ".into()),
                ..LinkTag::default()
            }]),
            ..HeadConfig::default()
        };
        assert!(diagnose(&head).has_errors());
    }

    #[test]
    fn test_empty_rel_rejected() {
        let head = HeadConfig {
            link: Some(vec![LinkTag::default()]),
            ..HeadConfig::default()
        };
        assert!(diagnose(&head).errors()[0].message.contains("`rel` is empty"));
    }

    #[test]
    fn test_href_forms() {
        assert_eq!(check_href("/favicon.ico"), None);
        assert_eq!(check_href("favicon.ico"), None);
        assert_eq!(check_href("//fonts.gstatic.com"), None);
        assert_eq!(check_href("https://fonts.gstatic.com"), None);
        assert!(check_href("https://exa mple.com").is_some());
    }

    #[test]
    fn test_meta_shapes() {
        let ok = |tag: MetaTag| tag.problem().is_none();

        assert!(ok(MetaTag {
            charset: Some("utf-8".into()),
            ..MetaTag::default()
        }));
        assert!(ok(MetaTag {
            property: Some("og:title".into()),
            content: Some("Docs".into()),
            ..MetaTag::default()
        }));
        assert!(!ok(MetaTag::default()));
        assert!(!ok(MetaTag {
            name: Some("viewport".into()),
            ..MetaTag::default()
        }));
        assert!(!ok(MetaTag {
            content: Some("orphan".into()),
            ..MetaTag::default()
        }));
        assert!(!ok(MetaTag {
            name: Some("a".into()),
            property: Some("b".into()),
            content: Some("c".into()),
            ..MetaTag::default()
        }));
    }

    #[test]
    fn test_duplicate_hid() {
        let tag = MetaTag {
            hid: Some("description".into()),
            name: Some("description".into()),
            content: Some("x".into()),
            ..MetaTag::default()
        };
        let head = HeadConfig {
            meta: Some(vec![tag.clone(), tag]),
            ..HeadConfig::default()
        };
        let diag = diagnose(&head);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].message.contains("duplicate hid"));
    }

    #[test]
    fn test_lang_tag() {
        for lang in ["en", "zh-Hans", "pt-BR", "x-klingon", "i-default", "de-CH-1996"] {
            let attrs = HtmlAttrsConfig {
                lang: Some(lang.into()),
            };
            let mut diag = ConfigDiagnostics::new();
            attrs.validate(&mut diag);
            assert!(diag.is_empty(), "{lang} should be accepted");
        }

        for lang in ["english please", "x", "e", "en-", "x-"] {
            let attrs = HtmlAttrsConfig {
                lang: Some(lang.into()),
            };
            let mut diag = ConfigDiagnostics::new();
            attrs.validate(&mut diag);
            assert!(diag.has_errors(), "{lang} should be rejected");
        }
    }
}
