//! End-to-end resolution over documents on disk.

use docsite_config::{
    ConfigError, ConfigFiles, Format, Layer, RawDocument, RenderTarget, ResolvedBuild,
    SiteConfig, ThemeConfig, TypographyRule, merge, resolve_theme,
};
use std::{fs, path::Path};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn layer(origin: &str, precedence: u32, format: Format, content: &str) -> Layer<RawDocument> {
    Layer::from_document(
        precedence,
        RawDocument::parse(origin, format, content).unwrap(),
    )
}

const SITE: &str = r#"
target = "static"
components = true
buildModules = ["@nuxtjs/tailwindcss"]
modules = ["@nuxt/content"]

[head]
title = "Docs"
meta = [
    { charset = "utf-8" },
    { name = "viewport", content = "width=device-width, initial-scale=1" },
    { hid = "description", name = "description", content = "Project documentation" },
]
link = [
    { rel = "icon", type = "image/x-icon", href = "/favicon.ico" },
    { rel = "stylesheet", href = "https://fonts.googleapis.com/css2?family=IBM+Plex+Sans&display=swap" },
]

[head.htmlAttrs]
lang = "en"

[content]
liveEdit = false

[content.markdown.prism]
theme = "prism-themes/themes/prism-one-light.css"

[tailwindcss]
jit = true
"#;

const THEME: &str = r#"
plugins = ["@tailwindcss/typography"]

[theme.fontFamily]
sans = ["IBM Plex Sans", "ui-sans-serif", "system-ui", "sans-serif"]
mono = ["IBM Plex Mono", "monospace"]

[theme.extend.typography.DEFAULT.css]
pre = false
code = false
"code::before" = false
"code::after" = false
"pre code" = false
"pre code::before" = false
"pre code::after" = false
"#;

#[test]
fn resolves_full_site_from_disk() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site.toml", SITE);
    write(dir.path(), "theme.toml", THEME);

    let build = ConfigFiles::discover(dir.path(), None).unwrap().load().unwrap();
    let site = build.site();
    assert_eq!(site.target(), RenderTarget::Static);
    assert!(site.components());
    assert!(!site.content.live_edit());
    assert!(site.tailwindcss.jit());
    assert_eq!(site.head.stylesheets().count(), 1);
    assert_eq!(
        site.content.highlight_theme(),
        Some("prism-themes/themes/prism-one-light.css")
    );

    let theme = build.theme();
    assert_eq!(
        theme.font_family("sans").unwrap().to_css(),
        "\"IBM Plex Sans\", ui-sans-serif, system-ui, sans-serif"
    );
    assert!(theme.is_reset("pre code::after"));
    assert!(build.check(true).warnings().is_empty());
}

#[test]
fn override_omitting_build_modules_keeps_base() {
    let site = [
        layer("site.toml", 0, Format::Toml, SITE),
        layer("site.prod.json", 2, Format::Json, r#"{ "target": "server" }"#),
    ];
    let build = ResolvedBuild::resolve(&site, &[]).unwrap();
    assert_eq!(build.site().build_modules(), ["@nuxtjs/tailwindcss"]);
    assert_eq!(build.site().target(), RenderTarget::Server);
}

#[test]
fn override_wins_only_for_fields_it_sets() {
    let base: SiteConfig = RawDocument::from_toml_str("site.toml", SITE)
        .unwrap()
        .validate()
        .unwrap();
    let over: SiteConfig = RawDocument::from_json_str("over.json", r#"{ "head": { "title": "Guide" } }"#)
        .unwrap()
        .validate()
        .unwrap();

    let merged = merge(base.clone(), [over]);
    assert_eq!(merged.head.title.as_deref(), Some("Guide"));
    assert_eq!(merged.head.meta, base.head.meta);
    assert_eq!(merged.head.link, base.head.link);
    assert_eq!(merged.content, base.content);
    assert_eq!(merged.tailwindcss, base.tailwindcss);
    assert_eq!(merge(base.clone(), []), base);
}

#[test]
fn typography_reset_replaces_style_record() {
    let base: ThemeConfig = RawDocument::from_json_str(
        "theme.json",
        r#"{ "theme": { "extend": { "typography": { "DEFAULT": { "css": { "pre": { "padding": "1rem" } } } } } } }"#,
    )
    .unwrap()
    .validate()
    .unwrap();
    let over: ThemeConfig = RawDocument::from_json_str(
        "theme.prod.json",
        r#"{ "theme": { "extend": { "typography": { "DEFAULT": { "css": { "pre": null } } } } } }"#,
    )
    .unwrap()
    .validate()
    .unwrap();

    let theme = resolve_theme([base, over]);
    assert_eq!(
        theme.typography_rule("DEFAULT", "pre"),
        Some(&TypographyRule::Reset)
    );
}

#[test]
fn unknown_key_fails_before_merge() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site.toml", SITE);
    write(
        dir.path(),
        "site.prod.toml",
        "[tailwindcss]\nexperimentalFlag = true",
    );

    match ConfigFiles::discover(dir.path(), Some("prod")).unwrap().load() {
        Err(ConfigError::UnknownKey { origin, keys }) => {
            assert!(origin.ends_with("site.prod.toml"));
            assert_eq!(keys, vec!["tailwindcss.experimentalFlag".to_string()]);
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn target_is_closed_enum() {
    for (value, expected) in [("static", RenderTarget::Static), ("server", RenderTarget::Server)] {
        let site = [layer("site.toml", 0, Format::Toml, &format!("target = \"{value}\""))];
        let build = ResolvedBuild::resolve(&site, &[]).unwrap();
        assert_eq!(build.site().target(), expected);
    }

    let site = [layer("site.toml", 0, Format::Toml, "target = \"hybrid\"")];
    assert!(matches!(
        ResolvedBuild::resolve(&site, &[]),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn every_resolved_font_category_is_non_empty() {
    let theme = [layer("theme.toml", 0, Format::Toml, THEME)];
    let site = [layer("site.toml", 0, Format::Toml, SITE)];
    let build = ResolvedBuild::resolve(&site, &theme).unwrap();
    assert!(build.theme().font_families().len() >= 3);
    assert!(build.theme().font_families().values().all(|s| !s.is_empty()));

    let empty = [layer("theme.toml", 0, Format::Toml, "[theme.fontFamily]\nserif = []")];
    assert!(matches!(
        ResolvedBuild::resolve(&site, &empty),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn fragments_that_disagree_conflict() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "site.toml", SITE);
    write(dir.path(), "theme.d/fonts.toml", "[theme.fontFamily]\nmono = [\"Menlo\"]");
    write(dir.path(), "theme.d/more-fonts.json", r#"{ "theme": { "fontFamily": { "mono": ["Consolas"] } } }"#);

    match ConfigFiles::discover(dir.path(), None).unwrap().load() {
        Err(ConfigError::Conflict { first, second, paths, .. }) => {
            assert!(first.ends_with("fonts.toml"));
            assert!(second.ends_with("more-fonts.json"));
            assert_eq!(paths, vec!["theme.fontFamily.mono".to_string()]);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn resolved_build_serializes_for_render_driver() {
    let site = [layer("site.toml", 0, Format::Toml, SITE)];
    let theme = [layer("theme.toml", 0, Format::Toml, THEME)];
    let json = ResolvedBuild::resolve(&site, &theme).unwrap().to_json();

    assert_eq!(json["site"]["target"], "static");
    assert_eq!(json["site"]["head"]["link"][0]["href"], "/favicon.ico");
    assert!(json["theme"]["theme"]["extend"]["typography"]["DEFAULT"]["css"]["pre"].is_null());
}

#[test]
fn serialized_build_carries_defaults_for_unset_keys() {
    let site = [layer("site.json", 0, Format::Json, r#"{ "head": { "title": "Docs" } }"#)];
    let json = ResolvedBuild::resolve(&site, &[]).unwrap().to_json();

    assert_eq!(json["site"]["target"], "static");
    assert_eq!(json["site"]["content"]["liveEdit"], true);
    assert_eq!(json["site"]["head"]["title"], "Docs");
}
