//! docsite-config - layered, schema-checked build configuration for a
//! static documentation site.
//!
//! Two documents describe a build: the site document (`site.toml` /
//! `site.json`) and the theme document (`theme.toml` / `theme.json`) for
//! the CSS utility compiler. Both are validated against a fixed schema,
//! merged with their override layers and handed to the render driver as
//! one immutable [`ResolvedBuild`].
//!
//! ```no_run
//! use docsite_config::ConfigFiles;
//! use std::path::Path;
//!
//! let build = ConfigFiles::discover(Path::new("."), Some("prod"))?.load()?;
//! println!("{}", build.to_json());
//! # Ok::<(), docsite_config::ConfigError>(())
//! ```

pub mod config;
pub mod logger;
pub mod resolve;
pub mod starter;
pub mod theme;

pub use config::{
    ConfigDocument, ConfigError, ConfigFiles, Format, Merge, RawDocument, RenderTarget,
    SiteConfig, find_config_file, validate,
};
pub use resolve::{Layer, ResolvedBuild, merge, merge_layers};
pub use theme::{FontStack, ThemeConfig, TypographyRule, resolve_theme};
