//! Starter documents for a new site.
//!
//! Rendered from the schema itself: doc comments become TOML comments,
//! declared defaults become keys, examples become commented-out keys.

use crate::config::{ConfigDocument, ConfigError, SiteConfig};
use crate::log;
use crate::theme::ThemeConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Starter `site.toml` content.
pub fn site_template() -> String {
    with_header::<SiteConfig>(&SiteConfig::template_with_header())
}

/// Starter `theme.toml` content.
pub fn theme_template() -> String {
    with_header::<ThemeConfig>(&ThemeConfig::template_with_header())
}

fn with_header<T: ConfigDocument>(body: &str) -> String {
    format!(
        "# {} configuration (docsite-config v{})\n\n{}",
        T::KIND,
        env!("CARGO_PKG_VERSION"),
        body
    )
}

/// Write `site.toml` and `theme.toml` into `root`.
///
/// Fails with `Exists` without writing anything if either document (TOML
/// or JSON) is already there.
pub fn write_starter(root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let files = [
        (SiteConfig::KIND, site_template()),
        (ThemeConfig::KIND, theme_template()),
    ];

    for (stem, _) in &files {
        for ext in ["toml", "json"] {
            let path = root.join(format!("{stem}.{ext}"));
            if path.exists() {
                return Err(ConfigError::Exists(path));
            }
        }
    }

    fs::create_dir_all(root).map_err(|err| ConfigError::Io(root.to_path_buf(), err))?;

    let mut written = Vec::with_capacity(files.len());
    for (stem, content) in files {
        let path = root.join(format!("{stem}.toml"));
        fs::write(&path, content).map_err(|err| ConfigError::Io(path.clone(), err))?;
        log!("init"; "wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}
