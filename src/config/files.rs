//! On-disk layout of configuration documents.
//!
//! ```text
//! <root>/
//! ├── site.toml            # base document (required)     precedence 0
//! ├── site.d/*.toml        # drop-in fragments             precedence 1
//! ├── site.<profile>.toml  # profile override              precedence 2
//! ├── theme.toml           # theme base (optional)         precedence 0
//! ├── theme.d/*.toml       # theme fragments               precedence 1
//! └── theme.<profile>.toml # theme profile override        precedence 2
//! ```
//!
//! Every document may also be `.json`. Fragments share one precedence
//! level, so two fragments must not set the same key differently.

use super::util::{find_config_file, find_document};
use super::{ConfigDocument, ConfigError, Format, RawDocument, SiteConfig};
use crate::debug;
use crate::resolve::{Layer, ResolvedBuild};
use crate::theme::ThemeConfig;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const BASE_PRECEDENCE: u32 = 0;
pub const FRAGMENT_PRECEDENCE: u32 = 1;
pub const PROFILE_PRECEDENCE: u32 = 2;

/// Configuration documents found for one site, lowest precedence first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFiles {
    pub root: PathBuf,
    pub site: Vec<Layer<PathBuf>>,
    pub theme: Vec<Layer<PathBuf>>,
}

impl ConfigFiles {
    /// Discover the documents of the site rooted at `root`.
    ///
    /// `profile` selects the `site.<profile>` / `theme.<profile>` overrides;
    /// a profile without override files is not an error.
    pub fn discover(root: &Path, profile: Option<&str>) -> Result<Self, ConfigError> {
        let site = collect_layers(root, SiteConfig::KIND, profile)?;
        if !site.iter().any(|l| l.precedence == BASE_PRECEDENCE) {
            return Err(ConfigError::MissingBase(
                root.join(format!("{}.toml", SiteConfig::KIND)),
            ));
        }
        let theme = collect_layers(root, ThemeConfig::KIND, profile)?;

        Ok(Self {
            root: root.to_path_buf(),
            site,
            theme,
        })
    }

    /// Search upward from `start` for the site root, then discover.
    pub fn discover_from(start: &Path, profile: Option<&str>) -> Result<Self, ConfigError> {
        let base = find_config_file(start, SiteConfig::KIND).ok_or_else(|| {
            ConfigError::MissingBase(start.join(format!("{}.toml", SiteConfig::KIND)))
        })?;
        let root = base.parent().unwrap_or(start);
        Self::discover(root, profile)
    }

    /// Read, validate and resolve every discovered document.
    pub fn load(&self) -> Result<ResolvedBuild, ConfigError> {
        let site = read_layers(&self.site)?;
        let theme = read_layers(&self.theme)?;
        ResolvedBuild::resolve(&site, &theme)
    }
}

/// Collect base, fragment and profile layers for one document kind.
fn collect_layers(
    root: &Path,
    stem: &str,
    profile: Option<&str>,
) -> Result<Vec<Layer<PathBuf>>, ConfigError> {
    let mut layers = Vec::new();

    if let Some(base) = find_document(root, stem) {
        layers.push(path_layer(base, BASE_PRECEDENCE));
    }

    let fragment_dir = root.join(format!("{stem}.d"));
    if fragment_dir.is_dir() {
        let entries =
            fs::read_dir(&fragment_dir).map_err(|err| ConfigError::Io(fragment_dir.clone(), err))?;
        let mut fragments = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|err| ConfigError::Io(fragment_dir.clone(), err))?
                .path();
            if path.is_file() && Format::from_path(&path).is_some() {
                fragments.push(path);
            }
        }
        // read_dir order is platform dependent
        fragments.sort();
        layers.extend(
            fragments
                .into_iter()
                .map(|path| path_layer(path, FRAGMENT_PRECEDENCE)),
        );
    }

    if let Some(profile) = profile {
        match find_document(root, &format!("{stem}.{profile}")) {
            Some(path) => layers.push(path_layer(path, PROFILE_PRECEDENCE)),
            None => debug!("load"; "no {} override for profile '{}'", stem, profile),
        }
    }

    Ok(layers)
}

fn path_layer(path: PathBuf, precedence: u32) -> Layer<PathBuf> {
    Layer::new(path.display().to_string(), precedence, path)
}

fn read_layers(layers: &[Layer<PathBuf>]) -> Result<Vec<Layer<RawDocument>>, ConfigError> {
    layers
        .iter()
        .map(|layer| {
            let doc = RawDocument::from_path(&layer.document)?;
            Ok(Layer::new(layer.origin.clone(), layer.precedence, doc))
        })
        .collect()
}

// ============================================================================
// tests
// ============================================================================
