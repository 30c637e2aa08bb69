//! Raw configuration documents and schema validation.
//!
//! A [`RawDocument`] is syntactically valid TOML or JSON that has not been
//! checked against the schema yet. [`validate`] turns it into a typed
//! document or fails with:
//!
//! - `UnknownKey`: any key outside the schema (all of them are listed,
//!   even next to a type error)
//! - `TypeMismatch`: a value of the wrong shape, with its key path
//! - `Invalid`: entry-level invariants (required tag fields, empty lists)

use super::{ConfigDiagnostics, ConfigError, Merge};
use crate::debug;
use serde::{Serialize, de::DeserializeOwned};
use serde_path_to_error::Segment;
use std::{fmt::Debug, fs, path::Path};

/// A schema-backed configuration document.
pub trait ConfigDocument:
    Merge + DeserializeOwned + Serialize + Default + Clone + PartialEq + Debug
{
    /// Document kind, also the file stem (`site`, `theme`).
    const KIND: &'static str;

    /// Check entry-level invariants, collecting every problem.
    fn validate(&self, diag: &mut ConfigDiagnostics);
}

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// A parsed, not yet validated configuration document.
///
/// TOML sources are lowered to the JSON value model so that both formats
/// validate through the same path.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    origin: String,
    value: serde_json::Value,
}

impl RawDocument {
    /// Parse TOML source text.
    pub fn from_toml_str(origin: impl Into<String>, content: &str) -> Result<Self, ConfigError> {
        let origin = origin.into();
        let syntax = |message: String| ConfigError::Syntax {
            origin: origin.clone(),
            message,
        };
        let table: toml::Table = toml::from_str(content).map_err(|e| syntax(e.to_string()))?;
        let value = serde_json::to_value(table).map_err(|e| syntax(e.to_string()))?;
        Ok(Self { origin, value })
    }

    /// Parse JSON source text.
    pub fn from_json_str(origin: impl Into<String>, content: &str) -> Result<Self, ConfigError> {
        let origin = origin.into();
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::Syntax {
                origin: origin.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { origin, value })
    }

    /// Parse source text in the given format.
    pub fn parse(
        origin: impl Into<String>,
        format: Format,
        content: &str,
    ) -> Result<Self, ConfigError> {
        match format {
            Format::Toml => Self::from_toml_str(origin, content),
            Format::Json => Self::from_json_str(origin, content),
        }
    }

    /// Read and parse a file, format chosen by extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        let format = Format::from_path(path).ok_or_else(|| ConfigError::Syntax {
            origin: origin.clone(),
            message: "unsupported file extension, expected .toml or .json".into(),
        })?;
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        debug!("load"; "{}", origin);
        Self::parse(origin, format, &content)
    }

    /// Where this document came from (a path or a label).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Validate against the schema of `T`, see [`validate`].
    pub fn validate<T: ConfigDocument>(&self) -> Result<T, ConfigError> {
        validate(self)
    }
}

/// Validate a raw document into a typed document.
///
/// Unknown keys are reported before type errors, and all of them are
/// listed even when a type error would stop a single pass early.
pub fn validate<T: ConfigDocument>(doc: &RawDocument) -> Result<T, ConfigError> {
    let parsed: T = deserialize(&doc.origin, &doc.value)?;

    let mut diag = ConfigDiagnostics::for_origin(&doc.origin);
    parsed.validate(&mut diag);
    diag.print_warnings();
    diag.into_result().map_err(ConfigError::Invalid)?;

    Ok(parsed)
}

/// Deserialize with unknown-key collection and key paths on errors.
///
/// A type error ends a serde pass, hiding the keys after it. Each failed
/// pass removes the mismatching value from a scratch copy and runs again
/// until a pass completes or nothing is left to remove.
fn deserialize<T: DeserializeOwned>(
    origin: &str,
    value: &serde_json::Value,
) -> Result<T, ConfigError> {
    let mut unknown: Vec<String> = Vec::new();
    let mut mismatch = None;
    let mut scratch: Option<serde_json::Value> = None;

    let parsed = loop {
        let current = scratch.as_ref().unwrap_or(value);
        let mut ignored = Vec::new();
        let result: Result<T, _> = serde_path_to_error::deserialize(
            serde_ignored::Deserializer::new(current, &mut |path| {
                ignored.push(display_path(&path))
            }),
        );

        for key in ignored {
            if !unknown.contains(&key) {
                unknown.push(key);
            }
        }

        match result {
            Ok(parsed) => break Some(parsed),
            Err(err) => {
                let path = err.path().clone();
                mismatch.get_or_insert_with(|| type_mismatch(origin, &err));
                let next = scratch.get_or_insert_with(|| value.clone());
                if !prune(next, &path) {
                    break None;
                }
            }
        }
    };

    if !unknown.is_empty() {
        return Err(ConfigError::UnknownKey {
            origin: origin.to_string(),
            keys: unknown,
        });
    }

    match (mismatch, parsed) {
        (Some(err), _) => Err(err),
        (None, Some(parsed)) => Ok(parsed),
        // a pass without a type error always yields a value
        (None, None) => Err(ConfigError::TypeMismatch {
            origin: origin.to_string(),
            message: "document could not be read".into(),
        }),
    }
}

fn type_mismatch(origin: &str, err: &serde_path_to_error::Error<serde_json::Error>) -> ConfigError {
    let path = err.path().to_string();
    let message = if path == "." {
        err.inner().to_string()
    } else {
        format!("`{}`: {}", path, err.inner())
    };
    ConfigError::TypeMismatch {
        origin: origin.to_string(),
        message,
    }
}

/// Remove the value at `path` from `value`.
///
/// Paths through a list remove the whole list: dropping one entry would
/// shift the indices of the keys reported inside later entries.
fn prune(value: &mut serde_json::Value, path: &serde_path_to_error::Path) -> bool {
    let keys: Vec<&str> = path
        .iter()
        .map_while(|segment| match segment {
            Segment::Map { key } => Some(key.as_str()),
            _ => None,
        })
        .collect();

    let Some((last, parents)) = keys.split_last() else {
        return false;
    };
    let mut current = value;
    for key in parents {
        match current.get_mut(*key) {
            Some(next) => current = next,
            None => return false,
        }
    }
    current
        .as_object_mut()
        .is_some_and(|map| map.remove(*last).is_some())
}

/// Render an ignored-key path, dropping the `?` segments of `Option` layers.
fn display_path(path: &serde_ignored::Path) -> String {
    path.to_string()
        .split('.')
        .filter(|segment| *segment != "?")
        .collect::<Vec<_>>()
        .join(".")
}

// ============================================================================
// tests
// ============================================================================
