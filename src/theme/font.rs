//! Font family stacks.

use serde::{Deserialize, Serialize};

/// CSS generic family keywords, emitted unquoted.
const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "ui-serif",
    "ui-sans-serif",
    "ui-monospace",
    "ui-rounded",
    "emoji",
    "math",
    "fangsong",
];

/// An ordered font fallback list, most preferred first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontStack(pub Vec<String>);

crate::replace_merge!(FontStack);

impl FontStack {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The preferred (first) family.
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Render as a CSS `font-family` value.
    ///
    /// Generic keywords and plain identifiers stay bare, any other name is
    /// double-quoted.
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|name| css_family(name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn css_family(name: &str) -> String {
    let name = name.trim();
    let bare = GENERIC_FAMILIES.contains(&name)
        || (!name.starts_with(|c: char| c.is_ascii_digit())
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
