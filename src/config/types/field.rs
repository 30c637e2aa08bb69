//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted key path inside a configuration document.
///
/// Generated by `#[derive(Config)]` as compile-time checked accessors:
///
/// ```ignore
/// #[derive(Config)]
/// #[config(section = "head", rename_all = "camelCase")]
/// pub struct HeadConfig {
///     pub html_attrs: HtmlAttrsConfig,
/// }
///
/// diag.error(HeadConfig::FIELDS.html_attrs, "...");  // "head.htmlAttrs"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Last segment of the path (`head.htmlAttrs.lang` -> `lang`).
    pub fn key(&self) -> &'static str {
        self.0.rsplit('.').next().unwrap_or(self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}
