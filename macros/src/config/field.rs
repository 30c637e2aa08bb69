//! Field information structures and parsing.

use crate::config::attr::{extract_doc_comment, get_default_value, get_example_value, has_attr};
use crate::config::types::to_camel_case;

/// Parsed field information.
pub struct FieldInfo {
    pub name: syn::Ident,
    pub toml_name: String,
    pub doc: Option<String>,
    pub default: Option<String>,
    pub example: Option<String>,
    pub sub: bool,
    pub additive: bool,
    pub ty: syn::Type,
}

impl FieldInfo {
    /// Parse field info from a syn::Field.
    pub fn from_field(field: &syn::Field, camel_case: bool) -> Option<Self> {
        let ident = field.ident.as_ref()?;
        let attrs = &field.attrs;

        let raw = ident.to_string();
        let raw = raw.strip_prefix("r#").unwrap_or(&raw).to_string();
        let toml_name = if camel_case { to_camel_case(&raw) } else { raw };

        Some(Self {
            name: ident.clone(),
            toml_name,
            doc: extract_doc_comment(attrs),
            default: get_default_value(attrs),
            example: get_example_value(attrs),
            sub: has_attr(attrs, "sub"),
            additive: has_attr(attrs, "additive"),
            ty: field.ty.clone(),
        })
    }
}
