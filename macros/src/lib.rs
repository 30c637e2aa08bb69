//! Proc macros for docsite-config.
//!
//! # Config derive macro
//!
//! Generates field path accessors, the layered `Merge` implementation and
//! a TOML starter template.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "head", rename_all = "camelCase")]
//! /// Page `<head>` metadata.
//! pub struct HeadConfig {
//!     /// Document title.
//!     #[config(example = "\"My Docs\"")]
//!     pub title: Option<String>,
//!
//!     /// `<html>` attributes.
//!     #[config(sub)]
//!     pub html_attrs: HtmlAttrsConfig,
//! }
//!
//! // Generates:
//! // - HeadConfig::FIELDS.html_attrs -> FieldPath("head.htmlAttrs")
//! // - impl Merge for HeadConfig (field by field)
//! // - HeadConfig::template() / template_with_header()
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - dotted section path, `""` for the root (required)
//! - `#[config(rename_all = "camelCase")]` - key casing, mirrors serde
//!
//! Field-level:
//! - `#[config(sub)]` - nested section, rendered as its own table
//! - `#[config(default = "x")]` - TOML literal written active in the template
//! - `#[config(example = "x")]` - TOML literal written commented out
//! - `#[config(additive)]` - sequence appended instead of replaced on merge

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS, `Merge` and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
