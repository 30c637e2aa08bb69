//! `Merge` implementation generation.
//!
//! Every field is merged through its own `Merge` impl, except fields
//! marked `#[config(additive)]`, which go through `merge::append`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::config::field::FieldInfo;

pub fn generate_merge_impl(name: &syn::Ident, fields: &[FieldInfo]) -> TokenStream {
    let idents: Vec<_> = fields.iter().map(|f| &f.name).collect();

    let merges = fields.iter().map(|f| {
        let field = &f.name;
        if f.additive {
            quote! { crate::config::merge::append(&mut self.#field, #field); }
        } else {
            quote! { crate::config::Merge::merge(&mut self.#field, #field); }
        }
    });

    // Additive fields compose instead of competing, so they never conflict
    let conflicts = fields.iter().filter(|f| !f.additive).map(|f| {
        let field = &f.name;
        let key = &f.toml_name;
        quote! {
            crate::config::Merge::conflicts(
                &self.#field,
                &other.#field,
                &crate::config::merge::join_path(path, #key),
                out,
            );
        }
    });

    quote! {
        impl crate::config::Merge for #name {
            fn merge(&mut self, other: Self) {
                let Self { #(#idents),* } = other;
                #(#merges)*
            }

            #[allow(unused_variables)]
            fn conflicts(&self, other: &Self, path: &str, out: &mut Vec<String>) {
                #(#conflicts)*
            }
        }
    }
}
