//! Template generation code for Config derive macro.

use proc_macro2::TokenStream;
use quote::quote;

use crate::config::field::FieldInfo;

/// Generate template code (TokenStream) for fields.
///
/// Plain keys come first, nested sections last: a TOML table header ends
/// the key list of its parent.
pub fn generate_template_code(fields: &[FieldInfo]) -> TokenStream {
    let keys = fields
        .iter()
        .filter(|f| !f.sub)
        .map(|f| generate_field_template_code(f));
    let subs = fields
        .iter()
        .filter(|f| f.sub)
        .map(|f| generate_field_template_code(f));

    quote! {
        #(#keys)*
        #(#subs)*
    }
}

/// Generate TOML template code for a single field
fn generate_field_template_code(info: &FieldInfo) -> TokenStream {
    let toml_name = &info.toml_name;

    let doc_code = if let Some(ref doc) = info.doc {
        let doc_str: String = doc.lines().map(|l| format!("# {}\n", l.trim())).collect();
        quote! { out.push_str(#doc_str); }
    } else {
        quote! {}
    };

    // Nested section: output its own template with header
    if info.sub {
        let field_ty = &info.ty;
        return quote! {
            out.push('\n');
            out.push_str(&<#field_ty>::template_with_header());
        };
    }

    if let Some(ref default_val) = info.default {
        let line = format!("{} = {}\n", toml_name, default_val);
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    if let Some(ref example) = info.example {
        let line = format!("# {} = {}\n", toml_name, example);
        return quote! {
            #doc_code
            out.push_str(#line);
        };
    }

    quote! {}
}
