//! Attribute helpers shared by the derive implementations.

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Extracts doc comment text from attributes, joined into a single line.
pub(crate) fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let mut docs = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("doc")
            && let Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(ExprLit {
                lit: Lit::Str(lit_str),
                ..
            }) = &meta.value
        {
            let line = lit_str.value().trim().to_string();
            if !line.is_empty() {
                docs.push(line);
            }
        }
    }

    if docs.is_empty() {
        None
    } else {
        Some(docs.join(" "))
    }
}

/// Converts a `snake_case` field name to a `kebab-case` option name.
pub(crate) fn to_option_name(field: &str) -> String {
    field.trim_start_matches("r#").replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_become_kebab_case() {
        assert_eq!(to_option_name("log_level"), "log-level");
        assert_eq!(to_option_name("port"), "port");
        assert_eq!(to_option_name("r#type"), "type");
    }

    #[test]
    fn doc_lines_are_joined() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[doc = " Minimum level"]),
            syn::parse_quote!(#[doc = ""]),
            syn::parse_quote!(#[doc = " written to the file."]),
            syn::parse_quote!(#[option]),
        ];
        assert_eq!(
            extract_doc_comments(&attrs).as_deref(),
            Some("Minimum level written to the file.")
        );
        assert_eq!(extract_doc_comments(&attrs[3..]), None);
    }
}
