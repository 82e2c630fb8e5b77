//! Derive macro for the `Options` trait.

use crate::common::{extract_doc_comments, to_option_name};
use darling::{FromDeriveInput, FromMeta};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::{DeriveInput, Meta, parse_macro_input};

/// Parsed struct-level input.
#[derive(FromDeriveInput)]
#[darling(supports(struct_named))]
struct OptionsInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<(), syn::Field>,
}

/// Arguments of `#[option(...)]`.
#[derive(Default, FromMeta)]
struct OptionArgs {
    /// Explicit option name.
    #[darling(default)]
    name: Option<String>,

    /// Explicit help text.
    #[darling(default)]
    description: Option<String>,
}

/// A field marked `#[option]`.
struct OptionField {
    ident: syn::Ident,
    ty: syn::Type,
    name: String,
    description: String,
}

/// Implementation of the `#[derive(Options)]` macro.
pub(crate) fn derive_options(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let parsed = match OptionsInput::from_derive_input(&input) {
        Ok(parsed) => parsed,
        Err(err) => return err.write_errors().into(),
    };

    match expand(&parsed) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn expand(input: &OptionsInput) -> darling::Result<TokenStream2> {
    let fields = collect_fields(input)?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let krate =
        rigging_macro_utils::resolve_crate_path(rigging_macro_utils::RiggingCrate::Options);

    let specs = fields.iter().map(|field| {
        let ident = &field.ident;
        let ty = &field.ty;
        let option_name = &field.name;
        let description = if field.description.is_empty() {
            quote! {}
        } else {
            let text = &field.description;
            quote! { .with_description(#text) }
        };

        quote! {
            #krate::OptionSpec::new::<#ty>(#option_name, |target: &mut Self, raw: &str| {
                #krate::OptionValue::apply(&mut target.#ident, raw)
            })
            #description
        }
    });

    Ok(quote! {
        impl #impl_generics #krate::Options for #name #ty_generics #where_clause {
            fn option_specs() -> ::std::vec::Vec<#krate::OptionSpec<Self>> {
                ::std::vec![#(#specs),*]
            }
        }
    })
}

/// Collects the `#[option]` fields in declaration order.
fn collect_fields(input: &OptionsInput) -> darling::Result<Vec<OptionField>> {
    let darling::ast::Data::Struct(fields) = &input.data else {
        return Err(
            darling::Error::custom("#[derive(Options)] requires a struct with named fields")
                .with_span(&input.ident),
        );
    };

    let mut seen = HashSet::new();
    let mut collected = Vec::new();

    for field in fields.iter() {
        let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("option")) else {
            continue;
        };
        let Some(ident) = field.ident.clone() else {
            continue;
        };

        let args = match &attr.meta {
            Meta::Path(_) => OptionArgs::default(),
            meta => OptionArgs::from_meta(meta)?,
        };

        let name = args
            .name
            .unwrap_or_else(|| to_option_name(&ident.to_string()));
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(
                darling::Error::custom(format!("invalid option name '{name}'")).with_span(attr),
            );
        }
        if !seen.insert(name.clone()) {
            return Err(
                darling::Error::custom(format!("option '{name}' is declared more than once"))
                    .with_span(attr),
            );
        }

        let description = args
            .description
            .or_else(|| extract_doc_comments(&field.attrs))
            .unwrap_or_default();

        collected.push(OptionField {
            ident,
            ty: field.ty.clone(),
            name,
            description,
        });
    }

    Ok(collected)
}
