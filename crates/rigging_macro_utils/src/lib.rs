//! Shared utilities for Rigging procedural macro crates.
//!
//! Generated code has to name Rigging crates by path. Consumers may depend on
//! an individual crate (possibly renamed) or only on the `rigging` umbrella
//! crate, so the path is looked up in the consumer's `Cargo.toml`.

use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Package name of the umbrella crate.
const UMBRELLA: &str = "rigging";

/// A Rigging crate that macro-generated code may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiggingCrate {
    /// `rigging_options`
    Options,
}

impl RiggingCrate {
    /// Returns the `Cargo.toml` package name for this crate.
    #[must_use]
    pub fn package_name(self) -> &'static str {
        match self {
            Self::Options => "rigging_options",
        }
    }
}

/// Returns a [`TokenStream`] path for the given Rigging crate, as seen from
/// the crate currently being compiled.
///
/// Resolution order:
/// 1. Direct dependency (possibly renamed in `Cargo.toml`).
/// 2. Indirect access through the `rigging` umbrella crate.
/// 3. The literal crate name, so the compiler reports the missing dependency.
pub fn resolve_crate_path(krate: RiggingCrate) -> TokenStream {
    let name = krate.package_name();
    let direct = crate_name(name).ok();
    let umbrella = direct.is_none().then(|| crate_name(UMBRELLA).ok()).flatten();
    crate_path(name, direct, umbrella)
}

/// Builds the path to `name` from the lookup results.
fn crate_path(name: &str, direct: Option<FoundCrate>, umbrella: Option<FoundCrate>) -> TokenStream {
    let ident = format_ident!("{}", name);

    match (direct, umbrella) {
        // Inside the crate itself; it declares `extern crate self as <name>`.
        (Some(FoundCrate::Itself), _) => quote!(#ident),
        (Some(FoundCrate::Name(found)), _) => {
            let found = format_ident!("{}", found);
            quote!(::#found)
        }
        (None, Some(FoundCrate::Name(found))) => {
            let umbrella = format_ident!("{}", found);
            quote!(::#umbrella::#ident)
        }
        // Doctests and integration tests of the umbrella crate.
        (None, Some(FoundCrate::Itself)) => {
            let umbrella = format_ident!("{}", UMBRELLA);
            quote!(::#umbrella::#ident)
        }
        (None, None) => quote!(::#ident),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(direct: Option<FoundCrate>, umbrella: Option<FoundCrate>) -> String {
        crate_path("rigging_options", direct, umbrella)
            .to_string()
            .replace(' ', "")
    }

    #[test]
    fn direct_dependency_wins() {
        assert_eq!(
            path(Some(FoundCrate::Name("opts".to_string())), None),
            "::opts"
        );
        assert_eq!(path(Some(FoundCrate::Itself), None), "rigging_options");
    }

    #[test]
    fn umbrella_is_used_when_no_direct_dependency() {
        assert_eq!(
            path(None, Some(FoundCrate::Name("rig".to_string()))),
            "::rig::rigging_options"
        );
        assert_eq!(
            path(None, Some(FoundCrate::Itself)),
            "::rigging::rigging_options"
        );
    }

    #[test]
    fn falls_back_to_package_name() {
        assert_eq!(path(None, None), "::rigging_options");
        assert_eq!(RiggingCrate::Options.package_name(), "rigging_options");
    }
}
