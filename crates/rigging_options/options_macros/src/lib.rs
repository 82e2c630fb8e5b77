//! Procedural macros for `rigging_options`.
//!
//! Provides `#[derive(Options)]`, which turns annotated struct fields into
//! option descriptors.

mod common;
mod options;

use proc_macro::TokenStream;

/// Derive macro for the `Options` trait.
///
/// Every field marked `#[option]` becomes an option. Unmarked fields are
/// left alone.
///
/// # Field Attributes
///
/// - `#[option]` - option named after the field, with `_` replaced by `-`
/// - `#[option(name = "...")]` - explicit option name
/// - `#[option(description = "...")]` - explicit help text; otherwise the
///   field's doc comment is used
///
/// The field type must implement `OptionValue`: any scalar (`String`,
/// `bool`, numbers, `PathBuf`, ...), `Option<T>`, or an accumulating
/// `Vec<T>`.
///
/// # Example
///
/// ```
/// use rigging_options::Options;
///
/// #[derive(Default, Options)]
/// struct FileLogger {
///     /// Minimum level written to the file.
///     #[option(name = "log-level")]
///     log_level: String,
///     #[option(description = "Rotate after this many bytes.")]
///     max_size: Option<u64>,
/// }
/// ```
#[proc_macro_derive(Options, attributes(option))]
pub fn derive_options(input: TokenStream) -> TokenStream {
    options::derive_options(input)
}
