//! Capability descriptors for configurable types.
//!
//! A configurable type describes its options once, statically, as a list of
//! [`OptionSpec`]s (name, description, value type and setter). Binding and
//! help text work from those descriptors instead of inspecting fields at
//! runtime.

use crate::value::OptionValue;
use downcast_rs::{Downcast, impl_downcast};
use serde::Serialize;

/// Setter applying one textual assignment to a field of `T`.
pub type OptionSetter<T> = fn(&mut T, &str) -> Result<(), String>;

/// Descriptor of a single option declared by `T`.
///
/// Usually generated by `#[derive(Options)]`; hand-written specs look like:
///
/// ```
/// use rigging_options::{OptionSpec, OptionValue, Options};
///
/// #[derive(Default)]
/// struct Retry { attempts: u32 }
///
/// impl Options for Retry {
///     fn option_specs() -> Vec<OptionSpec<Self>> {
///         vec![
///             OptionSpec::new::<u32>("attempts", |retry: &mut Self, raw| {
///                 retry.attempts.apply(raw)
///             })
///             .with_description("How many times to retry."),
///         ]
///     }
/// }
/// ```
pub struct OptionSpec<T> {
    name: &'static str,
    description: &'static str,
    type_label: &'static str,
    collection: bool,
    setter: OptionSetter<T>,
}

impl<T> OptionSpec<T> {
    /// Creates a spec for an option whose field has type `V`.
    #[must_use]
    pub fn new<V: OptionValue>(name: &'static str, setter: OptionSetter<T>) -> Self {
        Self {
            name,
            description: "",
            type_label: V::type_label(),
            collection: V::is_collection(),
            setter,
        }
    }

    /// Sets the help description.
    #[must_use]
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Returns the option name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies a textual value to `target`.
    ///
    /// # Errors
    ///
    /// Returns the parse failure reason.
    pub fn apply(&self, target: &mut T, raw: &str) -> Result<(), String> {
        (self.setter)(target, raw)
    }

    /// Returns the type-erased description of this option.
    #[must_use]
    pub fn info(&self) -> OptionInfo {
        OptionInfo {
            name: self.name,
            description: self.description,
            type_label: self.type_label,
            collection: self.collection,
        }
    }
}

impl<T> core::fmt::Debug for OptionSpec<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("name", &self.name)
            .field("type_label", &self.type_label)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

/// Type-erased description of an option, used for help text and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    /// Option name as used in assignments.
    pub name: &'static str,
    /// Help description (may be empty).
    pub description: &'static str,
    /// Value type label, e.g. `"integer"`.
    pub type_label: &'static str,
    /// Whether repeated assignments accumulate.
    pub collection: bool,
}

/// A type that declares options.
///
/// Derive it with `#[derive(Options)]`:
///
/// ```
/// use rigging_options::Options;
///
/// #[derive(Default, Options)]
/// struct FileLogger {
///     /// Minimum level written to the file.
///     #[option(name = "log-level")]
///     log_level: String,
///     /// Extra tags attached to every line.
///     #[option]
///     tags: Vec<String>,
///     // Not an option.
///     lines_written: usize,
/// }
///
/// let names: Vec<_> = FileLogger::option_specs().iter().map(|s| s.name()).collect();
/// assert_eq!(names, ["log-level", "tags"]);
/// ```
pub trait Options: Send + Sync + 'static {
    /// Returns the options this type declares, in declaration order.
    fn option_specs() -> Vec<OptionSpec<Self>>
    where
        Self: Sized;
}

/// Returns the option descriptions of `T` without an instance.
#[must_use]
pub fn option_infos<T: Options>() -> Vec<OptionInfo> {
    T::option_specs().iter().map(OptionSpec::info).collect()
}

/// Object-safe view of an [`Options`] type.
///
/// Every `Options` type is `Configurable`. Materialized objects are stored
/// as `Box<dyn Configurable>` and can be downcast back to their concrete
/// type:
///
/// ```
/// use rigging_options::{Configurable, Options};
///
/// #[derive(Default, Options)]
/// struct Timeout {
///     #[option]
///     seconds: u64,
/// }
///
/// let mut object: Box<dyn Configurable> = Box::new(Timeout::default());
/// assert_eq!(object.set_option("seconds", "30"), Ok(true));
/// assert_eq!(object.downcast_ref::<Timeout>().unwrap().seconds, 30);
/// ```
pub trait Configurable: Downcast + Send + Sync {
    /// Returns the concrete type name of this object.
    fn object_type(&self) -> &'static str;

    /// Returns the options this object declares.
    fn option_infos(&self) -> Vec<OptionInfo>;

    /// Returns `true` if this object declares an option called `name`.
    fn declares_option(&self, name: &str) -> bool {
        self.option_infos().iter().any(|info| info.name == name)
    }

    /// Applies `raw` to the option called `name`.
    ///
    /// Returns `Ok(false)` when the object does not declare the option.
    ///
    /// # Errors
    ///
    /// Returns the parse failure reason when the option exists but the value
    /// is invalid.
    fn set_option(&mut self, name: &str, raw: &str) -> Result<bool, String>;
}

impl_downcast!(Configurable);

impl<T: Options> Configurable for T {
    fn object_type(&self) -> &'static str {
        core::any::type_name::<T>()
    }

    fn option_infos(&self) -> Vec<OptionInfo> {
        option_infos::<T>()
    }

    fn set_option(&mut self, name: &str, raw: &str) -> Result<bool, String> {
        match T::option_specs().into_iter().find(|spec| spec.name == name) {
            Some(spec) => spec.apply(self, raw).map(|()| true),
            None => Ok(false),
        }
    }
}

impl core::fmt::Debug for dyn Configurable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Configurable")
            .field("type", &self.object_type())
            .finish_non_exhaustive()
    }
}
