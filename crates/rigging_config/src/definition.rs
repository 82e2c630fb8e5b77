//! Configuration definitions.
//!
//! A [`ConfigurationDef`] is a named, declarative description of an object
//! graph:
//!
//! - an insertion-ordered registry of **slots**, each holding an ordered
//!   list of type identifiers;
//! - an append-only **option log** of `(name, value)` assignments.
//!
//! A definition is built first (through `&mut self`) and consumed later by
//! [`create_configuration`](ConfigurationDef::create_configuration) and
//! [`print_command_usage`](ConfigurationDef::print_command_usage). The
//! first consumption freezes it: further appends fail with
//! [`ConfigurationError::Frozen`].

use crate::error::ConfigurationError;
use core::sync::atomic::{AtomicBool, Ordering};
use indexmap::IndexMap;

/// One entry of the option log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionDef {
    name: String,
    value: String,
}

impl OptionDef {
    /// Creates an option assignment.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the option name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the textual value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A named configuration definition.
///
/// ```
/// use rigging_config::ConfigurationDef;
///
/// let mut def = ConfigurationDef::new("test");
/// def.set_description("Test configuration.")?;
/// def.add_object("logger", "pkg.FileLogger")?;
/// def.add_option("log-level", "DEBUG")?;
///
/// assert_eq!(def.name(), "test");
/// assert_eq!(def.objects()["logger"], ["pkg.FileLogger"]);
/// assert_eq!(def.options()[0].value(), "DEBUG");
/// # Ok::<(), rigging_config::ConfigurationError>(())
/// ```
#[derive(Debug)]
pub struct ConfigurationDef {
    name: String,
    description: String,
    objects: IndexMap<String, Vec<String>>,
    options: Vec<OptionDef>,
    frozen: AtomicBool,
}

impl ConfigurationDef {
    /// Creates an empty definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            objects: IndexMap::new(),
            options: Vec::new(),
            frozen: AtomicBool::new(false),
        }
    }

    /// Returns the definition name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description (empty by default).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Frozen`] once the definition has been
    /// consumed.
    pub fn set_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_mutable()?;
        self.description = description.into();
        Ok(())
    }

    /// Appends `type_id` to `slot`, creating the slot on first use.
    ///
    /// The identifier is not checked until materialization.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Frozen`] once the definition has been
    /// consumed.
    pub fn add_object(
        &mut self,
        slot: impl Into<String>,
        type_id: impl Into<String>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_mutable()?;
        self.objects
            .entry(slot.into())
            .or_default()
            .push(type_id.into());
        Ok(())
    }

    /// Appends an option assignment to the log.
    ///
    /// Repeated names are kept as separate entries, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Frozen`] once the definition has been
    /// consumed.
    pub fn add_option(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ConfigurationError> {
        self.ensure_mutable()?;
        self.options.push(OptionDef::new(name, value));
        Ok(())
    }

    /// Returns the slots and their type identifiers, in insertion order.
    #[must_use]
    pub fn objects(&self) -> &IndexMap<String, Vec<String>> {
        &self.objects
    }

    /// Returns the option log, in declaration order.
    #[must_use]
    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    /// Returns `true` once the definition has been consumed.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Marks the definition as consumed.
    pub(crate) fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            tracing::debug!(configuration = %self.name, "configuration frozen");
        }
    }

    fn ensure_mutable(&self) -> Result<(), ConfigurationError> {
        if self.is_frozen() {
            return Err(ConfigurationError::Frozen {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_definition_is_empty() {
        let def = ConfigurationDef::new("empty");
        assert_eq!(def.name(), "empty");
        assert_eq!(def.description(), "");
        assert!(def.objects().is_empty());
        assert!(def.options().is_empty());
        assert!(!def.is_frozen());
    }

    #[test]
    fn slots_keep_first_insertion_order() {
        let mut def = ConfigurationDef::new("order");
        def.add_object("store", "kv.Memory").unwrap();
        def.add_object("logger", "log.File").unwrap();
        def.add_object("store", "kv.Disk").unwrap();

        let slots: Vec<_> = def.objects().keys().map(String::as_str).collect();
        assert_eq!(slots, ["store", "logger"]);
        assert_eq!(def.objects()["store"], ["kv.Memory", "kv.Disk"]);
    }

    #[test]
    fn same_identifier_may_repeat_in_a_slot() {
        let mut def = ConfigurationDef::new("twice");
        def.add_object("worker", "pool.Worker").unwrap();
        def.add_object("worker", "pool.Worker").unwrap();
        assert_eq!(def.objects()["worker"].len(), 2);
    }

    #[test]
    fn option_log_keeps_duplicates() {
        let mut def = ConfigurationDef::new("dupes");
        def.add_option("x", "1").unwrap();
        def.add_option("x", "2").unwrap();

        assert_eq!(def.options(), [OptionDef::new("x", "1"), OptionDef::new("x", "2")]);
    }

    #[test]
    fn description_is_replaced() {
        let mut def = ConfigurationDef::new("desc");
        def.set_description("first").unwrap();
        def.set_description("second").unwrap();
        assert_eq!(def.description(), "second");
    }

    #[test]
    fn frozen_definition_rejects_changes() {
        let mut def = ConfigurationDef::new("frozen");
        def.add_object("logger", "log.File").unwrap();
        def.freeze();

        assert!(def.is_frozen());
        assert!(matches!(
            def.add_object("logger", "log.Console"),
            Err(ConfigurationError::Frozen { name }) if name == "frozen"
        ));
        assert!(def.add_option("level", "INFO").is_err());
        assert!(def.set_description("late").is_err());
        assert_eq!(def.objects()["logger"], ["log.File"]);
        assert!(def.options().is_empty());
    }
}
