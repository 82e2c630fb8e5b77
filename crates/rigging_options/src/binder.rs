//! Applying option assignments to configured objects.
//!
//! [`OptionBinder`] holds an ordered set of target objects and applies
//! `(name, value)` assignments to them one at a time:
//!
//! - an assignment reaches **every** target declaring the option, in target
//!   order (broadcast);
//! - scalar options keep the last value assigned, `Vec` options collect
//!   every value;
//! - an assignment no target declares fails with [`BindError::UnknownOption`].

use crate::spec::Configurable;
use thiserror::Error;

/// Errors raised while binding option assignments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// No target declares an option with this name.
    #[error("option '{name}' is not declared by any configured object")]
    UnknownOption {
        /// The unmatched option name.
        name: String,
    },

    /// A target declares the option but the value does not parse.
    #[error("invalid value '{value}' for option '{name}' of {target}: {reason}")]
    InvalidValue {
        /// The option name.
        name: String,
        /// The rejected textual value.
        value: String,
        /// Type name of the target that rejected the value.
        target: &'static str,
        /// Parse failure reason.
        reason: String,
    },
}

impl BindError {
    /// Returns the name of the offending option.
    #[must_use]
    pub fn option_name(&self) -> &str {
        match self {
            Self::UnknownOption { name } | Self::InvalidValue { name, .. } => name,
        }
    }
}

/// Applies option assignments to an ordered set of objects.
///
/// ```
/// use rigging_options::{Configurable, OptionBinder, Options};
///
/// #[derive(Default, Options)]
/// struct Server {
///     #[option]
///     port: u16,
/// }
///
/// let mut a = Server::default();
/// let mut b = Server::default();
/// let mut binder = OptionBinder::new([&mut a as &mut dyn Configurable, &mut b]);
/// binder.bind_all([("port", "8080")]).unwrap();
///
/// assert_eq!((a.port, b.port), (8080, 8080));
/// ```
pub struct OptionBinder<'a> {
    targets: Vec<&'a mut dyn Configurable>,
}

impl<'a> OptionBinder<'a> {
    /// Creates a binder over `targets`, preserving their order.
    pub fn new(targets: impl IntoIterator<Item = &'a mut dyn Configurable>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
        }
    }

    /// Returns the number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if there are no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Applies one assignment and returns how many targets received it.
    ///
    /// # Errors
    ///
    /// - [`BindError::UnknownOption`] if no target declares `name`
    /// - [`BindError::InvalidValue`] on the first target rejecting `value`
    pub fn set_option_value(&mut self, name: &str, value: &str) -> Result<usize, BindError> {
        let mut applied = 0;

        for target in &mut self.targets {
            let accepted = target
                .set_option(name, value)
                .map_err(|reason| BindError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                    target: target.object_type(),
                    reason,
                })?;
            if accepted {
                applied += 1;
            }
        }

        if applied == 0 {
            return Err(BindError::UnknownOption {
                name: name.to_string(),
            });
        }

        tracing::trace!(option = name, value, targets = applied, "option applied");
        Ok(applied)
    }

    /// Applies every assignment in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`BindError`] encountered.
    pub fn bind_all<'o>(
        &mut self,
        assignments: impl IntoIterator<Item = (&'o str, &'o str)>,
    ) -> Result<(), BindError> {
        for (name, value) in assignments {
            self.set_option_value(name, value)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for OptionBinder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.targets.iter().map(|target| target.object_type()))
            .finish()
    }
}
