//! Error types for definition building, materialization and usage rendering.

use crate::registry::InstantiateError;
use rigging_options::BindError;
use thiserror::Error;

/// Boxed cause of a failed construction.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync>;

/// Errors raised by configuration definitions and the materializer.
///
/// Every variant names the slot and type identifier, or the option, that
/// caused it.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A type identifier does not resolve to a registered type.
    #[error("slot '{slot}': no type registered as '{type_id}'")]
    TypeNotFound {
        /// Slot holding the identifier.
        slot: String,
        /// The unresolved identifier.
        type_id: String,
    },

    /// The type is registered but abstract.
    #[error("slot '{slot}': type '{type_id}' cannot be instantiated")]
    NotConstructible {
        /// Slot holding the identifier.
        slot: String,
        /// The type identifier.
        type_id: String,
    },

    /// The type's constructor may not be called.
    #[error("slot '{slot}': constructor of '{type_id}' is not accessible")]
    ConstructorInaccessible {
        /// Slot holding the identifier.
        slot: String,
        /// The type identifier.
        type_id: String,
    },

    /// The type's constructor ran and failed.
    #[error("slot '{slot}': constructing '{type_id}' failed")]
    ConstructionFailed {
        /// Slot holding the identifier.
        slot: String,
        /// The type identifier.
        type_id: String,
        /// What the constructor reported.
        #[source]
        source: BoxedError,
    },

    /// An option assignment could not be applied.
    #[error("option '{option}' could not be applied")]
    OptionBinding {
        /// The offending option name.
        option: String,
        /// Why binding failed.
        #[source]
        source: BindError,
    },

    /// The definition was modified after it was first consumed.
    #[error("configuration '{name}' can no longer be modified once consumed")]
    Frozen {
        /// Name of the definition.
        name: String,
    },

    /// A definition with the same name is already in the catalog.
    #[error("configuration '{0}' is already defined")]
    DuplicateDefinition(String),

    /// Writing to the output sink failed.
    #[error("failed to write configuration usage")]
    Io(#[from] std::io::Error),
}

impl ConfigurationError {
    /// Maps an instantiation failure for `type_id` in `slot`.
    pub(crate) fn instantiate(slot: &str, type_id: &str, error: InstantiateError) -> Self {
        let slot = slot.to_string();
        let type_id = type_id.to_string();
        match error {
            InstantiateError::NotConstructible => Self::NotConstructible { slot, type_id },
            InstantiateError::Inaccessible => Self::ConstructorInaccessible { slot, type_id },
            InstantiateError::Failed(source) => Self::ConstructionFailed {
                slot,
                type_id,
                source,
            },
        }
    }

    /// Returns the slot involved, for resolution and instantiation errors.
    #[must_use]
    pub fn slot(&self) -> Option<&str> {
        match self {
            Self::TypeNotFound { slot, .. }
            | Self::NotConstructible { slot, .. }
            | Self::ConstructorInaccessible { slot, .. }
            | Self::ConstructionFailed { slot, .. } => Some(slot),
            _ => None,
        }
    }

    /// Returns the type identifier involved, for resolution and
    /// instantiation errors.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::TypeNotFound { type_id, .. }
            | Self::NotConstructible { type_id, .. }
            | Self::ConstructorInaccessible { type_id, .. }
            | Self::ConstructionFailed { type_id, .. } => Some(type_id),
            _ => None,
        }
    }
}
