//! Named collection of definitions.

use crate::definition::ConfigurationDef;
use crate::error::ConfigurationError;
use indexmap::IndexMap;
use rigging_system::resource::GlobalResource;

/// Owns configuration definitions by unique name, in insertion order.
///
/// ```
/// use rigging_config::{ConfigurationDef, DefinitionCatalog};
///
/// let mut catalog = DefinitionCatalog::new();
/// catalog.insert(ConfigurationDef::new("dev"))?;
/// assert!(catalog.insert(ConfigurationDef::new("dev")).is_err());
/// assert_eq!(catalog.names(), ["dev"]);
/// # Ok::<(), rigging_config::ConfigurationError>(())
/// ```
#[derive(Debug, Default)]
pub struct DefinitionCatalog {
    definitions: IndexMap<String, ConfigurationDef>,
}

impl GlobalResource for DefinitionCatalog {}

impl DefinitionCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: IndexMap::new(),
        }
    }

    /// Adds a definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateDefinition`] if a definition
    /// with the same name exists.
    pub fn insert(&mut self, definition: ConfigurationDef) -> Result<(), ConfigurationError> {
        if self.definitions.contains_key(definition.name()) {
            return Err(ConfigurationError::DuplicateDefinition(
                definition.name().to_string(),
            ));
        }
        self.definitions
            .insert(definition.name().to_string(), definition);
        Ok(())
    }

    /// Returns the definition called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ConfigurationDef> {
        self.definitions.get(name)
    }

    /// Returns the definition called `name`, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConfigurationDef> {
        self.definitions.get_mut(name)
    }

    /// Returns the definition names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Iterates over the definitions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationDef> {
        self.definitions.values()
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns `true` if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Writes one `  <name>: <description>` line per definition to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Io`] if writing fails.
    pub fn print_summary(&self, out: &mut impl std::io::Write) -> Result<(), ConfigurationError> {
        let mut summary = String::new();
        for definition in self.iter() {
            summary.push_str(&format!(
                "  {}: {}\n",
                definition.name(),
                definition.description()
            ));
        }
        out.write_all(summary.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
