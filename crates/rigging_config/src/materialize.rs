//! Turning a definition into live objects.

use crate::configuration::Configuration;
use crate::definition::ConfigurationDef;
use crate::error::ConfigurationError;
use crate::registry::TypeResolver;
use indexmap::IndexMap;
use rigging_options::{Configurable, OptionBinder};

impl ConfigurationDef {
    /// Instantiates every object of the definition and applies the option
    /// log to them.
    ///
    /// Slots are processed in insertion order and identifiers in the order
    /// they were added. Each identifier is resolved through `resolver` and
    /// instantiated with its zero-argument factory. The option log is then
    /// applied in declaration order, every assignment reaching each object
    /// that declares the option.
    ///
    /// The definition is frozen by this call.
    ///
    /// # Errors
    ///
    /// Fails on the first problem, dropping every object created so far:
    ///
    /// - [`ConfigurationError::TypeNotFound`] for an unresolved identifier
    /// - [`ConfigurationError::NotConstructible`],
    ///   [`ConfigurationError::ConstructorInaccessible`] or
    ///   [`ConfigurationError::ConstructionFailed`] when instantiation fails
    /// - [`ConfigurationError::OptionBinding`] for an option no object
    ///   declares, or a value that does not parse
    pub fn create_configuration(
        &self,
        resolver: &dyn TypeResolver,
    ) -> Result<Configuration, ConfigurationError> {
        let _span = tracing::debug_span!("materialize", configuration = self.name()).entered();
        self.freeze();

        let mut slots: IndexMap<String, Vec<Box<dyn Configurable>>> =
            IndexMap::with_capacity(self.objects().len());

        for (slot, type_ids) in self.objects() {
            let mut objects = Vec::with_capacity(type_ids.len());
            for type_id in type_ids {
                let object_type =
                    resolver
                        .resolve(type_id)
                        .ok_or_else(|| ConfigurationError::TypeNotFound {
                            slot: slot.clone(),
                            type_id: type_id.clone(),
                        })?;
                let object = object_type
                    .instantiate()
                    .map_err(|err| ConfigurationError::instantiate(slot, type_id, err))?;
                tracing::debug!(
                    slot = %slot,
                    type_id = %type_id,
                    type_name = object_type.type_name(),
                    "object instantiated"
                );
                objects.push(object);
            }
            slots.insert(slot.clone(), objects);
        }

        let mut binder = OptionBinder::new(slots.values_mut().flat_map(|objects| {
            objects
                .iter_mut()
                .map(|object| -> &mut dyn Configurable { &mut **object })
        }));
        binder
            .bind_all(
                self.options()
                    .iter()
                    .map(|option| (option.name(), option.value())),
            )
            .map_err(|source| ConfigurationError::OptionBinding {
                option: source.option_name().to_string(),
                source,
            })?;

        let configuration = Configuration::new(self.name().to_string(), slots);
        tracing::info!(
            configuration = self.name(),
            slots = self.objects().len(),
            objects = configuration.len(),
            options = self.options().len(),
            "configuration materialized"
        );
        Ok(configuration)
    }
}
