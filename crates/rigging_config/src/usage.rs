//! Usage text for a definition.

use crate::definition::ConfigurationDef;
use crate::error::ConfigurationError;
use crate::registry::TypeResolver;

impl ConfigurationDef {
    /// Renders the usage text of the definition.
    ///
    /// The text starts with `'<name>' configuration: <description>` and a
    /// blank line. Then, for every slot and every identifier in it whose
    /// type declares options, it has a `  <slot> options:` line, the type's
    /// option help and a blank line. Types without options add nothing.
    ///
    /// The definition is frozen by this call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TypeNotFound`] for an unresolved
    /// identifier.
    pub fn command_usage(
        &self,
        resolver: &dyn TypeResolver,
    ) -> Result<String, ConfigurationError> {
        let _span = tracing::debug_span!("usage", configuration = self.name()).entered();
        self.freeze();

        let mut usage = String::new();
        usage.push_str(&format!(
            "'{}' configuration: {}\n\n",
            self.name(),
            self.description()
        ));

        for (slot, type_ids) in self.objects() {
            for type_id in type_ids {
                let object_type =
                    resolver
                        .resolve(type_id)
                        .ok_or_else(|| ConfigurationError::TypeNotFound {
                            slot: slot.clone(),
                            type_id: type_id.clone(),
                        })?;
                let help = object_type.option_help();
                if help.is_empty() {
                    continue;
                }
                usage.push_str(&format!("  {slot} options:\n"));
                usage.push_str(&help);
                usage.push('\n');
            }
        }

        Ok(usage)
    }

    /// Writes the usage text of the definition to `out`.
    ///
    /// The text is rendered completely before anything is written, so a
    /// failure leaves `out` untouched. See
    /// [`command_usage`](Self::command_usage) for the layout.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::TypeNotFound`] for an unresolved identifier
    /// - [`ConfigurationError::Io`] if writing fails
    pub fn print_command_usage(
        &self,
        resolver: &dyn TypeResolver,
        out: &mut impl std::io::Write,
    ) -> Result<(), ConfigurationError> {
        let usage = self.command_usage(resolver)?;
        out.write_all(usage.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
