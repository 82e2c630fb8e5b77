//! Plugin orchestration for Rigging (Layer 1).
//!
//! `rigging_system` provides the primitives every other Rigging crate builds on:
//!
//! - [`plugin`] - Plugin trait and plugin groups
//! - [`resource`] - Typed storage for shared state
//! - [`server`] - The runtime that builds plugins and owns their resources
//!
//! # Architecture
//!
//! - **Layer 1** (`rigging_system`): plugin lifecycle and resources (this crate)
//! - **Layer 2** (`rigging_options`, `rigging_config`): option descriptors,
//!   configuration definitions and materialization
//! - **Layer 3** (plugins): logging, object registrations, applications
//!
//! # Example
//!
//! ```
//! use rigging_system::plugin::Plugin;
//! use rigging_system::resource::GlobalResource;
//! use rigging_system::server::Server;
//!
//! #[derive(Default)]
//! struct Defaults { retries: u32 }
//! impl GlobalResource for Defaults {}
//!
//! struct DefaultsPlugin;
//!
//! impl Plugin for DefaultsPlugin {
//!     fn build(&self, server: &mut Server) {
//!         server.insert_global(Defaults::default());
//!     }
//! }
//!
//! let mut server = Server::new();
//! server.add_plugins(DefaultsPlugin);
//! server.finish();
//! assert!(server.contains_global::<Defaults>());
//! ```

/// Plugin trait for extensible functionality.
pub mod plugin;

/// Typed resource storage.
pub mod resource;

/// Server runtime for plugin orchestration.
pub mod server;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::plugin::*;
    pub use crate::resource::*;
    pub use crate::server::*;
}
