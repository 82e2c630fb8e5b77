//! The runtime that owns plugins and their resources.
//!
//! The [`Server`] owns the plugins of an application and the resources they
//! publish. It has no behavior of its own: object registries, logging and
//! catalogs of configuration definitions all arrive through plugins.
//!
//! # Resource Scoping
//!
//! - **Resources** (`insert_resource`) are mutable, server-wide values used
//!   while plugins build. Registries live here while they are being filled.
//! - **Globals** (`insert_global`) are read-only values published once the
//!   build phase is over, typically by moving a finished registry out of the
//!   resources in `ready()`.
//!
//! # Lifecycle
//!
//! 1. **Dependency resolution** - validate and topologically sort plugins
//! 2. **Build** - `plugin.build()` in dependency order
//! 3. **Ready** - `plugin.ready()` in dependency order
//! 4. **Cleanup** - `plugin.cleanup()` in reverse order

use crate::plugin::{Plugin, PluginId, Plugins};
use crate::resource::{GlobalResource, Resource, ResourceRef, ResourceRefMut, Resources};
use hashbrown::{HashMap, HashSet};

/// Build state of the server. Progresses `NotStarted` → `Building` → `Built`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum BuildState {
    #[default]
    NotStarted,
    Building,
    Built,
}

/// Internal entry for an added plugin.
struct PluginEntry {
    plugin: Box<dyn Plugin>,
    /// Cached for dependency lookup and error messages.
    name: String,
}

/// The runtime that orchestrates plugins and owns their resources.
///
/// ```
/// use rigging_system::plugin::Plugin;
/// use rigging_system::server::Server;
///
/// struct Noop;
/// impl Plugin for Noop {
///     fn build(&self, _server: &mut Server) {}
/// }
///
/// let mut server = Server::new();
/// server.add_plugins(Noop);
/// server.finish();
/// assert!(server.is_built());
/// ```
#[derive(Default)]
pub struct Server {
    /// Read-only values published after build.
    global: Resources,
    /// Mutable values used during build.
    resources: Resources,
    /// Plugins waiting for `finish()`.
    pending_plugins: Vec<PluginEntry>,
    /// Plugins that have been built, in dependency order.
    built_plugins: Vec<PluginEntry>,
    /// Every plugin id ever added, for duplicate detection.
    plugin_ids: HashSet<PluginId>,
    build_state: BuildState,
}

impl Server {
    /// Creates an empty server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Plugin Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Adds a plugin or a [`PluginGroupBuilder`](crate::plugin::PluginGroupBuilder).
    ///
    /// # Panics
    ///
    /// Panics if a unique plugin is added twice.
    pub fn add_plugins<P: Plugins>(&mut self, plugins: P) -> &mut Self {
        plugins.add_to_server(self);
        self
    }

    /// Adds a boxed plugin whose id was captured before boxing.
    pub(crate) fn add_plugin_boxed(&mut self, id: PluginId, plugin: Box<dyn Plugin>) {
        let name = plugin.name().to_string();

        if plugin.is_unique() && self.plugin_ids.contains(&id) {
            panic!(
                "Plugin '{name}' was already added; \
                 override `is_unique()` to allow several instances."
            );
        }
        self.plugin_ids.insert(id);

        let entry = PluginEntry { plugin, name };

        // Plugins added from inside another plugin's build() are built at once.
        if self.build_state == BuildState::Building {
            entry.plugin.build(self);
            self.built_plugins.push(entry);
        } else {
            self.pending_plugins.push(entry);
        }
    }

    /// Returns true if a plugin of type `P` has been added.
    #[must_use]
    pub fn has_plugin<P: Plugin>(&self) -> bool {
        self.plugin_ids.contains(&PluginId::of::<P>())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resources
    // ─────────────────────────────────────────────────────────────────────────

    /// Inserts a mutable server resource, returning the value it replaced.
    pub fn insert_resource<R: Resource>(&mut self, resource: R) -> Option<R> {
        self.resources.insert(resource)
    }

    /// Whether a build-time resource of type `R` is stored.
    #[must_use]
    pub fn contains_resource<R: Resource>(&self) -> bool {
        self.resources.contains::<R>()
    }

    /// Borrows a resource immutably. `None` if absent or mutably borrowed.
    #[must_use]
    pub fn get_resource<R: Resource>(&self) -> Option<ResourceRef<'_, R>> {
        self.resources.get::<R>().ok()
    }

    /// Borrows a resource mutably. `None` if absent or already borrowed.
    #[must_use]
    pub fn get_resource_mut<R: Resource>(&self) -> Option<ResourceRefMut<'_, R>> {
        self.resources.get_mut::<R>().ok()
    }

    /// Removes a resource and returns it.
    pub fn remove_resource<R: Resource>(&mut self) -> Option<R> {
        self.resources.remove::<R>()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Globals
    // ─────────────────────────────────────────────────────────────────────────

    /// Publishes a read-only global, returning the value it replaced.
    pub fn insert_global<R: GlobalResource>(&mut self, resource: R) -> Option<R> {
        self.global.insert(resource)
    }

    /// Returns true if a global of type `R` exists.
    #[must_use]
    pub fn contains_global<R: GlobalResource>(&self) -> bool {
        self.global.contains::<R>()
    }

    /// Borrows a global. Globals are never borrowed mutably, so this only
    /// returns `None` when the global is absent.
    #[must_use]
    pub fn get_global<R: GlobalResource>(&self) -> Option<ResourceRef<'_, R>> {
        self.global.get::<R>().ok()
    }

    /// Returns whether `finish()` has completed.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.build_state == BuildState::Built
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Builds and readies every added plugin.
    ///
    /// # Panics
    ///
    /// - If a plugin's dependency was never added
    /// - If plugins depend on each other in a cycle
    /// - If called more than once
    pub fn finish(&mut self) {
        assert!(
            self.build_state == BuildState::NotStarted,
            "Server::finish() may only run once"
        );

        let sorted = self.sort_plugins_by_dependencies();

        self.build_state = BuildState::Building;
        for entry in sorted {
            tracing::debug!(plugin = %entry.name, "building plugin");
            entry.plugin.build(self);
            self.built_plugins.push(entry);
        }
        self.build_state = BuildState::Built;

        // Taken out so ready() can borrow the server mutably.
        let built = core::mem::take(&mut self.built_plugins);
        for entry in &built {
            entry.plugin.ready(self);
        }
        self.built_plugins = built;

        tracing::debug!(plugins = self.built_plugins.len(), "server ready");
    }

    /// Cleans up every built plugin, dependents first.
    pub fn cleanup(&mut self) {
        let built = core::mem::take(&mut self.built_plugins);
        for entry in built.iter().rev() {
            entry.plugin.cleanup(self);
        }
        self.built_plugins = built;
    }

    /// Topologically sorts the pending plugins (Kahn's algorithm).
    ///
    /// Plugins with no ordering constraint between them keep the order in
    /// which they were added.
    fn sort_plugins_by_dependencies(&mut self) -> Vec<PluginEntry> {
        let pending = core::mem::take(&mut self.pending_plugins);
        let n = pending.len();

        let name_to_index: HashMap<&str, usize> = pending
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.name.as_str(), i))
            .collect();

        let mut in_degree = vec![0usize; n];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (i, entry) in pending.iter().enumerate() {
            for dep in entry.plugin.dependencies() {
                match name_to_index.get(dep.type_name()) {
                    Some(&dep_idx) => {
                        dependents[dep_idx].push(i);
                        in_degree[i] += 1;
                    }
                    None if self.built_plugins.iter().any(|p| p.name == dep.type_name()) => {}
                    None => panic!(
                        "Plugin '{}' depends on '{}', which is missing from the server",
                        entry.name,
                        dep.type_name()
                    ),
                }
            }
        }

        let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order: Vec<usize> = Vec::with_capacity(n);

        while !ready.is_empty() {
            let idx = ready.remove(0);
            order.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(dependent);
                }
            }
        }

        if order.len() != n {
            let in_cycle: Vec<&str> = (0..n)
                .filter(|&i| in_degree[i] > 0)
                .map(|i| pending[i].name.as_str())
                .collect();
            panic!(
                "Plugins depend on each other in a cycle: {in_cycle:?}"
            );
        }

        // The index borrows names from `pending`.
        drop(name_to_index);
        let mut slots: Vec<Option<PluginEntry>> = pending.into_iter().map(Some).collect();
        order
            .into_iter()
            .filter_map(|idx| slots[idx].take())
            .collect()
    }
}
