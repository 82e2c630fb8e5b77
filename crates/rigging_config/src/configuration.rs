//! The materialized object graph.

use indexmap::IndexMap;
use rigging_options::Configurable;

/// Live objects produced from a [`ConfigurationDef`](crate::ConfigurationDef).
///
/// Objects are grouped by slot. Slots keep the definition's order, and
/// objects within a slot keep the order their identifiers were added.
///
/// ```
/// use rigging_config::{ConfigurationDef, ObjectRegistry};
/// use rigging_options::Options;
///
/// #[derive(Default, Options)]
/// struct FileLogger {
///     #[option(name = "log-level")]
///     log_level: String,
/// }
///
/// let mut registry = ObjectRegistry::new();
/// registry.register::<FileLogger>("pkg.FileLogger");
///
/// let mut def = ConfigurationDef::new("test");
/// def.add_object("logger", "pkg.FileLogger")?;
/// def.add_option("log-level", "DEBUG")?;
///
/// let configuration = def.create_configuration(&registry)?;
/// let logger = configuration.get::<FileLogger>("logger").unwrap();
/// assert_eq!(logger.log_level, "DEBUG");
/// # Ok::<(), rigging_config::ConfigurationError>(())
/// ```
#[derive(Debug)]
pub struct Configuration {
    name: String,
    slots: IndexMap<String, Vec<Box<dyn Configurable>>>,
}

impl Configuration {
    pub(crate) fn new(name: String, slots: IndexMap<String, Vec<Box<dyn Configurable>>>) -> Self {
        Self { name, slots }
    }

    /// Returns the name of the definition this graph was built from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slot names in order.
    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Returns the objects of `slot`, or an empty slice for unknown slots.
    #[must_use]
    pub fn objects(&self, slot: &str) -> &[Box<dyn Configurable>] {
        self.slots.get(slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the first object of type `T` in `slot`.
    #[must_use]
    pub fn get<T: Configurable>(&self, slot: &str) -> Option<&T> {
        self.objects(slot)
            .iter()
            .find_map(|object| object.downcast_ref::<T>())
    }

    /// Returns the first object of type `T` in `slot`, mutably.
    pub fn get_mut<T: Configurable>(&mut self, slot: &str) -> Option<&mut T> {
        self.slots
            .get_mut(slot)?
            .iter_mut()
            .find_map(|object| object.downcast_mut::<T>())
    }

    /// Returns every object of type `T` in `slot`, in order.
    pub fn get_all<'a, T: Configurable>(
        &'a self,
        slot: &str,
    ) -> impl Iterator<Item = &'a T> + use<'a, T> {
        self.objects(slot)
            .iter()
            .filter_map(|object| object.downcast_ref::<T>())
    }

    /// Iterates over all objects with their slot, slot by slot.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Configurable)> {
        self.slots.iter().flat_map(|(slot, objects)| {
            objects
                .iter()
                .map(move |object| (slot.as_str(), object.as_ref()))
        })
    }

    /// Returns the total number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Returns `true` if the graph holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the graph, returning its slots.
    #[must_use]
    pub fn into_slots(self) -> IndexMap<String, Vec<Box<dyn Configurable>>> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigging_options::Options;

    #[derive(Default, Options)]
    struct Disk {
        #[option]
        path: String,
    }

    #[derive(Default, Options)]
    struct Memory {}

    fn sample() -> Configuration {
        let mut slots: IndexMap<String, Vec<Box<dyn Configurable>>> = IndexMap::new();
        slots.insert(
            "store".to_string(),
            vec![
                Box::new(Memory::default()),
                Box::new(Disk {
                    path: "/a".to_string(),
                }),
                Box::new(Disk {
                    path: "/b".to_string(),
                }),
            ],
        );
        slots.insert("empty".to_string(), Vec::new());
        Configuration::new("sample".to_string(), slots)
    }

    #[test]
    fn typed_access_finds_first_match() {
        let configuration = sample();
        assert_eq!(configuration.get::<Disk>("store").unwrap().path, "/a");
        assert!(configuration.get::<Disk>("empty").is_none());
        assert!(configuration.get::<Disk>("missing").is_none());
    }

    #[test]
    fn get_all_keeps_order() {
        let configuration = sample();
        let paths: Vec<_> = configuration
            .get_all::<Disk>("store")
            .map(|disk| disk.path.as_str())
            .collect();
        assert_eq!(paths, ["/a", "/b"]);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut configuration = sample();
        configuration.get_mut::<Disk>("store").unwrap().path = "/c".to_string();
        assert_eq!(configuration.get::<Disk>("store").unwrap().path, "/c");
    }

    #[test]
    fn counts_and_iteration() {
        let configuration = sample();
        assert_eq!(configuration.len(), 3);
        assert!(!configuration.is_empty());
        assert_eq!(configuration.slots().collect::<Vec<_>>(), ["store", "empty"]);
        assert!(configuration.objects("missing").is_empty());
        assert!(configuration.iter().all(|(slot, _)| slot == "store"));
        assert_eq!(configuration.into_slots().len(), 2);
    }
}
