//! Typed resource storage.
//!
//! A [`Resources`] container holds at most one value per type. Values are
//! reached through RAII guards backed by a per-entry `RwLock`, so many
//! readers or one writer may hold a resource at a time.
//!
//! Types marked [`GlobalResource`] are the read-only, server-lifetime
//! values published by plugins in their `ready()` phase (for example a
//! frozen object registry).

use core::any::{Any, TypeId};
use core::marker::PhantomData;
use hashbrown::HashMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A value that can be stored in [`Resources`].
///
/// Blanket-implemented for every `Send + Sync + 'static` type.
pub trait Resource: Send + Sync + 'static {
    /// Returns the type name for diagnostics.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

impl<T: Send + Sync + 'static> Resource for T {}

/// Marker for read-only, server-lifetime resources.
///
/// Only types carrying this marker can be published with
/// [`Server::insert_global`](crate::server::Server::insert_global), and the
/// server only ever hands out shared guards for them.
///
/// ```
/// use rigging_system::resource::GlobalResource;
///
/// struct Catalog { names: Vec<String> }
/// impl GlobalResource for Catalog {}
/// ```
pub trait GlobalResource: Resource {}

/// Key of a resource entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(TypeId);

impl ResourceId {
    /// Key under which `T` is stored.
    #[must_use]
    pub fn of<T: Resource>() -> Self {
        Self(TypeId::of::<T>())
    }

    /// `TypeId` of the stored type.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.0
    }
}

/// Errors that can occur during resource access.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// No resource of the requested type is stored.
    #[error("resource not found: {0}")]
    NotFound(&'static str),

    /// The resource is locked in a way that conflicts with the request.
    #[error("resource already borrowed: {0}")]
    BorrowConflict(&'static str),
}

type BoxedResource = Box<dyn Any + Send + Sync>;

/// Container for typed resources.
///
/// ```
/// use rigging_system::resource::Resources;
///
/// struct Budget { remaining: u32 }
///
/// let mut resources = Resources::new();
/// resources.insert(Budget { remaining: 3 });
///
/// resources.get_mut::<Budget>().unwrap().remaining -= 1;
/// assert_eq!(resources.get::<Budget>().unwrap().remaining, 2);
/// ```
#[derive(Default)]
pub struct Resources {
    storage: HashMap<ResourceId, RwLock<BoxedResource>>,
}

impl Resources {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts a resource, returning the value it replaced.
    pub fn insert<T: Resource>(&mut self, resource: T) -> Option<T> {
        self.storage
            .insert(ResourceId::of::<T>(), RwLock::new(Box::new(resource)))
            .and_then(|old| old.into_inner().downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns `true` if a resource of type `T` is stored.
    #[must_use]
    pub fn contains<T: Resource>(&self) -> bool {
        self.storage.contains_key(&ResourceId::of::<T>())
    }

    /// Borrows a resource immutably.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::NotFound`] if no `T` is stored
    /// - [`ResourceError::BorrowConflict`] if `T` is mutably borrowed
    pub fn get<T: Resource>(&self) -> Result<ResourceRef<'_, T>, ResourceError> {
        let type_name = core::any::type_name::<T>();
        let entry = self
            .storage
            .get(&ResourceId::of::<T>())
            .ok_or(ResourceError::NotFound(type_name))?;
        let guard = entry
            .try_read()
            .ok_or(ResourceError::BorrowConflict(type_name))?;

        Ok(ResourceRef {
            guard,
            _marker: PhantomData,
        })
    }

    /// Borrows a resource mutably.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::NotFound`] if no `T` is stored
    /// - [`ResourceError::BorrowConflict`] if `T` is borrowed at all
    pub fn get_mut<T: Resource>(&self) -> Result<ResourceRefMut<'_, T>, ResourceError> {
        let type_name = core::any::type_name::<T>();
        let entry = self
            .storage
            .get(&ResourceId::of::<T>())
            .ok_or(ResourceError::NotFound(type_name))?;
        let guard = entry
            .try_write()
            .ok_or(ResourceError::BorrowConflict(type_name))?;

        Ok(ResourceRefMut {
            guard,
            _marker: PhantomData,
        })
    }

    /// Removes a resource and returns it.
    pub fn remove<T: Resource>(&mut self) -> Option<T> {
        self.storage
            .remove(&ResourceId::of::<T>())
            .and_then(|entry| entry.into_inner().downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Returns the number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

/// Shared guard returned by [`Resources::get`].
pub struct ResourceRef<'a, T: Resource> {
    guard: RwLockReadGuard<'a, BoxedResource>,
    _marker: PhantomData<&'a T>,
}

impl<T: Resource> core::ops::Deref for ResourceRef<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // Entries are keyed by `ResourceId::of::<T>()`, so the downcast holds.
        self.guard
            .downcast_ref::<T>()
            .expect("entry keyed by ResourceId::of::<T>() holds a T")
    }
}

/// Exclusive guard returned by [`Resources::get_mut`].
pub struct ResourceRefMut<'a, T: Resource> {
    guard: RwLockWriteGuard<'a, BoxedResource>,
    _marker: PhantomData<&'a mut T>,
}

impl<T: Resource> core::ops::Deref for ResourceRefMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.guard
            .downcast_ref::<T>()
            .expect("entry keyed by ResourceId::of::<T>() holds a T")
    }
}

impl<T: Resource> core::ops::DerefMut for ResourceRefMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.guard
            .downcast_mut::<T>()
            .expect("entry keyed by ResourceId::of::<T>() holds a T")
    }
}
