use core::any::{Any, TypeId};
use core::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use rf_utils::TypeIdMap;

use crate::transform::Transform;

// -----------------------------------------------------------------------------
// TransformRegistry

/// A stored transformer: a boxed `Arc<dyn Transform<Source = F, Target = T>>`.
///
/// The trait object is kept behind `Any` so one table can hold entries for
/// every (source, target) pair; `get` recovers the precise trait object type
/// from its generic parameters.
type Entry = Box<dyn Any + Send + Sync>;

/// A registry of element [transformers](Transform), keyed by the ordered
/// pair (source element type, target element type).
///
/// At most one transformer is held per pair, shared for the registry's
/// lifetime: registration is **first-wins** and a later registration for an
/// already-populated pair is silently ignored. Lookups hand out shared
/// references ([`Arc`]), never ownership.
///
/// The registry is an explicitly constructed context object; a process-wide
/// instance is obtained by building one at startup (see
/// [`TransformRegistryArc`]) and threading it through.
///
/// # Concurrency
///
/// Mutation (`register`, `clear`) serializes on a single lock spanning the
/// whole two-level structure, so no concurrent writer can observe a
/// partially constructed inner bucket and no insert is lost between racing
/// registrations under a freshly created source bucket. Reads take the
/// shared side of the lock and never mutate.
///
/// # Examples
///
/// ```
/// use rf_convert::{Transform, TransformRegistry};
///
/// struct Stringify;
///
/// impl Transform for Stringify {
///     type Source = u32;
///     type Target = String;
///
///     fn transform(&self, input: &[u32]) -> Vec<String> {
///         input.iter().map(u32::to_string).collect()
///     }
/// }
///
/// let registry = TransformRegistry::new();
/// registry.register(Stringify);
///
/// let stringify = registry.get::<u32, String>().unwrap();
/// assert_eq!(stringify.transform(&[1, 2]), ["1", "2"]);
/// ```
pub struct TransformRegistry {
    // Outer level keyed by the source element type, inner by the target.
    table: RwLock<TypeIdMap<TypeIdMap<Entry>>>,
}

impl Default for TransformRegistry {
    /// See [`TransformRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TransformRegistry {
    /// Creates an empty `TransformRegistry`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            table: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Registers `transformer` under its declared (source, target) pair if
    /// no entry exists yet for that exact pair; otherwise does nothing.
    ///
    /// Returns `&self` to enable call chaining. Safe to call concurrently
    /// from multiple threads.
    pub fn register<Tr: Transform>(&self, transformer: Tr) -> &Self {
        let shared: Arc<dyn Transform<Source = Tr::Source, Target = Tr::Target>> =
            Arc::new(transformer);

        // One exclusive scope covers both levels: the check of the outer
        // bucket, its creation, and the inner insert must not interleave
        // with another writer.
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        let inner = table.get_or_insert(TypeId::of::<Tr::Source>(), TypeIdMap::new);
        let inserted = inner.try_insert(TypeId::of::<Tr::Target>(), || Box::new(shared) as Entry);

        if inserted {
            log::debug!(
                "registered transformer `{}` -> `{}`",
                core::any::type_name::<Tr::Source>(),
                core::any::type_name::<Tr::Target>(),
            );
        } else {
            log::trace!(
                "ignoring duplicate transformer `{}` -> `{}`",
                core::any::type_name::<Tr::Source>(),
                core::any::type_name::<Tr::Target>(),
            );
        }
        self
    }

    /// Returns the transformer registered for the (`F`, `T`) pair, or `None`
    /// if nothing was registered for it.
    ///
    /// Never fails and never mutates the registry.
    pub fn get<F: 'static, T: 'static>(
        &self,
    ) -> Option<Arc<dyn Transform<Source = F, Target = T>>> {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table
            .get(&TypeId::of::<F>())
            .and_then(|inner| inner.get(&TypeId::of::<T>()))
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Transform<Source = F, Target = T>>>())
            .map(Arc::clone)
    }

    /// Whether a transformer is registered for the (`F`, `T`) pair.
    pub fn contains<F: 'static, T: 'static>(&self) -> bool {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table
            .get(&TypeId::of::<F>())
            .is_some_and(|inner| inner.contains(&TypeId::of::<T>()))
    }

    /// Returns the number of registered (source, target) pairs.
    pub fn len(&self) -> usize {
        let table = self.table.read().unwrap_or_else(PoisonError::into_inner);
        table.values().map(TypeIdMap::len).sum()
    }

    /// Returns `true` if no transformer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the registry atomically, removing every entry on both levels.
    ///
    /// Returns `&self` to enable call chaining.
    pub fn clear(&self) -> &Self {
        let mut table = self.table.write().unwrap_or_else(PoisonError::into_inner);
        log::debug!("clearing transformer registry");
        table.clear();
        self
    }
}

impl core::fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("pairs", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// TransformRegistryArc

/// A clone-able shared handle to a [`TransformRegistry`].
///
/// The registry's own methods already take `&self`; this wrapper only adds
/// shared ownership so one registry can be threaded through components with
/// independent lifetimes.
#[derive(Clone, Default, Debug)]
pub struct TransformRegistryArc {
    /// The wrapped [`TransformRegistry`].
    pub internal: Arc<TransformRegistry>,
}

impl Deref for TransformRegistryArc {
    type Target = TransformRegistry;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.internal
    }
}
