//! Component trait and per-entity component storage

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Marker trait for components
///
/// Components are plain data fragments. Implement it explicitly for each type
/// that is attached to entities.
pub trait Component: 'static {}

/// Type-erased component value waiting to be attached
pub(crate) struct BoxedComponent {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any>,
}

impl BoxedComponent {
    pub(crate) fn new<T: Component>(component: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(component),
        }
    }
}

/// The set of components attached to one entity
///
/// Holds at most one component per type. Attaching a second component of the
/// same type replaces the first.
#[derive(Default)]
pub struct ComponentSet {
    components: HashMap<TypeId, (&'static str, Box<dyn Any>)>,
}

impl ComponentSet {
    /// Create an empty component set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component (builder pattern)
    #[must_use]
    pub fn with<T: Component>(mut self, component: T) -> Self {
        self.insert(component);
        self
    }

    /// Attach a component, returning the one it replaced
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        self.insert_boxed(BoxedComponent::new(component))
            .and_then(|previous| previous.downcast::<T>().ok())
            .map(|previous| *previous)
    }

    pub(crate) fn insert_boxed(&mut self, component: BoxedComponent) -> Option<Box<dyn Any>> {
        self.components
            .insert(component.type_id, (component.type_name, component.value))
            .map(|(_, value)| value)
    }

    /// Detach a component and hand it back
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        self.components
            .remove(&TypeId::of::<T>())
            .and_then(|(_, value)| value.downcast::<T>().ok())
            .map(|value| *value)
    }

    pub(crate) fn remove_by_id(&mut self, type_id: TypeId) -> bool {
        self.components.remove(&type_id).is_some()
    }

    /// Get a component by type
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|(_, value)| value.downcast_ref::<T>())
    }

    /// Get a mutable component by type
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|(_, value)| value.downcast_mut::<T>())
    }

    /// Check whether a component of type `T` is attached
    pub fn contains<T: Component>(&self) -> bool {
        self.contains_id(TypeId::of::<T>())
    }

    /// Check membership by raw type id
    pub fn contains_id(&self, type_id: TypeId) -> bool {
        self.components.contains_key(&type_id)
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component is attached
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.components.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}
