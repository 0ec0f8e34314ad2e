//! Families select entities by the component types they carry
//!
//! A family is an immutable predicate: every `all` type must be attached and
//! no `exclude` type may be. It holds no per-entity state, so membership is
//! always evaluated against the entity's current component set.

use super::component::{Component, ComponentSet};
use std::any::TypeId;
use std::fmt;

/// Require-all / exclude-any predicate over component types
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Family {
    all: Vec<TypeId>,
    exclude: Vec<TypeId>,
    names: Vec<&'static str>,
}

impl Family {
    /// Start building a family
    pub fn builder() -> FamilyBuilder {
        FamilyBuilder::default()
    }

    /// Family matching every entity
    pub fn everything() -> Self {
        Self::builder().build()
    }

    /// Whether component type `type_id` is required by this family
    pub fn requires_id(&self, type_id: TypeId) -> bool {
        self.all.contains(&type_id)
    }

    /// Check a component set against this family
    pub fn matches(&self, components: &ComponentSet) -> bool {
        self.all.iter().all(|id| components.contains_id(*id))
            && !self.exclude.iter().any(|id| components.contains_id(*id))
    }
}

impl fmt::Debug for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Family[{}]", self.names.join(", "))
    }
}

/// Builder for [`Family`]
#[derive(Default)]
pub struct FamilyBuilder {
    all: Vec<(TypeId, &'static str)>,
    exclude: Vec<(TypeId, &'static str)>,
}

impl FamilyBuilder {
    /// Require component `T`
    #[must_use]
    pub fn all<T: Component>(mut self) -> Self {
        self.all.push((TypeId::of::<T>(), short_name::<T>()));
        self
    }

    /// Reject entities carrying component `T`
    #[must_use]
    pub fn exclude<T: Component>(mut self) -> Self {
        self.exclude.push((TypeId::of::<T>(), short_name::<T>()));
        self
    }

    /// Finish the family
    pub fn build(self) -> Family {
        let mut all = self.all;
        let mut exclude = self.exclude;
        all.sort_unstable();
        all.dedup();
        exclude.sort_unstable();
        exclude.dedup();

        let names = all
            .iter()
            .map(|(_, name)| *name)
            .chain(exclude.iter().map(|(_, name)| *name))
            .collect();

        Family {
            all: all.into_iter().map(|(id, _)| id).collect(),
            exclude: exclude.into_iter().map(|(id, _)| id).collect(),
            names,
        }
    }
}

fn short_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Body;
    impl Component for Body {}
    struct Inactive;
    impl Component for Inactive {}
    struct Stunned;
    impl Component for Stunned {}

    fn physics_family() -> Family {
        Family::builder()
            .all::<Body>()
            .exclude::<Inactive>()
            .exclude::<Stunned>()
            .build()
    }

    #[test]
    fn test_required_component_toggles_membership() {
        let family = physics_family();
        let mut set = ComponentSet::new();
        assert!(!family.matches(&set));

        set.insert(Body);
        assert!(family.matches(&set));

        set.remove::<Body>();
        assert!(!family.matches(&set));
    }

    #[test]
    fn test_excluded_component_toggles_membership() {
        let family = physics_family();
        let mut set = ComponentSet::new().with(Body);

        set.insert(Stunned);
        assert!(!family.matches(&set));

        set.remove::<Stunned>();
        set.insert(Inactive);
        assert!(!family.matches(&set));

        set.remove::<Inactive>();
        assert!(family.matches(&set));
    }

    #[test]
    fn test_build_order_does_not_matter() {
        let a = Family::builder().exclude::<Stunned>().all::<Body>().exclude::<Inactive>().build();
        assert_eq!(a, physics_family());
        assert!(Family::everything().matches(&ComponentSet::new()));
    }
}
