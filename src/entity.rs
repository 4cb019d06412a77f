//! Entities: identity-bearing props bags
//!
//! An entity wraps a validated props bag and derives its identity value
//! object from it. Equality compares identity only — two entities with the
//! same id are equal regardless of other field values. Like value objects,
//! entities are immutable: `evolve` produces a new, fully re-validated
//! sibling of the same concrete type and leaves the original untouched.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain_object::DomainObject;
use crate::errors::{DomainError, DomainResult};
use crate::validation::{handle_validation_result, ValidationResult};
use crate::value::{Props, Value};
use crate::value_object::{merge_partial, EntityId, EntityIdType};

/// Behavior of a concrete entity type: validation rule plus identity derivation
///
/// ```rust
/// use domain_kernel::{
///     props, Entity, EntityId, EntityIdType, EntityType, DomainResult,
///     ValidationResult, Value, ValueObjectType,
/// };
///
/// struct UserIdType;
/// impl ValueObjectType for UserIdType {}
/// impl EntityIdType for UserIdType {
///     fn raw_id(value: &Value) -> String {
///         value.as_str().unwrap_or_default().to_string()
///     }
/// }
///
/// struct User;
/// impl EntityType for User {
///     type Id = UserIdType;
///
///     fn id(props: &domain_kernel::Props) -> DomainResult<EntityId<UserIdType>> {
///         EntityId::new(props["id"].clone())
///     }
/// }
///
/// let user = Entity::<User>::new(props! { "id" => "u-1", "name" => "Ada" }).unwrap();
/// assert_eq!(user.id().raw_id(), "u-1");
/// ```
pub trait EntityType: Send + Sync + 'static {
    /// Identity value object type of this entity
    type Id: EntityIdType;

    /// Validate a candidate props bag; the default accepts everything
    fn validate(_props: &Props) -> ValidationResult {
        ValidationResult::Valid
    }

    /// Derive the identity value object from validated props
    ///
    /// Identity is often a dedicated field, sometimes composite. Derivation
    /// runs once at construction; an entity whose identity cannot be derived
    /// never exists.
    fn id(props: &Props) -> DomainResult<EntityId<Self::Id>>;
}

/// An immutable entity of concrete type `T`
pub struct Entity<T: EntityType> {
    props: Arc<Props>,
    id: EntityId<T::Id>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: EntityType> Entity<T> {
    /// Create an entity, running the full construction contract
    ///
    /// Fails with [`DomainError::ArgumentInvalid`] when `T::validate` rejects
    /// the props, when the props bag has zero keys, or when identity cannot
    /// be derived.
    pub fn new(props: Props) -> DomainResult<Self> {
        handle_validation_result(T::validate(&props))?;
        if props.is_empty() {
            return Err(DomainError::argument_invalid(
                "The props must not be empty object",
            ));
        }
        let props = Arc::new(props);
        let id = T::id(&props)?;
        Ok(Self {
            props,
            id,
            _marker: PhantomData,
        })
    }

    /// The props bag, exposed as an immutable shared snapshot
    ///
    /// Nested domain-model instances inside the bag are held by reference,
    /// not re-wrapped.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// The identity value object derived at construction
    pub fn id(&self) -> &EntityId<T::Id> {
        &self.id
    }

    /// Identity-based equality: compares only the id value objects
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Produce a new instance by merging a partial props bag over the current one
    ///
    /// Keys present in `partial` replace the current entries; a key mapped to
    /// [`Value::Undefined`] deletes that entry. The result re-runs the whole
    /// construction contract; the original instance is untouched.
    pub fn evolve(&self, partial: Props) -> DomainResult<Self> {
        let mut next = (*self.props).clone();
        merge_partial(&mut next, partial);
        Self::new(next)
    }

    /// Produce a new instance by applying a mutation recipe to a draft
    pub fn evolve_with(&self, recipe: impl FnOnce(&mut Props)) -> DomainResult<Self> {
        let mut draft = (*self.props).clone();
        recipe(&mut draft);
        Self::new(draft)
    }

    pub(crate) fn shared_props(&self) -> Arc<Props> {
        Arc::clone(&self.props)
    }
}

impl<T: EntityType> DomainObject for Entity<T> {
    fn as_value(&self) -> Value {
        Value::Object(Arc::clone(&self.props))
    }
}

impl<T: EntityType> PartialEq for Entity<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: EntityType> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            props: Arc::clone(&self.props),
            id: self.id.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: EntityType> fmt::Debug for Entity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("type", &std::any::type_name::<T>())
            .field("id", &self.id)
            .field("props", &self.props)
            .finish()
    }
}
