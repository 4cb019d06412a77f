//! Immutable value objects
//!
//! A value object wraps either a single domain primitive or a structured
//! value, is compared by deep structural equality, and is "mutated" only by
//! producing a new, fully re-validated instance through one of the `evolve`
//! operations. The concrete subtype is a zero-sized type parameter carrying
//! the validation rule, so evolving always yields the same concrete type
//! without any late-bound construction machinery.

use std::fmt;
use std::marker::PhantomData;

use crate::domain_object::DomainObject;
use crate::errors::{DomainError, DomainResult};
use crate::validation::{handle_validation_result, ValidationResult};
use crate::value::{is_domain_primitive, Props, Value};

/// Validation rule of a concrete value object type
///
/// Implementors are zero-sized marker types:
///
/// ```rust
/// use domain_kernel::{ValueObject, ValueObjectType, ValidationResult, Value};
///
/// struct Email;
///
/// impl ValueObjectType for Email {
///     fn validate(value: &Value) -> ValidationResult {
///         match value.as_str() {
///             Some(s) if s.contains('@') => ValidationResult::Valid,
///             _ => "email must contain @".into(),
///         }
///     }
/// }
///
/// let email = ValueObject::<Email>::new("ada@example.com").unwrap();
/// assert!(ValueObject::<Email>::new("nope").is_err());
/// ```
pub trait ValueObjectType: Send + Sync + 'static {
    /// Validate a candidate value; the default accepts everything
    fn validate(_value: &Value) -> ValidationResult {
        ValidationResult::Valid
    }
}

/// An immutable value object of concrete type `T`
pub struct ValueObject<T: ValueObjectType> {
    value: Value,
    is_domain_primitive: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ValueObjectType> ValueObject<T> {
    /// Create a value object, running the full construction contract
    ///
    /// Fails with [`DomainError::ArgumentInvalid`] when the value is
    /// undefined, when `T::validate` rejects it, when a structured value has
    /// zero keys, or when the value is neither a domain primitive nor a
    /// structured object.
    pub fn new(value: impl Into<Value>) -> DomainResult<Self> {
        let value = value.into();
        Self::validate_value(&value)?;
        let is_primitive_kind = is_domain_primitive(&value);
        Ok(Self {
            value,
            is_domain_primitive: is_primitive_kind,
            _marker: PhantomData,
        })
    }

    /// The wrapped value, exposed as an immutable shared view
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this instance wraps a single domain primitive
    pub fn is_domain_primitive(&self) -> bool {
        self.is_domain_primitive
    }

    /// Deep structural equality over the exposed value
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Produce a new instance wrapping a full replacement value
    ///
    /// This is the evolution path for primitive-kind value objects; the
    /// replacement re-runs the whole construction contract.
    pub fn evolve(&self, value: impl Into<Value>) -> DomainResult<Self> {
        Self::new(value)
    }

    /// Produce a new instance by merging a partial value over the current one
    ///
    /// Keys present in `partial` replace the current entries; a key mapped to
    /// [`Value::Undefined`] deletes that entry. Only valid on structured-kind
    /// instances.
    pub fn evolve_props(&self, partial: Props) -> DomainResult<Self> {
        let mut next = self.structured_props()?.clone();
        merge_partial(&mut next, partial);
        Self::new(Value::object(next))
    }

    /// Produce a new instance by applying a mutation recipe to a draft
    ///
    /// The recipe receives a mutable draft of the current structured value;
    /// the original instance is untouched. Only valid on structured-kind
    /// instances.
    pub fn evolve_with(&self, recipe: impl FnOnce(&mut Props)) -> DomainResult<Self> {
        let mut draft = self.structured_props()?.clone();
        recipe(&mut draft);
        Self::new(Value::object(draft))
    }

    fn structured_props(&self) -> DomainResult<&Props> {
        self.value.as_object().ok_or_else(|| {
            DomainError::argument_invalid("The value is not a structured object")
        })
    }

    fn validate_value(value: &Value) -> DomainResult<()> {
        if matches!(value, Value::Undefined) {
            return Err(DomainError::argument_invalid(
                "The value must not be undefined",
            ));
        }
        handle_validation_result(T::validate(value))?;

        if is_domain_primitive(value) {
            return Ok(());
        }
        match value {
            Value::Object(props) if props.is_empty() => Err(DomainError::argument_invalid(
                "The value must not be empty object",
            )),
            Value::Object(_) => Ok(()),
            other => Err(DomainError::argument_invalid(format!(
                "The value must be a domain primitive or a structured object, got {}",
                other.kind_name()
            ))),
        }
    }
}

/// Apply a partial update in place; `Undefined` deletes the key
pub(crate) fn merge_partial(props: &mut Props, partial: Props) {
    for (key, value) in partial {
        if matches!(value, Value::Undefined) {
            props.shift_remove(&key);
        } else {
            props.insert(key, value);
        }
    }
}

impl<T: ValueObjectType> DomainObject for ValueObject<T> {
    fn as_value(&self) -> Value {
        self.value.clone()
    }
}

impl<T: ValueObjectType> PartialEq for ValueObject<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: ValueObjectType> Clone for ValueObject<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            is_domain_primitive: self.is_domain_primitive,
            _marker: PhantomData,
        }
    }
}

impl<T: ValueObjectType> fmt::Debug for ValueObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueObject")
            .field("type", &std::any::type_name::<T>())
            .field("value", &self.value)
            .finish()
    }
}

/// Validation rule of an identity value object
///
/// Identity types additionally expose the raw identifier string used for
/// display and logging.
pub trait EntityIdType: ValueObjectType {
    /// Extract the raw identifier from a validated id value
    fn raw_id(value: &Value) -> String;
}

/// Identity value object of a concrete id type
pub type EntityId<T> = ValueObject<T>;

impl<T: EntityIdType> ValueObject<T> {
    /// The raw identifier string
    pub fn raw_id(&self) -> String {
        T::raw_id(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    struct AnyValue;
    impl ValueObjectType for AnyValue {}

    struct Person;
    impl ValueObjectType for Person {
        fn validate(value: &Value) -> ValidationResult {
            let Some(props) = value.as_object() else {
                return "person must be structured".into();
            };
            match props.get("age").and_then(Value::as_f64) {
                Some(age) if age >= 0.0 => ValidationResult::Valid,
                _ => "age must be a non-negative number".into(),
            }
        }
    }

    #[test]
    fn test_creates_primitive_value_objects() {
        for value in [
            Value::from(123),
            Value::from("string"),
            Value::Date(Utc::now()),
            Value::Null,
            Value::from(true),
        ] {
            let vo = ValueObject::<AnyValue>::new(value).unwrap();
            assert!(vo.is_domain_primitive());
        }
    }

    #[test]
    fn test_creates_structured_value_objects() {
        let vo = ValueObject::<AnyValue>::new(props! { "name" => "foo", "age" => 123 }).unwrap();
        assert!(!vo.is_domain_primitive());
        assert_eq!(
            vo.value(),
            &Value::object(props! { "name" => "foo", "age" => 123 })
        );
    }

    #[test]
    fn test_rejects_undefined() {
        let err = ValueObject::<AnyValue>::new(Value::Undefined).unwrap_err();
        assert_eq!(
            err,
            DomainError::argument_invalid("The value must not be undefined")
        );
    }

    #[test]
    fn test_rejects_empty_object() {
        let err = ValueObject::<AnyValue>::new(Props::new()).unwrap_err();
        assert_eq!(
            err,
            DomainError::argument_invalid("The value must not be empty object")
        );
    }

    #[test]
    fn test_rejects_non_structured_non_primitive_kinds() {
        for value in [
            Value::array(vec![Value::from(1)]),
            Value::Symbol("token".into()),
            Value::BigInt(7),
            Value::set(vec![]),
        ] {
            assert!(ValueObject::<AnyValue>::new(value).is_err());
        }
    }

    #[test]
    fn test_subtype_validation_funnels_through_the_pipeline() {
        let err = ValueObject::<Person>::new(props! { "age" => -1 }).unwrap_err();
        assert_eq!(
            err,
            DomainError::argument_invalid("age must be a non-negative number")
        );
    }

    #[test]
    fn test_equality_is_structural_not_identity() {
        let a = ValueObject::<AnyValue>::new(123).unwrap();
        let b = ValueObject::<AnyValue>::new(123).unwrap();
        let c = ValueObject::<AnyValue>::new(456).unwrap();
        assert!(a.equals(&b));
        assert!(!a.equals(&c));

        let d = ValueObject::<AnyValue>::new(props! { "x" => 1 }).unwrap();
        let e = ValueObject::<AnyValue>::new(props! { "x" => 1 }).unwrap();
        assert_eq!(d, e);
    }

    #[test]
    fn test_evolve_replaces_a_primitive_value() {
        let vo = ValueObject::<AnyValue>::new("before").unwrap();
        let evolved = vo.evolve("after").unwrap();
        assert_eq!(evolved.value(), &Value::from("after"));
        // Original untouched
        assert_eq!(vo.value(), &Value::from("before"));
    }

    #[test]
    fn test_evolve_revalidates() {
        let vo = ValueObject::<Person>::new(props! { "age" => 30 }).unwrap();
        assert!(vo.evolve_props(props! { "age" => -5 }).is_err());
        // Failure leaves the original unaffected
        assert_eq!(vo.value(), &Value::object(props! { "age" => 30 }));
    }

    #[test]
    fn test_evolve_props_merges_and_deletes() {
        let vo =
            ValueObject::<AnyValue>::new(props! { "name" => "foo", "age" => 1, "tag" => "x" })
                .unwrap();
        let evolved = vo
            .evolve_props(props! { "age" => 2, "tag" => Value::Undefined })
            .unwrap();
        assert_eq!(
            evolved.value(),
            &Value::object(props! { "name" => "foo", "age" => 2 })
        );
    }

    #[test]
    fn test_evolve_with_applies_a_recipe_to_a_draft() {
        let vo = ValueObject::<AnyValue>::new(props! { "count" => 1 }).unwrap();
        let evolved = vo
            .evolve_with(|draft| {
                draft.insert("count".to_string(), Value::from(2));
                draft.insert("extra".to_string(), Value::from(true));
            })
            .unwrap();
        assert_eq!(
            evolved.value(),
            &Value::object(props! { "count" => 2, "extra" => true })
        );
        assert_eq!(vo.value(), &Value::object(props! { "count" => 1 }));
    }

    #[test]
    fn test_structured_evolutions_fail_on_primitive_kind() {
        let vo = ValueObject::<AnyValue>::new(42).unwrap();
        assert!(vo.evolve_props(props! { "x" => 1 }).is_err());
        assert!(vo.evolve_with(|_| {}).is_err());
    }

    /// Nested domain objects keep their reference identity through
    /// construction and evolution
    #[test]
    fn test_nested_domain_object_identity_is_preserved() {
        let inner = ValueObject::<AnyValue>::new(props! { "name" => "inner" }).unwrap();
        let handle = Value::domain(inner);
        let inner_arc = handle.as_domain().unwrap().clone();

        let outer =
            ValueObject::<AnyValue>::new(props! { "vo" => handle, "age" => 1 }).unwrap();
        let stored = outer.value().as_object().unwrap()["vo"]
            .as_domain()
            .unwrap()
            .clone();
        assert!(Arc::ptr_eq(&inner_arc, &stored));

        // Evolving an unrelated key reuses the same nested instance
        let evolved = outer.evolve_props(props! { "age" => 2 }).unwrap();
        let still_stored = evolved.value().as_object().unwrap()["vo"]
            .as_domain()
            .unwrap()
            .clone();
        assert!(Arc::ptr_eq(&inner_arc, &still_stored));
    }

    #[test]
    fn test_to_json_round_trip() {
        let date = chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 6, 1, 12, 0, 0).unwrap();
        let vo = ValueObject::<AnyValue>::new(props! {
            "name" => "foo",
            "when" => date,
            "tags" => Value::array(vec![Value::from("a"), Value::from("b")]),
        })
        .unwrap();
        assert_eq!(
            vo.to_json().unwrap(),
            json!({
                "name": "foo",
                "when": "2024-06-01T12:00:00.000Z",
                "tags": ["a", "b"],
            })
        );
    }

    struct UserId;
    impl ValueObjectType for UserId {
        fn validate(value: &Value) -> ValidationResult {
            match value.as_str() {
                Some(s) if !s.is_empty() => ValidationResult::Valid,
                _ => "id must be a non-empty string".into(),
            }
        }
    }
    impl EntityIdType for UserId {
        fn raw_id(value: &Value) -> String {
            value.as_str().unwrap_or_default().to_string()
        }
    }

    #[test]
    fn test_entity_id_exposes_raw_id() {
        let id = EntityId::<UserId>::new("user-1").unwrap();
        assert_eq!(id.raw_id(), "user-1");
        assert!(EntityId::<UserId>::new("").is_err());
    }
}
