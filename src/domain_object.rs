//! Shared base capability of all domain-model instances
//!
//! Value objects, entities and aggregates all expose the same two things: a
//! structural view of their underlying value and a JSON export built from it.
//! Nesting works through this trait as well — a props bag holds nested
//! domain-model instances as `Arc<dyn DomainObject>` handles, so a snapshot
//! reuses the instance reference instead of re-wrapping or cloning it, and
//! each nested object keeps managing its own immutability.

use std::fmt;

use crate::errors::DomainResult;
use crate::json::{deep_convert_to_json, JsonValue};
use crate::value::Value;

/// Base capability of value objects, entities and aggregates
pub trait DomainObject: fmt::Debug + Send + Sync {
    /// Structural view of the underlying value
    ///
    /// Cheap: composite values are `Arc`-shared, so this clones handles, not
    /// structure. Equality between nested domain objects is defined over this
    /// view.
    fn as_value(&self) -> Value;

    /// Export as JSON-safe data
    ///
    /// Uses the strict conversion path: `undefined`, symbols and bigints
    /// anywhere in the value fail with
    /// [`DomainError::InvalidInput`](crate::DomainError::InvalidInput).
    fn to_json(&self) -> DomainResult<JsonValue> {
        deep_convert_to_json(&self.as_value())
    }
}
