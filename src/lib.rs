//! # Domain Kernel
//!
//! Immutable building blocks for Domain-Driven Design modeling code:
//! - **Value Objects**: immutable types defined by their attributes, compared structurally
//! - **Entities**: props bags with derived identity and identity-based equality
//! - **Aggregates**: entities that buffer domain events and flush them to an emitter
//! - **Domain Events**: immutable fact records with per-type payload validation
//! - **Deep JSON conversion**: recursive export of arbitrary value graphs to JSON-safe data
//!
//! ## Design Principles
//!
//! 1. **Immutability**: every "mutation" constructs a new, fully re-validated instance
//! 2. **Structural sharing**: props trees are `Arc`-shared, so evolving costs only the changed keys
//! 3. **One validation choke point**: every subtype `validate` result is normalized the same way
//! 4. **Identity preservation**: nested domain objects are held by reference, never re-wrapped
//! 5. **Uniform errors**: every failure carries a stable string code and a human message
//!
//! ## Example
//!
//! ```rust
//! use domain_kernel::{
//!     props, Aggregate, DomainResult, EntityId, EntityIdType, EntityType,
//!     EventType, Props, Value, ValueObjectType,
//! };
//!
//! struct OrderIdType;
//! impl ValueObjectType for OrderIdType {}
//! impl EntityIdType for OrderIdType {
//!     fn raw_id(value: &Value) -> String {
//!         value.as_str().unwrap_or_default().to_string()
//!     }
//! }
//!
//! struct Order;
//! impl EntityType for Order {
//!     type Id = OrderIdType;
//!
//!     fn id(props: &Props) -> DomainResult<EntityId<OrderIdType>> {
//!         EntityId::new(props["id"].clone())
//!     }
//! }
//!
//! struct OrderPlaced;
//! impl EventType for OrderPlaced {
//!     const NAME: &'static str = "OrderPlaced";
//! }
//!
//! let order = Aggregate::<Order>::new(props! { "id" => "order-1", "total" => 0.0 })
//!     .unwrap()
//!     .add_event(OrderPlaced::create("order-1").unwrap());
//! assert_eq!(order.events().len(), 1);
//! ```

#![warn(missing_docs)]

mod aggregate;
mod domain_object;
mod entity;
mod errors;
mod events;
mod json;
mod validation;
mod value;
mod value_object;

pub use aggregate::{Aggregate, DomainEventEmitter};
pub use domain_object::DomainObject;
pub use entity::{Entity, EntityType};
pub use errors::{
    create_error_codes, DomainError, DomainResult, ErrorCodeOptions, ARGUMENT_INVALID_CODE,
    ERROR_MODULE, INVALID_INPUT_CODE,
};
pub use events::{DomainEvent, DomainEventProps, EventType};
pub use json::{deep_convert_to_json, deep_jsonify, JsonValue};
pub use validation::{handle_validation_result, ValidationResult};
pub use value::{is_domain_primitive, is_primitive, Props, Value};
pub use value_object::{EntityId, EntityIdType, ValueObject, ValueObjectType};
