//! Aggregates: entities that buffer domain events
//!
//! An aggregate is an entity whose state transitions produce domain events.
//! Events are buffered FIFO on the instance and flushed to an external
//! emitter by [`Aggregate::publish_events`]. Because every operation returns
//! a new instance, the buffer on the original instance is never touched: the
//! cleared sibling only comes into existence after the whole flush loop has
//! completed.

use std::fmt;

use tracing::{debug, trace};

use crate::domain_object::DomainObject;
use crate::entity::{Entity, EntityType};
use crate::errors::DomainResult;
use crate::events::DomainEvent;
use crate::value::{Props, Value};
use crate::value_object::EntityId;

/// External collaborator receiving published events
///
/// A single fire-and-forget capability: accept one event, return nothing.
/// This crate only calls it, never implements it.
pub trait DomainEventEmitter {
    /// Deliver one event
    fn emit(&mut self, event: DomainEvent);
}

/// An immutable aggregate of concrete type `T`
pub struct Aggregate<T: EntityType> {
    entity: Entity<T>,
    events: Vec<DomainEvent>,
}

impl<T: EntityType> Aggregate<T> {
    /// Create an aggregate with an empty event buffer
    ///
    /// Runs the full entity construction contract on the props.
    pub fn new(props: Props) -> DomainResult<Self> {
        Self::with_events(props, Vec::new())
    }

    /// Create an aggregate with an initial event buffer
    pub fn with_events(props: Props, events: Vec<DomainEvent>) -> DomainResult<Self> {
        Ok(Self {
            entity: Entity::new(props)?,
            events,
        })
    }

    /// The props bag, exposed as an immutable shared snapshot
    pub fn props(&self) -> &Props {
        self.entity.props()
    }

    /// The identity value object derived at construction
    pub fn id(&self) -> &EntityId<T::Id> {
        self.entity.id()
    }

    /// Buffered events in append order
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Identity-based equality: compares only the id value objects
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Return a new instance with `event` appended at the tail of the buffer
    ///
    /// The original instance and its buffer are untouched.
    pub fn add_event(&self, event: DomainEvent) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self {
            entity: self.entity.clone(),
            events,
        }
    }

    /// Deliver every buffered event to the emitter and return a cleared sibling
    ///
    /// Events are delivered in FIFO order, one `emit` call each. The cleared
    /// instance is only produced after the loop completes; a panicking
    /// emitter therefore yields no new instance and the caller's original
    /// still holds the buffer.
    pub fn publish_events<E>(&self, emitter: &mut E) -> Self
    where
        E: DomainEventEmitter + ?Sized,
    {
        debug!(
            aggregate_id = %self.id().raw_id(),
            count = self.events.len(),
            "publishing buffered domain events"
        );
        for event in &self.events {
            trace!(event_type = %event.event_type, event_id = %event.id, "emitting event");
            emitter.emit(event.clone());
        }
        self.cleared()
    }

    /// Return a cleared sibling, discarding pending events without delivery
    pub fn clear_events(&self) -> Self {
        trace!(
            aggregate_id = %self.id().raw_id(),
            discarded = self.events.len(),
            "clearing buffered domain events"
        );
        self.cleared()
    }

    /// Produce a new instance by merging a partial props bag over the current one
    ///
    /// Same contract as [`Entity::evolve`], with the current event buffer
    /// propagated to the new instance, never reset.
    pub fn evolve(&self, partial: Props) -> DomainResult<Self> {
        Ok(Self {
            entity: self.entity.evolve(partial)?,
            events: self.events.clone(),
        })
    }

    /// Produce a new instance by applying a mutation recipe to a draft
    ///
    /// The event buffer is propagated to the new instance.
    pub fn evolve_with(&self, recipe: impl FnOnce(&mut Props)) -> DomainResult<Self> {
        Ok(Self {
            entity: self.entity.evolve_with(recipe)?,
            events: self.events.clone(),
        })
    }

    fn cleared(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            events: Vec::new(),
        }
    }
}

impl<T: EntityType> DomainObject for Aggregate<T> {
    fn as_value(&self) -> Value {
        Value::Object(self.entity.shared_props())
    }
}

impl<T: EntityType> PartialEq for Aggregate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl<T: EntityType> Clone for Aggregate<T> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            events: self.events.clone(),
        }
    }
}

impl<T: EntityType> fmt::Debug for Aggregate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("type", &std::any::type_name::<T>())
            .field("id", &self.id())
            .field("props", &self.props())
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;
    use crate::events::{DomainEventProps, EventType};
    use crate::props;
    use crate::validation::ValidationResult;
    use crate::value_object::{EntityIdType, ValueObjectType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct OrderIdType;
    impl ValueObjectType for OrderIdType {
        fn validate(value: &Value) -> ValidationResult {
            match value.as_str() {
                Some(s) if !s.is_empty() => ValidationResult::Valid,
                _ => "order id must be a non-empty string".into(),
            }
        }
    }
    impl EntityIdType for OrderIdType {
        fn raw_id(value: &Value) -> String {
            value.as_str().unwrap_or_default().to_string()
        }
    }

    struct Order;
    impl EntityType for Order {
        type Id = OrderIdType;

        fn id(props: &Props) -> DomainResult<EntityId<OrderIdType>> {
            EntityId::new(props.get("id").cloned().unwrap_or(Value::Undefined))
        }
    }

    struct ItemAdded;
    impl EventType for ItemAdded {
        const NAME: &'static str = "ItemAdded";
    }

    /// Recording emitter used across the aggregate tests
    #[derive(Default)]
    struct RecordingEmitter {
        emitted: Vec<DomainEvent>,
    }

    impl DomainEventEmitter for RecordingEmitter {
        fn emit(&mut self, event: DomainEvent) {
            self.emitted.push(event);
        }
    }

    fn order() -> Aggregate<Order> {
        Aggregate::new(props! { "id" => "order-1", "total" => 0.0 }).unwrap()
    }

    fn item_added(id: &str) -> DomainEvent {
        ItemAdded::create(DomainEventProps::new("order-1").with_id(id)).unwrap()
    }

    #[test]
    fn test_new_aggregate_has_no_events() {
        assert!(order().events().is_empty());
    }

    #[test]
    fn test_with_events_initializes_the_buffer() {
        let aggregate = Aggregate::<Order>::with_events(
            props! { "id" => "order-1" },
            vec![item_added("e1")],
        )
        .unwrap();
        assert_eq!(aggregate.events().len(), 1);
    }

    #[test]
    fn test_add_event_appends_at_the_tail() {
        let a = order()
            .add_event(item_added("e1"))
            .add_event(item_added("e2"));
        let b = a.add_event(item_added("e3"));

        let ids: Vec<_> = b.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
        // Original buffer untouched
        assert_eq!(a.events().len(), 2);
    }

    /// Publishing delivers every event FIFO, one emitter call each, and
    /// returns a cleared sibling while the original keeps its buffer
    #[test]
    fn test_publish_events_fifo_and_clearing() {
        let aggregate = order()
            .add_event(item_added("e1"))
            .add_event(item_added("e2"));
        let mut emitter = RecordingEmitter::default();

        let published = aggregate.publish_events(&mut emitter);

        let ids: Vec<_> = emitter.emitted.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
        assert!(published.events().is_empty());
        assert_eq!(aggregate.events().len(), 2);
    }

    #[test]
    fn test_clear_events_discards_without_delivery() {
        let aggregate = order().add_event(item_added("e1"));
        let cleared = aggregate.clear_events();
        assert!(cleared.events().is_empty());
        assert_eq!(aggregate.events().len(), 1);
        // Props carried over unchanged
        assert_eq!(cleared.props(), aggregate.props());
    }

    #[test]
    fn test_evolve_preserves_the_event_buffer() {
        let aggregate = order().add_event(item_added("e1"));
        let evolved = aggregate.evolve(props! { "total" => 25.0 }).unwrap();

        assert_eq!(evolved.events().len(), 1);
        assert_eq!(evolved.props()["total"], Value::from(25.0));
        assert_eq!(aggregate.props()["total"], Value::from(0.0));
    }

    #[test]
    fn test_evolve_with_recipe_preserves_the_event_buffer() {
        let aggregate = order().add_event(item_added("e1"));
        let evolved = aggregate
            .evolve_with(|draft| {
                draft.insert("note".to_string(), Value::from("gift"));
            })
            .unwrap();
        assert_eq!(evolved.events().len(), 1);
        assert_eq!(evolved.props()["note"], Value::from("gift"));
    }

    #[test]
    fn test_identity_based_equality() {
        let a = Aggregate::<Order>::new(props! { "id" => "order-1", "total" => 1.0 }).unwrap();
        let b = Aggregate::<Order>::new(props! { "id" => "order-1", "total" => 2.0 }).unwrap();
        let c = Aggregate::<Order>::new(props! { "id" => "order-2", "total" => 1.0 }).unwrap();

        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }

    #[test]
    fn test_construction_contract_matches_entity() {
        let err = Aggregate::<Order>::new(Props::new()).unwrap_err();
        assert!(matches!(err, DomainError::ArgumentInvalid(_)));
    }

    #[test]
    fn test_to_json_exports_props_not_events() {
        let aggregate = order().add_event(item_added("e1"));
        assert_eq!(
            aggregate.to_json().unwrap(),
            json!({ "id": "order-1", "total": 0.0 })
        );
    }
}
