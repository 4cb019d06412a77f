//! Domain events
//!
//! Events are immutable records of facts produced by aggregate state
//! transitions. Every event carries the same uniform field set; what varies
//! per concrete event type is its declared name and its payload validation
//! rule, both supplied through [`EventType`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::json::JsonValue;
use crate::validation::{handle_validation_result, ValidationResult};

/// Name and payload rule of a concrete event type
///
/// ```rust
/// use domain_kernel::{EventType, JsonValue, ValidationResult};
///
/// struct OrderPlaced;
///
/// impl EventType for OrderPlaced {
///     const NAME: &'static str = "OrderPlaced";
///
///     fn validate_payload(payload: Option<&JsonValue>) -> ValidationResult {
///         match payload {
///             Some(p) if p.get("total").is_some() => ValidationResult::Valid,
///             _ => "OrderPlaced payload must carry a total".into(),
///         }
///     }
/// }
///
/// let event = OrderPlaced::create(
///     domain_kernel::DomainEventProps::new("order-1")
///         .with_payload(serde_json::json!({ "total": 10 })),
/// )
/// .unwrap();
/// assert_eq!(event.event_type, "OrderPlaced");
/// ```
pub trait EventType: Send + Sync + 'static {
    /// Declared name of the event, used as its `type` field
    const NAME: &'static str;

    /// Validate the payload; the default accepts everything
    fn validate_payload(_payload: Option<&JsonValue>) -> ValidationResult {
        ValidationResult::Valid
    }

    /// Construct a validated event of this type
    ///
    /// Accepts either full [`DomainEventProps`] or a bare aggregate-id string
    /// as shorthand.
    fn create(props: impl Into<DomainEventProps>) -> DomainResult<DomainEvent>
    where
        Self: Sized,
    {
        DomainEvent::from_props(Self::NAME, props.into(), Self::validate_payload)
    }
}

/// Construction input for a [`DomainEvent`]
///
/// Omitted id and timestamp are generated at construction time.
#[derive(Debug, Clone, Default)]
pub struct DomainEventProps {
    /// Unique event id; generated when absent
    pub id: Option<String>,
    /// Identifier of the aggregate the event belongs to; required, non-empty
    pub aggregate_id: String,
    /// Unix timestamp in milliseconds; defaults to the current time
    pub timestamp: Option<i64>,
    /// Correlation id linking related messages
    pub correlation_id: Option<String>,
    /// Id of the message that caused this event
    pub causation_id: Option<String>,
    /// JSON-safe payload, validated by the event type's rule
    pub payload: Option<JsonValue>,
}

impl DomainEventProps {
    /// Props with only the aggregate id set
    pub fn new(aggregate_id: impl Into<String>) -> Self {
        Self {
            aggregate_id: aggregate_id.into(),
            ..Default::default()
        }
    }

    /// Set an explicit event id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit timestamp in Unix milliseconds
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the correlation id
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Set the causation id
    pub fn with_causation_id(mut self, causation_id: impl Into<String>) -> Self {
        self.causation_id = Some(causation_id.into());
        self
    }

    /// Set the payload
    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }
}

impl From<&str> for DomainEventProps {
    fn from(aggregate_id: &str) -> Self {
        Self::new(aggregate_id)
    }
}

impl From<String> for DomainEventProps {
    fn from(aggregate_id: String) -> Self {
        Self::new(aggregate_id)
    }
}

/// An immutable domain event record
///
/// Constructed once through [`EventType::create`], never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// Unique event id
    pub id: String,
    /// Identifier of the aggregate the event belongs to
    pub aggregate_id: String,
    /// Declared name of the concrete event type
    #[serde(rename = "type")]
    pub event_type: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Correlation id linking related messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Id of the message that caused this event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<String>,
    /// JSON-safe payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,
}

impl DomainEvent {
    fn from_props(
        event_type: &str,
        props: DomainEventProps,
        validate_payload: fn(Option<&JsonValue>) -> ValidationResult,
    ) -> DomainResult<Self> {
        let event = Self {
            id: props.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            aggregate_id: props.aggregate_id,
            event_type: event_type.to_string(),
            timestamp: props
                .timestamp
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
            correlation_id: props.correlation_id,
            causation_id: props.causation_id,
            payload: props.payload,
        };

        if event.aggregate_id.is_empty() {
            return Err(DomainError::argument_invalid(
                "DomainEvent must have an aggregateId",
            ));
        }
        if event.timestamp < 0 {
            return Err(DomainError::argument_invalid(
                "DomainEvent must have a valid timestamp",
            ));
        }
        handle_validation_result(validate_payload(event.payload.as_ref()))?;

        Ok(event)
    }

    /// Export as JSON-safe data
    pub fn to_json(&self) -> DomainResult<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}
