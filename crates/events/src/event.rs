use chrono::{DateTime, Utc};

/// A domain event: an immutable, versioned fact about a record.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "catalog.template.created").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Area prefix of `event_type` ("catalog", "orders", ...).
    fn area(&self) -> &'static str {
        let ty = self.event_type();
        ty.split('.').next().unwrap_or(ty)
    }
}
