//! Core domain event trait.

/// Trait for domain events.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Clone + Send + Sync + 'static {
    /// Returns the event type name.
    ///
    /// This is used for logging and metric labels.
    fn event_type(&self) -> &'static str;
}
