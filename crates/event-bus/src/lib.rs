//! Domain event emission.
//!
//! - [`DomainEvent`] trait for events carried by the bus
//! - [`EventBus`] trait with synchronous fan-out and [`InMemoryEventBus`]
//! - [`UnitOfWork`] buffering events until an explicit commit

pub mod bus;
pub mod event;
pub mod unit_of_work;

pub use bus::{EventBus, Handler, InMemoryEventBus, Subscription};
pub use event::DomainEvent;
pub use unit_of_work::UnitOfWork;
