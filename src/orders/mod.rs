//! Order lifecycle engine
//!
//! The one subsystem with real invariants:
//! - [`model`] - Order, OrderLine, OrderStatus, Actor
//! - [`guard`] - multi-actor authorization rules
//! - [`service`] - builder, mutator and status state machine
//! - [`store`] - persistence seam ([`OrderStore`]) with revision checks

pub mod error;
pub mod guard;
pub mod model;
pub mod service;
pub mod store;

pub use error::{OrderError, OrderResult};
pub use model::{Actor, NewOrderItem, Order, OrderLine, OrderStatus, Role};
pub use service::{OrderService, RemoveItemOutcome};
pub use store::{MemoryOrderStore, OrderStore};

#[cfg(test)]
mod tests;
