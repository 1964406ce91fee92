//! [Systems](System) provide the logic for modifying the state of [Entities](crate::entities::Entity)
//! and their associated [Components](crate::components::Component).
//!
//! A [System] must be manually added to a [Registry](crate::registry::Registry)
//! for it to start tracking entities.

mod system;
mod system_store;

pub use system::*;
pub use system_store::SystemCore;
pub(crate) use system_store::*;
