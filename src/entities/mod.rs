//! [Entities](Entity) represent the individual "things" in your game or application.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//!
//! Entities are created and destroyed through a [Registry](crate::registry::Registry).
//! Both operations are deferred: they take effect at the registry's next
//! [update](crate::registry::Registry::update), so systems can spawn and kill entities
//! while walking their own entity lists.

mod entity;
mod entity_store;
mod labels;

pub use entity::*;
pub(crate) use entity_store::*;
pub(crate) use labels::*;
