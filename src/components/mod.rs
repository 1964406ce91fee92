//! [Components](Component) hold the data attached to [entities](crate::entities::Entity).

pub(crate) mod component_id;
mod component_pool;
mod component_set;
mod component_type;
mod factory;
mod signature;

pub use component_id::{ComponentId, reset_component_ids};
pub use component_pool::ComponentPool;
pub(crate) use component_pool::{AnyPool, TypedPool};
pub use component_set::*;
pub use component_type::*;
pub use factory::*;
pub use signature::*;
pub use tick_ecs_derive::Component;
