extern crate self as tick_ecs;

pub mod data_structures;
pub mod components;
pub mod entities;
pub mod systems;
pub mod events;
pub mod registry;
pub mod error;
pub mod config;
mod context;

pub use context::FrameContext;

pub mod prelude {
	pub use crate::systems::{System, SystemCore, SystemId};
	pub use crate::components::*;
	pub use crate::entities::Entity;
	pub use crate::events::{EventBus, SubscriberId};
	pub use crate::registry::{Registry, RegistryId};
	pub use crate::data_structures::IdReuse;
	pub use crate::config::RegistryConfig;
	pub use crate::context::FrameContext;
	pub use crate::error::EcsError;
}

#[cfg(test)]
mod tests;
