use crate::components::{Component, ComponentType};
use crate::registry::{Registry, RegistryId};
use crate::systems::System;
use crate::error::EcsError;
use std::fmt;

/// A lightweight handle to an entity living in a [Registry].
///
/// Two handles with the same id and registry are the same entity; handles are compared and
/// hashed by value, so freshly built copies (e.g. after deserialization) alias correctly.
/// Every method simply forwards to the registry passed in.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct Entity {
	pub(crate) id: u32,
	pub(crate) registry: RegistryId,
}

impl Entity {
	pub(crate) const fn new(id: u32, registry: RegistryId) -> Self {
		Self { id, registry }
	}

	/// The entity's id, unique among the live entities of its registry.
	pub const fn id(&self) -> u32 {
		self.id
	}

	/// The registry that created this entity.
	pub const fn registry(&self) -> RegistryId {
		self.registry
	}

	pub fn add_component<T: Component>(self, registry: &mut Registry, value: T) -> &mut T {
		registry.add_component(self, value)
	}

	pub fn remove_component<T: Component>(self, registry: &mut Registry) -> Option<T> {
		registry.remove_component::<T>(self)
	}

	pub fn has_component<T: Component>(self, registry: &Registry) -> bool {
		registry.has_component::<T>(self)
	}

	pub fn get_component<T: Component>(self, registry: &Registry) -> Option<&T> {
		registry.get_component::<T>(self)
	}

	pub fn get_component_mut<T: Component>(self, registry: &mut Registry) -> Option<&mut T> {
		registry.get_component_mut::<T>(self)
	}

	/// The types of every component attached to the entity.
	pub fn components(self, registry: &Registry) -> Vec<ComponentType> {
		registry.get_all_components(self)
	}

	pub fn kill(self, registry: &mut Registry) {
		registry.kill_entity(self)
	}

	pub fn tag(self, registry: &mut Registry, tag: impl Into<String>) -> Result<(), EcsError> {
		registry.tag_entity(self, tag)
	}

	pub fn has_tag(self, registry: &Registry, tag: &str) -> bool {
		registry.entity_has_tag(self, tag)
	}

	pub fn remove_tag(self, registry: &mut Registry) {
		registry.remove_entity_tag(self)
	}

	pub fn group(self, registry: &mut Registry, group: impl Into<String>) {
		registry.group_entity(self, group)
	}

	pub fn belongs_to_group(self, registry: &Registry, group: &str) -> bool {
		registry.entity_belongs_to_group(self, group)
	}

	pub fn remove_group(self, registry: &mut Registry) {
		registry.remove_entity_group(self)
	}

	/// Put the entity in `S`'s live set regardless of its signature.
	pub fn add_to_system<S: System>(self, registry: &mut Registry) {
		registry.add_entity_to_system::<S>(self)
	}

	/// Take the entity out of `S`'s live set until the next re-sync.
	pub fn remove_from_system<S: System>(self, registry: &mut Registry) {
		registry.remove_entity_from_system::<S>(self)
	}
}

impl fmt::Display for Entity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.id)
	}
}
