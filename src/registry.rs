//! The [Registry] owns every entity, component pool and system of a world.
//!
//! Structural changes to the entity population are deferred: [create_entity](Registry::create_entity)
//! and [kill_entity](Registry::kill_entity) only queue work, and [update](Registry::update) applies it
//! once per frame. Component changes are immediate but never re-evaluate system membership on their
//! own; call [refresh_entity](Registry::refresh_entity) after a structural change that should move an
//! entity between systems.

use crate::components::{AnyPool, Component, ComponentId, ComponentPool, ComponentSet, ComponentType, Signature, TypedPool};
use crate::systems::{AnySystem, System, SystemCore, SystemId, SystemStore};
use crate::entities::{Entity, EntityStore, GroupIndex, TagIndex};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, trace, warn};
use crate::data_structures::Pool;
use crate::config::RegistryConfig;
use crate::error::EcsError;
use std::mem;

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// Identifies the [Registry] an [Entity] handle was created by.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Debug)]
pub struct RegistryId(u32);

/// A container for [entities](Entity), their [components](Component) and the [systems](System)
/// interested in them.
pub struct Registry {
	id: RegistryId,
	config: RegistryConfig,
	entities: EntityStore,
	pools: Vec<Option<Box<dyn AnyPool>>>,
	systems: SystemStore,
	tags: TagIndex,
	groups: GroupIndex,
	snapshots: Pool<Vec<Entity>>,
}

impl Registry {
	pub fn new() -> Self {
		Self::with_config(RegistryConfig::default())
	}

	pub fn with_config(config: RegistryConfig) -> Self {
		Self {
			id: RegistryId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
			entities: EntityStore::new(config.id_reuse, config.entity_capacity),
			pools: Vec::new(),
			systems: SystemStore::new(),
			tags: TagIndex::default(),
			groups: GroupIndex::default(),
			snapshots: Pool::default(),
			config,
		}
	}

	pub fn id(&self) -> RegistryId {
		self.id
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	// Entity lifecycle

	/// Creates an [entity](Entity) with no [components](Component) attached.
	///
	/// The entity can be given components right away, but systems only see it after the next [update](Registry::update).
	pub fn create_entity(&mut self) -> Entity {
		let entity = Entity::new(self.entities.create(), self.id);
		trace!(entity = entity.id, "entity created");
		entity
	}

	/// Queues an [entity](Entity) for destruction at the next [update](Registry::update).
	/// Killing the same entity twice before the flush has no further effect.
	pub fn kill_entity(&mut self, entity: Entity) {
		self.assert_owned(entity);

		if self.entities.enqueue_kill(entity.id) {
			trace!(entity = entity.id, "entity queued for destruction");
		} else if !self.entities.is_alive(entity.id) {
			warn!(entity = entity.id, "ignoring kill of an entity that is not alive");
		}
	}

	/// Applies every queued creation, then every queued destruction.
	///
	/// New entities join each system whose signature they satisfy. Killed entities leave every
	/// system, lose their components, tag and group, and their id becomes reusable.
	/// An entity created and killed within the same frame goes through both steps.
	pub fn update(&mut self) {
		let mut added = mem::take(&mut self.entities.pending_add);
		for id in added.iter().copied() {
			if self.entities.is_alive(id) {
				self.add_entity_to_systems(Entity::new(id, self.id));
			}
		}
		let added_count = added.len();
		added.clear();
		self.entities.pending_add = added;

		let mut killed = mem::take(&mut self.entities.pending_kill);
		for id in killed.iter().copied() {
			self.destroy_entity(id);
		}
		let killed_count = killed.len();
		killed.clear();
		self.entities.pending_kill = killed;

		if added_count + killed_count > 0 {
			debug!(
				added = added_count,
				killed = killed_count,
				live = self.entities.live_count(),
				"registry flushed"
			);
		}
	}

	/// Whether the entity's id is currently allocated (pending entities included).
	pub fn is_alive(&self, entity: Entity) -> bool {
		entity.registry == self.id && self.entities.is_alive(entity.id)
	}

	/// Every allocated entity, in id order, including those waiting for the next update.
	pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
		let registry = self.id;
		self.entities.alive_ids().map(move |id| Entity::new(id, registry))
	}

	/// Number of allocated entities.
	pub fn live_count(&self) -> usize {
		self.entities.live_count()
	}

	pub fn pending_add_count(&self) -> usize {
		self.entities.pending_add.len()
	}

	pub fn pending_kill_count(&self) -> usize {
		self.entities.pending_kill.len()
	}

	/// Whether the entity is waiting to be destroyed at the next update.
	pub fn is_pending_kill(&self, entity: Entity) -> bool {
		entity.registry == self.id && self.entities.is_pending_kill(entity.id)
	}

	/// Drops every entity, component, tag and group and restarts id allocation at 0.
	/// Systems stay registered; only their live sets are emptied.
	pub fn clear(&mut self) {
		self.entities.reset();
		self.pools.iter_mut().flatten().for_each(|pool| pool.clear());
		self.tags.clear();
		self.groups.clear();
		self.systems.cores_mut().for_each(SystemCore::remove_all_entities);
		debug!(systems = self.systems.len(), "registry cleared");
	}

	fn destroy_entity(&mut self, id: u32) {
		let entity = Entity::new(id, self.id);
		self.remove_entity_from_systems(entity);

		for pool in self.pools.iter_mut().flatten() {
			pool.remove_entity_from_pool(id);
		}

		self.tags.remove(id);
		self.groups.remove(id);
		self.entities.release(id);
		trace!(entity = id, "entity destroyed");
	}

	// Components

	/// Attaches `value` to the entity, replacing any component of the same type.
	///
	/// System membership is left untouched; see [refresh_entity](Registry::refresh_entity).
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
		self.assert_alive(entity);

		let id = ComponentId::of::<T>();
		self.entities.signature_mut(entity.id).set(id.value());
		self.pool_or_insert::<T>().set(entity.id, value)
	}

	/// Detaches and returns the entity's `T`, if it has one.
	///
	/// System membership is left untouched; see [refresh_entity](Registry::refresh_entity).
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
		self.assert_owned(entity);

		if self.entities.is_alive(entity.id) {
			let id = ComponentId::of::<T>();
			self.entities.signature_mut(entity.id).remove(id.value());
		}
		self.pool_mut::<T>()?.remove(entity.id)
	}

	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.assert_owned(entity);
		self.pool::<T>().map_or(false, |pool| pool.contains(entity.id))
	}

	/// Checks whether the entity carries every component of the set.
	pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> bool {
		self.assert_owned(entity);
		let required = S::signature();
		(self.entities.signature(entity.id) & required) == required
	}

	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		self.assert_owned(entity);
		self.pool::<T>()?.get(entity.id)
	}

	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		self.assert_owned(entity);
		self.pool_mut::<T>()?.get_mut(entity.id)
	}

	/// Like [get_component](Registry::get_component), for callers that rely on the component being there.
	pub fn require_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
		self.get_component::<T>(entity).ok_or(EcsError::MissingComponent {
			entity,
			component: T::NAME,
		})
	}

	/// Like [get_component_mut](Registry::get_component_mut), for callers that rely on the component being there.
	pub fn require_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
		self.get_component_mut::<T>(entity).ok_or(EcsError::MissingComponent {
			entity,
			component: T::NAME,
		})
	}

	/// Borrows several components of one entity at once.
	///
	/// ```
	/// # use tick_ecs::prelude::*;
	/// #[derive(Component)]
	/// struct Health(i32);
	/// #[derive(Component)]
	/// struct Armor(i32);
	///
	/// let mut registry = Registry::new();
	/// let knight = registry.create_entity();
	/// registry.add_component(knight, Health(10));
	/// registry.add_component(knight, Armor(3));
	///
	/// let (health, armor) = registry.get_components::<(Health, Armor)>(knight).unwrap();
	/// assert_eq!(health.0 + armor.0, 13);
	/// ```
	pub fn get_components<S: ComponentSet>(&self, entity: Entity) -> Option<S::Refs<'_>> {
		S::fetch(self, entity)
	}

	/// The types of every component attached to the entity, in component id order.
	pub fn get_all_components(&self, entity: Entity) -> Vec<ComponentType> {
		self.assert_owned(entity);
		self.pools
			.iter()
			.flatten()
			.filter(|pool| pool.contains(entity.id))
			.map(|pool| pool.component_type())
			.collect()
	}

	/// The signature of the components currently attached to the entity.
	pub fn signature(&self, entity: Entity) -> Signature {
		self.assert_owned(entity);
		self.entities.signature(entity.id)
	}

	/// Iterates over every `T` together with the entity it belongs to.
	pub fn components<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
		let registry = self.id;
		self.pool::<T>()
			.into_iter()
			.flat_map(|pool| pool.iter())
			.map(move |(id, value)| (Entity::new(id, registry), value))
	}

	/// Number of stored `T` components.
	pub fn component_count<T: Component>(&self) -> usize {
		self.pool::<T>().map_or(0, ComponentPool::len)
	}

	fn pool<T: Component>(&self) -> Option<&ComponentPool<T>> {
		let index = ComponentId::of::<T>().value();
		let pool = self.pools.get(index)?.as_ref()?;
		pool.as_any().downcast_ref::<TypedPool<T>>().map(|typed| &typed.pool)
	}

	fn pool_mut<T: Component>(&mut self) -> Option<&mut ComponentPool<T>> {
		let index = ComponentId::of::<T>().value();
		let pool = self.pools.get_mut(index)?.as_mut()?;
		pool.as_any_mut().downcast_mut::<TypedPool<T>>().map(|typed| &mut typed.pool)
	}

	fn pool_or_insert<T: Component>(&mut self) -> &mut ComponentPool<T> {
		let index = ComponentId::of::<T>().value();
		if self.pools.len() <= index {
			self.pools.resize_with(index + 1, || None);
		}

		let capacity = self.config.entity_capacity;
		let pool = self.pools[index].get_or_insert_with(|| {
			debug!(component = T::NAME, id = index, "component pool created");
			Box::new(TypedPool::<T>::new(capacity))
		});

		match pool.as_any_mut().downcast_mut::<TypedPool<T>>() {
			Some(typed) => &mut typed.pool,
			None => panic!("Component pool {index} does not hold `{}` components", T::NAME),
		}
	}

	// Systems

	/// Registers `system`, replacing a previously registered instance of the same type together with its live set.
	///
	/// The new system starts empty: entities join it when they are flushed by [update](Registry::update)
	/// or re-synced through [add_entity_to_systems](Registry::add_entity_to_systems).
	pub fn add_system<S: System>(&mut self, system: S) {
		let name = system.name();
		let signature = system.signature();
		if self.systems.add_system(system).is_some() {
			debug!(system = name, "system replaced");
		}
		debug!(system = name, signature = ?signature, "system added");
	}

	/// Unregisters and returns the system of type `S`.
	pub fn remove_system<S: System>(&mut self) -> Option<S> {
		let entry = self.systems.remove_system(SystemId::of::<S>())?;
		let system = entry.system?.into_any().downcast::<S>().ok()?;
		Some(*system)
	}

	pub fn has_system<S: System>(&self) -> bool {
		self.systems.get(SystemId::of::<S>()).is_some()
	}

	/// The registered `S`, or `None` when it is absent or currently lent out by [run_system](Registry::run_system).
	pub fn get_system<S: System>(&self) -> Option<&S> {
		let entry = self.systems.get(SystemId::of::<S>())?;
		entry.system.as_ref()?.as_any().downcast_ref::<S>()
	}

	pub fn get_system_mut<S: System>(&mut self) -> Option<&mut S> {
		let entry = self.systems.get_mut(SystemId::of::<S>())?;
		entry.system.as_mut()?.as_any_mut().downcast_mut::<S>()
	}

	/// Like [get_system_mut](Registry::get_system_mut), for callers that rely on the system being there.
	pub fn require_system_mut<S: System>(&mut self) -> Result<&mut S, EcsError> {
		self.get_system_mut::<S>().ok_or(EcsError::MissingSystem(std::any::type_name::<S>()))
	}

	/// The registry-side state of `S`: its signature and live set.
	pub fn system_core<S: System>(&self) -> Option<&SystemCore> {
		self.systems.get(SystemId::of::<S>()).map(|entry| &entry.core)
	}

	/// The entities currently matched against `S`. Empty when `S` is not registered.
	pub fn system_entities<S: System>(&self) -> &[Entity] {
		self.system_core::<S>().map(SystemCore::entities).unwrap_or_default()
	}

	pub fn system_count(&self) -> usize {
		self.systems.len()
	}

	/// Lends the system of type `S` to `f` together with a snapshot of its entities and the registry itself.
	///
	/// This is how a frame drives a system: `f` may freely read and write components, create and kill
	/// entities, or re-sync memberships while walking the snapshot. Returns `None` when `S` is not
	/// registered or is already running.
	pub fn run_system<S: System, R>(&mut self, f: impl FnOnce(&mut S, &[Entity], &mut Registry) -> R) -> Option<R> {
		let id = SystemId::of::<S>();
		let entry = self.systems.get_mut(id)?;
		let lent = entry.system.take()?;
		let name = lent.name();

		let mut snapshot = self.snapshots.take_one();
		snapshot.clear();
		snapshot.extend_from_slice(entry.core.entities());

		let mut system = match lent.into_any().downcast::<S>() {
			Ok(system) => system,
			Err(_) => panic!("System slot {} does not hold a `{name}`", id.value()),
		};

		let result = f(&mut *system, &snapshot[..], self);

		match self.systems.get_mut(id) {
			Some(entry) if entry.system.is_none() => {
				let system: Box<dyn AnySystem> = system;
				entry.system = Some(system);
			},
			_ => warn!(system = name, "system was replaced or removed while running; dropping the lent instance"),
		}

		Some(result)
	}

	/// Adds the entity to every system whose signature it satisfies.
	pub fn add_entity_to_systems(&mut self, entity: Entity) {
		self.assert_owned(entity);
		if !self.entities.is_alive(entity.id) {
			return;
		}

		let signature = self.entities.signature(entity.id);
		for core in self.systems.cores_mut() {
			if signature.matches(&core.signature()) {
				core.add_entity(entity);
			}
		}
	}

	/// Removes the entity from every system.
	pub fn remove_entity_from_systems(&mut self, entity: Entity) {
		self.assert_owned(entity);
		for core in self.systems.cores_mut() {
			core.remove_entity(entity);
		}
	}

	/// Re-evaluates the entity's system memberships against its current signature.
	pub fn refresh_entity(&mut self, entity: Entity) {
		self.remove_entity_from_systems(entity);
		self.add_entity_to_systems(entity);
	}

	/// Puts the entity in `S`'s live set, whatever its signature.
	pub fn add_entity_to_system<S: System>(&mut self, entity: Entity) {
		self.assert_alive(entity);
		if let Some(entry) = self.systems.get_mut(SystemId::of::<S>()) {
			entry.core.add_entity(entity);
		}
	}

	/// Takes the entity out of `S`'s live set.
	pub fn remove_entity_from_system<S: System>(&mut self, entity: Entity) {
		self.assert_owned(entity);
		if let Some(entry) = self.systems.get_mut(SystemId::of::<S>()) {
			entry.core.remove_entity(entity);
		}
	}

	// Tags

	/// Binds a unique tag to the entity, replacing the entity's previous tag.
	///
	/// Fails with [EcsError::TagInUse] when another entity already holds the tag.
	pub fn tag_entity(&mut self, entity: Entity, tag: impl Into<String>) -> Result<(), EcsError> {
		self.assert_alive(entity);

		let tag = tag.into();
		match self.tags.owner(&tag) {
			Some(owner) if owner == entity.id => Ok(()),
			Some(owner) => Err(EcsError::TagInUse {
				tag,
				owner: Entity::new(owner, self.id),
			}),
			None => {
				self.tags.insert(entity.id, tag);
				Ok(())
			},
		}
	}

	pub fn entity_has_tag(&self, entity: Entity, tag: &str) -> bool {
		self.assert_owned(entity);
		self.tags.owner(tag) == Some(entity.id)
	}

	pub fn get_entity_by_tag(&self, tag: &str) -> Option<Entity> {
		self.tags.owner(tag).map(|id| Entity::new(id, self.id))
	}

	/// The entity's tag, if it has one.
	pub fn entity_tag(&self, entity: Entity) -> Option<&str> {
		self.assert_owned(entity);
		self.tags.tag_of(entity.id)
	}

	pub fn tag_count(&self) -> usize {
		self.tags.len()
	}

	/// Releases the entity's tag. Warns if it has none.
	pub fn remove_entity_tag(&mut self, entity: Entity) {
		self.assert_owned(entity);
		if self.tags.remove(entity.id).is_none() {
			warn!(entity = entity.id, "entity has no tag to remove");
		}
	}

	// Groups

	/// Adds the entity to `group`. An entity belongs to one group at most, so it leaves its previous group.
	pub fn group_entity(&mut self, entity: Entity, group: impl Into<String>) {
		self.assert_alive(entity);

		let group = group.into();
		if let Some(previous) = self.groups.insert(entity.id, group) {
			debug!(entity = entity.id, previous = %previous, "entity moved to a new group");
		}
	}

	/// The members of `group`, in no particular order. Empty when the group doesn't exist.
	pub fn get_entities_by_group(&self, group: &str) -> Vec<Entity> {
		self.groups.members(group).map(|id| Entity::new(id, self.id)).collect()
	}

	pub fn entity_belongs_to_group(&self, entity: Entity, group: &str) -> bool {
		self.assert_owned(entity);
		self.groups.contains(entity.id, group)
	}

	/// The entity's group, if it has one.
	pub fn entity_group(&self, entity: Entity) -> Option<&str> {
		self.assert_owned(entity);
		self.groups.group_of(entity.id)
	}

	pub fn group_count(&self) -> usize {
		self.groups.group_count()
	}

	/// Takes the entity out of its group; the group disappears once empty. Warns if it has none.
	pub fn remove_entity_group(&mut self, entity: Entity) {
		self.assert_owned(entity);
		if self.groups.remove(entity.id).is_none() {
			warn!(entity = entity.id, "entity has no group to remove");
		}
	}

	#[inline(always)]
	fn assert_owned(&self, entity: Entity) {
		assert_eq!(entity.registry, self.id, "Entity {entity} belongs to a different registry");
	}

	#[inline(always)]
	fn assert_alive(&self, entity: Entity) {
		self.assert_owned(entity);
		assert!(self.entities.is_alive(entity.id), "Entity has already been destroyed");
	}
}

impl Default for Registry {
	fn default() -> Self {
		Self::new()
	}
}
