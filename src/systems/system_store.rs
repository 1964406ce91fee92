use crate::systems::{AnySystem, System, SystemId};
use crate::components::Signature;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use crate::entities::Entity;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;
type EntityHasher = BuildHasherDefault<NoHashHasher<u32>>;

/// The part of a system the registry owns: its required [Signature] and the live set of
/// entities currently matched against it.
///
/// The live set has set semantics. Removal swaps the last entity into the hole,
/// so iteration order is not meaningful.
pub struct SystemCore {
	name: &'static str,
	signature: Signature,
	entities: Vec<Entity>,
	indices: HashMap<u32, usize, EntityHasher>,
}

impl SystemCore {
	pub(crate) fn new(name: &'static str, signature: Signature) -> Self {
		Self {
			name,
			signature,
			entities: Vec::new(),
			indices: HashMap::default(),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn signature(&self) -> Signature {
		self.signature
	}

	/// The entities currently matched against the system.
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn contains(&self, entity: Entity) -> bool {
		self.indices.contains_key(&entity.id)
	}

	pub fn len(&self) -> usize {
		self.entities.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	pub(crate) fn add_entity(&mut self, entity: Entity) {
		if !self.indices.contains_key(&entity.id) {
			self.indices.insert(entity.id, self.entities.len());
			self.entities.push(entity);
		}
	}

	pub(crate) fn remove_entity(&mut self, entity: Entity) {
		if let Some(index) = self.indices.remove(&entity.id) {
			self.entities.swap_remove(index);
			if let Some(moved) = self.entities.get(index) {
				self.indices.insert(moved.id, index);
			}
		}
	}

	/// Forget every entity without touching the registry.
	pub(crate) fn remove_all_entities(&mut self) {
		self.entities.clear();
		self.indices.clear();
	}
}

pub(crate) struct SystemEntry {
	pub core: SystemCore,
	/// `None` while the system is lent out by [Registry::run_system](crate::registry::Registry::run_system).
	pub system: Option<Box<dyn AnySystem>>,
}

/// Registered systems keyed by [SystemId], at most one instance per type.
#[derive(Default)]
pub(crate) struct SystemStore {
	entries: HashMap<usize, SystemEntry, Hasher>,
}

impl SystemStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Store `system`, returning the instance it replaced.
	pub fn add_system<S: System>(&mut self, system: S) -> Option<Box<dyn AnySystem>> {
		let core = SystemCore::new(system.name(), system.signature());
		let entry = SystemEntry {
			core,
			system: Some(Box::new(system)),
		};

		self.entries.insert(SystemId::of::<S>().value(), entry).and_then(|old| old.system)
	}

	pub fn remove_system(&mut self, id: SystemId) -> Option<SystemEntry> {
		self.entries.remove(&id.value())
	}

	pub fn get(&self, id: SystemId) -> Option<&SystemEntry> {
		self.entries.get(&id.value())
	}

	pub fn get_mut(&mut self, id: SystemId) -> Option<&mut SystemEntry> {
		self.entries.get_mut(&id.value())
	}

	pub fn cores(&self) -> impl Iterator<Item = &SystemCore> {
		self.entries.values().map(|e| &e.core)
	}

	pub fn cores_mut(&mut self) -> impl Iterator<Item = &mut SystemCore> {
		self.entries.values_mut().map(|e| &mut e.core)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}
}
