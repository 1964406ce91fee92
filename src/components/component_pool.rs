use crate::components::{Component, ComponentType};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::Any;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// Dense storage for every instance of one [component](Component) type, addressed by entity id.
///
/// Values live contiguously in insertion order; removal swaps the last value into the hole,
/// so dense positions are an implementation detail and never leave the pool.
pub struct ComponentPool<T> {
	values: Vec<T>,
	entities: Vec<u32>,
	indices: HashMap<u32, usize, Hasher>,
}

impl<T> Default for ComponentPool<T> {
	fn default() -> Self {
		Self {
			values: Vec::new(),
			entities: Vec::new(),
			indices: HashMap::default(),
		}
	}
}

impl<T> ComponentPool<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: Vec::with_capacity(capacity),
			entities: Vec::with_capacity(capacity),
			indices: HashMap::with_capacity_and_hasher(capacity, Hasher::default()),
		}
	}

	/// Insert the value for `entity`, overwriting any previous one in place.
	pub fn set(&mut self, entity: u32, value: T) -> &mut T {
		let index = match self.indices.get(&entity) {
			Some(&index) => {
				self.values[index] = value;
				index
			},
			None => {
				let index = self.values.len();
				self.values.push(value);
				self.entities.push(entity);
				self.indices.insert(entity, index);
				index
			},
		};

		&mut self.values[index]
	}

	pub fn get(&self, entity: u32) -> Option<&T> {
		self.indices.get(&entity).map(|i| &self.values[*i])
	}

	pub fn get_mut(&mut self, entity: u32) -> Option<&mut T> {
		self.indices.get(&entity).map(|i| &mut self.values[*i])
	}

	pub fn contains(&self, entity: u32) -> bool {
		self.indices.contains_key(&entity)
	}

	/// Remove and return the value for `entity`. Absent values are a no-op.
	pub fn remove(&mut self, entity: u32) -> Option<T> {
		let index = self.indices.remove(&entity)?;
		let value = self.values.swap_remove(index);
		self.entities.swap_remove(index);

		if let Some(moved) = self.entities.get(index) {
			self.indices.insert(*moved, index);
		}

		Some(value)
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn clear(&mut self) {
		self.values.clear();
		self.entities.clear();
		self.indices.clear();
	}

	/// Iterate over `(entity id, value)` pairs in storage order.
	pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
		self.entities.iter().copied().zip(self.values.iter())
	}

	/// Iterate mutably over `(entity id, value)` pairs in storage order.
	pub fn iter_mut(&mut self) -> impl Iterator<Item = (u32, &mut T)> {
		self.entities.iter().copied().zip(self.values.iter_mut())
	}
}

/// The type-erased face of a [ComponentPool] the registry keeps in its pool list.
pub(crate) trait AnyPool {
	fn component_type(&self) -> ComponentType;
	fn contains(&self, entity: u32) -> bool;
	fn remove_entity_from_pool(&mut self, entity: u32);
	fn clear(&mut self);
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A [ComponentPool] tagged with the runtime type of its component.
pub(crate) struct TypedPool<T: Component> {
	pub(crate) ty: ComponentType,
	pub(crate) pool: ComponentPool<T>,
}

impl<T: Component> TypedPool<T> {
	pub(crate) fn new(capacity: usize) -> Self {
		Self {
			ty: ComponentType::of::<T>(),
			pool: ComponentPool::with_capacity(capacity),
		}
	}
}

impl<T: Component> AnyPool for TypedPool<T> {
	fn component_type(&self) -> ComponentType {
		self.ty
	}

	fn contains(&self, entity: u32) -> bool {
		self.pool.contains(entity)
	}

	fn remove_entity_from_pool(&mut self, entity: u32) {
		self.pool.remove(entity);
	}

	fn clear(&mut self) {
		self.pool.clear();
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
