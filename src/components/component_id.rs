//! A unique runtime identifier tied to a [Component] type.
//!
//! Developers shouldn't rely on [component ids](ComponentId), as they are not stable between program re-runs.
//! They are handed out in order of first use, starting at 0, and double as the index of the
//! component's pool inside a [Registry](crate::registry::Registry) and as its bit in a
//! [Signature](crate::components::Signature).

use crate::components::{Component, MAX_COMPONENTS};
use std::collections::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::TypeId;
use std::fmt;

lazy_static! {
	static ref COMPONENT_IDS: RwLock<TypeIdTable> = RwLock::new(TypeIdTable::default());
}

/// A process-wide, monotonic `TypeId -> index` table.
#[derive(Default)]
pub(crate) struct TypeIdTable {
	next: usize,
	ids: HashMap<TypeId, usize>,
}

impl TypeIdTable {
	pub(crate) fn lookup(table: &RwLock<TypeIdTable>, key: TypeId) -> usize {
		if let Some(id) = table.read().ids.get(&key) {
			return *id;
		}

		let mut table = table.write();
		let next = table.next;
		let id = *table.ids.entry(key).or_insert(next);
		if id == next {
			table.next += 1;
		}
		id
	}

	pub(crate) fn reset(table: &RwLock<TypeIdTable>) {
		let mut table = table.write();
		table.ids.clear();
		table.next = 0;
	}
}

/// A globally unique identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentId {
	value: usize,
}

impl ComponentId {
	/// Get the [ComponentId] of the type `T`, assigning the next free id on first use.
	#[inline]
	pub fn of<T: Component>() -> ComponentId {
		let value = TypeIdTable::lookup(&COMPONENT_IDS, TypeId::of::<T>());
		assert!(
			value < MAX_COMPONENTS,
			"Component `{}` would need id {value}, but signatures only hold {MAX_COMPONENTS} component types",
			T::NAME,
		);
		ComponentId { value }
	}

	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value
	}

	pub(crate) const fn from_value(value: usize) -> Self {
		Self { value }
	}
}

impl fmt::Display for ComponentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "component#{}", self.value)
	}
}

/// Forgets every assigned [ComponentId] so the next lookups start again from 0.
///
/// Only meant for isolating tests: registries created before the reset keep pools
/// indexed by the old ids, so two types may end up sharing a slot.
#[doc(hidden)]
pub fn reset_component_ids() {
	TypeIdTable::reset(&COMPONENT_IDS);
}
