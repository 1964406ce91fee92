use crate::components::ComponentId;
use std::hash::{Hash, Hasher};
use std::fmt;

/// Data that can be attached to an [Entity](crate::entities::Entity).
///
/// Usually implemented through `#[derive(Component)]`, which uses the type's name as [Component::NAME].
pub trait Component: 'static {
	/// A stable, human readable name.
	/// The [ComponentFactory](crate::components::ComponentFactory) uses it as the key of a component's property bag.
	const NAME: &'static str;
}

/// A runtime representation of a type implementing the [`Component`] trait.
#[derive(Clone, Copy, Debug)]
pub struct ComponentType {
	id: ComponentId,
	name: &'static str,
}

impl ComponentType {
	/// Returns the [`ComponentType`] of T.
	pub fn of<T: Component>() -> Self {
		Self {
			id: ComponentId::of::<T>(),
			name: T::NAME,
		}
	}

	pub const fn id(&self) -> ComponentId {
		self.id
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl Eq for ComponentType {}

impl PartialEq<Self> for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Hash for ComponentType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state)
	}
}

impl fmt::Display for ComponentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}
