use crate::components::component_id::TypeIdTable;
use crate::components::Signature;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::any::{Any, TypeId};

lazy_static! {
	static ref SYSTEM_IDS: RwLock<TypeIdTable> = RwLock::new(TypeIdTable::default());
}

/// It provides the logic for modifying the state of [Entities](crate::entities::Entity)
/// and their associated [Components](crate::components::Component).
///
/// A system only declares which components it needs; the [Registry](crate::registry::Registry)
/// keeps its set of matching entities up to date. Concrete systems add their own `update`
/// taking whatever the game loop hands them.
///
/// ```
/// # use tick_ecs::prelude::*;
/// #[derive(Component)]
/// struct Position(f32, f32);
/// #[derive(Component)]
/// struct Velocity(f32, f32);
///
/// struct MovementSystem;
///
/// impl System for MovementSystem {
/// 	fn signature(&self) -> Signature {
/// 		Signature::new().require::<Position>().require::<Velocity>()
/// 	}
/// }
/// ```
pub trait System: 'static {
	/// The components an entity must carry to join this system.
	/// Read once, when the system is added to a registry.
	fn signature(&self) -> Signature;

	/// A name for diagnostics.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// A process-wide identifier for a type implementing [System], allocated in order of first use.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct SystemId {
	value: usize,
}

impl SystemId {
	/// Get the [SystemId] of the type `S`.
	#[inline]
	pub fn of<S: System>() -> SystemId {
		SystemId {
			value: TypeIdTable::lookup(&SYSTEM_IDS, TypeId::of::<S>()),
		}
	}

	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value
	}
}

/// Forgets every assigned [SystemId]. Only meant for isolating tests.
#[doc(hidden)]
pub fn reset_system_ids() {
	TypeIdTable::reset(&SYSTEM_IDS);
}

/// Object-safe downcasting for boxed systems.
pub(crate) trait AnySystem: System {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: System> AnySystem for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}
}
