use crate::components::{Component, Signature};
use serde::{Deserialize, Serialize};
use crate::systems::System;

mod registry_tests;
mod system_tests;

// Component ids are process-wide and capped, so every test shares these types.

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Velocity {
	pub x: f32,
	pub y: f32,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct Health(pub i32);

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Name(pub String);

#[derive(Component, Debug, Default)]
pub(crate) struct Frozen;

pub(crate) struct MovementSystem;

impl System for MovementSystem {
	fn signature(&self) -> Signature {
		Signature::new().require::<Position>().require::<Velocity>()
	}
}

pub(crate) struct RenderSystem {
	pub drawn: usize,
}

impl System for RenderSystem {
	fn signature(&self) -> Signature {
		Signature::new().require::<Position>()
	}
}

pub(crate) struct HealthSystem;

impl System for HealthSystem {
	fn signature(&self) -> Signature {
		Signature::new().require::<Health>()
	}
}

/// Requires nothing, so it never receives an entity.
pub(crate) struct IdleSystem;

impl System for IdleSystem {
	fn signature(&self) -> Signature {
		Signature::new()
	}
}
