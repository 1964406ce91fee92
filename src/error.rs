//! The error type shared by every fallible registry operation.
//!
//! Absence is not an error in this crate: lookups return `Option`, removals of things that
//! aren't there are no-ops. An [EcsError] means a caller broke a contract it relied on
//! (a duplicate tag, a component a system assumed present) or handed in bad data.

use crate::entities::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EcsError {
	/// The tag is already bound to another live entity.
	#[error("tag `{tag}` is already bound to entity {owner}")]
	TagInUse {
		/// The requested tag.
		tag: String,
		/// The entity currently holding it.
		owner: Entity,
	},

	/// A component the caller relies on is not attached to the entity.
	#[error("entity {entity} has no `{component}` component")]
	MissingComponent {
		entity: Entity,
		component: &'static str,
	},

	/// A system the caller relies on is not registered, or is currently lent out.
	#[error("system `{0}` is not available")]
	MissingSystem(&'static str),

	/// No factory was registered under this component name.
	#[error("no component factory registered for `{0}`")]
	UnknownComponent(String),

	/// A component's property bag could not be converted.
	#[error("invalid properties for component `{component}`: {source}")]
	Serialization {
		component: String,
		#[source]
		source: serde_json::Error,
	},

	/// The registry configuration could not be parsed.
	#[error("invalid registry configuration: {0}")]
	Config(#[from] toml::de::Error),
}
