use serde::{de::DeserializeOwned, Deserialize, Serialize};
use crate::components::Component;
use std::collections::BTreeMap;
use crate::registry::Registry;
use crate::entities::Entity;
use crate::error::EcsError;
use serde_json::Value;
use tracing::debug;

type InsertFn = fn(&mut Registry, Entity, &Value) -> Result<(), EcsError>;
type SnapshotFn = fn(&Registry, Entity) -> Option<Result<Value, EcsError>>;

#[derive(Clone, Copy)]
struct Codec {
	insert: InsertFn,
	snapshot: SnapshotFn,
}

/// Everything needed to rebuild an entity: its tag, its group and one property bag per
/// registered component it carries, keyed by [Component::NAME].
///
/// ```json
/// { "tag": "player", "components": { "Health": { "value": 100 } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tag: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
	#[serde(default)]
	pub components: BTreeMap<String, Value>,
}

/// Builds [components](Component) from their name and a JSON property bag.
///
/// The table is filled explicitly at startup with [register](ComponentFactory::register);
/// only registered types can be inserted by name, snapshotted or restored.
///
/// ```
/// # use tick_ecs::prelude::*;
/// # use serde::{Deserialize, Serialize};
/// #[derive(Component, Serialize, Deserialize)]
/// struct Health {
/// 	value: i32,
/// }
///
/// let mut factory = ComponentFactory::new();
/// factory.register::<Health>();
///
/// let mut registry = Registry::new();
/// let entity = registry.create_entity();
/// factory.insert(&mut registry, entity, "Health", &serde_json::json!({ "value": 42 })).unwrap();
/// assert_eq!(registry.get_component::<Health>(entity).unwrap().value, 42);
/// ```
#[derive(Default)]
pub struct ComponentFactory {
	codecs: BTreeMap<&'static str, Codec>,
}

impl ComponentFactory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `T` constructible under the name [T::NAME](Component::NAME).
	/// Registering a second type with the same name replaces the first.
	pub fn register<T: Component + Serialize + DeserializeOwned>(&mut self) -> &mut Self {
		let codec = Codec {
			insert: insert_component::<T>,
			snapshot: snapshot_component::<T>,
		};

		if self.codecs.insert(T::NAME, codec).is_some() {
			debug!(component = T::NAME, "component factory replaced");
		}
		self
	}

	pub fn is_registered(&self, name: &str) -> bool {
		self.codecs.contains_key(name)
	}

	/// The registered component names, in alphabetical order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.codecs.keys().copied()
	}

	/// Decodes `properties` as the component called `name` and attaches it to the entity.
	pub fn insert(
		&self, registry: &mut Registry, entity: Entity, name: &str, properties: &Value,
	) -> Result<(), EcsError> {
		let codec = self.codec(name)?;
		(codec.insert)(registry, entity, properties)
	}

	/// Captures the entity's tag, group and every registered component it carries.
	pub fn snapshot(&self, registry: &Registry, entity: Entity) -> Result<EntitySnapshot, EcsError> {
		let mut components = BTreeMap::new();
		for (name, codec) in &self.codecs {
			if let Some(properties) = (codec.snapshot)(registry, entity) {
				components.insert(name.to_string(), properties?);
			}
		}

		Ok(EntitySnapshot {
			tag: registry.entity_tag(entity).map(str::to_owned),
			group: registry.entity_group(entity).map(str::to_owned),
			components,
		})
	}

	/// Creates a new entity from a snapshot.
	///
	/// Like any new entity it joins systems at the next [update](Registry::update). If a component
	/// can't be decoded or the tag is taken, the half-built entity is killed and the error returned.
	pub fn restore(&self, registry: &mut Registry, snapshot: &EntitySnapshot) -> Result<Entity, EcsError> {
		let entity = registry.create_entity();
		match self.fill(registry, entity, snapshot) {
			Ok(()) => Ok(entity),
			Err(error) => {
				registry.kill_entity(entity);
				Err(error)
			},
		}
	}

	fn fill(&self, registry: &mut Registry, entity: Entity, snapshot: &EntitySnapshot) -> Result<(), EcsError> {
		for (name, properties) in &snapshot.components {
			self.insert(registry, entity, name, properties)?;
		}
		if let Some(tag) = &snapshot.tag {
			registry.tag_entity(entity, tag.as_str())?;
		}
		if let Some(group) = &snapshot.group {
			registry.group_entity(entity, group.as_str());
		}
		Ok(())
	}

	fn codec(&self, name: &str) -> Result<Codec, EcsError> {
		self.codecs
			.get(name)
			.copied()
			.ok_or_else(|| EcsError::UnknownComponent(name.to_owned()))
	}
}

fn insert_component<T: Component + DeserializeOwned>(
	registry: &mut Registry, entity: Entity, properties: &Value,
) -> Result<(), EcsError> {
	let value = T::deserialize(properties).map_err(|source| EcsError::Serialization {
		component: T::NAME.to_owned(),
		source,
	})?;
	registry.add_component(entity, value);
	Ok(())
}

fn snapshot_component<T: Component + Serialize>(registry: &Registry, entity: Entity) -> Option<Result<Value, EcsError>> {
	let component = registry.get_component::<T>(entity)?;
	Some(serde_json::to_value(component).map_err(|source| EcsError::Serialization {
		component: T::NAME.to_owned(),
		source,
	}))
}
