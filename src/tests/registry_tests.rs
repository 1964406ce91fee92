use crate::tests::{Frozen, Health, MovementSystem, Name, Position, RenderSystem, Velocity};
use crate::config::RegistryConfig;
use crate::data_structures::IdReuse;
use crate::components::ComponentType;
use crate::registry::Registry;
use crate::error::EcsError;
use std::collections::HashSet;
use rand::prelude::*;

#[test]
pub fn created_entities_get_unique_sequential_ids() {
	let mut registry = Registry::new();
	let ids = (0..100).map(|_| registry.create_entity().id()).collect::<Vec<_>>();

	assert_eq!(ids, (0..100).collect::<Vec<u32>>());
	assert_eq!(registry.live_count(), 100);
	assert_eq!(registry.pending_add_count(), 100);
}

#[test]
pub fn creation_is_deferred_until_update() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 0 });

	let entity = registry.create_entity();
	registry.add_component(entity, Position::default());
	assert!(registry.is_alive(entity));
	assert!(registry.system_entities::<RenderSystem>().is_empty(), "Systems only see entities after update");

	registry.update();
	assert_eq!(registry.system_entities::<RenderSystem>(), [entity]);
	assert_eq!(registry.pending_add_count(), 0);
}

#[test]
pub fn kill_is_deferred_until_update() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 0 });

	let entity = registry.create_entity();
	registry.add_component(entity, Position { x: 1.0, y: 2.0 });
	registry.tag_entity(entity, "player").unwrap();
	registry.group_entity(entity, "heroes");
	registry.update();

	registry.kill_entity(entity);
	assert!(registry.is_pending_kill(entity));
	assert!(registry.is_alive(entity));
	assert!(registry.has_component::<Position>(entity), "Components survive until the flush");
	assert_eq!(registry.system_entities::<RenderSystem>().len(), 1);

	registry.update();
	assert!(!registry.is_alive(entity));
	assert!(!registry.has_component::<Position>(entity));
	assert!(registry.system_entities::<RenderSystem>().is_empty());
	assert_eq!(registry.get_entity_by_tag("player"), None);
	assert!(registry.get_entities_by_group("heroes").is_empty());
	assert_eq!(registry.group_count(), 0);
	assert_eq!(registry.component_count::<Position>(), 0);
}

#[test]
pub fn killed_ids_are_reused() {
	let mut registry = Registry::new();
	let entities = (0..4).map(|_| registry.create_entity()).collect::<Vec<_>>();
	registry.update();

	registry.kill_entity(entities[1]);
	registry.kill_entity(entities[1]);
	assert_eq!(registry.pending_kill_count(), 1, "Killing twice queues once");
	registry.update();

	let reused = registry.create_entity();
	assert_eq!(reused.id(), 1);
	assert!(!registry.has_component::<Health>(reused), "A reused id starts without components");
	assert!(registry.signature(reused).is_empty());
}

#[test]
pub fn lifo_policy_reuses_latest_kill() {
	let config = RegistryConfig {
		id_reuse: IdReuse::Lifo,
		..RegistryConfig::default()
	};
	let mut registry = Registry::with_config(config);
	let entities = (0..4).map(|_| registry.create_entity()).collect::<Vec<_>>();
	registry.update();

	registry.kill_entity(entities[0]);
	registry.kill_entity(entities[2]);
	registry.update();

	assert_eq!(registry.create_entity().id(), 2);
	assert_eq!(registry.create_entity().id(), 0);
}

#[test]
pub fn killing_a_dead_entity_is_ignored() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();
	registry.update();
	registry.kill_entity(entity);
	registry.update();

	registry.kill_entity(entity);
	assert_eq!(registry.pending_kill_count(), 0);
	registry.update();
	assert_eq!(registry.live_count(), 0);
}

#[test]
pub fn create_and_kill_in_the_same_frame() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 0 });

	let entity = registry.create_entity();
	registry.add_component(entity, Position::default());
	registry.kill_entity(entity);
	registry.update();

	assert!(!registry.is_alive(entity));
	assert!(registry.system_entities::<RenderSystem>().is_empty());
	assert_eq!(registry.live_count(), 0);
}

#[test]
pub fn random_create_kill_keeps_live_ids_unique() {
	let mut rng = thread_rng();
	let mut registry = Registry::new();
	let mut live = Vec::new();

	for _ in 0..50 {
		for _ in 0..rng.gen_range(0..40) {
			live.push(registry.create_entity());
		}

		live.shuffle(&mut rng);
		let kills = rng.gen_range(0..=live.len());
		for entity in live.drain(..kills) {
			registry.kill_entity(entity);
		}
		registry.update();

		let ids = live.iter().map(|e| e.id()).collect::<HashSet<_>>();
		assert_eq!(ids.len(), live.len(), "Two live entities share an id");
		assert_eq!(registry.live_count(), live.len());
		assert!(live.iter().all(|e| registry.is_alive(*e)));
	}
}

#[test]
pub fn components_are_added_replaced_and_removed() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();

	registry.add_component(entity, Health(10)).0 += 5;
	assert_eq!(registry.get_component::<Health>(entity), Some(&Health(15)));

	registry.add_component(entity, Health(1));
	assert_eq!(registry.component_count::<Health>(), 1, "Adding again replaces the value");

	registry.get_component_mut::<Health>(entity).unwrap().0 = 3;
	assert_eq!(registry.require_component::<Health>(entity).unwrap().0, 3);

	assert_eq!(registry.remove_component::<Health>(entity), Some(Health(3)));
	assert_eq!(registry.remove_component::<Health>(entity), None);
	assert!(!registry.has_component::<Health>(entity));
	assert!(matches!(
		registry.require_component::<Health>(entity),
		Err(EcsError::MissingComponent { component: "Health", .. })
	));
}

#[test]
pub fn multiple_components_at_once() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();
	registry.add_component(entity, Position { x: 1.0, y: 1.0 });
	registry.add_component(entity, Velocity { x: 2.0, y: 0.0 });

	assert!(registry.has_components::<(Position, Velocity)>(entity));
	assert!(!registry.has_components::<(Position, Health)>(entity));

	let (position, velocity) = registry.get_components::<(Position, Velocity)>(entity).unwrap();
	assert_eq!(position.x + velocity.x, 3.0);
	assert!(registry.get_components::<(Position, Health)>(entity).is_none());
}

#[test]
pub fn all_components_of_an_entity() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();
	registry.add_component(entity, Name("crate".into()));
	registry.add_component(entity, Frozen);

	let types = entity.components(&registry);
	assert_eq!(types.len(), 2);
	assert!(types.contains(&ComponentType::of::<Name>()));
	assert!(types.contains(&ComponentType::of::<Frozen>()));
	assert!(types.iter().any(|ty| ty.name() == "Frozen"));
}

#[test]
pub fn iterate_every_component_of_a_type() {
	let mut registry = Registry::new();
	let entities = (0..5).map(|_| registry.create_entity()).collect::<Vec<_>>();
	for (i, entity) in entities.iter().enumerate() {
		if i % 2 == 0 {
			registry.add_component(*entity, Health(i as i32));
		}
	}

	let mut found = registry.components::<Health>().map(|(e, h)| (e, h.0)).collect::<Vec<_>>();
	found.sort();
	assert_eq!(found, vec![(entities[0], 0), (entities[2], 2), (entities[4], 4)]);
}

#[test]
pub fn entity_handles_compare_by_value() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();
	let copy = registry.entities().next().unwrap();

	assert_eq!(entity, copy);
	assert_eq!(entity.to_string(), "#0");
}

#[test]
#[should_panic(expected = "Entity has already been destroyed")]
pub fn mutating_a_destroyed_entity_panics() {
	let mut registry = Registry::new();
	let entity = registry.create_entity();
	registry.kill_entity(entity);
	registry.update();
	registry.add_component(entity, Health(1));
}

#[test]
#[should_panic(expected = "belongs to a different registry")]
pub fn foreign_entities_are_rejected() {
	let mut first = Registry::new();
	let mut second = Registry::new();
	let entity = first.create_entity();
	second.create_entity();
	second.add_component(entity, Health(1));
}

#[test]
pub fn clear_resets_everything_but_systems() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);

	for _ in 0..10 {
		let entity = registry.create_entity();
		registry.add_component(entity, Position::default());
		registry.add_component(entity, Velocity::default());
	}
	let tagged = registry.create_entity();
	registry.tag_entity(tagged, "boss").unwrap();
	registry.update();

	registry.clear();
	assert_eq!(registry.live_count(), 0);
	assert_eq!(registry.component_count::<Position>(), 0);
	assert_eq!(registry.tag_count(), 0);
	assert!(registry.has_system::<MovementSystem>());
	assert!(registry.system_entities::<MovementSystem>().is_empty());
	assert_eq!(registry.create_entity().id(), 0);
}

#[test]
pub fn ten_thousand_entities() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);

	let entities = (0..10_000).map(|_| registry.create_entity()).collect::<Vec<_>>();
	for entity in &entities {
		registry.add_component(*entity, Position::default());
		registry.add_component(*entity, Velocity { x: 1.0, y: 0.0 });
	}
	registry.update();
	assert_eq!(registry.system_entities::<MovementSystem>().len(), 10_000);

	for entity in entities.iter().step_by(2) {
		registry.kill_entity(*entity);
	}
	registry.update();

	assert_eq!(registry.live_count(), 5_000);
	assert_eq!(registry.system_entities::<MovementSystem>().len(), 5_000);
	assert_eq!(registry.component_count::<Velocity>(), 5_000);
	assert!(registry.system_entities::<MovementSystem>().iter().all(|e| e.id() % 2 == 1));

	for entity in entities.iter().skip(1).step_by(2) {
		registry.kill_entity(*entity);
	}
	registry.update();

	assert!(registry.system_entities::<MovementSystem>().is_empty());
	assert_eq!(registry.component_count::<Position>(), 0);
	assert_eq!(registry.component_count::<Velocity>(), 0);
}
