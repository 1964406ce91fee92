use crate::tests::{Frozen, Health, HealthSystem, IdleSystem, MovementSystem, Position, RenderSystem, Velocity};
use crate::systems::{System, SystemId};
use crate::components::Signature;
use crate::registry::Registry;
use crate::error::EcsError;

fn moving_entity(registry: &mut Registry) -> crate::entities::Entity {
	let entity = registry.create_entity();
	registry.add_component(entity, Position::default());
	registry.add_component(entity, Velocity { x: 1.0, y: 0.5 });
	entity
}

#[test]
pub fn entities_join_every_matching_system() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);
	registry.add_system(RenderSystem { drawn: 0 });
	registry.add_system(HealthSystem);

	let mover = moving_entity(&mut registry);
	let statue = registry.create_entity();
	registry.add_component(statue, Position::default());
	registry.update();

	assert_eq!(registry.system_entities::<MovementSystem>(), [mover]);

	let mut rendered = registry.system_entities::<RenderSystem>().to_vec();
	rendered.sort();
	assert_eq!(rendered, vec![mover, statue]);
	assert!(registry.system_entities::<HealthSystem>().is_empty());
}

#[test]
pub fn empty_signature_receives_nothing() {
	let mut registry = Registry::new();
	registry.add_system(IdleSystem);

	moving_entity(&mut registry);
	registry.create_entity();
	registry.update();

	assert!(registry.system_entities::<IdleSystem>().is_empty());
}

#[test]
pub fn component_removal_does_not_change_membership_until_refresh() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);
	registry.add_system(RenderSystem { drawn: 0 });

	let entity = moving_entity(&mut registry);
	registry.update();

	registry.remove_component::<Velocity>(entity);
	assert_eq!(registry.system_entities::<MovementSystem>(), [entity]);
	assert_eq!(registry.system_entities::<RenderSystem>(), [entity]);

	registry.refresh_entity(entity);
	assert!(registry.system_entities::<MovementSystem>().is_empty());
	assert_eq!(registry.system_entities::<RenderSystem>(), [entity]);

	registry.add_component(entity, Velocity::default());
	registry.refresh_entity(entity);
	assert_eq!(registry.system_entities::<MovementSystem>(), [entity]);
}

#[test]
pub fn manual_membership() {
	let mut registry = Registry::new();
	registry.add_system(HealthSystem);

	let entity = registry.create_entity();
	registry.add_component(entity, Frozen);
	registry.update();
	assert!(registry.system_entities::<HealthSystem>().is_empty());

	entity.add_to_system::<HealthSystem>(&mut registry);
	entity.add_to_system::<HealthSystem>(&mut registry);
	assert_eq!(registry.system_entities::<HealthSystem>(), [entity], "Live sets have set semantics");

	entity.remove_from_system::<HealthSystem>(&mut registry);
	assert!(registry.system_entities::<HealthSystem>().is_empty());
}

#[test]
pub fn systems_are_unique_per_type() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 1 });
	registry.add_system(RenderSystem { drawn: 2 });

	assert_eq!(registry.system_count(), 1);
	assert_eq!(registry.get_system::<RenderSystem>().map(|s| s.drawn), Some(2));
	assert_eq!(SystemId::of::<RenderSystem>(), SystemId::of::<RenderSystem>());
	assert_ne!(SystemId::of::<RenderSystem>(), SystemId::of::<MovementSystem>());
}

#[test]
pub fn a_new_system_starts_empty() {
	let mut registry = Registry::new();
	moving_entity(&mut registry);
	registry.update();

	registry.add_system(MovementSystem);
	assert!(registry.system_entities::<MovementSystem>().is_empty());

	let late = moving_entity(&mut registry);
	registry.update();
	assert_eq!(registry.system_entities::<MovementSystem>(), [late]);
}

#[test]
pub fn remove_and_lookup_systems() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 7 });
	assert!(registry.has_system::<RenderSystem>());

	registry.get_system_mut::<RenderSystem>().unwrap().drawn += 1;
	assert_eq!(registry.require_system_mut::<RenderSystem>().unwrap().drawn, 8);

	let removed = registry.remove_system::<RenderSystem>().unwrap();
	assert_eq!(removed.drawn, 8);
	assert!(!registry.has_system::<RenderSystem>());
	assert!(registry.remove_system::<RenderSystem>().is_none());
	assert!(matches!(
		registry.require_system_mut::<RenderSystem>(),
		Err(EcsError::MissingSystem(_))
	));
}

#[test]
pub fn system_core_reports_signature() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);

	let core = registry.system_core::<MovementSystem>().unwrap();
	assert_eq!(core.signature(), MovementSystem.signature());
	assert_eq!(core.signature(), Signature::new().require::<Velocity>().require::<Position>());
	assert!(core.name().ends_with("MovementSystem"));
	assert!(core.is_empty());
}

#[test]
pub fn run_system_lends_the_system_and_registry() {
	let mut registry = Registry::new();
	registry.add_system(MovementSystem);
	for _ in 0..3 {
		moving_entity(&mut registry);
	}
	registry.update();

	let moved = registry.run_system::<MovementSystem, _>(|_, entities, registry| {
		for entity in entities {
			let velocity = *registry.get_component::<Velocity>(*entity).unwrap();
			let position = registry.get_component_mut::<Position>(*entity).unwrap();
			position.x += velocity.x;
			position.y += velocity.y;
		}
		entities.len()
	});

	assert_eq!(moved, Some(3));
	assert!(registry.components::<Position>().all(|(_, p)| *p == Position { x: 1.0, y: 0.5 }));
	assert!(registry.has_system::<MovementSystem>(), "The system is put back after running");
	assert!(registry.get_system::<MovementSystem>().is_some());
}

#[test]
pub fn run_system_tolerates_structural_changes() {
	let mut registry = Registry::new();
	registry.add_system(RenderSystem { drawn: 0 });
	for _ in 0..4 {
		let entity = registry.create_entity();
		registry.add_component(entity, Position::default());
	}
	registry.update();

	registry.run_system::<RenderSystem, _>(|system, entities, registry| {
		for entity in entities {
			system.drawn += 1;
			registry.kill_entity(*entity);
			registry.remove_entity_from_systems(*entity);
		}
		assert!(registry.get_system::<RenderSystem>().is_none(), "A running system is not reachable");
	});

	registry.update();
	assert_eq!(registry.get_system::<RenderSystem>().map(|s| s.drawn), Some(4));
	assert_eq!(registry.live_count(), 0);
	assert!(registry.run_system::<HealthSystem, _>(|_, _, _| ()).is_none());
}

#[test]
pub fn killed_entities_leave_systems() {
	let mut registry = Registry::new();
	registry.add_system(HealthSystem);

	let entities = (0..3)
		.map(|i| {
			let entity = registry.create_entity();
			registry.add_component(entity, Health(i));
			entity
		})
		.collect::<Vec<_>>();
	registry.update();

	entities[1].kill(&mut registry);
	registry.update();

	let mut remaining = registry.system_entities::<HealthSystem>().to_vec();
	remaining.sort();
	assert_eq!(remaining, vec![entities[0], entities[2]]);
}
