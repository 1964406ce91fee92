use tick_ecs::components::reset_component_ids;
use tick_ecs::systems::reset_system_ids;
use tick_ecs::prelude::*;

#[derive(Component)]
struct First;

#[derive(Component)]
struct Second;

struct Physics;

impl System for Physics {
	fn signature(&self) -> Signature {
		Signature::new().require::<First>()
	}
}

struct Audio;

impl System for Audio {
	fn signature(&self) -> Signature {
		Signature::new().require::<Second>()
	}
}

// Ids are process-wide, so everything that depends on their values lives in this one test.
#[test]
fn ids_are_assigned_in_order_of_first_use_and_can_be_reset() {
	assert_eq!(ComponentId::of::<First>().value(), 0);
	assert_eq!(ComponentId::of::<Second>().value(), 1);
	assert_eq!(ComponentId::of::<First>().value(), 0);

	assert_eq!(SystemId::of::<Physics>().value(), 0);
	assert_eq!(SystemId::of::<Audio>().value(), 1);

	reset_component_ids();
	reset_system_ids();

	assert_eq!(ComponentId::of::<Second>().value(), 0);
	assert_eq!(ComponentId::of::<First>().value(), 1);
	assert_eq!(SystemId::of::<Audio>().value(), 0);

	let mut registry = Registry::new();
	registry.add_system(Physics);
	let entity = registry.create_entity();
	entity.add_component(&mut registry, First);
	registry.update();
	assert_eq!(registry.system_entities::<Physics>(), [entity]);
}
