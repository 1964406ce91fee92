use crate::components::{Component, Signature};
use crate::entities::Entity;
use crate::registry::Registry;
use paste::paste;

/// A tuple of [component](Component) types handled as one unit.
///
/// It provides a unified way to build a [Signature] from several component types
/// and to borrow all of them from an entity at once.
pub trait ComponentSet {
	/// Shared references to every component in the set.
	type Refs<'r>;

	/// The [Signature] with the bit of every component in the set.
	fn signature() -> Signature;

	/// Borrow every component of the set from `entity`, or `None` if any of them is missing.
	fn fetch(registry: &Registry, entity: Entity) -> Option<Self::Refs<'_>>;
}

impl ComponentSet for () {
	type Refs<'r> = ();

	fn signature() -> Signature {
		Signature::new()
	}

	fn fetch(_: &Registry, _: Entity) -> Option<Self::Refs<'_>> {
		Some(())
	}
}

macro_rules! impl_component_set {
    ($($t: ident),*) => {
        paste! {
            impl<$($t: Component),*> ComponentSet for ($($t,)*) {
                type Refs<'r> = ($(&'r $t,)*);

                fn signature() -> Signature {
                    Signature::new()$(.require::<$t>())*
                }

                fn fetch(registry: &Registry, entity: Entity) -> Option<Self::Refs<'_>> {
                    $(let [<$t:lower>] = registry.get_component::<$t>(entity)?;)*
                    Some(($([<$t:lower>],)*))
                }
            }
        }
    };
}

impl_component_set!(T0);
impl_component_set!(T0, T1);
impl_component_set!(T0, T1, T2);
impl_component_set!(T0, T1, T2, T3);
impl_component_set!(T0, T1, T2, T3, T4);
impl_component_set!(T0, T1, T2, T3, T4, T5);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6);
impl_component_set!(T0, T1, T2, T3, T4, T5, T6, T7);
