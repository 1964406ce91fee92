use crate::error::EcsError;
use std::collections::HashMap;
use std::any::{Any, TypeId};
use tracing::trace;

type Handler<E, C> = Box<dyn FnMut(&E, &mut C) -> Result<(), EcsError>>;

/// Identifies who registered a handler, so that all of its handlers can be dropped at once.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SubscriberId {
	type_id: TypeId,
	name: &'static str,
}

impl SubscriberId {
	pub fn of<S: 'static>() -> Self {
		Self {
			type_id: TypeId::of::<S>(),
			name: std::any::type_name::<S>(),
		}
	}

	pub fn name(&self) -> &'static str {
		self.name
	}
}

struct Subscription<E, C> {
	subscriber: SubscriberId,
	handler: Handler<E, C>,
}

/// The type-erased list of subscriptions for one event type.
trait AnySubscriptions<C> {
	fn unsubscribe(&mut self, subscriber: SubscriberId) -> usize;
	fn len(&self) -> usize;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<E: 'static, C: 'static> AnySubscriptions<C> for Vec<Subscription<E, C>> {
	fn unsubscribe(&mut self, subscriber: SubscriberId) -> usize {
		let before = self.len();
		self.retain(|s| s.subscriber != subscriber);
		before - self.len()
	}

	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Typed publish/subscribe between systems.
///
/// Handlers receive the event and a mutable context `C` (typically the
/// [Registry](crate::registry::Registry)), and run synchronously, in subscription order,
/// when an event of their type is emitted. Subscriptions are meant to be rebuilt every
/// frame: call [reset](EventBus::reset) before systems subscribe again.
///
/// ```
/// # use tick_ecs::prelude::*;
/// struct Hit { damage: u32 }
/// struct DamageSystem;
///
/// let mut bus = EventBus::<u32>::new();
/// bus.subscribe_to_event::<Hit, DamageSystem>(|hit, total| {
/// 	*total += hit.damage;
/// 	Ok(())
/// });
///
/// let mut total = 0;
/// bus.emit_event(&mut total, Hit { damage: 7 }).unwrap();
/// assert_eq!(total, 7);
/// ```
pub struct EventBus<C: 'static> {
	subscriptions: HashMap<TypeId, Box<dyn AnySubscriptions<C>>>,
}

impl<C: 'static> EventBus<C> {
	pub fn new() -> Self {
		Self {
			subscriptions: HashMap::new(),
		}
	}

	/// Registers `handler` for events of type `E` on behalf of subscriber `S`.
	pub fn subscribe_to_event<E: 'static, S: 'static>(
		&mut self, handler: impl FnMut(&E, &mut C) -> Result<(), EcsError> + 'static,
	) {
		let subscription = Subscription {
			subscriber: SubscriberId::of::<S>(),
			handler: Box::new(handler),
		};

		let list = self
			.subscriptions
			.entry(TypeId::of::<E>())
			.or_insert_with(|| Box::new(Vec::<Subscription<E, C>>::new()))
			.as_any_mut()
			.downcast_mut::<Vec<Subscription<E, C>>>();

		if let Some(list) = list {
			list.push(subscription);
		}
	}

	/// Delivers `event` to every handler subscribed to `E`, in subscription order.
	///
	/// Delivery stops at the first handler returning an error, which is passed back to the caller.
	pub fn emit_event<E: 'static>(&mut self, context: &mut C, event: E) -> Result<(), EcsError> {
		let list = self
			.subscriptions
			.get_mut(&TypeId::of::<E>())
			.and_then(|list| list.as_any_mut().downcast_mut::<Vec<Subscription<E, C>>>());

		let Some(list) = list else {
			return Ok(());
		};

		trace!(event = std::any::type_name::<E>(), handlers = list.len(), "emitting event");
		for subscription in list.iter_mut() {
			(subscription.handler)(&event, context)?;
		}

		Ok(())
	}

	/// Drops every handler registered by subscriber `S`. Returns how many were removed.
	pub fn unsubscribe<S: 'static>(&mut self) -> usize {
		let subscriber = SubscriberId::of::<S>();
		let removed = self.subscriptions.values_mut().map(|list| list.unsubscribe(subscriber)).sum();
		self.subscriptions.retain(|_, list| list.len() != 0);
		removed
	}

	/// Number of handlers subscribed to `E`.
	pub fn subscriber_count<E: 'static>(&self) -> usize {
		self.subscriptions.get(&TypeId::of::<E>()).map_or(0, |list| list.len())
	}

	/// Drops every subscription.
	pub fn reset(&mut self) {
		self.subscriptions.clear();
	}
}

impl<C: 'static> Default for EventBus<C> {
	fn default() -> Self {
		Self::new()
	}
}
