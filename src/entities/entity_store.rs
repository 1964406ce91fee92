use crate::data_structures::{BitField, IdAllocator, IdReuse};
use crate::components::Signature;
use std::iter::repeat;

/// Per-id bookkeeping: liveness, signatures and the two deferred queues.
pub(crate) struct EntityStore {
	allocator: IdAllocator,
	signatures: Vec<Signature>,
	alive: BitField,
	queued_kill: BitField,
	pub(crate) pending_add: Vec<u32>,
	pub(crate) pending_kill: Vec<u32>,
}

impl EntityStore {
	pub fn new(policy: IdReuse, capacity: usize) -> Self {
		Self {
			allocator: IdAllocator::new(policy),
			signatures: Vec::with_capacity(capacity),
			alive: BitField::with_capacity(capacity),
			queued_kill: BitField::with_capacity(capacity),
			pending_add: Vec::new(),
			pending_kill: Vec::new(),
		}
	}

	/// Allocate an id with an empty signature and queue it for the next flush.
	pub fn create(&mut self) -> u32 {
		let id = self.allocator.allocate();
		let index = id as usize;

		if self.signatures.len() <= index {
			let count = index + 1 - self.signatures.len();
			self.signatures.extend(repeat(Signature::new()).take(count));
		}

		self.signatures[index].clear();
		self.alive.set(index, true);
		self.pending_add.push(id);
		id
	}

	/// Queue `id` for destruction. Returns `false` if it is dead or already queued.
	pub fn enqueue_kill(&mut self, id: u32) -> bool {
		let index = id as usize;
		if !self.alive.get(index) || self.queued_kill.get(index) {
			return false;
		}

		self.queued_kill.set(index, true);
		self.pending_kill.push(id);
		true
	}

	/// Clear the signature and hand the id back to the allocator.
	pub fn release(&mut self, id: u32) {
		let index = id as usize;
		debug_assert!(self.alive.get(index), "Released an entity that isn't alive");

		self.signatures[index].clear();
		self.alive.set(index, false);
		self.queued_kill.set(index, false);
		self.allocator.free(id);
	}

	#[inline]
	pub fn is_alive(&self, id: u32) -> bool {
		self.alive.get(id as usize)
	}

	#[inline]
	pub fn signature(&self, id: u32) -> Signature {
		self.signatures.get(id as usize).copied().unwrap_or_default()
	}

	#[inline]
	pub fn signature_mut(&mut self, id: u32) -> &mut Signature {
		&mut self.signatures[id as usize]
	}

	pub fn is_pending_kill(&self, id: u32) -> bool {
		self.queued_kill.get(id as usize)
	}

	pub fn live_count(&self) -> usize {
		self.allocator.used()
	}

	pub fn alive_ids(&self) -> impl Iterator<Item = u32> + '_ {
		self.alive.iter_ones().map(|i| i as u32)
	}

	pub fn reset(&mut self) {
		self.allocator.reset();
		self.signatures.clear();
		self.alive.clear();
		self.queued_kill.clear();
		self.pending_add.clear();
		self.pending_kill.clear();
	}
}
