use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use serde::Deserialize;
use std::iter::Cloned;

type Range = std::ops::Range<u32>;

/// The order in which freed entity ids are handed out again.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdReuse {
	/// The smallest freed id is reused first.
	#[default]
	Lowest,
	/// The most recently freed id is reused first.
	Lifo,
}

/// Hands out entity ids and recycles freed ones.
///
/// In [IdReuse::Lowest] mode freed ids are kept as coalesced ranges keyed by their start,
/// so runs of destroyed entities cost a single map entry.
#[derive(Default)]
pub struct IdAllocator {
	policy: IdReuse,
	next: u32,
	used: usize,
	ranges: BTreeMap<u32, Range>,
	stack: Vec<u32>,
}

impl IdAllocator {
	/// Create a new [IdAllocator] with the given reuse policy.
	pub fn new(policy: IdReuse) -> Self {
		Self {
			policy,
			..Self::default()
		}
	}

	/// Allocate a single id, preferring previously freed ids.
	pub fn allocate(&mut self) -> u32 {
		let id = match self.policy {
			IdReuse::Lowest => self.take_lowest(),
			IdReuse::Lifo => self.stack.pop(),
		};

		self.used += 1;
		match id {
			Some(id) => id,
			None => {
				let id = self.next;
				self.next = self.next.checked_add(1).expect("Entity id space exhausted");
				id
			},
		}
	}

	/// Return an id to the allocator.
	/// Ids should never be returned twice; the owner tracks liveness.
	pub fn free(&mut self, id: u32) {
		debug_assert!(id < self.next, "Freed an id that was never allocated");
		self.used -= 1;

		match self.policy {
			IdReuse::Lifo => self.stack.push(id),
			IdReuse::Lowest => self.free_range(id..id + 1),
		}
	}

	/// Number of ids currently handed out.
	pub fn used(&self) -> usize {
		self.used
	}

	/// Number of freed ids waiting to be reused.
	pub fn available(&self) -> usize {
		self.capacity() - self.used
	}

	/// One past the highest id ever allocated.
	pub fn capacity(&self) -> usize {
		self.next as usize
	}

	/// Iterate over the coalesced free ranges ([IdReuse::Lowest] only).
	pub fn free_ranges(&self) -> Cloned<Values<u32, Range>> {
		self.ranges.values().cloned()
	}

	/// Forget every allocation and start counting from 0 again.
	pub fn reset(&mut self) {
		self.next = 0;
		self.used = 0;
		self.ranges.clear();
		self.stack.clear();
	}

	fn take_lowest(&mut self) -> Option<u32> {
		let (&start, _) = self.ranges.iter().next()?;
		let mut range = self.ranges.remove(&start)?;
		range.start += 1;
		if !range.is_empty() {
			self.ranges.insert(range.start, range);
		}
		Some(start)
	}

	fn free_range(&mut self, mut range: Range) {
		if let Some(after) = self.ranges.remove(&range.end) {
			range.end = after.end;
		}

		let before = self.ranges.range(..range.start).next_back().map(|(k, r)| (*k, r.end));
		match before {
			Some((key, end)) if end == range.start => {
				if let Some(extend) = self.ranges.get_mut(&key) {
					extend.end = range.end;
				}
			},
			_ => {
				self.ranges.insert(range.start, range);
			},
		}
	}
}
