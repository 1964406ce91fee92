use std::cmp::Ordering;
use std::iter::repeat;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// A dynamically sized bit-field indexed by entity id.
#[derive(Default, Clone, Debug)]
pub struct BitField {
	values: Vec<u32>,
}

impl BitField {
	/// Create a new [BitField].
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new [BitField] with the specified capacity.
	///
	/// # Arguments
	/// * `capacity` - A usize representing the container's target capacity in bits
	pub fn with_capacity(capacity: usize) -> Self {
		let mut instance = Self { values: Vec::new() };
		instance.ensure_capacity(capacity);
		instance
	}

	/// Get the value of the bit at index `i`.
	/// Bits past the current capacity read as unset.
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(bits) => (bits & (FIRST_BIT >> shift)) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`, growing the field when needed.
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		match value {
			true => {
				if self.values.len() <= position {
					self.extend_to_position(position);
				}
				self.values[position] |= bit;
			},

			false => {
				if let Some(bits) = self.values.get_mut(position) {
					*bits &= !bit;
				}
			},
		}
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values.fill(0);
	}

	/// Set the minimum capacity of the [BitField].
	/// # Arguments
	/// * `capacity` - A usize representing the container's minimum capacity in bits
	pub fn ensure_capacity(&mut self, capacity: usize) {
		let needed = (capacity + BITS - 1) / BITS;
		if let Ordering::Less = self.values.len().cmp(&needed) {
			let count = needed - self.values.len();
			self.values.extend(repeat(0).take(count));
		}
	}

	/// Get the [BitField]'s capacity in bits.
	pub fn capacity(&self) -> usize {
		self.values.len() * BITS
	}

	/// Count the set bits.
	pub fn count_ones(&self) -> usize {
		self.values.iter().map(|v| v.count_ones() as usize).sum()
	}

	/// Iterate over the indices of set bits in ascending order.
	pub fn iter_ones(&self) -> BitFieldIterator {
		BitFieldIterator {
			index: 0,
			current: self.values.first().copied().unwrap_or(0),
			values: &self.values,
		}
	}

	#[inline(never)]
	fn extend_to_position(&mut self, position: usize) {
		let count = position - self.values.len() + 1;
		self.values.extend(repeat(0).take(count));
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}
}

/// Iterates over the indices of the set bits of a [BitField].
pub struct BitFieldIterator<'l> {
	index: usize,
	current: u32,
	values: &'l [u32],
}

impl Iterator for BitFieldIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			self.current = *self.values.get(self.index)?;
		}

		let shift = self.current.leading_zeros() as usize;
		self.current &= !(FIRST_BIT >> shift);
		Some(self.index * BITS + shift)
	}
}
