use crate::components::{Component, ComponentId};
use std::ops::{BitAnd, BitOr};
use std::fmt;

const BITS: usize = 32;
const WORDS: usize = 2;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// The number of distinct component types a [Signature] can describe.
pub const MAX_COMPONENTS: usize = BITS * WORDS;

/// A fixed-width bitmask identifying a set of [component](Component) types.
///
/// Entities carry the signature of the components attached to them,
/// systems carry the signature of the components they require.
#[derive(Default, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Signature {
	values: [u32; WORDS],
}

impl Signature {
	/// Create an empty [Signature].
	pub const fn new() -> Self {
		Self { values: [0; WORDS] }
	}

	/// Builder form of [Signature::set] for component type `T`.
	///
	/// ```
	/// # use tick_ecs::prelude::*;
	/// #[derive(Component)]
	/// struct Health(i32);
	///
	/// let required = Signature::new().require::<Health>();
	/// assert!(required.test(ComponentId::of::<Health>().value()));
	/// ```
	#[must_use]
	pub fn require<T: Component>(mut self) -> Self {
		self.set(ComponentId::of::<T>().value());
		self
	}

	/// Set the bit at index `i`.
	#[inline(always)]
	pub fn set(&mut self, i: usize) {
		let (position, bit) = Self::pos_bit(i);
		self.values[position] |= bit;
	}

	/// Clear the bit at index `i`.
	#[inline(always)]
	pub fn remove(&mut self, i: usize) {
		let (position, bit) = Self::pos_bit(i);
		self.values[position] &= !bit;
	}

	/// Check the bit at index `i`.
	#[inline(always)]
	pub fn test(&self, i: usize) -> bool {
		let (position, bit) = Self::pos_bit(i);
		self.values[position] & bit != 0
	}

	/// Check whether an entity with this signature satisfies `required`:
	/// every bit set in `required` must be set here as well.
	///
	/// An empty `required` signature matches nothing.
	pub fn matches(&self, required: &Signature) -> bool {
		!required.is_empty() && (*self & *required) == *required
	}

	/// Whether no bit is set.
	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|v| *v == 0)
	}

	/// Clear all bits.
	pub fn clear(&mut self) {
		self.values = [0; WORDS];
	}

	/// Number of set bits.
	pub fn count(&self) -> usize {
		self.values.iter().map(|v| v.count_ones() as usize).sum()
	}

	/// Iterate over the [ComponentIds](ComponentId) whose bit is set, in ascending order.
	pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
		(0..MAX_COMPONENTS).filter(|i| self.test(*i)).map(ComponentId::from_value)
	}

	#[inline(always)]
	fn pos_bit(i: usize) -> (usize, u32) {
		assert!(i < MAX_COMPONENTS, "Signature bit {i} is out of range");
		(i / BITS, FIRST_BIT >> (i % BITS))
	}
}

impl BitAnd for Signature {
	type Output = Signature;

	fn bitand(mut self, rhs: Self) -> Self::Output {
		for (lhs, rhs) in self.values.iter_mut().zip(rhs.values) {
			*lhs &= rhs;
		}
		self
	}
}

impl BitOr for Signature {
	type Output = Signature;

	fn bitor(mut self, rhs: Self) -> Self::Output {
		for (lhs, rhs) in self.values.iter_mut().zip(rhs.values) {
			*lhs |= rhs;
		}
		self
	}
}

impl From<&[ComponentId]> for Signature {
	fn from(ids: &[ComponentId]) -> Self {
		let mut signature = Signature::new();
		for id in ids {
			signature.set(id.value());
		}

		signature
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set().entries(self.iter().map(|id| id.value())).finish()
	}
}
