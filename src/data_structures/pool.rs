use std::ops::{Deref, DerefMut};
use std::cell::RefCell;
use std::rc::Rc;

/// Recycles scratch buffers so per-frame snapshots don't allocate once warmed up.
pub struct Pool<T> {
	values: Rc<RefCell<Vec<T>>>,
}

/// A value on loan from a [Pool]; it goes back to the pool when dropped.
pub struct PoolBorrow<T> {
	value: Option<T>,
	values: Rc<RefCell<Vec<T>>>,
}

impl<T> Default for Pool<T> {
	fn default() -> Self {
		Self {
			values: Rc::default(),
		}
	}
}

impl<T: Default> Pool<T> {
	pub fn take_one(&self) -> PoolBorrow<T> {
		let value = self.values.borrow_mut().pop().unwrap_or_default();
		PoolBorrow {
			value: Some(value),
			values: self.values.clone(),
		}
	}

	/// Number of idle values waiting in the pool.
	pub fn idle(&self) -> usize {
		self.values.borrow().len()
	}
}

impl<T> Deref for PoolBorrow<T> {
	type Target = T;
	fn deref(&self) -> &Self::Target {
		self.value.as_ref().expect("PoolBorrow used after release")
	}
}

impl<T> DerefMut for PoolBorrow<T> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		self.value.as_mut().expect("PoolBorrow used after release")
	}
}

impl<T> Drop for PoolBorrow<T> {
	fn drop(&mut self) {
		if let Some(value) = self.value.take() {
			self.values.borrow_mut().push(value);
		}
	}
}
