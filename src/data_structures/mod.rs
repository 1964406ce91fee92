//! Small containers the registry is built from.

mod pool;
mod bit_field;
mod id_allocator;

pub use pool::*;
pub use bit_field::*;
pub use id_allocator::*;
