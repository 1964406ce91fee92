use std::time::Duration;

/// Per-frame timing handed to systems by the game loop.
///
/// ```
/// # use tick_ecs::prelude::*;
/// let mut frame = FrameContext::default();
/// frame.advance(0.5);
/// frame.advance(0.25);
/// assert_eq!(frame.frame, 2);
/// assert_eq!(frame.elapsed, 0.75);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameContext {
	/// Seconds since the previous frame.
	pub delta_time: f32,
	/// Seconds since the first frame.
	pub elapsed: f64,
	/// Number of frames started so far.
	pub frame: u64,
}

impl FrameContext {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a new frame that lasted `delta_time` seconds.
	pub fn advance(&mut self, delta_time: f32) {
		self.delta_time = delta_time;
		self.elapsed += f64::from(delta_time);
		self.frame += 1;
	}

	/// Like [advance](FrameContext::advance), from a measured [Duration].
	pub fn advance_by(&mut self, delta: Duration) {
		self.advance(delta.as_secs_f32());
	}
}
