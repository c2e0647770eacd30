use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::error::MountError;

type Callback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop that can be cancelled.
///
/// The callback re-schedules itself, so it holds a reference to its own slot;
/// [`FrameLoop::stop`] breaks that cycle.
pub struct FrameLoop {
	callback: Callback,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	pub fn start(mut tick: impl FnMut() + 'static) -> Result<Self, MountError> {
		let window = web_sys::window().ok_or(MountError::NoWindow)?;
		let callback: Callback = Rc::new(RefCell::new(None));
		let pending = Rc::new(Cell::new(None));

		let (callback_inner, pending_inner) = (callback.clone(), pending.clone());
		*callback.borrow_mut() = Some(Closure::new(move || {
			pending_inner.set(None);
			tick();
			if let (Some(cb), Some(win)) = (callback_inner.borrow().as_ref(), web_sys::window()) {
				pending_inner.set(
					win.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		let frames = Self { callback, pending };
		if let Err(e) = frames.schedule(&window) {
			frames.stop();
			return Err(e);
		}
		Ok(frames)
	}

	fn schedule(&self, window: &web_sys::Window) -> Result<(), MountError> {
		if let Some(ref cb) = *self.callback.borrow() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			self.pending.set(Some(id));
		}
		Ok(())
	}

	pub fn stop(&self) {
		if let (Some(id), Some(win)) = (self.pending.take(), web_sys::window()) {
			let _ = win.cancel_animation_frame(id);
		}
		self.callback.borrow_mut().take();
	}
}
