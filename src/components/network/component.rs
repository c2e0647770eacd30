use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use leptos::prelude::*;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, DomRect, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent,
	ResizeObserver,
};

use super::config::NetworkConfig;
use super::error::MountError;
use super::frame_loop::FrameLoop;
use super::interaction::{Cursor, Effect as Fx, InputEvent};
use super::render::{CanvasRenderer, CanvasStyle, Renderer};
use super::state::NetworkState;
use super::types::SpecialNodeConfig;

type Shared<T> = Rc<RefCell<Option<T>>>;

/// Page-facing outputs: tooltip html, panel html and cursor.
#[derive(Clone, Copy)]
struct Sinks {
	tooltip: RwSignal<Option<String>>,
	panel: RwSignal<Option<String>>,
	cursor: RwSignal<Cursor>,
}

impl Sinks {
	fn apply(&self, effects: Vec<Fx>) {
		for effect in effects {
			match effect {
				Fx::Tooltip(html) => self.tooltip.set(html),
				Fx::OpenPanel(html) => self.panel.set(Some(html)),
				Fx::ClosePanel => self.panel.set(None),
				Fx::Cursor(c) => self.cursor.set(c),
				// handled by NetworkState
				Fx::ResetHighlight => {}
			}
		}
	}
}

/// Live browser resources of a mounted widget.
struct Mounted {
	frames: FrameLoop,
	observer: ResizeObserver,
	_on_resize: Closure<dyn FnMut()>,
	on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Mounted {
	fn stop(self) {
		self.frames.stop();
		self.observer.disconnect();
		if let Some(win) = web_sys::window() {
			let _ = win.remove_event_listener_with_callback(
				"keydown",
				self.on_keydown.as_ref().unchecked_ref(),
			);
		}
		info!("network widget stopped");
	}
}

/// Device pixel ratio capped at `max`; a missing or non-positive ratio counts as 1.
fn pixel_ratio(device: Option<f64>, max: f64) -> f64 {
	device.filter(|r| *r > 0.0).unwrap_or(1.0).min(max)
}

/// Pointer position inside `rect` as a fraction of its size, y down.
fn relative_pointer(client: (f64, f64), rect: &DomRect) -> Option<Vec2> {
	relative_to(
		client,
		(rect.left(), rect.top()),
		(rect.width(), rect.height()),
	)
}

fn relative_to(client: (f64, f64), origin: (f64, f64), size: (f64, f64)) -> Option<Vec2> {
	if size.0 <= 0.0 || size.1 <= 0.0 {
		return None;
	}
	Some(Vec2::new(
		((client.0 - origin.0) / size.0) as f32,
		((client.1 - origin.1) / size.1) as f32,
	))
}

/// Match the canvas backing store, camera and renderer to the container.
fn fit(
	container: &Element,
	canvas: &HtmlCanvasElement,
	state: &mut NetworkState,
	renderer: &mut CanvasRenderer,
) {
	let (w, h) = (container.client_width() as f64, container.client_height() as f64);
	let device = web_sys::window().map(|win| win.device_pixel_ratio());
	let ratio = pixel_ratio(device, state.config.max_pixel_ratio);
	canvas.set_width((w * ratio) as u32);
	canvas.set_height((h * ratio) as u32);
	state.resize(w, h);
	renderer.resize(w, h, ratio);
}

fn mount(
	container: Element,
	canvas: HtmlCanvasElement,
	state: Shared<NetworkState>,
	config: NetworkConfig,
	specials: &[SpecialNodeConfig],
	sinks: Sinks,
) -> Result<Mounted, MountError> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(MountError::NoContext)?
		.dyn_into()
		.map_err(|_| MountError::NoContext)?;

	let style = CanvasStyle {
		point_size: config.point_size,
		point_opacity: config.point_opacity,
		line_opacity: config.line_opacity,
		marker_radius: config.marker_radius,
		marker_opacity: config.marker_opacity,
	};
	let mut network = NetworkState::new(config, specials, &mut StdRng::from_entropy());
	let renderer = Rc::new(RefCell::new(CanvasRenderer::new(ctx, style)));
	fit(&container, &canvas, &mut network, &mut renderer.borrow_mut());
	info!(
		"network widget mounted: {} nodes, {} of {} special nodes",
		network.field.len(),
		network.specials.len(),
		specials.len()
	);
	*state.borrow_mut() = Some(network);

	let (state_resize, renderer_resize, container_resize) =
		(state.clone(), renderer.clone(), container.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		if let Some(ref mut s) = *state_resize.borrow_mut() {
			fit(
				&container_resize,
				&canvas,
				s,
				&mut renderer_resize.borrow_mut(),
			);
		}
	});
	let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
	observer.observe(&container);

	let state_key = state.clone();
	let on_keydown: Closure<dyn FnMut(KeyboardEvent)> = Closure::new(move |ev: KeyboardEvent| {
		if ev.key() != "Escape" {
			return;
		}
		if let Some(ref mut s) = *state_key.borrow_mut() {
			sinks.apply(s.handle(InputEvent::Escape));
		}
	});
	window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

	let frames = FrameLoop::start(move || {
		if let Some(ref mut s) = *state.borrow_mut() {
			sinks.apply(s.step());
			s.draw(&mut *renderer.borrow_mut());
		}
	})?;

	Ok(Mounted {
		frames,
		observer,
		_on_resize: on_resize,
		on_keydown,
	})
}

/// Animated 3D point network with clickable special nodes.
#[component]
pub fn NetworkField(
	#[prop(into)] specials: Vec<SpecialNodeConfig>,
	#[prop(optional)] config: Option<NetworkConfig>,
) -> impl IntoView {
	let container_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let sinks = Sinks {
		tooltip: RwSignal::new(None),
		panel: RwSignal::new(None),
		cursor: RwSignal::new(Cursor::Default),
	};
	let state: Shared<NetworkState> = Rc::new(RefCell::new(None));
	let mounted: Shared<Mounted> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();

	let (state_init, mounted_init) = (state.clone(), mounted.clone());
	Effect::new(move |_| {
		let (Some(container), Some(canvas)) = (container_ref.get(), canvas_ref.get()) else {
			return;
		};
		if mounted_init.borrow().is_some() {
			return;
		}
		let container: Element = container.into();
		match mount(
			container,
			canvas,
			state_init.clone(),
			config.clone(),
			&specials,
			sinks,
		) {
			Ok(m) => *mounted_init.borrow_mut() = Some(m),
			Err(e) => error!("network widget disabled: {}", e),
		}
	});

	let teardown = StoredValue::new_local(mounted);
	on_cleanup(move || {
		teardown.try_with_value(|m| {
			if let Some(m) = m.borrow_mut().take() {
				m.stop();
			}
		});
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(container) = container_ref.get() else {
			return;
		};
		let client = (ev.client_x() as f64, ev.client_y() as f64);
		let Some(rel) = relative_pointer(client, &container.get_bounding_client_rect()) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			sinks.apply(s.handle(InputEvent::PointerMove(rel)));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			sinks.apply(s.handle(InputEvent::PointerLeave));
		}
	};

	let state_click = state.clone();
	let on_click = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_click.borrow_mut() {
			sinks.apply(s.click());
		}
	};

	let state_close = state;
	let on_close = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_close.borrow_mut() {
			sinks.apply(s.handle(InputEvent::ClosePanel));
		}
	};

	view! {
		<div
			node_ref=container_ref
			class="network-field"
			style:cursor=move || sinks.cursor.get().css()
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
		>
			<canvas
				node_ref=canvas_ref
				class="network-field__canvas"
				style="display: block; width: 100%; height: 100%;"
			/>
			<div
				class="matrix-tip"
				class:on=move || sinks.tooltip.with(Option::is_some)
				inner_html=move || sinks.tooltip.get().unwrap_or_default()
			/>
		</div>
		<div class="matrix-modal" class:on=move || sinks.panel.with(Option::is_some)>
			<div class="matrix-modal__backdrop" on:click=on_close.clone() />
			<div class="matrix-modal__card">
				<button class="matrix-modal__close" on:click=on_close>
					"×"
				</button>
				<div
					class="matrix-modal__content"
					inner_html=move || sinks.panel.get().unwrap_or_default()
				/>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pixel_ratio_is_capped_not_raised() {
		assert_eq!(pixel_ratio(Some(0.5), 2.0), 0.5);
		assert_eq!(pixel_ratio(Some(1.5), 2.0), 1.5);
		assert_eq!(pixel_ratio(Some(3.0), 2.0), 2.0);
	}

	#[test]
	fn pixel_ratio_falls_back_to_one() {
		assert_eq!(pixel_ratio(None, 2.0), 1.0);
		assert_eq!(pixel_ratio(Some(0.0), 2.0), 1.0);
		assert_eq!(pixel_ratio(Some(-1.0), 2.0), 1.0);
	}

	#[test]
	fn pointer_is_relative_to_the_container() {
		let rel = relative_to((150.0, 60.0), (100.0, 50.0), (200.0, 40.0));
		assert_eq!(rel, Some(Vec2::new(0.25, 0.25)));
		assert_eq!(relative_to((0.0, 0.0), (0.0, 0.0), (0.0, 40.0)), None);
	}

	#[test]
	fn sinks_route_effects() {
		let owner = Owner::new();
		owner.with(|| {
			let sinks = Sinks {
				tooltip: RwSignal::new(None),
				panel: RwSignal::new(None),
				cursor: RwSignal::new(Cursor::Default),
			};
			sinks.apply(vec![
				Fx::Tooltip(Some("<b>a</b>".into())),
				Fx::Cursor(Cursor::Pointer),
				Fx::OpenPanel("panel".into()),
				Fx::ResetHighlight,
			]);
			assert_eq!(sinks.tooltip.get_untracked().as_deref(), Some("<b>a</b>"));
			assert_eq!(sinks.panel.get_untracked().as_deref(), Some("panel"));
			assert_eq!(sinks.cursor.get_untracked(), Cursor::Pointer);

			sinks.apply(vec![Fx::ClosePanel, Fx::Tooltip(None)]);
			assert_eq!(sinks.panel.get_untracked(), None);
			assert_eq!(sinks.tooltip.get_untracked(), None);
		});
	}
}
