use glam::Vec3;
use rand::Rng;

use super::camera::{Camera, Rotation};
use super::config::NetworkConfig;
use super::edges::{EdgeBuffer, build_edges};
use super::field::NodeField;
use super::interaction::{Effect, InputEvent, InteractionState, transition};
use super::render::Renderer;
use super::special::{Bloom, SpecialNodeRegistry};
use super::types::SpecialNodeConfig;

/// Everything one network widget owns. Nothing is global, so several widgets
/// can share a page.
pub struct NetworkState {
	pub config: NetworkConfig,
	pub field: NodeField,
	pub edges: EdgeBuffer,
	pub specials: SpecialNodeRegistry,
	pub camera: Camera,
	pub rotation: Rotation,
	pub interaction: InteractionState,
	pub width: f64,
	pub height: f64,
	positions: Vec<Vec3>,
}

impl NetworkState {
	pub fn new<R: Rng>(config: NetworkConfig, specials: &[SpecialNodeConfig], rng: &mut R) -> Self {
		let field = NodeField::new(config.points, config.half_extents(), config.max_speed, rng);
		let bloom = Bloom {
			neutral: config.neutral_scale,
			emphasized: config.emphasized_scale,
			smoothing: config.smoothing,
		};
		let specials = SpecialNodeRegistry::register(specials, &field, bloom);
		let camera = Camera::new(config.fov, config.camera_distance, config.near, config.far);
		let mut state = Self {
			edges: EdgeBuffer::new(config.max_edges),
			field,
			specials,
			camera,
			rotation: Rotation::default(),
			interaction: InteractionState::default(),
			width: 0.0,
			height: 0.0,
			positions: Vec::with_capacity(config.points),
			config,
		};
		state.rebuild_edges();
		state
	}

	pub fn is_paused(&self) -> bool {
		self.interaction.is_paused()
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera.resize(width, height);
	}

	fn rebuild_edges(&mut self) {
		self.field.positions_into(&mut self.positions);
		build_edges(&self.positions, self.config.link_distance, &mut self.edges);
	}

	/// Marker under the pointer, if the pointer is on the canvas.
	pub fn hit_test(&self) -> Option<usize> {
		let ndc = self.interaction.pointer.ndc()?;
		let ray = self.camera.ray(ndc);
		self.specials.pick(&ray, &self.rotation, self.config.marker_radius)
	}

	/// Feed one input event through the state machine.
	pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
		let (next, effects) = transition(self.interaction, event, &self.specials);
		self.interaction = next;
		if effects.contains(&Effect::ResetHighlight) {
			self.specials.reset_targets();
		}
		effects
	}

	/// A click resolves against whatever is under the pointer right now.
	pub fn click(&mut self) -> Vec<Effect> {
		if self.is_paused() {
			return Vec::new();
		}
		let hit = self.hit_test();
		self.handle(InputEvent::Click(hit))
	}

	/// Advance one frame. While paused nothing moves and no hit-test runs.
	pub fn step(&mut self) -> Vec<Effect> {
		if self.is_paused() {
			return Vec::new();
		}

		self.field.advance();
		self.specials.sync_positions(&self.field);
		self.rebuild_edges();

		let hit = self.hit_test();
		let effects = self.handle(InputEvent::HoverTest(hit));
		self.specials.update_highlight(self.interaction.hovered);

		let parallax = self.interaction.parallax;
		self.rotation.y += self.config.drift + parallax.x * self.config.parallax_yaw;
		self.rotation.x = parallax.y * self.config.parallax_pitch;

		effects
	}

	/// Push the current state to a renderer and draw it.
	pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
		renderer.upload_points(&self.positions);
		renderer.upload_segments(self.edges.valid(), self.edges.count());
		for (slot, m) in self.specials.iter().enumerate() {
			renderer.place_marker(slot, m.position, m.current_scale, m.color);
		}
		renderer.render_frame(&self.camera, &self.rotation);
	}
}
