use glam::Vec3;

/// Tunables for one network widget.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	/// Number of nodes in the field.
	pub points: usize,
	/// Horizontal half-width of the bounding box.
	pub range: f32,
	/// Vertical half-height as a fraction of `range`.
	pub vertical_ratio: f32,
	/// Per-axis velocity is drawn from `[-max_speed, max_speed]`.
	pub max_speed: f32,
	pub link_distance: f32,
	pub max_edges: usize,

	pub marker_radius: f32,
	pub emphasized_scale: f32,
	pub neutral_scale: f32,
	/// Fraction of the remaining distance covered per frame by the bloom.
	pub smoothing: f32,

	/// Yaw added every frame.
	pub drift: f32,
	pub parallax_pitch: f32,
	pub parallax_yaw: f32,

	/// Vertical field of view in degrees.
	pub fov: f32,
	pub near: f32,
	pub far: f32,
	pub camera_distance: f32,
	pub max_pixel_ratio: f64,

	pub point_size: f32,
	pub point_opacity: f64,
	pub line_opacity: f64,
	pub marker_opacity: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		let points = 90;
		Self {
			points,
			range: 7.0,
			vertical_ratio: 0.6,
			max_speed: 0.006,
			link_distance: 2.2,
			max_edges: points * 6,
			marker_radius: 0.18,
			emphasized_scale: 2.2,
			neutral_scale: 1.0,
			smoothing: 0.15,
			drift: 0.0015,
			parallax_pitch: 0.06,
			parallax_yaw: 0.02,
			fov: 45.0,
			near: 0.1,
			far: 100.0,
			camera_distance: 12.0,
			max_pixel_ratio: 2.0,
			point_size: 0.10,
			point_opacity: 0.9,
			line_opacity: 0.35,
			marker_opacity: 0.95,
		}
	}
}

impl NetworkConfig {
	/// Half extents of the bounding box; the vertical axis is squashed.
	pub fn half_extents(&self) -> Vec3 {
		Vec3::new(self.range, self.range * self.vertical_ratio, self.range)
	}
}
