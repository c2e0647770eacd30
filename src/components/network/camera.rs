//! Perspective projection, picking rays and the group's drift rotation.

use glam::{Mat3, Vec2, Vec3};

/// Camera on the +z axis looking towards the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
	pub position: Vec3,
	/// Vertical field of view in radians.
	pub fov: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl Camera {
	pub fn new(fov_degrees: f32, distance: f32, near: f32, far: f32) -> Self {
		Self {
			position: Vec3::new(0.0, 0.0, distance),
			fov: fov_degrees.to_radians(),
			aspect: 1.0,
			near,
			far,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		if width > 0.0 && height > 0.0 {
			self.aspect = (width / height) as f32;
		}
	}

	fn half_height(&self) -> f32 {
		(self.fov / 2.0).tan()
	}

	/// Ray through the given normalized device coordinates.
	pub fn ray(&self, ndc: Vec2) -> Ray {
		let h = self.half_height();
		let direction = Vec3::new(ndc.x * h * self.aspect, ndc.y * h, -1.0).normalize();
		Ray {
			origin: self.position,
			direction,
		}
	}

	/// World point to normalized device coordinates plus view depth.
	///
	/// `None` when the point lies outside the near/far range.
	pub fn project(&self, point: Vec3) -> Option<(Vec2, f32)> {
		let view = point - self.position;
		let depth = -view.z;
		if depth < self.near || depth > self.far {
			return None;
		}
		let h = self.half_height();
		Some((
			Vec2::new(view.x / (depth * h * self.aspect), view.y / (depth * h)),
			depth,
		))
	}

	/// How many NDC units one world unit spans vertically at `depth`.
	pub fn ndc_per_unit(&self, depth: f32) -> f32 {
		1.0 / (depth * self.half_height())
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: Vec3,
	/// Unit length.
	pub direction: Vec3,
}

impl Ray {
	/// Distance along the ray to the first hit on the sphere, if any.
	pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
		let oc = self.origin - center;
		let b = oc.dot(self.direction);
		let c = oc.length_squared() - radius * radius;
		let disc = b * b - c;
		if disc < 0.0 {
			return None;
		}
		let root = disc.sqrt();
		let near = -b - root;
		if near >= 0.0 {
			return Some(near);
		}
		let far = -b + root;
		(far >= 0.0).then_some(far)
	}
}

/// Pitch/yaw applied to the whole node group (X then Y, like a scene-graph
/// Euler rotation in XYZ order).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
	pub x: f32,
	pub y: f32,
}

impl Rotation {
	pub fn matrix(&self) -> Mat3 {
		Mat3::from_rotation_x(self.x) * Mat3::from_rotation_y(self.y)
	}

	pub fn apply(&self, local: Vec3) -> Vec3 {
		self.matrix() * local
	}
}
