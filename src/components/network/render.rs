use std::f64::consts::PI;

use glam::{Vec2, Vec3};
use web_sys::CanvasRenderingContext2d;

use super::camera::{Camera, Rotation};
use super::edges::Segment;
use super::types::Rgb;

/// Minimal drawing surface the network needs.
///
/// Positions are in group space; the renderer applies the group rotation and
/// the camera projection when the frame is drawn.
pub trait Renderer {
	fn upload_points(&mut self, positions: &[Vec3]);
	/// Only `segments[..count]` is drawn.
	fn upload_segments(&mut self, segments: &[Segment], count: usize);
	fn place_marker(&mut self, slot: usize, position: Vec3, scale: f32, color: Rgb);
	fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64);
	fn render_frame(&mut self, camera: &Camera, rotation: &Rotation);
}

/// Appearance settings for [`CanvasRenderer`].
#[derive(Clone, Copy, Debug)]
pub struct CanvasStyle {
	pub point_size: f32,
	pub point_opacity: f64,
	pub line_opacity: f64,
	pub marker_radius: f32,
	pub marker_opacity: f64,
}

#[derive(Clone, Copy, Debug)]
struct Marker {
	position: Vec3,
	scale: f32,
	color: Rgb,
}

/// Draws the network on a 2D canvas with a software perspective projection.
pub struct CanvasRenderer {
	ctx: CanvasRenderingContext2d,
	style: CanvasStyle,
	width: f64,
	height: f64,
	pixel_ratio: f64,
	points: Vec<Vec3>,
	segments: Vec<(Vec3, Vec3)>,
	markers: Vec<Option<Marker>>,
}

impl CanvasRenderer {
	pub fn new(ctx: CanvasRenderingContext2d, style: CanvasStyle) -> Self {
		Self {
			ctx,
			style,
			width: 0.0,
			height: 0.0,
			pixel_ratio: 1.0,
			points: Vec::new(),
			segments: Vec::new(),
			markers: Vec::new(),
		}
	}

	fn to_screen(&self, ndc: Vec2) -> (f64, f64) {
		(
			(ndc.x as f64 + 1.0) * 0.5 * self.width,
			(1.0 - ndc.y as f64) * 0.5 * self.height,
		)
	}

	/// Pixels per world unit at `depth`.
	fn pixels_per_unit(&self, camera: &Camera, depth: f32) -> f64 {
		camera.ndc_per_unit(depth) as f64 * 0.5 * self.height
	}
}

impl Renderer for CanvasRenderer {
	fn upload_points(&mut self, positions: &[Vec3]) {
		self.points.clear();
		self.points.extend_from_slice(positions);
	}

	fn upload_segments(&mut self, segments: &[Segment], count: usize) {
		self.segments.clear();
		self.segments
			.extend(segments.iter().take(count).map(|s| (s.from, s.to)));
	}

	fn place_marker(&mut self, slot: usize, position: Vec3, scale: f32, color: Rgb) {
		if self.markers.len() <= slot {
			self.markers.resize(slot + 1, None);
		}
		self.markers[slot] = Some(Marker {
			position,
			scale,
			color,
		});
	}

	fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
		self.width = width;
		self.height = height;
		self.pixel_ratio = pixel_ratio;
	}

	fn render_frame(&mut self, camera: &Camera, rotation: &Rotation) {
		let ctx = &self.ctx;
		let m = rotation.matrix();
		let r = self.pixel_ratio;
		let _ = ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0);
		ctx.clear_rect(0.0, 0.0, self.width, self.height);

		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", self.style.line_opacity));
		ctx.set_line_width(1.0);
		ctx.begin_path();
		for &(a, b) in &self.segments {
			if let (Some((pa, _)), Some((pb, _))) = (camera.project(m * a), camera.project(m * b))
			{
				let ((x1, y1), (x2, y2)) = (self.to_screen(pa), self.to_screen(pb));
				ctx.move_to(x1, y1);
				ctx.line_to(x2, y2);
			}
		}
		ctx.stroke();

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", self.style.point_opacity));
		for &p in &self.points {
			if let Some((ndc, depth)) = camera.project(m * p) {
				let (x, y) = self.to_screen(ndc);
				let radius = (self.style.point_size as f64 * 0.5
					* self.pixels_per_unit(camera, depth))
				.max(0.5);
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
				ctx.fill();
			}
		}

		// far markers first so nearer ones overlap them
		let mut visible: Vec<(f32, f64, f64, f64, Rgb)> = self
			.markers
			.iter()
			.flatten()
			.filter_map(|mk| {
				let (ndc, depth) = camera.project(m * mk.position)?;
				let (x, y) = self.to_screen(ndc);
				let radius = (self.style.marker_radius * mk.scale) as f64
					* self.pixels_per_unit(camera, depth);
				Some((depth, x, y, radius, mk.color))
			})
			.collect();
		visible.sort_by(|a, b| b.0.total_cmp(&a.0));
		for (_, x, y, radius, color) in visible {
			ctx.set_fill_style_str(&color.css(self.style.marker_opacity));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}
