use std::collections::HashSet;

use glam::Vec3;
use log::warn;

use super::camera::{Ray, Rotation};
use super::field::NodeField;
use super::types::{Rgb, SpecialNodeConfig};

/// A node promoted to a clickable marker.
#[derive(Clone, Debug)]
pub struct SpecialNode {
	pub node_index: usize,
	pub color: Rgb,
	pub title: String,
	pub description: String,
	pub tags: Vec<String>,
	pub link: Option<String>,
	/// Position of the referenced node as of the last sync, in group space.
	pub position: Vec3,
	pub target_scale: f32,
	pub current_scale: f32,
}

/// Scales used for the hover bloom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bloom {
	pub neutral: f32,
	pub emphasized: f32,
	pub smoothing: f32,
}

#[derive(Clone, Debug)]
pub struct SpecialNodeRegistry {
	markers: Vec<SpecialNode>,
	bloom: Bloom,
}

impl SpecialNodeRegistry {
	/// Keep every descriptor that points at a distinct node of `field`.
	pub fn register(configs: &[SpecialNodeConfig], field: &NodeField, bloom: Bloom) -> Self {
		let mut seen = HashSet::new();
		let markers = configs
			.iter()
			.filter_map(|cfg| {
				let Some(position) = field.position(cfg.node_index) else {
					warn!(
						"skipping special node {:?}: index {} outside 0..{}",
						cfg.title,
						cfg.node_index,
						field.len()
					);
					return None;
				};
				if !seen.insert(cfg.node_index) {
					warn!(
						"skipping special node {:?}: node {} already has a marker",
						cfg.title, cfg.node_index
					);
					return None;
				}
				Some(SpecialNode {
					node_index: cfg.node_index,
					color: cfg.color,
					title: cfg.title.clone(),
					description: cfg.description.clone(),
					tags: cfg.tags.clone(),
					link: cfg.link.clone(),
					position,
					target_scale: bloom.neutral,
					current_scale: bloom.neutral,
				})
			})
			.collect();
		Self { markers, bloom }
	}

	pub fn len(&self) -> usize {
		self.markers.len()
	}

	pub fn get(&self, marker: usize) -> Option<&SpecialNode> {
		self.markers.get(marker)
	}

	pub fn iter(&self) -> impl Iterator<Item = &SpecialNode> {
		self.markers.iter()
	}

	/// Glue every marker to its node.
	pub fn sync_positions(&mut self, field: &NodeField) {
		for m in &mut self.markers {
			if let Some(p) = field.position(m.node_index) {
				m.position = p;
			}
		}
	}

	/// Emphasize `hovered`, neutralize the rest, then ease every marker towards
	/// its target.
	pub fn update_highlight(&mut self, hovered: Option<usize>) {
		let Bloom {
			neutral,
			emphasized,
			smoothing,
		} = self.bloom;
		for (i, m) in self.markers.iter_mut().enumerate() {
			m.target_scale = if hovered == Some(i) { emphasized } else { neutral };
			m.current_scale += (m.target_scale - m.current_scale) * smoothing;
		}
	}

	pub fn reset_targets(&mut self) {
		for m in &mut self.markers {
			m.target_scale = self.bloom.neutral;
		}
	}

	/// Marker whose sphere the ray enters first.
	///
	/// Spheres have radius `radius * current_scale` and sit at the marker's
	/// position after `rotation`.
	pub fn pick(&self, ray: &Ray, rotation: &Rotation, radius: f32) -> Option<usize> {
		let mut best: Option<(usize, f32)> = None;
		for (i, m) in self.markers.iter().enumerate() {
			let center = rotation.apply(m.position);
			if let Some(d) = ray.intersect_sphere(center, radius * m.current_scale) {
				if best.is_none_or(|(_, bd)| d < bd) {
					best = Some((i, d));
				}
			}
		}
		best.map(|(i, _)| i)
	}
}
