use glam::Vec3;
use rand::Rng;

/// A point drifting through the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
	pub position: Vec3,
	pub velocity: Vec3,
}

/// Fixed set of nodes bouncing around an axis-aligned box centred on the origin.
///
/// Reflection happens one step late: a node that ends a step outside the box has
/// the offending velocity component negated, so it overshoots by at most one
/// step and per-axis speed never changes.
#[derive(Clone, Debug)]
pub struct NodeField {
	nodes: Vec<Node>,
	half_extents: Vec3,
}

impl NodeField {
	pub fn new<R: Rng>(
		count: usize,
		half_extents: Vec3,
		max_speed: f32,
		rng: &mut R,
	) -> Self {
		let mut axis = |extent: f32| {
			if extent > 0.0 {
				rng.gen_range(-extent..=extent)
			} else {
				0.0
			}
		};
		let nodes = (0..count)
			.map(|_| {
				let position = Vec3::new(
					axis(half_extents.x),
					axis(half_extents.y),
					axis(half_extents.z),
				);
				let velocity = Vec3::new(axis(max_speed), axis(max_speed), axis(max_speed));
				Node { position, velocity }
			})
			.collect();
		Self {
			nodes,
			half_extents,
		}
	}

	/// Build a field from explicit nodes.
	#[cfg(test)]
	pub fn from_nodes(nodes: Vec<Node>, half_extents: Vec3) -> Self {
		Self {
			nodes,
			half_extents,
		}
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	#[cfg(test)]
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn position(&self, idx: usize) -> Option<Vec3> {
		self.nodes.get(idx).map(|n| n.position)
	}

	#[cfg(test)]
	pub fn half_extents(&self) -> Vec3 {
		self.half_extents
	}

	/// Copy every position into `out`, reusing its allocation.
	pub fn positions_into(&self, out: &mut Vec<Vec3>) {
		out.clear();
		out.extend(self.nodes.iter().map(|n| n.position));
	}

	/// Integrate one frame.
	pub fn advance(&mut self) {
		let bounds = self.half_extents.to_array();
		for node in &mut self.nodes {
			node.position += node.velocity;
			let (pos, mut vel) = (node.position.to_array(), node.velocity.to_array());
			for axis in 0..3 {
				if pos[axis] > bounds[axis] || pos[axis] < -bounds[axis] {
					vel[axis] = -vel[axis];
				}
			}
			node.velocity = Vec3::from_array(vel);
		}
	}
}
