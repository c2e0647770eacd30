use glam::Vec3;

/// A line between two nodes closer than the link distance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
	pub a: usize,
	pub b: usize,
	pub from: Vec3,
	pub to: Vec3,
}

/// Fixed-capacity segment storage, reused from frame to frame.
///
/// Only the first `count` slots are valid; anything past that is left over from
/// an earlier frame.
#[derive(Clone, Debug)]
pub struct EdgeBuffer {
	slots: Vec<Segment>,
	count: usize,
}

impl EdgeBuffer {
	pub fn new(max_edges: usize) -> Self {
		Self {
			slots: vec![Segment::default(); max_edges],
			count: 0,
		}
	}

	#[cfg(test)]
	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn valid(&self) -> &[Segment] {
		&self.slots[..self.count]
	}
}

/// Link every pair `(i, j)`, `i < j`, whose distance is strictly below
/// `link_distance`.
///
/// Pairs are visited in lexicographic order and the scan stops outright once
/// the buffer is full, so lower indices are favoured when the cap is hit.
/// Returns the number of valid segments.
pub fn build_edges(positions: &[Vec3], link_distance: f32, out: &mut EdgeBuffer) -> usize {
	let (max_edges, limit) = (out.slots.len(), link_distance * link_distance);
	let mut count = 0;

	'scan: for (i, &a) in positions.iter().enumerate() {
		if count >= max_edges {
			break;
		}
		for (j, &b) in positions.iter().enumerate().skip(i + 1) {
			if a.distance_squared(b) < limit {
				out.slots[count] = Segment {
					a: i,
					b: j,
					from: a,
					to: b,
				};
				count += 1;
				if count >= max_edges {
					break 'scan;
				}
			}
		}
	}

	out.count = count;
	count
}
