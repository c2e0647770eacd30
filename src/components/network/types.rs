/// An sRGB color, stored the way it is written in configuration (`0xffd000`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
	/// Red, green and blue channels.
	pub fn channels(self) -> (u8, u8, u8) {
		(
			((self.0 >> 16) & 0xff) as u8,
			((self.0 >> 8) & 0xff) as u8,
			(self.0 & 0xff) as u8,
		)
	}

	/// CSS `rgba(...)` string with the given opacity.
	pub fn css(self, alpha: f64) -> String {
		let (r, g, b) = self.channels();
		format!("rgba({}, {}, {}, {})", r, g, b, alpha)
	}
}

/// Descriptor for a node promoted to a clickable marker.
#[derive(Clone, Debug)]
pub struct SpecialNodeConfig {
	pub node_index: usize,
	pub color: Rgb,
	pub title: String,
	pub description: String,
	pub tags: Vec<String>,
	pub link: Option<String>,
}

impl SpecialNodeConfig {
	pub fn new(node_index: usize, color: u32, title: &str, description: &str) -> Self {
		Self {
			node_index,
			color: Rgb(color),
			title: title.into(),
			description: description.into(),
			tags: Vec::new(),
			link: None,
		}
	}

	pub fn with_tags(mut self, tags: &[&str]) -> Self {
		self.tags = tags.iter().map(|t| t.to_string()).collect();
		self
	}

	pub fn with_link(mut self, link: &str) -> Self {
		self.link = Some(link.into());
		self
	}
}
