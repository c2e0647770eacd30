use leptos::prelude::*;

use crate::components::network::{NetworkConfig, NetworkField, SpecialNodeConfig};

/// Project markers shown on the landing page.
fn portfolio_nodes() -> Vec<SpecialNodeConfig> {
	vec![
		SpecialNodeConfig::new(
			5,
			0xffd000,
			"EagleVision",
			"Multi-frame ALPR recovery for Kenyan plates. Fusion + probabilistic OCR.",
		)
		.with_tags(&["Computer Vision", "ALPR", "Kenya"]),
		SpecialNodeConfig::new(
			18,
			0x22c55e,
			"HAM Study App",
			"Django quiz platform with images + Cloud SQL Postgres on GAE.",
		)
		.with_tags(&["RSK", "HAM radio", "Kenya Radio Society"])
		.with_link("https://rsk-ham-study.appspot.com/"),
		SpecialNodeConfig::new(
			41,
			0xff7a18,
			"RF / Field",
			"Antennas, SDR scanning, LoRa nodes, embedded prototypes.",
		)
		.with_tags(&["RF", "SDR", "LoRa", "Embedded"]),
		SpecialNodeConfig::new(
			63,
			0x60a5fa,
			"Ops & Build",
			"Pragmatic systems: constraints, deployment, reliability.",
		)
		.with_tags(&["Deployment", "Reliability", "Systems"]),
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<main class="fullscreen-network">
			<NetworkField specials=portfolio_nodes() config=NetworkConfig::default() />
		</main>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn portfolio_markers_have_distinct_indices() {
		let mut idx: Vec<_> = portfolio_nodes().iter().map(|n| n.node_index).collect();
		idx.sort_unstable();
		idx.dedup();
		assert_eq!(idx, vec![5, 18, 41, 63]);
	}
}
