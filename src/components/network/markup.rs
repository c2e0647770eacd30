//! HTML for the hover tooltip and the info panel.
//!
//! Every value coming from configuration is escaped before it is interpolated.

use html_escape::encode_quoted_attribute as escape;

use super::special::SpecialNode;

pub fn tooltip_html(node: &SpecialNode) -> String {
	format!(
		r#"<strong>{}</strong><br><span class="muted">Click to open</span>"#,
		escape(&node.title)
	)
}

pub fn panel_html(node: &SpecialNode) -> String {
	let mut html = format!(
		r#"<strong>{}</strong><br><span class="muted">{}</span>"#,
		escape(&node.title),
		escape(&node.description)
	);

	if !node.tags.is_empty() {
		html.push_str(r#"<div class="matrix-modal__tags">"#);
		for tag in &node.tags {
			html.push_str(&format!(r#"<span class="matrix-tag">{}</span>"#, escape(tag)));
		}
		html.push_str("</div>");
	}

	if let Some(link) = node.link.as_deref().filter(|l| !l.is_empty()) {
		let link = escape(link);
		html.push_str(r#"<div class="matrix-modal__linkwrap">"#);
		// only web links become clickable; anything else is shown as text
		if is_web_link(&link) {
			html.push_str(&format!(
				r#"<a class="matrix-modal__link" href="{}" target="_blank" rel="noopener noreferrer">Open project ↗</a>"#,
				link
			));
		}
		html.push_str(&format!(r#"<div class="matrix-modal__url">{}</div></div>"#, link));
	}

	html
}

fn is_web_link(link: &str) -> bool {
	let lower = link.trim_start().to_ascii_lowercase();
	lower.starts_with("https://") || lower.starts_with("http://")
}

#[cfg(test)]
mod tests {
	use glam::Vec3;

	use super::super::types::Rgb;
	use super::*;

	fn node(title: &str, description: &str) -> SpecialNode {
		SpecialNode {
			node_index: 0,
			color: Rgb(0xffd000),
			title: title.into(),
			description: description.into(),
			tags: Vec::new(),
			link: None,
			position: Vec3::ZERO,
			target_scale: 1.0,
			current_scale: 1.0,
		}
	}

	#[test]
	fn script_in_description_is_escaped() {
		let html = panel_html(&node("x", "<script>alert(1)</script>"));
		assert!(!html.contains("<script>"));
		assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
	}

	#[test]
	fn tooltip_escapes_title() {
		assert_eq!(
			tooltip_html(&node("Ops & Build", "")),
			r#"<strong>Ops &amp; Build</strong><br><span class="muted">Click to open</span>"#
		);
	}

	#[test]
	fn panel_without_tags_or_link_is_minimal() {
		let html = panel_html(&node("EagleVision", "ALPR recovery"));
		assert_eq!(
			html,
			r#"<strong>EagleVision</strong><br><span class="muted">ALPR recovery</span>"#
		);
	}

	#[test]
	fn tags_and_link_are_rendered() {
		let mut n = node("HAM Study App", "quiz");
		n.tags = vec!["RSK".into(), "<b>".into()];
		n.link = Some("https://rsk-ham-study.appspot.com/?a=1&b=2".into());
		let html = panel_html(&n);
		assert!(html.contains(r#"<span class="matrix-tag">RSK</span>"#));
		assert!(html.contains(r#"<span class="matrix-tag">&lt;b&gt;</span>"#));
		let escaped = "https://rsk-ham-study.appspot.com/?a=1&amp;b=2";
		assert!(html.contains(&format!(r#"href="{}""#, escaped)));
		assert!(html.contains(&format!(r#"<div class="matrix-modal__url">{}</div>"#, escaped)));
	}

	#[test]
	fn script_links_are_shown_but_not_linked() {
		let mut n = node("x", "y");
		n.link = Some("javascript:alert(1)".into());
		let html = panel_html(&n);
		assert!(!html.contains("href="));
		assert!(html.contains("javascript:alert(1)"));
	}
}
