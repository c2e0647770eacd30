//! Pointer/click/panel state machine.
//!
//! Handlers never touch the page: [`transition`] maps `(state, event)` to the
//! next state and a list of [`Effect`]s, and the frame loop applies them.

use glam::Vec2;

use super::markup;
use super::special::SpecialNodeRegistry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	Active,
	Paused,
}

/// Where the pointer is, in normalized device coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Pointer {
	#[default]
	Offscreen,
	At(Vec2),
}

impl Pointer {
	pub fn ndc(self) -> Option<Vec2> {
		match self {
			Pointer::Offscreen => None,
			Pointer::At(p) => Some(p),
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionState {
	pub mode: Mode,
	pub pointer: Pointer,
	/// Pointer offset from the container centre, `[-1, 1]` per axis, y down.
	pub parallax: Vec2,
	pub hovered: Option<usize>,
}

impl InteractionState {
	pub fn is_paused(&self) -> bool {
		self.mode == Mode::Paused
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
	/// Pointer position relative to the container, both axes in `[0, 1]`, y down.
	PointerMove(Vec2),
	PointerLeave,
	/// Click, with the marker under the pointer if any.
	Click(Option<usize>),
	/// Per-frame hover hit-test result.
	HoverTest(Option<usize>),
	ClosePanel,
	Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	Default,
	Pointer,
}

impl Cursor {
	pub fn css(self) -> &'static str {
		match self {
			Cursor::Default => "default",
			Cursor::Pointer => "pointer",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
	/// HTML-safe tooltip content, `None` to hide it.
	Tooltip(Option<String>),
	/// HTML-safe panel content.
	OpenPanel(String),
	ClosePanel,
	Cursor(Cursor),
	/// Return every marker's bloom target to neutral.
	ResetHighlight,
}

pub fn transition(
	state: InteractionState,
	event: InputEvent,
	registry: &SpecialNodeRegistry,
) -> (InteractionState, Vec<Effect>) {
	match (state.mode, event) {
		(Mode::Active, InputEvent::PointerMove(rel)) => (
			InteractionState {
				pointer: Pointer::At(Vec2::new(rel.x * 2.0 - 1.0, -(rel.y * 2.0 - 1.0))),
				parallax: (rel - Vec2::splat(0.5)) * 2.0,
				..state
			},
			Vec::new(),
		),
		(Mode::Active, InputEvent::PointerLeave) => (
			InteractionState {
				pointer: Pointer::Offscreen,
				parallax: Vec2::ZERO,
				hovered: None,
				..state
			},
			vec![
				Effect::Tooltip(None),
				Effect::ResetHighlight,
				Effect::Cursor(Cursor::Default),
			],
		),
		(Mode::Active, InputEvent::HoverTest(hit)) => {
			let hit = hit.filter(|&m| registry.get(m).is_some());
			if hit == state.hovered {
				return (state, Vec::new());
			}
			let next = InteractionState {
				hovered: hit,
				..state
			};
			(next, hover_effects(hit, registry))
		}
		(Mode::Active, InputEvent::Click(Some(marker))) => match registry.get(marker) {
			Some(node) => (
				InteractionState {
					mode: Mode::Paused,
					..state
				},
				vec![
					Effect::Tooltip(None),
					Effect::OpenPanel(markup::panel_html(node)),
					Effect::Cursor(Cursor::Default),
				],
			),
			None => (state, Vec::new()),
		},
		(Mode::Paused, InputEvent::ClosePanel | InputEvent::Escape) => {
			let mut effects = vec![Effect::ClosePanel];
			effects.extend(hover_effects(state.hovered, registry));
			(
				InteractionState {
					mode: Mode::Active,
					..state
				},
				effects,
			)
		}
		_ => (state, Vec::new()),
	}
}

fn hover_effects(hovered: Option<usize>, registry: &SpecialNodeRegistry) -> Vec<Effect> {
	match hovered.and_then(|m| registry.get(m)) {
		Some(node) => vec![
			Effect::Tooltip(Some(markup::tooltip_html(node))),
			Effect::Cursor(Cursor::Pointer),
		],
		None => vec![Effect::Tooltip(None), Effect::Cursor(Cursor::Default)],
	}
}

#[cfg(test)]
mod tests {
	use glam::Vec3;

	use super::super::field::{Node, NodeField};
	use super::super::special::Bloom;
	use super::super::types::SpecialNodeConfig;
	use super::*;

	fn registry() -> SpecialNodeRegistry {
		let nodes = (0..4)
			.map(|i| Node {
				position: Vec3::new(i as f32, 0.0, 0.0),
				velocity: Vec3::ZERO,
			})
			.collect();
		let field = NodeField::from_nodes(nodes, Vec3::splat(5.0));
		let cfgs = vec![
			SpecialNodeConfig::new(1, 0xffd000, "EagleVision", "<script>x</script>"),
			SpecialNodeConfig::new(3, 0x22c55e, "HAM", "quiz"),
		];
		SpecialNodeRegistry::register(
			&cfgs,
			&field,
			Bloom {
				neutral: 1.0,
				emphasized: 2.2,
				smoothing: 0.15,
			},
		)
	}

	fn run(
		state: InteractionState,
		events: &[InputEvent],
		reg: &SpecialNodeRegistry,
	) -> (InteractionState, Vec<Effect>) {
		events.iter().fold((state, Vec::new()), |(s, mut all), &e| {
			let (next, fx) = transition(s, e, reg);
			all.extend(fx);
			(next, all)
		})
	}

	#[test]
	fn pointer_move_maps_to_ndc_and_parallax() {
		let reg = registry();
		let (s, fx) = transition(
			InteractionState::default(),
			InputEvent::PointerMove(Vec2::new(0.75, 0.25)),
			&reg,
		);
		assert!(fx.is_empty());
		assert_eq!(s.pointer, Pointer::At(Vec2::new(0.5, 0.5)));
		assert_eq!(s.parallax, Vec2::new(0.5, -0.5));
	}

	#[test]
	fn hover_change_emits_tooltip_and_cursor_once() {
		let reg = registry();
		let (s, fx) = transition(InteractionState::default(), InputEvent::HoverTest(Some(0)), &reg);
		assert_eq!(s.hovered, Some(0));
		assert_eq!(fx.len(), 2);
		assert!(matches!(&fx[0], Effect::Tooltip(Some(t)) if t.contains("EagleVision")));
		assert_eq!(fx[1], Effect::Cursor(Cursor::Pointer));

		let (_, fx) = transition(s, InputEvent::HoverTest(Some(0)), &reg);
		assert!(fx.is_empty());

		let (s, fx) = transition(s, InputEvent::HoverTest(None), &reg);
		assert_eq!(s.hovered, None);
		assert_eq!(fx, vec![Effect::Tooltip(None), Effect::Cursor(Cursor::Default)]);
	}

	#[test]
	fn leave_resets_everything() {
		let reg = registry();
		let (s, _) = run(
			InteractionState::default(),
			&[InputEvent::PointerMove(Vec2::new(0.1, 0.9)), InputEvent::HoverTest(Some(1))],
			&reg,
		);
		let (s, fx) = transition(s, InputEvent::PointerLeave, &reg);
		assert_eq!(s, InteractionState::default());
		assert!(fx.contains(&Effect::ResetHighlight));
		assert!(fx.contains(&Effect::Tooltip(None)));
		assert!(fx.contains(&Effect::Cursor(Cursor::Default)));
	}

	#[test]
	fn click_on_empty_space_does_nothing() {
		let reg = registry();
		let (s, fx) = transition(InteractionState::default(), InputEvent::Click(None), &reg);
		assert_eq!(s.mode, Mode::Active);
		assert!(fx.is_empty());

		// stale marker ids are treated as a miss
		let (s, _) = transition(s, InputEvent::Click(Some(9)), &reg);
		assert!(!s.is_paused());
	}

	#[test]
	fn click_on_marker_pauses_and_opens_escaped_panel() {
		let reg = registry();
		let (s, fx) = transition(InteractionState::default(), InputEvent::Click(Some(0)), &reg);
		assert!(s.is_paused());
		assert_eq!(fx[0], Effect::Tooltip(None));
		match &fx[1] {
			Effect::OpenPanel(html) => {
				assert!(html.contains("&lt;script&gt;"));
				assert!(!html.contains("<script>"));
			}
			other => panic!("expected panel, got {:?}", other),
		}
		assert_eq!(fx[2], Effect::Cursor(Cursor::Default));
	}

	#[test]
	fn paused_ignores_pointer_and_hover() {
		let reg = registry();
		let (paused, _) = transition(InteractionState::default(), InputEvent::Click(Some(1)), &reg);
		for event in [
			InputEvent::PointerMove(Vec2::new(0.3, 0.3)),
			InputEvent::PointerLeave,
			InputEvent::HoverTest(Some(0)),
			InputEvent::Click(Some(0)),
		] {
			let (s, fx) = transition(paused, event, &reg);
			assert_eq!(s, paused);
			assert!(fx.is_empty());
		}
	}

	#[test]
	fn only_close_or_escape_resumes() {
		let reg = registry();
		for close in [InputEvent::ClosePanel, InputEvent::Escape] {
			let (paused, _) =
				transition(InteractionState::default(), InputEvent::Click(Some(0)), &reg);
			let (s, fx) = transition(paused, close, &reg);
			assert_eq!(s.mode, Mode::Active);
			assert_eq!(fx[0], Effect::ClosePanel);
		}

		// closing while active is a no-op
		let (s, fx) = transition(InteractionState::default(), InputEvent::Escape, &reg);
		assert_eq!(s, InteractionState::default());
		assert!(fx.is_empty());
	}

	#[test]
	fn open_then_close_restores_hover_state() {
		let reg = registry();
		let (before, fx_before) = run(
			InteractionState::default(),
			&[InputEvent::PointerMove(Vec2::new(0.5, 0.5)), InputEvent::HoverTest(Some(1))],
			&reg,
		);
		let (after, fx) = run(before, &[InputEvent::Click(Some(1)), InputEvent::ClosePanel], &reg);
		assert_eq!(after, before);

		// the last tooltip and cursor effects match what hovering produced
		let last_tooltip = fx.iter().rev().find(|e| matches!(e, Effect::Tooltip(_)));
		let last_cursor = fx.iter().rev().find(|e| matches!(e, Effect::Cursor(_)));
		assert_eq!(last_tooltip, fx_before.iter().find(|e| matches!(e, Effect::Tooltip(_))));
		assert_eq!(last_cursor, Some(&Effect::Cursor(Cursor::Pointer)));
	}
}
