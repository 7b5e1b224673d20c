//! Adaptive label layout: word-wrapped multi-line labels and a circle radius
//! large enough to hold them, with hand-tuned overrides for a fixed set of
//! node names whose automatic wrapping reads badly.

/// Maximum label width in pixels before a line is wrapped.
pub const TEXT_MAX_WIDTH: f64 = 80.0;
/// Label font size; measurement and drawing both use `12px sans-serif`.
pub const FONT_SIZE: f64 = 12.0;
/// Vertical advance between label lines.
pub const LINE_HEIGHT: f64 = FONT_SIZE + 2.0;

/// Sizing knobs for [`circle_radius`].
#[derive(Clone, Copy, Debug)]
pub struct LabelConfig {
	pub max_width: f64,
	pub font_size: f64,
	pub base_padding: f64,
	pub min_radius: f64,
}

impl Default for LabelConfig {
	fn default() -> Self {
		Self {
			max_width: TEXT_MAX_WIDTH,
			font_size: FONT_SIZE,
			base_padding: 10.0,
			min_radius: 48.0,
		}
	}
}

/// Width of a rendered line of text. The canvas 2d context provides the
/// glyph-accurate implementation in the browser; tests use [`EstimatedMeasure`].
pub trait TextMeasure {
	fn line_width(&self, text: &str) -> f64;
}

/// Deterministic per-character width estimate for `sans-serif` text, usable
/// off-browser. Widths are in em and scaled by `font_size`.
#[derive(Clone, Copy, Debug)]
pub struct EstimatedMeasure {
	pub font_size: f64,
}

impl Default for EstimatedMeasure {
	fn default() -> Self {
		Self {
			font_size: FONT_SIZE,
		}
	}
}

fn estimate_char_width_em(ch: char) -> f64 {
	match ch {
		' ' | '\u{a0}' => 0.33,
		'_' | '-' | '\u{2013}' => 0.33,
		'.' | ',' | ':' | ';' => 0.28,
		'(' | ')' | '[' | ']' | '{' | '}' | '/' => 0.33,
		'i' | 'j' | 'l' | '\'' => 0.24,
		'f' | 't' | 'r' => 0.35,
		'm' | 'w' => 0.85,
		'I' => 0.30,
		'W' | 'M' => 0.85,
		c if c.is_ascii_digit() => 0.56,
		c if c.is_ascii_uppercase() => 0.68,
		c if c.is_ascii_lowercase() => 0.52,
		_ => 0.60,
	}
}

impl TextMeasure for EstimatedMeasure {
	fn line_width(&self, text: &str) -> f64 {
		text.chars().map(estimate_char_width_em).sum::<f64>() * self.font_size
	}
}

/// Hand-tuned replacement text for names whose automatic wrap is unreadable.
/// `\n` forces a line break; `\u{a0}` (non-breaking space) glues short
/// phrases together through the greedy packer.
const MANUAL_BREAKS_BY_NAME: &[(&str, &str)] = &[
	(
		"History of Management and Administrative Management",
		"History of Management and Admini- strative Management",
	),
	// Federal agencies and think tanks
	("Archives of the US Senate", "Archives of the US\nSenate"),
	// Institutional networks and learned societies
	(
		"Institutional Networks, Learned Societies and Doctrinal Knowledge about Management",
		"Institutional Networks, Learned\u{a0}Societies and Doctrinal Knowledge\u{a0}about Management",
	),
	(
		"Archives of the Society of the Advancement of Management",
		"Archives of the Society of\u{a0}the Advancement\u{a0}of Management",
	),
	// Business schools and consulting corporations
	("Bulletin of the HBS", "Bulletin of\nthe HBS"),
	// Computer history, electronic brains and managerial techniques
	(
		"Archives about the history of cybernetics (Macy Proceedings – 1942 and 1946-1953)",
		"Archives about\u{a0}the\u{a0}history of cybernetics (Macy\u{a0}Proceedings\u{a0}– 1942 and 1946-1953)",
	),
	(
		"Archives about the history of organizational and managerial techniques",
		"Archives about\u{a0}the\u{a0}history of\u{a0}organizational and\u{a0}managerial techniques",
	),
	// Archives of contextualization
	(
		"Archives of Contextualization",
		"Archives of Contextua- lization",
	),
	(
		"Literature Review: History of Management and Administrative Management in the US (1920-1950)",
		"Literature Review:\u{a0}History of\u{a0}Management and\u{a0}Administrative Management in the US (1920-1950)",
	),
	// Extra archives
	("Possible extra-archives", "Possible\nextra-\narchives"),
];

/// Extra circle padding for names whose wrapped shape is unusually wide
/// relative to its height.
const EXTRA_PADDING_BY_NAME: &[(&str, f64)] = &[
	("Business Schools & Consulting Corporations", 10.0),
	(
		"Institutional Networks, Learned Societies and Doctrinal Knowledge about Management",
		10.0,
	),
	(
		"Computer History, Electronic Brains and Managerial Techniques",
		7.0,
	),
];

fn manual_break_for(name: &str) -> Option<&'static str> {
	MANUAL_BREAKS_BY_NAME
		.iter()
		.find(|(key, _)| *key == name)
		.map(|(_, text)| *text)
}

fn extra_padding_for(name: &str) -> f64 {
	EXTRA_PADDING_BY_NAME
		.iter()
		.find(|(key, _)| *key == name)
		.map(|(_, pad)| *pad)
		.unwrap_or(0.0)
}

/// Wrap a display name into label lines.
///
/// Names present in the manual-break table use the override text instead of
/// the raw name. Explicit line breaks in an override are final: those lines
/// are emitted verbatim, never re-wrapped. Otherwise tokens are split on
/// plain spaces only (non-breaking spaces keep phrases on one line) and
/// packed greedily: a token starts a new line when appending it would exceed
/// `max_width` and the current line already holds at least one token, so a
/// single over-wide token still occupies its own line unsplit.
pub fn wrap(name: &str, max_width: f64, measure: &dyn TextMeasure) -> Vec<String> {
	if name.is_empty() {
		return Vec::new();
	}
	let raw = manual_break_for(name).unwrap_or(name);

	if raw.contains('\n') {
		return raw.split('\n').map(str::to_string).collect();
	}

	let mut lines = Vec::new();
	let mut current: Vec<&str> = Vec::new();
	for word in raw.split(' ') {
		let test = if current.is_empty() {
			word.to_string()
		} else {
			format!("{} {word}", current.join(" "))
		};
		if measure.line_width(&test) > max_width && !current.is_empty() {
			lines.push(current.join(" "));
			current = vec![word];
		} else {
			current.push(word);
		}
	}
	if !current.is_empty() {
		lines.push(current.join(" "));
	}
	lines
}

/// Circle radius that contains the wrapped label: half the widest line or
/// half the stacked line height, whichever is larger, plus padding, floored
/// at `min_radius`.
pub fn circle_radius(name: &str, cfg: &LabelConfig, measure: &dyn TextMeasure) -> f64 {
	let lines = wrap(name, cfg.max_width, measure);

	let text_half_width = lines
		.iter()
		.map(|line| measure.line_width(line))
		.fold(0.0, f64::max)
		/ 2.0;
	let text_half_height = lines.len() as f64 * (cfg.font_size + 2.0) / 2.0;

	let padding = cfg.base_padding + extra_padding_for(name);
	(text_half_width.max(text_half_height) + padding).max(cfg.min_radius)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn measure() -> EstimatedMeasure {
		EstimatedMeasure::default()
	}

	#[test]
	fn wraps_plain_names_within_the_max_width() {
		let m = measure();
		let lines = wrap("Academic Journals of Management History", TEXT_MAX_WIDTH, &m);
		assert!(lines.len() > 1);
		for line in &lines {
			assert!(
				m.line_width(line) <= TEXT_MAX_WIDTH,
				"line {line:?} is wider than the limit"
			);
		}
		// Nothing lost or reordered by wrapping.
		assert_eq!(
			lines.join(" "),
			"Academic Journals of Management History"
		);
	}

	#[test]
	fn an_over_wide_single_token_occupies_its_own_line_unsplit() {
		let m = measure();
		let lines = wrap("Antidisestablishmentarianism now", 40.0, &m);
		assert_eq!(lines[0], "Antidisestablishmentarianism");
		assert_eq!(lines[1], "now");
	}

	#[test]
	fn forced_breaks_in_an_override_are_final() {
		let m = measure();
		// Two lines exactly, regardless of how wide the first one measures.
		assert_eq!(
			wrap("Archives of the US Senate", TEXT_MAX_WIDTH, &m),
			["Archives of the US", "Senate"]
		);
		assert_eq!(
			wrap("Possible extra-archives", TEXT_MAX_WIDTH, &m),
			["Possible", "extra-", "archives"]
		);
	}

	#[test]
	fn non_breaking_spaces_keep_phrases_on_one_line() {
		let m = measure();
		let lines = wrap(
			"Archives about the history of organizational and managerial techniques",
			TEXT_MAX_WIDTH,
			&m,
		);
		for glued in ["about\u{a0}the\u{a0}history", "of\u{a0}organizational", "and\u{a0}managerial"] {
			assert!(
				lines.iter().any(|l| l.contains(glued)),
				"{glued:?} was split across lines: {lines:?}"
			);
		}
	}

	#[test]
	fn override_text_wins_over_the_raw_name() {
		let m = measure();
		let lines = wrap("Bulletin of the HBS", TEXT_MAX_WIDTH, &m);
		assert_eq!(lines, ["Bulletin of", "the HBS"]);
	}

	#[test]
	fn an_empty_name_wraps_to_nothing_and_takes_the_minimum_radius() {
		let m = measure();
		let cfg = LabelConfig::default();
		assert!(wrap("", TEXT_MAX_WIDTH, &m).is_empty());
		assert_eq!(circle_radius("", &cfg, &m), cfg.min_radius);
	}

	#[test]
	fn radius_never_drops_below_the_floor() {
		let m = measure();
		let cfg = LabelConfig::default();
		for name in ["A", "HIMO", "x y", ""] {
			assert!(circle_radius(name, &cfg, &m) >= cfg.min_radius);
		}
	}

	#[test]
	fn radius_follows_the_label_shape_plus_manual_padding() {
		let m = measure();
		let cfg = LabelConfig::default();
		let name = "Computer History, Electronic Brains and Managerial Techniques";

		let lines = wrap(name, cfg.max_width, &m);
		let half_width = lines
			.iter()
			.map(|l| m.line_width(l))
			.fold(0.0, f64::max)
			/ 2.0;
		let half_height = lines.len() as f64 * (cfg.font_size + 2.0) / 2.0;
		// This name carries a manual +7 on top of the base padding.
		let expected = (half_width.max(half_height) + cfg.base_padding + 7.0).max(cfg.min_radius);

		assert_eq!(circle_radius(name, &cfg, &m), expected);
		assert!(expected > cfg.min_radius);
	}
}
