//! Category and parent-based styling, resolved by name lookup.

/// Fill color per primary category tag.
const CATEGORY_COLORS: &[(&str, &str)] = &[
	("HIMO", "#020048"),
	("Fonds", "#88bfe7"),
	("Subfonds", "#c2def2"),
	("Series", "#ebebf8"),
	("Context", "#bc98df"),
	("PendingFonds", "#56beb9"),
];

/// Children of these groupings take the grouping's color instead of their
/// own category color.
const PARENT_COLOR_OVERRIDES: &[(&str, &str)] = &[
	("Possible extra-archives", "#56beb9"),
	("Archives of Contextualization", "#bc98df"),
];

pub fn category_color(category: &str) -> &'static str {
	CATEGORY_COLORS
		.iter()
		.find(|(tag, _)| *tag == category)
		.map(|(_, color)| *color)
		.unwrap_or("#cccccc")
}

pub fn parent_color_override(parent_name: &str) -> Option<&'static str> {
	PARENT_COLOR_OVERRIDES
		.iter()
		.find(|(name, _)| *name == parent_name)
		.map(|(_, color)| *color)
}

/// Label text color; the dark root circle gets light text.
pub fn label_color(category: &str) -> &'static str {
	if category == "HIMO" { "#ffffff" } else { "#333333" }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_categories_map_to_their_colors() {
		assert_eq!(category_color("HIMO"), "#020048");
		assert_eq!(category_color("PendingFonds"), "#56beb9");
		assert_eq!(category_color("SomethingElse"), "#cccccc");
	}

	#[test]
	fn grouping_parents_override_child_colors() {
		assert_eq!(
			parent_color_override("Possible extra-archives"),
			Some("#56beb9")
		);
		assert_eq!(parent_color_override("HIMO"), None);
	}
}
