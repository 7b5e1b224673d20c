//! Canvas drawing for the visible subgraph: edges under circles, dashed
//! rings on expandable nodes, centered multi-line labels, link icons.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::{FONT_SIZE, LINE_HEIGHT};
use super::state::ArchiveGraphState;
use super::style;

/// Canvas font string used for both measurement and drawing; the two must
/// agree or circles stop fitting their labels.
pub const LABEL_FONT: &str = "12px sans-serif";

/// Glyph-accurate text measurement through an offscreen 2d context, the
/// browser-side implementation of [`super::layout::TextMeasure`].
pub struct CanvasMeasure {
	ctx: CanvasRenderingContext2d,
}

impl CanvasMeasure {
	pub fn new(ctx: CanvasRenderingContext2d) -> Self {
		ctx.set_font(LABEL_FONT);
		Self { ctx }
	}
}

impl super::layout::TextMeasure for CanvasMeasure {
	fn line_width(&self, text: &str) -> f64 {
		self.ctx
			.measure_text(text)
			.map(|m| m.width())
			.unwrap_or(0.0)
	}
}

pub fn render(state: &ArchiveGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#fafafa");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ArchiveGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("#aaaaaa");
	ctx.set_line_width(1.5);
	state.sim.visit_edges(|n1, n2, _| {
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(state: &ArchiveGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	state.sim.visit_nodes(|node| {
		let d = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let r = d.radius;

		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(d.color);
		ctx.fill();

		// Dashed affordance ring: this node still has hidden children.
		if !d.expanded && state.store().is_expandable(&d.id) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, r + 6.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("#555555");
			ctx.set_line_width(1.5);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(4.0),
				&JsValue::from_f64(4.0),
			));
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		if !d.lines.is_empty() {
			ctx.set_fill_style_str(style::label_color(&d.category));
			let top = y - (d.lines.len() as f64 - 1.0) * LINE_HEIGHT / 2.0;
			for (i, line) in d.lines.iter().enumerate() {
				let _ = ctx.fill_text(line, x, top + i as f64 * LINE_HEIGHT);
			}
		}

		if d.url.is_some() {
			ctx.set_font(&format!("{}px sans-serif", FONT_SIZE + 2.0));
			let _ = ctx.fill_text("🔗", x + r - 13.0, y + r - 13.0);
			ctx.set_font(LABEL_FONT);
		}
	});
}
