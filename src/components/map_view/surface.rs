use std::f64::consts::PI;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::transform::SurfaceSize;
use super::types::Vec2;

/// Why a single map item could not be drawn.
#[derive(Debug, Error)]
pub enum DrawError {
	#[error("{kind} {id} has no usable position")]
	MissingPosition { kind: &'static str, id: String },
	#[error("edge {from} -> {to} references a missing waypoint")]
	DanglingEdge { from: String, to: String },
	#[error("canvas rejected draw call: {0}")]
	Surface(String),
}

impl From<JsValue> for DrawError {
	fn from(value: JsValue) -> Self {
		DrawError::Surface(format!("{value:?}"))
	}
}

/// Minimal immediate-mode drawing target used by the render pipeline.
pub trait RasterSurface {
	fn resize(&mut self, size: SurfaceSize);
	fn clear(&mut self);
	fn begin_path(&mut self);
	fn move_to(&mut self, to: Vec2);
	fn line_to(&mut self, to: Vec2);
	/// Adds a full circle to the current path.
	fn arc(&mut self, center: Vec2, radius: f64) -> Result<(), DrawError>;
	fn rect(&mut self, origin: Vec2, width: f64, height: f64);
	fn fill(&mut self, style: &str);
	fn stroke(&mut self, style: &str, width: f64);
	/// Fills a disc of `outer` radius with a radial gradient starting at
	/// `inner`. `stops` are `(offset, colour)` pairs.
	fn radial_glow(
		&mut self,
		center: Vec2,
		inner: f64,
		outer: f64,
		stops: &[(f64, &str)],
	) -> Result<(), DrawError>;
	/// Draws text horizontally centred with its baseline at the bottom.
	fn fill_text(&mut self, text: &str, at: Vec2, font: &str, style: &str)
	-> Result<(), DrawError>;
}

/// `RasterSurface` over an HTML canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	size: SurfaceSize,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, DrawError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or_else(|| DrawError::Surface("2d context unavailable".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| DrawError::Surface("context is not 2d".into()))?;
		let size = SurfaceSize::new(canvas.width() as f64, canvas.height() as f64);
		Ok(Self { canvas, ctx, size })
	}
}

impl RasterSurface for CanvasSurface {
	fn resize(&mut self, size: SurfaceSize) {
		self.canvas.set_width(size.width.max(0.0) as u32);
		self.canvas.set_height(size.height.max(0.0) as u32);
		self.size = size;
	}

	fn clear(&mut self) {
		self.ctx
			.clear_rect(0.0, 0.0, self.size.width, self.size.height);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, to: Vec2) {
		self.ctx.move_to(to.x, to.y);
	}

	fn line_to(&mut self, to: Vec2) {
		self.ctx.line_to(to.x, to.y);
	}

	fn arc(&mut self, center: Vec2, radius: f64) -> Result<(), DrawError> {
		self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
		Ok(())
	}

	fn rect(&mut self, origin: Vec2, width: f64, height: f64) {
		self.ctx.rect(origin.x, origin.y, width, height);
	}

	fn fill(&mut self, style: &str) {
		self.ctx.set_fill_style_str(style);
		self.ctx.fill();
	}

	fn stroke(&mut self, style: &str, width: f64) {
		self.ctx.set_stroke_style_str(style);
		self.ctx.set_line_width(width);
		self.ctx.stroke();
	}

	fn radial_glow(
		&mut self,
		center: Vec2,
		inner: f64,
		outer: f64,
		stops: &[(f64, &str)],
	) -> Result<(), DrawError> {
		let gradient = self
			.ctx
			.create_radial_gradient(center.x, center.y, inner, center.x, center.y, outer)?;
		for (offset, colour) in stops {
			gradient.add_color_stop(*offset as f32, colour)?;
		}
		self.ctx.begin_path();
		self.ctx.arc(center.x, center.y, outer, 0.0, 2.0 * PI)?;
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
		Ok(())
	}

	fn fill_text(
		&mut self,
		text: &str,
		at: Vec2,
		font: &str,
		style: &str,
	) -> Result<(), DrawError> {
		self.ctx.set_font(font);
		self.ctx.set_fill_style_str(style);
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline("bottom");
		self.ctx.fill_text(text, at.x, at.y)?;
		Ok(())
	}
}
