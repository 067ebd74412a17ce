//! CPU rasterization powered by `vello_cpu`.
//!
//! A [`Renderer`] owns a reusable render context and pixmap for one canvas
//! size; [`Renderer::render_frame`] hands a [`Painter`] to a drawing closure
//! and reads the result back as a [`FrameRgba`]. The painter exposes the
//! handful of primitives the scenes need: rect fills, rect outlines, circles,
//! and positioned single-style text.

use kurbo::Shape as _;

use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::text::{LoadedFont, TextBrushRgba8, TextLayoutEngine};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Owns the render context, pixmap, and text machinery for one canvas size.
pub struct Renderer {
    canvas: Canvas,
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: vello_cpu::Pixmap,
    text: TextLayoutEngine,
    font: LoadedFont,
}

impl Renderer {
    /// Build a renderer for `canvas`, registering `font_bytes` for text
    /// layout and glyph drawing.
    pub fn new(canvas: Canvas, font_bytes: &[u8]) -> TermreelResult<Self> {
        let (w, h) = canvas_u16(canvas)?;
        let mut text = TextLayoutEngine::new();
        let font = text.register(font_bytes)?;
        Ok(Self {
            canvas,
            ctx: Some(vello_cpu::RenderContext::new(w, h)),
            pixmap: vello_cpu::Pixmap::new(w, h),
            text,
            font,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Render one frame through `draw` and read it back.
    pub fn render_frame(
        &mut self,
        draw: impl FnOnce(&mut Painter<'_>) -> TermreelResult<()>,
    ) -> TermreelResult<FrameRgba> {
        let (w, h) = canvas_u16(self.canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let result = {
            let mut painter = Painter {
                ctx: &mut ctx,
                text: &mut self.text,
                font: &self.font,
                canvas: self.canvas,
            };
            draw(&mut painter)
        };
        if let Err(e) = result {
            self.ctx = Some(ctx);
            return Err(e);
        }

        ctx.flush();
        self.pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRgba {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Per-frame drawing surface handed to scene code.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    text: &'a mut TextLayoutEngine,
    font: &'a LoadedFont,
    canvas: Canvas,
}

impl Painter<'_> {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Fill the whole canvas with `color`.
    pub fn clear(&mut self, color: Rgba8) {
        self.fill_rect(
            Rect::new(
                0.0,
                0.0,
                f64::from(self.canvas.width),
                f64::from(self.canvas.height),
            ),
            color,
        );
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_color(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Axis-aligned rectangle outline, drawn as four filled strips inset from
    /// the rect edges.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
        self.fill_rect(Rect::new(x0, y0, x1, y0 + width), color);
        self.fill_rect(Rect::new(x0, y1 - width, x1, y1), color);
        self.fill_rect(Rect::new(x0, y0 + width, x0 + width, y1 - width), color);
        self.fill_rect(Rect::new(x1 - width, y0 + width, x1, y1 - width), color);
    }

    /// Double-line frame: 2px outer outline plus a 1px outline inset by 4px.
    pub fn double_frame(&mut self, rect: Rect, color: Rgba8) {
        self.stroke_rect(rect, 2.0, color);
        self.stroke_rect(
            Rect::new(rect.x0 + 4.0, rect.y0 + 4.0, rect.x1 - 4.0, rect.y1 - 4.0),
            1.0,
            color,
        );
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        let circle = kurbo::Circle::new(center, radius);
        let mut path = vello_cpu::kurbo::BezPath::new();
        for el in circle.path_elements(0.1) {
            push_el(&mut path, el);
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint_color(color));
        self.ctx.fill_path(&path);
    }

    /// Draw `text` with its layout box's top-left at `origin`; returns the
    /// advance width.
    pub fn text(
        &mut self,
        origin: Point,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> TermreelResult<f64> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.text.layout_plain(text, self.font, size_px, brush)?;

        self.ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x, origin.y,
        )));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&self.font.data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(f64::from(layout.width()))
    }

    /// Advance width of `text` at `size_px` without drawing.
    pub fn measure(&mut self, text: &str, size_px: f32) -> TermreelResult<f64> {
        self.text.measure(text, self.font, size_px)
    }

    /// Laid-out (width, height) of `text` at `size_px` without drawing.
    pub fn measure_size(&mut self, text: &str, size_px: f32) -> TermreelResult<(f64, f64)> {
        self.text.measure_size(text, self.font, size_px)
    }
}

fn canvas_u16(canvas: Canvas) -> TermreelResult<(u16, u16)> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(TermreelError::validation(
            "canvas width/height must be > 0",
        ));
    }
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| TermreelError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| TermreelError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn push_el(path: &mut vello_cpu::kurbo::BezPath, el: kurbo::PathEl) {
    use kurbo::PathEl;
    match el {
        PathEl::MoveTo(p) => path.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
        PathEl::LineTo(p) => path.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
        PathEl::QuadTo(p1, p2) => path.quad_to(
            vello_cpu::kurbo::Point::new(p1.x, p1.y),
            vello_cpu::kurbo::Point::new(p2.x, p2.y),
        ),
        PathEl::CurveTo(p1, p2, p3) => path.curve_to(
            vello_cpu::kurbo::Point::new(p1.x, p1.y),
            vello_cpu::kurbo::Point::new(p2.x, p2.y),
            vello_cpu::kurbo::Point::new(p3.x, p3.y),
        ),
        PathEl::ClosePath => path.close_path(),
    }
}
