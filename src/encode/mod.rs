//! Encoding sinks and the sequential render driver.
//!
//! Sinks consume rendered frames in timeline order; [`render_to_sink`] drives
//! a [`Scene`] through a [`Renderer`] into any [`FrameSink`].

/// Animated GIF sink.
pub mod gif;
/// Single-frame PNG output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::Renderer;
use crate::scene::Scene;

/// Summary of one completed render.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderStats {
    /// Frames rendered and pushed to the sink.
    pub frames_total: u64,
}

/// Render every frame of `scene` in order into `sink`.
pub fn render_to_sink(
    scene: &dyn Scene,
    renderer: &mut Renderer,
    sink: &mut dyn FrameSink,
) -> TermreelResult<RenderStats> {
    let range = FrameRange::new(FrameIndex(0), FrameIndex(scene.total_frames()))?;
    render_range_to_sink(scene, range, renderer, sink)
}

/// Render `range` of `scene` into `sink`.
///
/// Useful when iterating on one stage of a reel without re-encoding the
/// whole thing.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_range_to_sink(
    scene: &dyn Scene,
    range: FrameRange,
    renderer: &mut Renderer,
    sink: &mut dyn FrameSink,
) -> TermreelResult<RenderStats> {
    let canvas = scene.canvas();
    if canvas != renderer.canvas() {
        return Err(TermreelError::validation(format!(
            "scene canvas {}x{} does not match renderer canvas {}x{}",
            canvas.width,
            canvas.height,
            renderer.canvas().width,
            renderer.canvas().height
        )));
    }
    if range.is_empty() {
        return Err(TermreelError::validation("render range must be non-empty"));
    }
    if range.end.0 > scene.total_frames() {
        return Err(TermreelError::validation(format!(
            "render range [{}, {}) exceeds scene duration {}",
            range.start.0,
            range.end.0,
            scene.total_frames()
        )));
    }

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: scene.fps(),
    })?;

    for f in range.start.0..range.end.0 {
        let idx = FrameIndex(f);
        let frame = renderer.render_frame(|painter| scene.draw(idx, painter))?;
        sink.push_frame(idx, &frame)?;
    }

    sink.end()?;
    tracing::debug!(frames = range.len_frames(), "render complete");
    Ok(RenderStats {
        frames_total: range.len_frames(),
    })
}
