//! Termreel renders terminal-mockup README artwork frame by frame and
//! encodes it as animated GIF and PNG.
//!
//! The pieces compose in one direction:
//!
//! - A [`Scene`] (the demo reel or the title card) owns a literal
//!   [`timeline::Timeline`] and draws any frame on demand.
//! - A [`Renderer`] rasterizes frames on the CPU via a [`render::Painter`].
//! - [`render_to_sink`] streams the frames into a [`FrameSink`]
//!   ([`GifSink`], or [`encode::png::write_png`] for stills).
#![forbid(unsafe_code)]

mod foundation;

pub mod encode;
pub mod render;
pub mod scene;
pub mod text;
pub mod theme;
pub mod timeline;
pub mod typing;

pub use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8};
pub use crate::foundation::error::{TermreelError, TermreelResult};

pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::encode::{RenderStats, render_range_to_sink, render_to_sink};
pub use crate::render::{FrameRgba, Painter, Renderer};
pub use crate::scene::{DemoReel, Scene, TitleCard};
pub use crate::text::FontSpec;
