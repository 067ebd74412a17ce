//! Hand-authored scenes.
//!
//! A scene owns its canvas, frame rate, and timeline, and draws any frame in
//! `[0, total_frames)` on demand. Scenes are deterministic: the same frame
//! index always produces the same pixels.

pub mod demo;
pub mod title;

pub use demo::DemoReel;
pub use title::TitleCard;

use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::TermreelResult;
use crate::render::Painter;

pub trait Scene {
    fn canvas(&self) -> Canvas;
    fn fps(&self) -> Fps;
    fn total_frames(&self) -> u64;
    fn draw(&self, frame: FrameIndex, painter: &mut Painter<'_>) -> TermreelResult<()>;
}
