//! The animated demo reel: a title card, then four slash commands typed onto
//! a prompt line, each answered by a fading completion banner.

use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgba8};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::Painter;
use crate::scene::Scene;
use crate::theme;
use crate::timeline::{Segment, Stage, Timeline};
use crate::typing::TypedCommand;

const WIDTH: u32 = 560;
const HEIGHT: u32 = 280;
const FPS: u32 = 15;

const FONT_SIZE: f32 = 14.0;
const FONT_SIZE_LARGE: f32 = 18.0;
const FONT_SIZE_SMALL: f32 = 12.0;

// Prompt line geometry.
const PROMPT: &str = "> ";
const PROMPT_X: f64 = 30.0;
const PROMPT_Y: f64 = 25.0;

// Banner geometry.
const BANNER_WIDTH: f64 = 420.0;
const BANNER_BORDER: f64 = 6.0;

/// Completion banner shown after a command finishes typing.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BannerSpec {
    pub title: String,
    pub accent: Rgba8,
    /// Message lines under the title; the first is prominent (white), the
    /// rest dim. Fade in sequentially.
    pub messages: Vec<String>,
    /// Compact banners are a single centered title line.
    pub compact: bool,
}

/// One command segment: the typed command plus its banner.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SegmentSpec {
    pub command: TypedCommand,
    pub banner: BannerSpec,
}

pub struct DemoReel {
    canvas: Canvas,
    fps: Fps,
    timeline: Timeline,
    title: String,
    hint: String,
    segments: Vec<SegmentSpec>,
}

impl DemoReel {
    /// The session-plugin reel: restart, fork, spawn, id.
    pub fn new() -> TermreelResult<Self> {
        let timeline = Timeline {
            title_card_end: FrameIndex(30),
            banner_fade_frames: 12,
            segments: vec![
                Segment {
                    type_end: FrameIndex(42),
                    banner_start: FrameIndex(44),
                    hold_end: FrameIndex(70),
                },
                Segment {
                    type_end: FrameIndex(82),
                    banner_start: FrameIndex(84),
                    hold_end: FrameIndex(110),
                },
                Segment {
                    type_end: FrameIndex(122),
                    banner_start: FrameIndex(124),
                    hold_end: FrameIndex(150),
                },
                Segment {
                    type_end: FrameIndex(158),
                    banner_start: FrameIndex(160),
                    hold_end: FrameIndex(180),
                },
            ],
        };

        let segments = vec![
            SegmentSpec {
                command: TypedCommand::new("/session:", "restart"),
                banner: BannerSpec {
                    title: "✓  SESSION RESUMED".to_string(),
                    accent: theme::ACCENT_GREEN,
                    messages: vec!["Continuing in new tab".to_string()],
                    compact: false,
                },
            },
            SegmentSpec {
                command: TypedCommand::new("/session:", "fork"),
                banner: BannerSpec {
                    title: "⑂  SESSION FORKED".to_string(),
                    accent: theme::ACCENT_ORANGE,
                    messages: vec![
                        "Prompt: Fix the auth bug we discussed...".to_string(),
                        "New branch opened in new tab".to_string(),
                    ],
                    compact: false,
                },
            },
            SegmentSpec {
                command: TypedCommand::new("/session:", "spawn"),
                banner: BannerSpec {
                    title: "✦  SESSION SPAWNED".to_string(),
                    accent: theme::ACCENT_PURPLE,
                    messages: vec![
                        "Prompt: Build the new API endpoint...".to_string(),
                        "Fresh session opened in new tab".to_string(),
                    ],
                    compact: false,
                },
            },
            SegmentSpec {
                command: TypedCommand::new("/session:", "id"),
                banner: BannerSpec {
                    title: "SESSION ID: 01JGK7XYZABC123".to_string(),
                    accent: theme::ACCENT_BLUE,
                    messages: Vec::new(),
                    compact: true,
                },
            },
        ];

        Self::with_parts(timeline, segments)
    }

    pub fn with_parts(
        timeline: Timeline,
        segments: Vec<SegmentSpec>,
    ) -> TermreelResult<Self> {
        timeline.validate()?;
        if timeline.segments.len() != segments.len() {
            return Err(TermreelError::validation(format!(
                "timeline has {} segments but {} segment specs were provided",
                timeline.segments.len(),
                segments.len()
            )));
        }
        Ok(Self {
            canvas: Canvas::new(WIDTH, HEIGHT)?,
            fps: Fps::new(FPS, 1)?,
            timeline,
            title: "/session:*".to_string(),
            hint: "Right-click → Play Animation".to_string(),
            segments,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    fn draw_title_card(&self, painter: &mut Painter<'_>) -> TermreelResult<()> {
        let w = f64::from(WIDTH);
        let h = f64::from(HEIGHT);
        painter.double_frame(Rect::new(30.0, 20.0, w - 30.0, h - 20.0), theme::FRAME_GRAY);

        let title_w = painter.measure(&self.title, FONT_SIZE_LARGE)?;
        painter.text(
            Point::new((w - title_w) / 2.0, h / 2.0 - 20.0),
            &self.title,
            FONT_SIZE_LARGE,
            theme::ACCENT_ORANGE,
        )?;

        let hint_w = painter.measure(&self.hint, FONT_SIZE_SMALL)?;
        painter.text(
            Point::new(w - 50.0 - hint_w, h - 55.0),
            &self.hint,
            FONT_SIZE_SMALL,
            theme::DIM_GRAY,
        )?;
        Ok(())
    }

    fn draw_prompt_line(
        &self,
        painter: &mut Painter<'_>,
        command: &TypedCommand,
        typing: f64,
    ) -> TermreelResult<()> {
        let prompt_w = painter.text(
            Point::new(PROMPT_X, PROMPT_Y),
            PROMPT,
            FONT_SIZE,
            theme::PROMPT_GRAY,
        )?;

        let visible = command.visible(typing);
        let visible_w = painter.text(
            Point::new(PROMPT_X + prompt_w, PROMPT_Y),
            &visible,
            FONT_SIZE,
            theme::TEXT_WHITE,
        )?;

        // Cursor block while still typing.
        if typing < 1.0 {
            let cursor_x = PROMPT_X + prompt_w + visible_w;
            painter.fill_rect(
                Rect::new(cursor_x, PROMPT_Y + 2.0, cursor_x + 8.0, PROMPT_Y + 14.0),
                theme::TEXT_WHITE,
            );
        }
        Ok(())
    }

    fn draw_banner(
        &self,
        painter: &mut Painter<'_>,
        banner: &BannerSpec,
        progress: f64,
    ) -> TermreelResult<()> {
        if progress <= 0.0 {
            return Ok(());
        }
        let w = f64::from(WIDTH);
        let alpha = (progress * 3.0).min(1.0);
        let accent = banner.accent.scaled(alpha);

        let banner_x = (w - BANNER_WIDTH) / 2.0;
        let (banner_y, banner_h, title_size, title_dy) = if banner.compact {
            (80.0, 50.0, FONT_SIZE, 16.0)
        } else {
            (55.0, 130.0, FONT_SIZE_LARGE, 25.0)
        };

        // Colored border drawn as a filled box with an inset background fill.
        painter.fill_rect(
            Rect::new(banner_x, banner_y, banner_x + BANNER_WIDTH, banner_y + banner_h),
            accent,
        );
        painter.fill_rect(
            Rect::new(
                banner_x + BANNER_BORDER,
                banner_y + BANNER_BORDER,
                banner_x + BANNER_WIDTH - BANNER_BORDER,
                banner_y + banner_h - BANNER_BORDER,
            ),
            theme::BANNER_BG,
        );

        let title_w = painter.measure(&banner.title, title_size)?;
        painter.text(
            Point::new((w - title_w) / 2.0, banner_y + title_dy),
            &banner.title,
            title_size,
            accent,
        )?;

        // Message lines fade in sequentially once the banner is mostly up.
        if !banner.compact && !banner.messages.is_empty() && progress > 0.3 {
            let mut line_y = banner_y + 60.0;
            for (i, msg) in banner.messages.iter().enumerate() {
                let msg_alpha = ((progress - 0.3 - i as f64 * 0.15) * 3.0).min(1.0);
                if msg_alpha > 0.0 {
                    let color = if i == 0 {
                        theme::TEXT_WHITE.scaled(msg_alpha)
                    } else {
                        line_y += 8.0; // extra spacing before the dim line
                        theme::DIM_GRAY.scaled(msg_alpha)
                    };
                    let msg_w = painter.measure(msg, FONT_SIZE_SMALL)?;
                    painter.text(
                        Point::new((w - msg_w) / 2.0, line_y),
                        msg,
                        FONT_SIZE_SMALL,
                        color,
                    )?;
                }
                line_y += 18.0;
            }
        }
        Ok(())
    }
}

impl Scene for DemoReel {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fps(&self) -> Fps {
        self.fps
    }

    fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    fn draw(&self, frame: FrameIndex, painter: &mut Painter<'_>) -> TermreelResult<()> {
        let stage = self.timeline.stage_at(frame).ok_or_else(|| {
            TermreelError::validation(format!(
                "frame {} is outside the timeline (total {})",
                frame.0,
                self.timeline.total_frames()
            ))
        })?;

        painter.clear(theme::TERMINAL_BG);
        match stage {
            Stage::TitleCard => self.draw_title_card(painter),
            Stage::Command {
                segment,
                typing,
                banner,
            } => {
                let spec = &self.segments[segment];
                self.draw_prompt_line(painter, &spec.command, typing)?;
                if let Some(progress) = banner {
                    self.draw_banner(painter, &spec.banner, progress)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reel_covers_180_frames() {
        let reel = DemoReel::new().unwrap();
        assert_eq!(reel.total_frames(), 180);
        assert_eq!(reel.canvas().width, 560);
        assert_eq!(reel.canvas().height, 280);
        assert_eq!(reel.fps().num, 15);
    }

    #[test]
    fn timeline_and_specs_must_agree() {
        let reel = DemoReel::new().unwrap();
        let mut timeline = reel.timeline().clone();
        timeline.segments.pop();
        let segments = vec![]; // wrong length
        assert!(DemoReel::with_parts(timeline, segments).is_err());
    }

    #[test]
    fn every_frame_maps_to_a_stage() {
        let reel = DemoReel::new().unwrap();
        for f in 0..reel.total_frames() {
            assert!(reel.timeline().stage_at(FrameIndex(f)).is_some());
        }
        assert!(
            reel.timeline()
                .stage_at(FrameIndex(reel.total_frames()))
                .is_none()
        );
    }
}
