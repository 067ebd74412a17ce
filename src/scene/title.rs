//! The static title card: four stacked terminal windows with traffic lights
//! and command badges, held for a fixed number of frames.

use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rect, Rgba8};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::Painter;
use crate::scene::Scene;
use crate::theme;

const WIDTH: u32 = 560;
const HEIGHT: u32 = 280;
const FPS: u32 = 10;
const HOLD_FRAMES: u64 = 30;

const FONT_SIZE: f32 = 14.0;
const FONT_SIZE_CAPTION: f32 = 32.0;
const FONT_SIZE_SMALL: f32 = 11.0;

const WINDOW_HEIGHT: f64 = 120.0;
const BORDER_WIDTH: f64 = 2.0;

const TRAFFIC_RADIUS: f64 = 5.0;
const TRAFFIC_SPACING: f64 = 16.0;

const BADGE_PAD_X: f64 = 8.0;
const BADGE_PAD_Y: f64 = 4.0;

/// One mockup terminal window in the stack.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct WindowSpec {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Badge label, e.g. `"/restart"`.
    pub title: String,
    pub badge: Rgba8,
    /// Closed windows draw all four edges; open ones run off the bottom of
    /// the canvas (they sit behind the next window in the stack).
    pub closed: bool,
}

pub struct TitleCard {
    canvas: Canvas,
    fps: Fps,
    hold_frames: u64,
    caption: String,
    hint: String,
    windows: Vec<WindowSpec>,
}

impl TitleCard {
    /// The session-plugin title card.
    pub fn new() -> TermreelResult<Self> {
        let windows = vec![
            WindowSpec {
                x: 20.0,
                y: 20.0,
                width: 420.0,
                title: "/restart".to_string(),
                badge: theme::BADGE_GREEN,
                closed: false,
            },
            WindowSpec {
                x: 50.0,
                y: 55.0,
                width: 420.0,
                title: "/fork".to_string(),
                badge: theme::BADGE_ORANGE,
                closed: false,
            },
            WindowSpec {
                x: 80.0,
                y: 90.0,
                width: 420.0,
                title: "/spawn".to_string(),
                badge: theme::BADGE_PURPLE,
                closed: false,
            },
            WindowSpec {
                x: 110.0,
                y: 125.0,
                width: 420.0,
                title: "/id".to_string(),
                badge: theme::BADGE_BLUE,
                closed: true,
            },
        ];

        Self::with_windows(windows, HOLD_FRAMES)
    }

    pub fn with_windows(windows: Vec<WindowSpec>, hold_frames: u64) -> TermreelResult<Self> {
        if hold_frames == 0 {
            return Err(TermreelError::validation("hold_frames must be > 0"));
        }
        if windows.is_empty() {
            return Err(TermreelError::validation(
                "title card needs at least one window",
            ));
        }
        Ok(Self {
            canvas: Canvas::new(WIDTH, HEIGHT)?,
            fps: Fps::new(FPS, 1)?,
            hold_frames,
            caption: "SESSION PLUGIN".to_string(),
            hint: "right click > Play Animation".to_string(),
            windows,
        })
    }

    fn draw_window(&self, painter: &mut Painter<'_>, win: &WindowSpec) -> TermreelResult<()> {
        let h = f64::from(HEIGHT);
        if win.closed {
            painter.stroke_rect(
                Rect::new(win.x, win.y, win.x + win.width, win.y + WINDOW_HEIGHT),
                BORDER_WIDTH,
                theme::WINDOW_BORDER,
            );
        } else {
            // Open bottom: top edge plus both sides running off the canvas.
            painter.fill_rect(
                Rect::new(win.x, win.y, win.x + win.width, win.y + BORDER_WIDTH),
                theme::WINDOW_BORDER,
            );
            painter.fill_rect(
                Rect::new(win.x, win.y, win.x + BORDER_WIDTH, h),
                theme::WINDOW_BORDER,
            );
            painter.fill_rect(
                Rect::new(win.x + win.width - BORDER_WIDTH, win.y, win.x + win.width, h),
                theme::WINDOW_BORDER,
            );
        }

        self.draw_traffic_lights(painter, win.x + 20.0, win.y + 18.0);
        self.draw_badge(painter, win.x + 70.0, win.y + 8.0, &win.title, win.badge)?;
        Ok(())
    }

    fn draw_traffic_lights(&self, painter: &mut Painter<'_>, x: f64, y: f64) {
        for (i, color) in [theme::TRAFFIC_RED, theme::TRAFFIC_AMBER, theme::TRAFFIC_GREEN]
            .into_iter()
            .enumerate()
        {
            let cx = x + i as f64 * TRAFFIC_SPACING;
            painter.fill_circle(Point::new(cx, y), TRAFFIC_RADIUS, color);
        }
    }

    fn draw_badge(
        &self,
        painter: &mut Painter<'_>,
        x: f64,
        y: f64,
        text: &str,
        color: Rgba8,
    ) -> TermreelResult<f64> {
        let (text_w, text_h) = painter.measure_size(text, FONT_SIZE)?;
        let badge_w = text_w + BADGE_PAD_X * 2.0;
        let badge_h = text_h + BADGE_PAD_Y * 2.0;

        painter.fill_rect(Rect::new(x, y, x + badge_w, y + badge_h), color);
        painter.text(
            Point::new(x + BADGE_PAD_X, y + BADGE_PAD_Y - 2.0),
            text,
            FONT_SIZE,
            theme::BADGE_TEXT,
        )?;
        Ok(badge_w)
    }
}

impl Scene for TitleCard {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn fps(&self) -> Fps {
        self.fps
    }

    fn total_frames(&self) -> u64 {
        self.hold_frames
    }

    fn draw(&self, frame: FrameIndex, painter: &mut Painter<'_>) -> TermreelResult<()> {
        if frame.0 >= self.hold_frames {
            return Err(TermreelError::validation(format!(
                "frame {} is outside the hold range (total {})",
                frame.0, self.hold_frames
            )));
        }

        let h = f64::from(HEIGHT);
        painter.clear(theme::TERMINAL_BG);

        // Back to front; a closed window blanks the region behind it first.
        for win in &self.windows {
            if win.closed {
                painter.fill_rect(
                    Rect::new(
                        win.x + BORDER_WIDTH,
                        win.y + BORDER_WIDTH,
                        win.x + win.width - BORDER_WIDTH,
                        win.y + WINDOW_HEIGHT,
                    ),
                    theme::TERMINAL_BG,
                );
            }
            self.draw_window(painter, win)?;
        }

        // Caption centered in the front window.
        let front = self
            .windows
            .last()
            .expect("with_windows guarantees at least one window");
        let caption_w = painter.measure(&self.caption, FONT_SIZE_CAPTION)?;
        painter.text(
            Point::new(front.x + (front.width - caption_w) / 2.0, 185.0),
            &self.caption,
            FONT_SIZE_CAPTION,
            theme::TEXT_WHITE,
        )?;

        painter.text(
            Point::new(15.0, h - 20.0),
            &self.hint,
            FONT_SIZE_SMALL,
            theme::HINT_GRAY,
        )?;

        Ok(())
    }
}
