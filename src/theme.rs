//! Named colors for the rendered artwork.
//!
//! Two families: the shared terminal palette, and per-scene accents (the demo
//! reel uses saturated command colors, the title card uses muted badge
//! colors so the stacked windows read calmly).

use crate::foundation::core::Rgba8;

// Terminal chrome.
pub const TERMINAL_BG: Rgba8 = Rgba8::opaque(24, 24, 28);
pub const BANNER_BG: Rgba8 = Rgba8::opaque(32, 32, 36);
pub const TEXT_WHITE: Rgba8 = Rgba8::opaque(230, 230, 230);
pub const DIM_GRAY: Rgba8 = Rgba8::opaque(70, 70, 70);
pub const FRAME_GRAY: Rgba8 = Rgba8::opaque(60, 60, 65);
pub const PROMPT_GRAY: Rgba8 = Rgba8::opaque(140, 140, 140);
pub const WINDOW_BORDER: Rgba8 = Rgba8::opaque(80, 80, 85);
pub const HINT_GRAY: Rgba8 = Rgba8::opaque(70, 70, 70);

// Demo-reel command accents (vibrant, saturated).
pub const ACCENT_GREEN: Rgba8 = Rgba8::opaque(0, 255, 100);
pub const ACCENT_ORANGE: Rgba8 = Rgba8::opaque(255, 160, 80);
pub const ACCENT_PURPLE: Rgba8 = Rgba8::opaque(200, 120, 255);
pub const ACCENT_BLUE: Rgba8 = Rgba8::opaque(0, 160, 255);

// Title-card badges (muted).
pub const BADGE_GREEN: Rgba8 = Rgba8::opaque(135, 175, 95);
pub const BADGE_ORANGE: Rgba8 = Rgba8::opaque(215, 135, 95);
pub const BADGE_PURPLE: Rgba8 = Rgba8::opaque(175, 135, 195);
pub const BADGE_BLUE: Rgba8 = Rgba8::opaque(95, 175, 215);
pub const BADGE_TEXT: Rgba8 = Rgba8::opaque(20, 20, 20);

// Mac-style traffic lights.
pub const TRAFFIC_RED: Rgba8 = Rgba8::opaque(255, 95, 86);
pub const TRAFFIC_AMBER: Rgba8 = Rgba8::opaque(255, 189, 46);
pub const TRAFFIC_GREEN: Rgba8 = Rgba8::opaque(39, 201, 63);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_survive_fade_scaling() {
        // A mid-fade banner scales its accent; channels must stay in range
        // and alpha must stay opaque.
        for c in [ACCENT_GREEN, ACCENT_ORANGE, ACCENT_PURPLE, ACCENT_BLUE] {
            for step in 0..=12 {
                let scaled = c.scaled(step as f64 / 12.0 * 3.0);
                assert_eq!(scaled.a, 255);
            }
            assert_eq!(c.scaled(1.0), c);
            assert_eq!(c.scaled(0.0), Rgba8::opaque(0, 0, 0));
        }
    }
}
