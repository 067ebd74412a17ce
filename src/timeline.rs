//! The hand-authored animation timeline.
//!
//! A [`Timeline`] is a literal table of frame-index breakpoints partitioning
//! the animation into a title card followed by command segments. Each segment
//! has a typing phase (prompt text revealed up to `type_end`), a banner phase
//! (fade-in from `banner_start`), and a hold (until `hold_end`, exclusive).
//! [`Timeline::stage_at`] is the pure mapping from a frame index to the active
//! stage and its progress fractions.

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::foundation::math::clamp01;

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// Absolute frame where the typing phase completes.
    pub type_end: FrameIndex,
    /// Absolute frame where the banner starts fading in.
    pub banner_start: FrameIndex,
    /// Exclusive end of the segment.
    pub hold_end: FrameIndex,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Exclusive end of the leading title card (0 for no title card).
    pub title_card_end: FrameIndex,
    /// Frames over which a banner fades from 0 to full progress.
    pub banner_fade_frames: u64,
    /// Command segments, in timeline order. Segment `i` starts where segment
    /// `i - 1` ends (or at `title_card_end` for the first).
    pub segments: Vec<Segment>,
}

/// The stage a single frame falls in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    TitleCard,
    Command {
        /// Index into [`Timeline::segments`].
        segment: usize,
        /// Typing progress, clamped to `[0, 1]`.
        typing: f64,
        /// Banner fade progress once the banner phase began. Not capped at
        /// 1.0: values above 1 mean the banner is holding at full strength.
        banner: Option<f64>,
    },
}

impl Timeline {
    /// Total frame count; equals the final segment's `hold_end` (or the title
    /// card end when there are no segments).
    pub fn total_frames(&self) -> u64 {
        self.segments
            .last()
            .map(|s| s.hold_end.0)
            .unwrap_or(self.title_card_end.0)
    }

    /// Absolute start frame of segment `i`.
    pub fn segment_start(&self, i: usize) -> FrameIndex {
        if i == 0 {
            self.title_card_end
        } else {
            self.segments[i - 1].hold_end
        }
    }

    /// Breakpoints must be strictly increasing across the whole timeline:
    /// `start < type_end < banner_start < hold_end` for every segment.
    pub fn validate(&self) -> TermreelResult<()> {
        if self.banner_fade_frames == 0 {
            return Err(TermreelError::validation("banner_fade_frames must be > 0"));
        }
        if self.total_frames() == 0 {
            return Err(TermreelError::validation("timeline must cover > 0 frames"));
        }

        for (i, seg) in self.segments.iter().enumerate() {
            let start = self.segment_start(i);
            if !(start.0 < seg.type_end.0
                && seg.type_end.0 < seg.banner_start.0
                && seg.banner_start.0 < seg.hold_end.0)
            {
                return Err(TermreelError::validation(format!(
                    "segment {i} breakpoints must be strictly increasing \
                     (start {} < type_end {} < banner_start {} < hold_end {})",
                    start.0, seg.type_end.0, seg.banner_start.0, seg.hold_end.0
                )));
            }
        }

        Ok(())
    }

    /// Map a frame index to its stage. Returns `None` for frames at or past
    /// [`Timeline::total_frames`].
    pub fn stage_at(&self, frame: FrameIndex) -> Option<Stage> {
        let f = frame.0;
        if f >= self.total_frames() {
            return None;
        }
        if f < self.title_card_end.0 {
            return Some(Stage::TitleCard);
        }

        // Segments are sorted by hold_end; find the first one still open.
        let i = self.segments.partition_point(|s| s.hold_end.0 <= f);
        let seg = &self.segments[i];
        let start = self.segment_start(i);

        let type_frames = seg.type_end.0.saturating_sub(start.0);
        let typing = if type_frames == 0 {
            1.0
        } else {
            clamp01((f - start.0) as f64 / type_frames as f64)
        };

        let banner = (f >= seg.banner_start.0)
            .then(|| (f - seg.banner_start.0) as f64 / self.banner_fade_frames as f64);

        Some(Stage::Command {
            segment: i,
            typing,
            banner,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_timeline() -> Timeline {
        Timeline {
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
            ],
        }
    }

    #[test]
    fn total_frames_is_last_breakpoint() {
        assert_eq!(basic_timeline().total_frames(), 110);
    }

    #[test]
    fn validate_accepts_monotonic_breakpoints() {
        basic_timeline().validate().unwrap();
    }

    #[test]
    fn validate_rejects_non_monotonic_breakpoints() {
        let mut tl = basic_timeline();
        tl.segments[0].banner_start = FrameIndex(41); // before type_end
        assert!(tl.validate().is_err());

        let mut tl = basic_timeline();
        tl.segments[1].type_end = FrameIndex(60); // before segment start (70)
        assert!(tl.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_fade() {
        let mut tl = basic_timeline();
        tl.banner_fade_frames = 0;
        assert!(tl.validate().is_err());
    }

    #[test]
    fn title_card_frames_map_to_title_stage() {
        let tl = basic_timeline();
        assert_eq!(tl.stage_at(FrameIndex(0)), Some(Stage::TitleCard));
        assert_eq!(tl.stage_at(FrameIndex(29)), Some(Stage::TitleCard));
        assert!(!matches!(tl.stage_at(FrameIndex(30)), Some(Stage::TitleCard)));
    }

    #[test]
    fn stage_at_is_none_past_the_end() {
        let tl = basic_timeline();
        assert!(tl.stage_at(FrameIndex(110)).is_none());
        assert!(tl.stage_at(FrameIndex(1000)).is_none());
    }

    #[test]
    fn typing_progress_is_monotonic_and_clamped() {
        let tl = basic_timeline();
        let mut prev = [0.0f64; 2];
        for f in 30..110 {
            let Some(Stage::Command {
                segment, typing, ..
            }) = tl.stage_at(FrameIndex(f))
            else {
                panic!("frame {f} should be a command stage");
            };
            assert!((0.0..=1.0).contains(&typing), "typing out of range at {f}");
            assert!(
                typing >= prev[segment],
                "typing regressed at frame {f} (segment {segment})"
            );
            prev[segment] = typing;
        }
        // Typing completes exactly at the segment's type_end.
        let Some(Stage::Command { typing, .. }) = tl.stage_at(FrameIndex(42)) else {
            panic!()
        };
        assert_eq!(typing, 1.0);
    }

    #[test]
    fn banner_starts_at_banner_start() {
        let tl = basic_timeline();
        let Some(Stage::Command { banner, .. }) = tl.stage_at(FrameIndex(43)) else {
            panic!()
        };
        assert!(banner.is_none());

        let Some(Stage::Command { banner, .. }) = tl.stage_at(FrameIndex(44)) else {
            panic!()
        };
        assert_eq!(banner, Some(0.0));

        // Holding past the fade window keeps progressing above 1.0.
        let Some(Stage::Command { banner, .. }) = tl.stage_at(FrameIndex(69)) else {
            panic!()
        };
        assert!(banner.unwrap() > 1.0);
    }

    #[test]
    fn second_segment_types_from_its_own_start() {
        let tl = basic_timeline();
        let Some(Stage::Command {
            segment, typing, ..
        }) = tl.stage_at(FrameIndex(70))
        else {
            panic!()
        };
        assert_eq!(segment, 1);
        assert_eq!(typing, 0.0);
    }

    #[test]
    fn json_roundtrip() {
        let tl = basic_timeline();
        let s = serde_json::to_string(&tl).unwrap();
        let de: Timeline = serde_json::from_str(&s).unwrap();
        assert_eq!(de.total_frames(), tl.total_frames());
        assert_eq!(de.segments.len(), 2);
    }
}
