//! Font loading and text layout.
//!
//! Fonts are loaded from an ordered candidate list of system paths (primary
//! monospace font first, fallbacks after), and laid out with Parley. Layouts
//! are single-style plain text; the scenes only need advance widths and
//! positioned glyphs.

use std::path::PathBuf;

use crate::foundation::error::{TermreelError, TermreelResult};

/// Ordered candidate font files; the first one that exists wins.
#[derive(Clone, Debug)]
pub struct FontSpec {
    pub candidates: Vec<PathBuf>,
}

impl FontSpec {
    /// Monospace candidates across the platforms this tool runs on.
    pub fn monospace_defaults() -> Self {
        Self {
            candidates: [
                "/System/Library/Fonts/SFMono-Regular.otf",
                "/System/Library/Fonts/Menlo.ttc",
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
                "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }

    /// Try `path` before the existing candidates.
    pub fn with_primary(mut self, path: impl Into<PathBuf>) -> Self {
        self.candidates.insert(0, path.into());
        self
    }

    /// Read the bytes of the first candidate that exists.
    pub fn load(&self) -> TermreelResult<Vec<u8>> {
        for p in &self.candidates {
            if p.is_file() {
                return std::fs::read(p).map_err(|e| {
                    TermreelError::font(format!("failed to read font '{}': {e}", p.display()))
                });
            }
        }
        Err(TermreelError::font(format!(
            "no usable font found; tried: {}",
            self.candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A font registered for both layout (Parley) and glyph drawing (vello_cpu).
#[derive(Clone)]
pub struct LoadedFont {
    pub(crate) data: vello_cpu::peniko::FontData,
    pub(crate) family_name: String,
}

impl LoadedFont {
    pub fn family_name(&self) -> &str {
        &self.family_name
    }
}

/// Stateful helper for building Parley text layouts.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Register raw font bytes once and return a handle usable for layout and
    /// glyph drawing.
    pub fn register(&mut self, font_bytes: &[u8]) -> TermreelResult<LoadedFont> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            TermreelError::font("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TermreelError::font("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
            0,
        );
        Ok(LoadedFont { data, family_name })
    }

    /// Shape and lay out plain single-style text.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> TermreelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TermreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Advance width of `text` at `size_px`, in pixels.
    pub fn measure(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
    ) -> TermreelResult<f64> {
        Ok(self.measure_size(text, font, size_px)?.0)
    }

    /// Laid-out (width, height) of `text` at `size_px`, in pixels.
    pub fn measure_size(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
    ) -> TermreelResult<(f64, f64)> {
        let layout = self.layout_plain(text, font, size_px, TextBrushRgba8::default())?;
        Ok((f64::from(layout.width()), f64::from(layout.height())))
    }
}

/// Resolve a [`FontSpec`] into a registered font, or `None` when no candidate
/// exists on this machine (used by tests to skip gracefully).
pub fn try_resolve(spec: &FontSpec, engine: &mut TextLayoutEngine) -> Option<LoadedFont> {
    let bytes = spec.load().ok()?;
    engine.register(&bytes).ok()
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_primary_prepends() {
        let spec = FontSpec::monospace_defaults().with_primary("/tmp/custom.ttf");
        assert_eq!(spec.candidates[0], PathBuf::from("/tmp/custom.ttf"));
        assert!(spec.candidates.len() > 1);
    }

    #[test]
    fn load_fails_when_no_candidate_exists() {
        let spec = FontSpec {
            candidates: vec![PathBuf::from("/definitely/not/a/font.otf")],
        };
        let err = spec.load().unwrap_err();
        assert!(err.to_string().contains("no usable font"));
    }

    #[test]
    fn layout_rejects_bad_size() {
        let mut engine = TextLayoutEngine::new();
        let Some(font) = try_resolve(&FontSpec::monospace_defaults(), &mut engine) else {
            eprintln!("skipping: no system monospace font available");
            return;
        };
        assert!(engine.layout_plain("x", &font, 0.0, TextBrushRgba8::default()).is_err());
        assert!(
            engine
                .layout_plain("x", &font, f32::NAN, TextBrushRgba8::default())
                .is_err()
        );
    }

    #[test]
    fn measure_grows_with_text() {
        let mut engine = TextLayoutEngine::new();
        let Some(font) = try_resolve(&FontSpec::monospace_defaults(), &mut engine) else {
            eprintln!("skipping: no system monospace font available");
            return;
        };
        let short = engine.measure("ab", &font, 14.0).unwrap();
        let long = engine.measure("abcdef", &font, 14.0).unwrap();
        assert!(long > short);
        assert!(short > 0.0);
    }
}
