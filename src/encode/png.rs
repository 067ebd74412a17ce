//! Single-frame PNG output (used for the title card preview).

use std::path::Path;

use crate::encode::gif::{ensure_parent_dir, flatten_over_bg};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::FrameRgba;

/// Write `frame` to `path` as an opaque RGBA8 PNG, flattened over `bg`.
pub fn write_png(path: &Path, frame: &FrameRgba, bg: Rgba8) -> TermreelResult<()> {
    ensure_parent_dir(path)?;

    let mut flat = vec![0u8; frame.data.len()];
    flatten_over_bg(&mut flat, frame, bg)?;

    image::save_buffer_with_format(
        path,
        &flat,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| TermreelError::encode(format!("failed to write png '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn writes_a_non_empty_png() {
        let path = PathBuf::from("target/png_tests/preview.png");
        let _ = std::fs::remove_file(&path);

        let frame = FrameRgba {
            width: 3,
            height: 2,
            data: [24u8, 24, 28, 255].repeat(6),
            premultiplied: true,
        };
        write_png(&path, &frame, Rgba8::opaque(0, 0, 0)).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn rejects_inconsistent_buffers() {
        let frame = FrameRgba {
            width: 3,
            height: 2,
            data: vec![0; 10], // not width*height*4
            premultiplied: true,
        };
        let path = PathBuf::from("target/png_tests/bad.png");
        assert!(write_png(&path, &frame, Rgba8::opaque(0, 0, 0)).is_err());
    }
}
