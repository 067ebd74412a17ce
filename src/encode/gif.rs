//! Animated GIF sink.
//!
//! Frames are flattened over an opaque background and quantized with a
//! per-frame local palette (not a global one) so each command's saturated
//! accent color survives quantization.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::FrameRgba;

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Output GIF file path.
    pub out_path: PathBuf,
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Background color used to flatten alpha.
    pub bg: Rgba8,
    /// Quantization speed passed to the encoder (1 = best quality, 30 =
    /// fastest).
    pub quantize_speed: i32,
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg: Rgba8::opaque(0, 0, 0),
            quantize_speed: 10,
        }
    }
}

/// Sink that streams frames into an infinitely-looping animated GIF.
pub struct GifSink {
    opts: GifSinkOpts,

    encoder: Option<gif::Encoder<BufWriter<File>>>,
    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    delay_centis: u16,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            scratch: Vec::new(),
            cfg: None,
            delay_centis: 0,
            last_idx: None,
        }
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> TermreelResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(TermreelError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        let w: u16 = cfg
            .width
            .try_into()
            .map_err(|_| TermreelError::validation("gif sink width exceeds u16"))?;
        let h: u16 = cfg
            .height
            .try_into()
            .map_err(|_| TermreelError::validation("gif sink height exceeds u16"))?;
        if !(1..=30).contains(&self.opts.quantize_speed) {
            return Err(TermreelError::validation(
                "gif quantize_speed must be in 1..=30",
            ));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(TermreelError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        let file = File::create(&self.opts.out_path).map_err(|e| {
            TermreelError::encode(format!(
                "failed to create '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;
        let mut encoder = gif::Encoder::new(BufWriter::new(file), w, h, &[])
            .map_err(|e| TermreelError::encode(format!("failed to start gif encoder: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| TermreelError::encode(format!("failed to set gif loop: {e}")))?;

        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.delay_centis = cfg.fps.frame_delay_centis();
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRgba) -> TermreelResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| TermreelError::encode("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(TermreelError::encode(
                "gif sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TermreelError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(TermreelError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_over_bg(&mut self.scratch, frame, self.opts.bg)?;

        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| TermreelError::encode("gif sink is already finalized"))?;
        let mut gif_frame = gif::Frame::from_rgba_speed(
            cfg.width as u16,
            cfg.height as u16,
            &mut self.scratch,
            self.opts.quantize_speed,
        );
        gif_frame.delay = self.delay_centis;
        encoder
            .write_frame(&gif_frame)
            .map_err(|e| TermreelError::encode(format!("failed to write gif frame: {e}")))?;
        Ok(())
    }

    fn end(&mut self) -> TermreelResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| TermreelError::encode("gif sink not started"))?;
        // Dropping the encoder writes the GIF trailer and flushes the writer.
        drop(encoder);
        self.cfg = None;
        Ok(())
    }
}

/// Flatten a frame over an opaque background into straight RGBA8 with full
/// alpha.
pub(crate) fn flatten_over_bg(
    dst: &mut [u8],
    frame: &FrameRgba,
    bg: Rgba8,
) -> TermreelResult<()> {
    if dst.len() != frame.data.len() || !dst.len().is_multiple_of(4) {
        return Err(TermreelError::validation(
            "flatten_over_bg expects equal-length rgba8 buffers",
        ));
    }
    if !frame.premultiplied {
        return Err(TermreelError::validation(
            "flatten_over_bg expects premultiplied frame data",
        ));
    }

    let bg_r = u16::from(bg.r);
    let bg_g = u16::from(bg.g);
    let bg_b = u16::from(bg.b);

    for (d, s) in dst.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255 - a;
        let r = u16::from(s[0]) + mul_div255_u16(bg_r, inv);
        let g = u16::from(s[1]) + mul_div255_u16(bg_g, inv);
        let b = u16::from(s[2]) + mul_div255_u16(bg_b, inv);

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TermreelResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
