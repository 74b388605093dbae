//! Rising-water animations.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::info;

use crate::error::{RenderError, Result};
use crate::render::{BaseColoring, PixelBuffer, Renderer};

/// Frame delay used when none is configured.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Which cells below the level count as water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaterModel {
    /// Every cell below the level.
    Naive,
    /// Only cells connected to the grid edge.
    #[default]
    Connected,
}

/// Render one frame per water level, in the order given.
pub fn sealevel_series(
    renderer: &Renderer<'_>,
    levels: &[f64],
    base: &BaseColoring,
    model: WaterModel,
) -> Vec<PixelBuffer> {
    levels
        .iter()
        .map(|&level| match model {
            WaterModel::Naive => renderer.draw_sealevel(level, base),
            WaterModel::Connected => renderer.draw_realwater(level, base),
        })
        .collect()
}

/// `count` evenly spaced levels from `start` to `end` inclusive.
pub fn level_steps(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Write `frames` as an endlessly looping GIF.
///
/// All frames must have the size of the first one.
pub fn write_gif(frames: &[PixelBuffer], path: impl AsRef<Path>, delay_ms: u32) -> Result<()> {
    let path = path.as_ref();
    let first = frames.first().ok_or(RenderError::NoFrames)?;
    let (width, height) = (first.width(), first.height());

    for (index, frame) in frames.iter().enumerate() {
        if frame.width() != width || frame.height() != height {
            return Err(RenderError::FrameMismatch {
                index,
                width: frame.width(),
                height: frame.height(),
                expected_width: width,
                expected_height: height,
            });
        }
    }

    let too_large = || RenderError::TooLarge { width, height };
    let w = u32::try_from(width).map_err(|_| too_large())?;
    let h = u32::try_from(height).map_err(|_| too_large())?;
    if w > u32::from(u16::MAX) || h > u32::from(u16::MAX) {
        return Err(too_large());
    }

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(delay_ms, 1);
    for frame in frames {
        let image = RgbaImage::from_raw(w, h, frame.as_bytes().to_vec()).ok_or(
            RenderError::BufferSize {
                width,
                height,
                expected: width * height * 4,
                actual: frame.as_bytes().len(),
            },
        )?;
        encoder.encode_frame(Frame::from_parts(image, 0, 0, delay))?;
    }

    info!(
        path = %path.display(),
        frames = frames.len(),
        width,
        height,
        delay_ms,
        "Wrote GIF animation"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_steps() {
        assert!(level_steps(0.0, 10.0, 0).is_empty());
        assert_eq!(level_steps(3.0, 10.0, 1), vec![3.0]);
        assert_eq!(level_steps(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
        assert_eq!(level_steps(10.0, 0.0, 2), vec![10.0, 0.0]);
    }

    #[test]
    fn test_empty_animation_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_gif(&[], dir.path().join("x.gif"), 100);
        assert!(matches!(result, Err(RenderError::NoFrames)));
    }

    #[test]
    fn test_frame_size_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let frames = [PixelBuffer::new(2, 2), PixelBuffer::new(3, 2)];
        let result = write_gif(&frames, dir.path().join("x.gif"), 100);
        assert!(matches!(
            result,
            Err(RenderError::FrameMismatch { index: 1, width: 3, .. })
        ));
    }
}
