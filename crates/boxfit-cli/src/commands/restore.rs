//! Restore command
//!
//! Reads a target-sized buffer from stdin and writes the content region,
//! as produced by `letterbox` for the same shapes, to stdout.

use crate::RestoreArgs;
use anyhow::{Context, Result};
use boxfit_core::{RgbImage, Size};
use boxfit_ops::LetterboxGeometry;

pub fn run(args: RestoreArgs, verbose: u8) -> Result<()> {
    let source = super::parse_shape(&args.source)?;
    let target = super::parse_shape(&args.target)?;

    let canvas = super::read_stdin(target)?;
    let region = restore_region(source, target, canvas)?;

    if verbose > 0 {
        eprintln!("restored {} region from {} canvas", region.size(), target);
    }
    super::write_stdout(region.data())
}

/// Crops the letterbox content region for `source` out of a `target` canvas.
fn restore_region(source: Size, target: Size, canvas: Vec<f32>) -> Result<RgbImage> {
    let g = LetterboxGeometry::compute(source, target)
        .with_context(|| format!("Cannot letterbox {source} into {target}"))?;
    let canvas = RgbImage::from_vec(target, canvas)?;
    Ok(canvas.crop(g.crop_rect())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_region_crops_top_left() {
        // 2x4 source into 4x4: content is the top two rows.
        let canvas: Vec<f32> = (0..4 * 4 * 3).map(|v| v as f32).collect();
        let region = restore_region(Size::new(4, 2), Size::new(4, 4), canvas.clone()).unwrap();
        assert_eq!(region.size(), Size::new(4, 2));
        assert_eq!(region.data(), &canvas[..4 * 2 * 3]);
    }

    #[test]
    fn test_restore_region_rejects_bad_target() {
        let result = restore_region(Size::new(4, 2), Size::new(0, 4), Vec::new());
        assert!(result.is_err());
    }
}
