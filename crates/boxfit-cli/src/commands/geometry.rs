//! Geometry command
//!
//! Prints scale, resized size and padding for a source/target pair.

use crate::GeometryArgs;
use anyhow::{Context, Result};
use boxfit_ops::LetterboxGeometry;
use tracing::debug;

pub fn run(args: GeometryArgs, verbose: u8) -> Result<()> {
    let source = super::parse_shape(&args.source)?;
    let target = super::parse_shape(&args.target)?;
    let g = LetterboxGeometry::compute(source, target)
        .with_context(|| format!("Cannot letterbox {source} into {target}"))?;
    debug!(?g, "computed geometry");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&g)?);
        return Ok(());
    }

    println!("source:   {}x{} (HxW)", source.height, source.width);
    println!("target:   {}x{} (HxW)", target.height, target.width);
    println!("scale:    {:.6}", g.scale);
    println!("resized:  {}x{} (HxW)", g.resized.height, g.resized.width);
    println!("padding:  right {} / bottom {}", g.pad_right, g.pad_bottom);
    if verbose > 0 {
        println!("coverage: {:.2}%", g.content_ratio() * 100.0);
    }
    Ok(())
}
