//! Hue command
//!
//! Shifts the image's dominant color onto a target hue, optionally with
//! saturation and value.

use crate::HueArgs;
use crate::config::CliConfig;
use anyhow::{Context, Result};
use boxfit_ops::ColorTarget;

pub fn run(args: HueArgs, config: &CliConfig, verbose: u8) -> Result<()> {
    let size = super::parse_shape(&args.shape)?;
    let components = super::parse_color(&args.color, 3)?;
    let remapper = config.remapper()?;

    let mut pixels = super::read_stdin(size)?;
    if let Some(target) = ColorTarget::from_components(&components) {
        let dominant = remapper
            .remap(&mut pixels, target)
            .with_context(|| format!("Cannot remap toward {target:?}"))?;
        if verbose > 0 {
            eprintln!(
                "dominant H={:.1} S={:.3} V={:.1} -> {:?}",
                dominant[0], dominant[1], dominant[2], target
            );
        }
    }
    super::write_stdout(&pixels)
}
