//! Fill command
//!
//! Sets every pixel's hue (and saturation) to a constant, keeping value.

use crate::FillArgs;
use anyhow::Result;
use boxfit_ops::{ChannelFill, ColorRemapper};

pub fn run(args: FillArgs, verbose: u8) -> Result<()> {
    let size = super::parse_shape(&args.shape)?;
    let components = super::parse_color(&args.color, 2)?;

    let mut pixels = super::read_stdin(size)?;
    if let Some(fill) = ChannelFill::from_components(&components) {
        ColorRemapper::default().fill(&mut pixels, fill)?;
        if verbose > 0 {
            eprintln!("filled {} pixels with {:?}", size.area(), fill);
        }
    }
    super::write_stdout(&pixels)
}
