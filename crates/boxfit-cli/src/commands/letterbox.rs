//! Letterbox command
//!
//! Reads a source image from stdin, writes the padded canvas to stdout.

use crate::LetterboxArgs;
use crate::config::CliConfig;
use anyhow::{Context, Result, bail};
use boxfit_ops::{Filter, Letterbox};

pub fn run(args: LetterboxArgs, config: &CliConfig, verbose: u8) -> Result<()> {
    let source = super::parse_shape(&args.source)?;
    let target = super::parse_shape(&args.target)?;

    let mut options = config.letterbox;
    if let Some(name) = args.filter.as_deref() {
        let Some(filter) = Filter::from_name(name) else {
            bail!("Unknown filter '{name}'. Use nearest, bilinear, area, bicubic or lanczos");
        };
        options.filter = filter;
    }

    let pixels = super::read_stdin(source)?;
    let mut lb = Letterbox::with_options(pixels, source, target, options)
        .with_context(|| format!("Cannot letterbox {source} into {target}"))?;
    let resized = lb.geometry().resized;
    let canvas = lb.process()?;

    if verbose > 0 {
        eprintln!(
            "letterboxed {} -> {} (content {}, filter {:?})",
            source, target, resized, options.filter
        );
    }
    super::write_stdout(canvas.data())
}
