//! CLI command implementations

pub mod fill;
pub mod geometry;
pub mod hue;
pub mod letterbox;
pub mod restore;

use anyhow::{Context, Result, bail, ensure};
use boxfit_core::Size;
use std::io::{Read, Write};

/// Parses `HEIGHTxWIDTH` (also accepts `X` or `,` as separator).
pub fn parse_shape(text: &str) -> Result<Size> {
    let parts: Vec<&str> = text
        .split(|c| c == 'x' || c == 'X' || c == ',')
        .map(str::trim)
        .collect();
    let [h, w] = parts.as_slice() else {
        bail!("shape '{text}' must be HEIGHTxWIDTH");
    };
    let height: u32 = h
        .parse()
        .with_context(|| format!("bad height in shape '{text}'"))?;
    let width: u32 = w
        .parse()
        .with_context(|| format!("bad width in shape '{text}'"))?;
    Ok(Size::from_shape([height, width]))
}

/// Parses a comma-separated list of up to `max` numbers.
pub fn parse_color(text: &str, max: usize) -> Result<Vec<f32>> {
    let values = text
        .split(',')
        .map(|s| {
            s.trim()
                .parse::<f32>()
                .with_context(|| format!("bad color component '{s}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(
        (1..=max).contains(&values.len()),
        "color '{text}' needs 1 to {max} components"
    );
    Ok(values)
}

/// Reads exactly `size.area() * 3` little-endian f32 values.
pub fn read_pixels(reader: &mut impl Read, size: Size) -> Result<Vec<f32>> {
    let count = size
        .buffer_len()
        .with_context(|| format!("image {size} is too large"))?;
    let mut bytes = Vec::with_capacity(count * 4);
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read pixels from stdin")?;
    ensure!(
        bytes.len() == count * 4,
        "expected {} bytes ({count} f32 values for {size}), got {}",
        count * 4,
        bytes.len()
    );
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

/// Writes `data` as little-endian f32 values.
pub fn write_pixels(writer: &mut impl Write, data: &[f32]) -> Result<()> {
    let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
    writer
        .write_all(&bytes)
        .and_then(|_| writer.flush())
        .context("Failed to write pixels to stdout")
}

/// Reads the image for `size` from stdin.
pub fn read_stdin(size: Size) -> Result<Vec<f32>> {
    read_pixels(&mut std::io::stdin().lock(), size)
}

/// Writes `data` to stdout.
pub fn write_stdout(data: &[f32]) -> Result<()> {
    write_pixels(&mut std::io::stdout().lock(), data)
}
