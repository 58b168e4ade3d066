//! Plain-text PPM (`P3`) codec.
//!
//! Layout written by [`encode`]:
//!
//! ```text
//! P3
//! <width> <height>
//! <maxVal>
//! <R>
//! <G>
//! <B>
//! ...
//! ```
//!
//! [`decode`] accepts any whitespace between tokens, drops lines starting
//! with `#` and blank lines, and requires the first token to be `P3`.
use crate::error::{Error, Result};
use crate::picture::{GridView, Picture};
use crate::pixel::{Pixel, Position};
use log::debug;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MAGIC: &str = "P3";

pub fn encode(picture: &Picture) -> String {
    // Up to 3 digits + newline per channel for 8-bit pictures.
    let mut out = String::with_capacity(16 + picture.pixels().len() * 12);
    out.push_str(MAGIC);
    out.push('\n');
    let _ = writeln!(out, "{} {}", picture.width(), picture.height());
    let _ = writeln!(out, "{}", picture.max_val());
    for row in picture.rows() {
        for px in row {
            for v in px.rgb() {
                let _ = writeln!(out, "{v}");
            }
        }
    }
    out
}

pub fn decode(text: &str) -> Result<Picture> {
    let mut tokens = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some(MAGIC) => {}
        Some(other) => {
            return Err(Error::invalid_argument(format!(
                "not a plain PPM file: expected {MAGIC}, found {other:?}"
            )))
        }
        None => return Err(Error::invalid_argument("empty PPM input")),
    }

    let width: usize = next_number(&mut tokens, "width")?;
    let height: usize = next_number(&mut tokens, "height")?;
    let max_val: u32 = next_number(&mut tokens, "max value")?;

    if width == 0 || height == 0 {
        return Err(Error::invalid_argument(format!(
            "PPM dimensions must be positive, got {width}×{height}"
        )));
    }
    let expected = width.checked_mul(height).ok_or_else(|| {
        Error::invalid_argument(format!("PPM dimensions {width}×{height} overflow"))
    })?;

    // Every pixel needs at least six bytes of text; the header alone is untrusted.
    let mut pixels = Vec::with_capacity(expected.min(text.len() / 6));
    for i in 0..expected {
        let p = Position::new(i % width, i / width);
        let mut rgb = [0i64; 3];
        for slot in &mut rgb {
            *slot = next_number(&mut tokens, "channel value")
                .map_err(|e| Error::invalid_argument(format!("pixel {p:?}: {e}")))?;
        }
        pixels.push(Pixel::new(p, max_val, rgb[0], rgb[1], rgb[2]));
    }
    Ok(Picture::from_pixels(width, height, max_val, pixels))
}

/// Read and decode the PPM file at `path`.
pub fn read(path: &Path) -> Result<Picture> {
    let text = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    let picture = decode(&text)?;
    debug!(
        "ppm: read {}×{} from {}",
        picture.width(),
        picture.height(),
        path.display()
    );
    Ok(picture)
}

/// Encode `picture` and write it to `path`, creating parent directories.
pub fn write(picture: &Picture, path: &Path) -> Result<()> {
    super::ensure_parent_dir(path)?;
    fs::write(path, encode(picture)).map_err(|e| Error::from_io(path, e))?;
    debug!("ppm: wrote {}", path.display());
    Ok(())
}

fn next_number<'a, T, I>(tokens: &mut I, what: &str) -> Result<T>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| Error::invalid_argument(format!("PPM ended before {what}")))?;
    token
        .parse()
        .map_err(|_| Error::invalid_argument(format!("invalid {what} {token:?} in PPM")))
}
