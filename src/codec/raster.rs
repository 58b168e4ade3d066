//! PNG/JPEG through the `image` crate.
//!
//! - Decoding always yields an 8-bit RGB picture with `max_val == 255`.
//! - Encoding rescales channels into `0..=255` when the picture uses another
//!   `max_val` (a `max_val` of 0 encodes as black).
use crate::error::{Error, Result};
use crate::picture::{GridView, Picture};
use crate::pixel::{Pixel, Position};
use image::{ImageBuffer, Rgb, RgbImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// Load a PNG/JPEG file as an 8-bit RGB picture.
pub fn read(path: &Path) -> Result<Picture> {
    let img = image::open(path)
        .map_err(|e| Error::from_image(path, e))?
        .into_rgb8();
    let picture = from_rgb8(&img)?;
    debug!(
        "raster: read {}×{} from {}",
        picture.width(),
        picture.height(),
        path.display()
    );
    Ok(picture)
}

/// Write `picture` to `path` in `format`, creating parent directories.
pub fn write(picture: &Picture, path: &Path, format: image::ImageFormat) -> Result<()> {
    super::ensure_parent_dir(path)?;
    to_rgb8(picture)
        .save_with_format(path, format)
        .map_err(|e| Error::from_image(path, e))?;
    debug!("raster: wrote {} as {format:?}", path.display());
    Ok(())
}

/// Encode `picture` in memory; `path` only labels errors.
pub fn encode(picture: &Picture, format: image::ImageFormat, path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    to_rgb8(picture)
        .write_to(&mut bytes, format)
        .map_err(|e| Error::from_image(path, e))?;
    Ok(bytes.into_inner())
}

/// Convert an 8-bit RGB buffer into a picture with `max_val == 255`.
pub fn from_rgb8(img: &RgbImage) -> Result<Picture> {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if w == 0 || h == 0 {
        return Err(Error::invalid_argument("decoded image has no pixels"));
    }
    let pixels = img
        .enumerate_pixels()
        .map(|(x, y, Rgb([r, g, b]))| {
            Pixel::new(
                Position::new(x as usize, y as usize),
                255,
                i64::from(*r),
                i64::from(*g),
                i64::from(*b),
            )
        })
        .collect();
    Ok(Picture::from_pixels(w, h, 255, pixels))
}

/// Convert a picture into an 8-bit RGB buffer.
pub fn to_rgb8(picture: &Picture) -> RgbImage {
    let max_val = picture.max_val();
    let mut out: RgbImage = ImageBuffer::new(picture.width() as u32, picture.height() as u32);
    for (y, row) in picture.rows().enumerate() {
        for (x, px) in row.iter().enumerate() {
            let [r, g, b] = px.rgb().map(|v| to_u8(v, max_val));
            out.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }
    out
}

#[inline]
fn to_u8(value: u32, max_val: u32) -> u8 {
    match max_val {
        0 => 0,
        255 => value.min(255) as u8,
        m => ((u64::from(value) * 255) / u64::from(m)).min(255) as u8,
    }
}
