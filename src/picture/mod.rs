//! Immutable RGB picture and its pure transforms.
//!
//! Design
//! - Storage is a row-major `Vec<Pixel>` (`stride == width`); each stored
//!   pixel carries its own position and the picture's `max_val`.
//! - Every transform (`filter`, `color_transform`) allocates a new picture;
//!   the source is never touched.
//! - Windows that reach past the border read zeros (zero padding), so filtered
//!   values darken near the edges instead of replicating edge pixels.
//!
//! Complexity
//! - `filter`: O(W·H·k²) for a k×k kernel, evaluated pixel-parallel with
//!   order-preserving collection.
//! - `color_transform`: O(W·H).

pub mod color;
pub mod kernel;
pub mod pattern;
pub mod view;

pub use self::color::ColorMatrix;
pub use self::kernel::Kernel;
pub use self::view::{GridView, Rows};

use crate::error::{Error, Result};
use crate::pixel::{Channel, Pixel, Position};
use log::debug;
use rayon::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Picture {
    width: usize,
    height: usize,
    max_val: u32,
    pixels: Vec<Pixel>,
}

impl Picture {
    /// Build a picture from `height` rows of `width` pixels.
    ///
    /// Fails with `InvalidArgument` when a dimension is zero, the grid shape
    /// does not match, or a pixel's position/`max_val` disagrees with its slot.
    pub fn new(width: usize, height: usize, max_val: u32, rows: Vec<Vec<Pixel>>) -> Result<Self> {
        check_dimensions(width, height)?;
        if rows.len() != height || rows.iter().any(|r| r.len() != width) {
            return Err(Error::invalid_argument(format!(
                "pixel grid does not match {width}×{height}"
            )));
        }
        let pixels: Vec<Pixel> = rows.into_iter().flatten().collect();
        for (i, px) in pixels.iter().enumerate() {
            let expected = Position::new(i % width, i / width);
            if px.position() != expected {
                return Err(Error::invalid_argument(format!(
                    "pixel at {expected:?} reports position {:?}",
                    px.position()
                )));
            }
            if px.max_val() != max_val {
                return Err(Error::invalid_argument(format!(
                    "pixel at {expected:?} has max value {} instead of {max_val}",
                    px.max_val()
                )));
            }
        }
        Ok(Self::from_pixels(width, height, max_val, pixels))
    }

    /// Build a picture by evaluating `f` at every position (row-major).
    /// Returned channel values are clamped.
    pub fn from_fn<F>(width: usize, height: usize, max_val: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(Position) -> [i64; 3],
    {
        check_dimensions(width, height)?;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let p = Position::new(x, y);
                let [r, g, b] = f(p);
                pixels.push(Pixel::new(p, max_val, r, g, b));
            }
        }
        Ok(Self::from_pixels(width, height, max_val, pixels))
    }

    /// Uniformly colored picture.
    pub fn filled(width: usize, height: usize, max_val: u32, rgb: [i64; 3]) -> Result<Self> {
        Self::from_fn(width, height, max_val, |_| rgb)
    }

    /// Caller guarantees shape, positions and `max_val` are consistent.
    pub(crate) fn from_pixels(width: usize, height: usize, max_val: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            max_val,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn max_val(&self) -> u32 {
        self.max_val
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&Pixel> {
        if x < self.width && y < self.height {
            Some(&self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Owned copy of the pixel grid, one `Vec` per row.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.pixels.chunks(self.width).map(<[Pixel]>::to_vec).collect()
    }

    /// `height × width` grid of one channel's values.
    pub fn channel_plane(&self, channel: Channel) -> Vec<Vec<u32>> {
        self.rows()
            .map(|row| row.iter().map(|px| px.channel(channel)).collect())
            .collect()
    }

    /// `dimension × dimension` window of `channel` centred on `center`.
    ///
    /// Cells outside the picture are 0. Fails with `InvalidArgument` if
    /// `dimension` is even or zero, or `center` lies outside the picture.
    pub fn windowed_subset(
        &self,
        dimension: usize,
        center: Position,
        channel: Channel,
    ) -> Result<Vec<Vec<u32>>> {
        if dimension % 2 == 0 {
            return Err(Error::invalid_argument(format!(
                "window dimension must be odd and positive, got {dimension}"
            )));
        }
        if center.x >= self.width || center.y >= self.height {
            return Err(Error::invalid_argument(format!(
                "window centre {center:?} is outside {}×{}",
                self.width, self.height
            )));
        }
        let radius = (dimension / 2) as isize;
        let (cx, cy) = (center.x as isize, center.y as isize);
        Ok((0..dimension as isize)
            .map(|dy| {
                (0..dimension as isize)
                    .map(|dx| self.padded(cx + dx - radius, cy + dy - radius, channel))
                    .collect()
            })
            .collect())
    }

    /// Convolve every channel with `kernel`.
    ///
    /// Each output value is the weighted sum over the zero-padded window,
    /// truncated toward zero and clamped into `[0, max_val]`.
    pub fn filter(&self, kernel: &Kernel) -> Picture {
        debug!(
            "Picture::filter {}×{} with {}×{} kernel",
            self.width,
            self.height,
            kernel.side(),
            kernel.side()
        );
        let side = kernel.side();
        let radius = kernel.radius() as isize;
        let pixels: Vec<Pixel> = self
            .pixels
            .par_iter()
            .map(|px| {
                let p = px.position();
                let (cx, cy) = (p.x as isize, p.y as isize);
                let mut rgb = [0i64; 3];
                for channel in Channel::ALL {
                    let mut sum = 0.0f64;
                    for ky in 0..side {
                        for kx in 0..side {
                            let v = self.padded(
                                cx + kx as isize - radius,
                                cy + ky as isize - radius,
                                channel,
                            );
                            sum += kernel.weight(ky, kx) * f64::from(v);
                        }
                    }
                    rgb[channel.index()] = sum as i64;
                }
                Pixel::new(p, self.max_val, rgb[0], rgb[1], rgb[2])
            })
            .collect();
        Self::from_pixels(self.width, self.height, self.max_val, pixels)
    }

    /// Map every pixel through `matrix`; results are truncated then clamped.
    pub fn color_transform(&self, matrix: &ColorMatrix) -> Picture {
        debug!("Picture::color_transform {}×{}", self.width, self.height);
        let pixels = self
            .pixels
            .iter()
            .map(|px| {
                let mut out = *px;
                out.set_rgb(matrix.apply(px.rgb()));
                out
            })
            .collect();
        Self::from_pixels(self.width, self.height, self.max_val, pixels)
    }

    #[inline]
    fn padded(&self, x: isize, y: isize, channel: Channel) -> u32 {
        if x < 0 || y < 0 {
            return 0;
        }
        self.pixel(x as usize, y as usize)
            .map_or(0, |px| px.channel(channel))
    }
}

impl GridView for Picture {
    type Pixel = Pixel;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_argument(format!(
            "width and height must be positive, got {width}×{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
