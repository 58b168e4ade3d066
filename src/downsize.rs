//! Downsizing by bilinear resampling onto a smaller grid.
//!
//! Target cell `(i, j)` maps to source coordinates `x = j·W/W'`,
//! `y = i·H/H'`. Integral coordinates copy the source pixel; otherwise each
//! channel is interpolated from the floor/ceil neighbours and truncated.
//! Source-space positions are computed in exact integer arithmetic, so the
//! "integral" test has no floating-point slack.
use crate::error::{Error, Result};
use crate::picture::Picture;
use crate::pixel::{Pixel, Position};
use log::debug;

/// One axis of the target→source mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    lo: usize,
    hi: usize,
    frac: f64,
}

impl Sample {
    fn new(index: usize, src: usize, dst: usize) -> Self {
        let scaled = index * src;
        let lo = scaled / dst;
        let rem = scaled % dst;
        if rem == 0 {
            Self { lo, hi: lo, frac: 0.0 }
        } else {
            Self {
                lo,
                hi: lo + 1,
                frac: rem as f64 / dst as f64,
            }
        }
    }

    fn is_integral(&self) -> bool {
        self.lo == self.hi
    }
}

/// Resample `picture` to `new_width × new_height`.
///
/// Fails with `InvalidArgument` unless `0 < new_width <= width` and
/// `0 < new_height <= height`.
pub fn downsize(picture: &Picture, new_width: usize, new_height: usize) -> Result<Picture> {
    let (width, height) = picture.dimensions();
    if new_width == 0 || new_height == 0 || new_width > width || new_height > height {
        return Err(Error::invalid_argument(format!(
            "cannot downsize {width}×{height} to {new_width}×{new_height}"
        )));
    }
    debug!("downsize {width}×{height} -> {new_width}×{new_height}");

    let xs: Vec<Sample> = (0..new_width).map(|j| Sample::new(j, width, new_width)).collect();
    let ys: Vec<Sample> = (0..new_height).map(|i| Sample::new(i, height, new_height)).collect();
    let max_val = picture.max_val();

    let mut pixels = Vec::with_capacity(new_width * new_height);
    for (i, sy) in ys.iter().enumerate() {
        for (j, sx) in xs.iter().enumerate() {
            let target = Position::new(j, i);
            let px = if sx.is_integral() && sy.is_integral() {
                source(picture, sx.lo, sy.lo).moved_to(target)
            } else {
                let [r, g, b] = bilinear(picture, sx, sy);
                Pixel::new(target, max_val, r, g, b)
            };
            pixels.push(px);
        }
    }
    Ok(Picture::from_pixels(new_width, new_height, max_val, pixels))
}

#[inline]
fn source(picture: &Picture, x: usize, y: usize) -> Pixel {
    // `lo`/`hi` never exceed the last row/column: j·W/W' <= W - W/W' <= W - 1.
    *picture
        .pixel(x, y)
        .unwrap_or_else(|| unreachable!("sample ({x}, {y}) outside source"))
}

fn bilinear(picture: &Picture, sx: &Sample, sy: &Sample) -> [i64; 3] {
    let a = source(picture, sx.lo, sy.lo).rgb();
    let b = source(picture, sx.hi, sy.lo).rgb();
    let c = source(picture, sx.lo, sy.hi).rgb();
    let d = source(picture, sx.hi, sy.hi).rgb();
    let (fx, fy) = (sx.frac, sy.frac);
    let mut out = [0i64; 3];
    for k in 0..3 {
        let top = lerp(a[k], b[k], fx);
        let bottom = lerp(c[k], d[k], fx);
        out[k] = (top + (bottom - top) * fy) as i64;
    }
    out
}

// Offset form keeps equal endpoints exact, so flat regions stay flat.
#[inline]
fn lerp(from: u32, to: u32, t: f64) -> f64 {
    let from = f64::from(from);
    from + (f64::from(to) - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: usize, h: usize) -> Picture {
        Picture::from_fn(w, h, 255, |p| [(p.x * 10) as i64, (p.y * 10) as i64, 50]).unwrap()
    }

    #[test]
    fn rejects_growth_and_zero() {
        let pic = ramp(4, 4);
        assert!(matches!(downsize(&pic, 5, 4), Err(Error::InvalidArgument(_))));
        assert!(matches!(downsize(&pic, 4, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn same_size_is_identity() {
        let pic = ramp(5, 3);
        assert_eq!(downsize(&pic, 5, 3).unwrap(), pic);
    }

    #[test]
    fn halving_copies_even_pixels() {
        let pic = ramp(4, 4);
        let out = downsize(&pic, 2, 2).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.pixel(1, 1).unwrap().rgb(), [20, 20, 50]);
        assert_eq!(out.pixel(1, 1).unwrap().position(), Position::new(1, 1));
    }

    #[test]
    fn fractional_axis_interpolates() {
        // x = j·3/2: j = 1 -> 1.5, between columns 1 and 2.
        let pic = ramp(3, 2);
        let out = downsize(&pic, 2, 2).unwrap();
        assert_eq!(out.pixel(0, 0).unwrap().rgb(), [0, 0, 50]);
        assert_eq!(out.pixel(1, 0).unwrap().rgb(), [15, 0, 50]);
        assert_eq!(out.pixel(1, 1).unwrap().rgb(), [15, 10, 50]);
    }

    #[test]
    fn both_axes_fractional() {
        // 3×3 -> 2×2: (1,1) samples (1.5, 1.5).
        let pic = Picture::from_fn(3, 3, 255, |p| {
            let v = (p.x + 3 * p.y) as i64 * 8;
            [v, v, v]
        })
        .unwrap();
        let out = downsize(&pic, 2, 2).unwrap();
        // neighbours 32, 40, 56, 64 averaged equally -> 48
        assert_eq!(out.pixel(1, 1).unwrap().rgb(), [48, 48, 48]);
    }

    #[test]
    fn sample_mapping_is_exact() {
        assert_eq!(
            Sample::new(2, 6, 3),
            Sample {
                lo: 4,
                hi: 4,
                frac: 0.0
            }
        );
        let s = Sample::new(1, 5, 4);
        assert_eq!((s.lo, s.hi), (1, 2));
        assert!((s.frac - 0.25).abs() < 1e-12);
    }
}
