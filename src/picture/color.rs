//! 3×3 color matrices: one row per output channel, one column per input channel.
use crate::error::{Error, Result};
use nalgebra::{Matrix3, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    m: Matrix3<f64>,
}

impl ColorMatrix {
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    /// Fails with `InvalidArgument` unless `rows` is exactly 3×3.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != 3 || rows.iter().any(|r| r.as_ref().len() != 3) {
            return Err(Error::invalid_argument(
                "color matrix must have 3 rows of 3 coefficients",
            ));
        }
        Ok(Self::new(Matrix3::from_fn(|r, c| rows[r].as_ref()[c])))
    }

    /// Luma weights (Rec. 709) on every output channel.
    pub fn monochrome() -> Self {
        let luma = [0.2126, 0.7152, 0.0722];
        Self::new(Matrix3::from_fn(|_, c| luma[c]))
    }

    pub fn sepia() -> Self {
        Self::new(Matrix3::new(
            0.393, 0.769, 0.189, //
            0.349, 0.686, 0.168, //
            0.272, 0.534, 0.131,
        ))
    }

    /// Map an RGB triple; each output is truncated toward zero, not clamped.
    pub fn apply(&self, rgb: [u32; 3]) -> [i64; 3] {
        let input = Vector3::new(f64::from(rgb[0]), f64::from(rgb[1]), f64::from(rgb[2]));
        let out = self.m * input;
        [out.x as i64, out.y as i64, out.z as i64]
    }
}
