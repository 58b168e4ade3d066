//! Square convolution kernels with an odd side length.
use crate::error::{Error, Result};
use nalgebra::DMatrix;

/// Weights applied to a `side × side` zero-padded window around each pixel.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: DMatrix<f64>,
}

/// 3×3 Gaussian-like blur.
const BLUR_3X3: [[f64; 3]; 3] = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

/// 5×5 sharpen: negative outer ring, positive inner ring, unit centre.
const SHARPEN_5X5: [[f64; 5]; 5] = [
    [-0.125, -0.125, -0.125, -0.125, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, 0.25, 1.0, 0.25, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, -0.125, -0.125, -0.125, -0.125],
];

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// Fails with `InvalidArgument` unless the rows form a non-empty square
    /// matrix with an odd side length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let side = rows.len();
        if side == 0 || side % 2 == 0 {
            return Err(Error::invalid_argument(format!(
                "kernel side must be odd and positive, got {side}"
            )));
        }
        if let Some(bad) = rows.iter().map(|r| r.as_ref().len()).find(|&n| n != side) {
            return Err(Error::invalid_argument(format!(
                "kernel is not square: {side} rows but a row of length {bad}"
            )));
        }
        let weights = DMatrix::from_fn(side, side, |r, c| rows[r].as_ref()[c]);
        Ok(Self { weights })
    }

    pub fn blur() -> Self {
        Self::from_const(&BLUR_3X3)
    }

    pub fn sharpen() -> Self {
        Self::from_const(&SHARPEN_5X5)
    }

    fn from_const<const N: usize>(rows: &[[f64; N]; N]) -> Self {
        Self {
            weights: DMatrix::from_fn(N, N, |r, c| rows[r][c]),
        }
    }

    /// Side length of the square window.
    #[inline]
    pub fn side(&self) -> usize {
        self.weights.nrows()
    }

    /// Distance from the centre cell to the window edge.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side() / 2
    }

    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[(row, col)]
    }
}
