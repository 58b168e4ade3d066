#![doc = include_str!("../README.md")]

// Core raster model.
pub mod error;
pub mod picture;
pub mod pixel;

// Layered composites and the editing session built on them.
pub mod layer;
pub mod project;

// Whole-picture transforms.
pub mod downsize;
pub mod mosaic;

// File formats and tool configuration.
pub mod codec;
pub mod config;

// --- High-level re-exports -------------------------------------------------

pub use crate::codec::ImageFormat;
pub use crate::error::{Error, Result};
pub use crate::layer::{Layer, LayeredPicture};
pub use crate::picture::{ColorMatrix, Kernel, Picture};
pub use crate::pixel::{Channel, Pixel, Position};
pub use crate::project::{Adjustment, Project};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use layered_image::prelude::*;
///
/// # fn main() -> layered_image::Result<()> {
/// let board = checkerboard(2, 2)?;
/// let mut stack = LayeredPicture::with_layers(4, 4, 255, [Layer::with_image("board", board)?])?;
/// stack.set_current_layer("board")?;
///
/// let blurred = stack.filter(&Kernel::blur())?;
/// stack.set_current_layer_image(blurred)?;
/// assert!(stack.resolve_top_most_visible().is_some());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::picture::pattern::checkerboard;
    pub use crate::picture::GridView;
    pub use crate::{
        Adjustment, Channel, ColorMatrix, Kernel, Layer, LayeredPicture, Picture, Position,
        Project,
    };
}
