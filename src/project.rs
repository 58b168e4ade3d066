//! Editing session over several layered pictures.
//!
//! A `Project` owns an ordered list of [`LayeredPicture`]s and an explicit
//! current-picture cursor. Single-layer operations act on the current layer
//! of the current picture and store the result back into that layer.
use crate::codec::{self, manifest, ImageFormat};
use crate::downsize::downsize;
use crate::error::{Error, Result};
use crate::layer::{Layer, LayeredPicture};
use crate::mosaic::mosaic;
use crate::picture::{pattern, ColorMatrix, Kernel, Picture};
use log::debug;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

/// Canonical single-layer adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    Blur,
    Sharpen,
    Monochrome,
    Sepia,
}

impl Adjustment {
    pub fn apply(self, picture: &Picture) -> Picture {
        match self {
            Adjustment::Blur => picture.filter(&Kernel::blur()),
            Adjustment::Sharpen => picture.filter(&Kernel::sharpen()),
            Adjustment::Monochrome => picture.color_transform(&ColorMatrix::monochrome()),
            Adjustment::Sepia => picture.color_transform(&ColorMatrix::sepia()),
        }
    }
}

/// Layer name used by [`Project::create_checkerboard`].
pub const CHECKERBOARD_LAYER: &str = "checkerboard";

#[derive(Clone, Debug, Default)]
pub struct Project {
    pictures: Vec<LayeredPicture>,
    current: Option<usize>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pictures(&self) -> &[LayeredPicture] {
        &self.pictures
    }

    pub fn picture(&self, index: usize) -> Result<&LayeredPicture> {
        self.pictures.get(index).ok_or_else(|| self.out_of_range(index))
    }

    /// Append a picture; the first one added becomes current. Returns its index.
    pub fn add_picture(&mut self, picture: LayeredPicture) -> usize {
        self.pictures.push(picture);
        let index = self.pictures.len() - 1;
        if self.current.is_none() {
            self.current = Some(index);
        }
        index
    }

    /// Remove and return a picture, keeping the cursor on the same picture
    /// when possible.
    pub fn remove_picture(&mut self, index: usize) -> Result<LayeredPicture> {
        if index >= self.pictures.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.pictures.remove(index);
        self.current = match self.current {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn set_current_picture(&mut self, index: usize) -> Result<()> {
        if index >= self.pictures.len() {
            return Err(self.out_of_range(index));
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_picture(&self) -> Result<&LayeredPicture> {
        let index = self.current.ok_or_else(no_picture)?;
        Ok(&self.pictures[index])
    }

    pub fn current_picture_mut(&mut self) -> Result<&mut LayeredPicture> {
        let index = self.current.ok_or_else(no_picture)?;
        Ok(&mut self.pictures[index])
    }

    pub fn create_layer(&mut self, name: &str) -> Result<()> {
        self.current_picture_mut()?.add_empty_layer(name)
    }

    pub fn select_layer(&mut self, name: &str) -> Result<()> {
        self.current_picture_mut()?.set_current_layer(name)
    }

    pub fn remove_layer(&mut self, name: &str) -> Result<Layer> {
        self.current_picture_mut()?.remove_layer(name)
    }

    pub fn set_visibility(&mut self, visible: bool) -> Result<()> {
        self.current_picture_mut()?.set_visibility(visible)
    }

    /// Apply `adjustment` to the current layer in place.
    pub fn apply(&mut self, adjustment: Adjustment) -> Result<()> {
        let picture = self.current_picture_mut()?;
        let out = adjustment.apply(picture.current_image()?);
        debug!("Project::apply {adjustment:?}");
        picture.set_current_layer_image(out)
    }

    /// New composite holding one selected checkerboard layer; it becomes the
    /// current picture. Returns its index.
    pub fn create_checkerboard(&mut self, tile_size: usize, num_tiles: usize) -> Result<usize> {
        let board = pattern::checkerboard(tile_size, num_tiles)?;
        let (w, h) = board.dimensions();
        let mut composite = LayeredPicture::with_layers(
            w,
            h,
            board.max_val(),
            [Layer::with_image(CHECKERBOARD_LAYER, board)?],
        )?;
        composite.set_current_layer(CHECKERBOARD_LAYER)?;
        let index = self.add_picture(composite);
        self.current = Some(index);
        Ok(index)
    }

    /// Decode `path` (format from extension) into the current layer.
    pub fn load_into_current_layer(&mut self, path: &Path) -> Result<()> {
        let picture = self.current_picture_mut()?;
        // Fail on a missing selection before touching the filesystem.
        picture.current_layer().ok_or_else(|| Error::invalid_state("no layer has been selected"))?;
        let image = codec::read_picture(path)?;
        picture.set_current_layer_image(image)
    }

    /// Replace the current layer with a mosaic of `num_seeds` regions.
    pub fn mosaic<R: Rng>(&mut self, num_seeds: usize, rng: &mut R) -> Result<()> {
        let picture = self.current_picture_mut()?;
        let out = mosaic(picture.current_image()?, num_seeds, rng)?;
        picture.set_current_layer_image(out)
    }

    /// Downsize every non-empty layer of the current picture. Either all
    /// layers are resampled or none is.
    pub fn downsize(&mut self, width: usize, height: usize) -> Result<()> {
        let picture = self.current_picture_mut()?;
        let (old_w, old_h) = (picture.width(), picture.height());
        if width == 0 || height == 0 || width > old_w || height > old_h {
            return Err(Error::invalid_argument(format!(
                "cannot downsize {old_w}×{old_h} composite to {width}×{height}"
            )));
        }
        let images = picture
            .layers()
            .iter()
            .map(|layer| layer.image().map(|img| downsize(img, width, height)).transpose())
            .collect::<Result<Vec<_>>>()?;
        picture.replace_images(width, height, images)
    }

    /// Encode the current picture's top-most visible image to `path`.
    pub fn export_top_most_visible(&self, path: &Path) -> Result<()> {
        let image = self
            .current_picture()?
            .resolve_top_most_visible()
            .ok_or_else(|| Error::invalid_state("current picture has no visible layer"))?;
        codec::write_picture(image, path)
    }

    /// Save the current picture as a manifest plus per-layer images.
    pub fn save_current(&self, path: &Path, format: ImageFormat) -> Result<()> {
        manifest::write(self.current_picture()?, path, format)
    }

    /// Read a manifest, append it and make it current. Returns its index.
    pub fn open_layered(&mut self, path: &Path) -> Result<usize> {
        let picture = manifest::read(path)?;
        let index = self.add_picture(picture);
        self.current = Some(index);
        Ok(index)
    }

    fn out_of_range(&self, index: usize) -> Error {
        Error::invalid_argument(format!(
            "picture index {index} out of range (have {})",
            self.pictures.len()
        ))
    }
}

fn no_picture() -> Error {
    Error::invalid_state("no picture has been selected")
}
