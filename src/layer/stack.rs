//! Layered composite with an explicit current-layer selector.
//!
//! - Layers are kept in insertion order (bottom-most first); that order is the
//!   fallback order of top-most-visible resolution and of the manifest.
//! - `width`/`height` may start at 0 and are fixed by the first image placed
//!   in a layer. Afterwards every layer image must match them.
//! - Every mutator validates before touching state, so a failed call leaves
//!   the composite unchanged.
use super::Layer;
use crate::error::{Error, Result};
use crate::picture::{ColorMatrix, Kernel, Picture};
use crate::pixel::{Channel, Position};
use log::debug;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayeredPicture {
    width: usize,
    height: usize,
    max_val: u32,
    layers: Vec<Layer>,
    current: Option<String>,
}

impl Default for LayeredPicture {
    fn default() -> Self {
        Self::new(0, 0, 255)
    }
}

impl LayeredPicture {
    /// Composite without layers. If either dimension is zero, both are fixed
    /// lazily by the first image.
    pub fn new(width: usize, height: usize, max_val: u32) -> Self {
        Self {
            width,
            height,
            max_val,
            layers: Vec::new(),
            current: None,
        }
    }

    /// Composite holding `layers` in the given order.
    pub fn with_layers(
        width: usize,
        height: usize,
        max_val: u32,
        layers: impl IntoIterator<Item = Layer>,
    ) -> Result<Self> {
        let mut out = Self::new(width, height, max_val);
        for layer in layers {
            out.add_layer(layer)?;
        }
        Ok(out)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_val(&self) -> u32 {
        self.max_val
    }

    /// Layers bottom-most first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Result<&Layer> {
        self.position(name)
            .map(|i| &self.layers[i])
            .ok_or_else(|| unknown_layer(name))
    }

    pub fn current_layer(&self) -> Option<&Layer> {
        let name = self.current.as_deref()?;
        self.position(name).map(|i| &self.layers[i])
    }

    pub fn current_layer_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Select the layer used by every single-layer operation.
    pub fn set_current_layer(&mut self, name: &str) -> Result<()> {
        let idx = self.position(name).ok_or_else(|| unknown_layer(name))?;
        if let Some((w, h)) = self.layers[idx].image().map(Picture::dimensions) {
            self.adopt_dimensions(w, h);
        }
        debug!("LayeredPicture::set_current_layer {name}");
        self.current = Some(name.to_owned());
        Ok(())
    }

    /// Append an empty layer on top.
    pub fn add_empty_layer(&mut self, name: &str) -> Result<()> {
        self.add_layer(Layer::new(name)?)
    }

    /// Append `layer` on top. Fails on a duplicate name or an image whose
    /// dimensions disagree with the composite's fixed dimensions.
    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        if self.position(layer.name()).is_some() {
            return Err(Error::invalid_argument(format!(
                "layer {:?} already exists",
                layer.name()
            )));
        }
        if let Some(image) = layer.image() {
            self.check_fits(image)?;
            self.adopt_dimensions(image.width(), image.height());
        }
        debug!("LayeredPicture::add_layer {}", layer.name());
        self.layers.push(layer);
        Ok(())
    }

    /// Remove and return the named layer. Removing the current layer clears
    /// the selection.
    pub fn remove_layer(&mut self, name: &str) -> Result<Layer> {
        let idx = self.position(name).ok_or_else(|| unknown_layer(name))?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        debug!("LayeredPicture::remove_layer {name}");
        Ok(self.layers.remove(idx))
    }

    /// Show or hide the current layer.
    pub fn set_visibility(&mut self, visible: bool) -> Result<()> {
        let idx = self.current_index()?;
        self.layers[idx].set_visible(visible);
        Ok(())
    }

    /// Replace the current layer's image.
    pub fn set_current_layer_image(&mut self, image: Picture) -> Result<()> {
        let idx = self.current_index()?;
        self.check_fits(&image)?;
        self.adopt_dimensions(image.width(), image.height());
        self.layers[idx].set_image(image);
        Ok(())
    }

    /// Image shown when compositing.
    ///
    /// The current layer wins if it is visible and non-empty; otherwise the
    /// first visible non-empty layer in insertion order; otherwise `None`.
    pub fn resolve_top_most_visible(&self) -> Option<&Picture> {
        self.current_layer()
            .filter(|layer| layer.is_shown())
            .or_else(|| self.layers.iter().find(|layer| layer.is_shown()))
            .and_then(Layer::image)
    }

    /// Image of the current layer.
    ///
    /// `InvalidState` if no layer is selected or the selected layer is empty.
    pub fn current_image(&self) -> Result<&Picture> {
        let idx = self.current_index()?;
        self.layers[idx].image().ok_or_else(|| {
            Error::invalid_state(format!("current layer {:?} is empty", self.layers[idx].name()))
        })
    }

    pub fn channel_plane(&self, channel: Channel) -> Result<Vec<Vec<u32>>> {
        Ok(self.current_image()?.channel_plane(channel))
    }

    pub fn windowed_subset(
        &self,
        dimension: usize,
        center: Position,
        channel: Channel,
    ) -> Result<Vec<Vec<u32>>> {
        self.current_image()?
            .windowed_subset(dimension, center, channel)
    }

    /// Filtered copy of the current layer's image; the layer is not modified.
    pub fn filter(&self, kernel: &Kernel) -> Result<Picture> {
        Ok(self.current_image()?.filter(kernel))
    }

    /// Transformed copy of the current layer's image; the layer is not modified.
    pub fn color_transform(&self, matrix: &ColorMatrix) -> Result<Picture> {
        Ok(self.current_image()?.color_transform(matrix))
    }

    /// Replace every layer image at once with pictures of a new common size.
    ///
    /// `images` must hold one entry per layer in order (`None` for empty
    /// layers) and every picture must be `width × height`.
    pub(crate) fn replace_images(
        &mut self,
        width: usize,
        height: usize,
        images: Vec<Option<Picture>>,
    ) -> Result<()> {
        if images.len() != self.layers.len() {
            return Err(Error::invalid_argument(format!(
                "expected {} layer images, got {}",
                self.layers.len(),
                images.len()
            )));
        }
        if let Some(bad) = images.iter().flatten().find(|p| p.dimensions() != (width, height)) {
            return Err(Error::invalid_argument(format!(
                "replacement image is {}×{}, expected {width}×{height}",
                bad.width(),
                bad.height()
            )));
        }
        for (layer, image) in self.layers.iter_mut().zip(images) {
            if let Some(image) = image {
                layer.set_image(image);
            }
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Serializable description of the composite (no pixel data).
    pub fn summary(&self) -> LayeredSummary {
        LayeredSummary {
            width: self.width,
            height: self.height,
            max_val: self.max_val,
            current_layer: self.current.clone(),
            layers: self
                .layers
                .iter()
                .map(|layer| LayerSummary {
                    name: layer.name().to_owned(),
                    visible: layer.is_visible(),
                    dimensions: layer.image().map(Picture::dimensions),
                })
                .collect(),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.name() == name)
    }

    fn current_index(&self) -> Result<usize> {
        let name = self
            .current
            .as_deref()
            .ok_or_else(|| Error::invalid_state("no layer has been selected"))?;
        self.position(name)
            .ok_or_else(|| Error::invalid_state(format!("selected layer {name:?} no longer exists")))
    }

    // A zero on either axis means no image has fixed the size yet.
    fn dimensions_fixed(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    fn check_fits(&self, image: &Picture) -> Result<()> {
        if self.dimensions_fixed() && image.dimensions() != (self.width, self.height) {
            return Err(Error::invalid_argument(format!(
                "image is {}×{} but the layered picture is {}×{}",
                image.width(),
                image.height(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    fn adopt_dimensions(&mut self, width: usize, height: usize) {
        if !self.dimensions_fixed() {
            debug!("LayeredPicture: adopting dimensions {width}×{height}");
            self.width = width;
            self.height = height;
        }
    }
}

fn unknown_layer(name: &str) -> Error {
    Error::invalid_argument(format!("no layer named {name:?}"))
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayeredSummary {
    pub width: usize,
    pub height: usize,
    pub max_val: u32,
    pub current_layer: Option<String>,
    pub layers: Vec<LayerSummary>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSummary {
    pub name: String,
    pub visible: bool,
    pub dimensions: Option<(usize, usize)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pic(w: usize, h: usize, v: i64) -> Picture {
        Picture::filled(w, h, 255, [v, v, v]).unwrap()
    }

    fn abc() -> LayeredPicture {
        LayeredPicture::with_layers(
            0,
            0,
            255,
            [
                Layer::new("a").unwrap(),
                Layer::with_image("b", pic(2, 2, 10)).unwrap(),
                Layer::with_image("c", pic(2, 2, 20)).unwrap().visible(false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn top_most_visible_skips_empty_and_hidden_layers() {
        let mut lp = abc();
        assert_eq!(lp.resolve_top_most_visible(), Some(&pic(2, 2, 10)));
        lp.set_current_layer("c").unwrap();
        assert_eq!(lp.resolve_top_most_visible(), Some(&pic(2, 2, 10)));
        lp.set_visibility(true).unwrap();
        assert_eq!(lp.resolve_top_most_visible(), Some(&pic(2, 2, 20)));
    }

    #[test]
    fn nothing_visible_resolves_to_none() {
        let mut lp = abc();
        lp.set_current_layer("b").unwrap();
        lp.set_visibility(false).unwrap();
        assert_eq!(lp.resolve_top_most_visible(), None);
        assert_eq!(LayeredPicture::default().resolve_top_most_visible(), None);
    }

    #[test]
    fn first_image_fixes_dimensions() {
        let lp = abc();
        assert_eq!((lp.width(), lp.height()), (2, 2));

        let mut lp = LayeredPicture::default();
        lp.add_empty_layer("base").unwrap();
        assert_eq!((lp.width(), lp.height()), (0, 0));
        lp.set_current_layer("base").unwrap();
        lp.set_current_layer_image(pic(3, 1, 0)).unwrap();
        assert_eq!((lp.width(), lp.height()), (3, 1));
    }

    #[test]
    fn half_zero_dimensions_count_as_unfixed() {
        let mut lp = LayeredPicture::new(4, 0, 255);
        lp.add_layer(Layer::with_image("base", pic(2, 3, 0)).unwrap())
            .unwrap();
        assert_eq!((lp.width(), lp.height()), (2, 3));
        assert!(lp
            .add_layer(Layer::with_image("other", pic(4, 3, 0)).unwrap())
            .is_err());
    }

    #[test]
    fn mismatched_images_are_rejected() {
        let mut lp = abc();
        let err = lp.add_layer(Layer::with_image("d", pic(3, 3, 0)).unwrap());
        assert!(matches!(err, Err(Error::InvalidArgument(_))));
        lp.set_current_layer("a").unwrap();
        assert!(lp.set_current_layer_image(pic(1, 2, 0)).is_err());
        assert!(lp.layer("a").unwrap().is_empty());
    }

    #[test]
    fn duplicate_and_unknown_names_fail() {
        let mut lp = abc();
        assert!(matches!(
            lp.add_empty_layer("b"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            lp.set_current_layer("zzz"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(lp.remove_layer("zzz"), Err(Error::InvalidArgument(_))));
        assert_eq!(lp.layers().len(), 3);
    }

    #[test]
    fn selection_required_for_single_layer_operations() {
        let mut lp = abc();
        assert!(matches!(lp.set_visibility(false), Err(Error::InvalidState(_))));
        assert!(matches!(
            lp.set_current_layer_image(pic(2, 2, 0)),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(lp.current_image(), Err(Error::InvalidState(_))));
        lp.set_current_layer("a").unwrap();
        assert!(matches!(lp.filter(&Kernel::blur()), Err(Error::InvalidState(_))));
    }

    #[test]
    fn removing_current_layer_clears_selection() {
        let mut lp = abc();
        lp.set_current_layer("b").unwrap();
        let removed = lp.remove_layer("b").unwrap();
        assert_eq!(removed.name(), "b");
        assert!(lp.current_layer().is_none());
        assert!(lp.set_visibility(true).is_err());
        let names: Vec<_> = lp.layers().iter().map(Layer::name).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn delegated_transforms_do_not_modify_the_layer() {
        let mut lp = abc();
        lp.set_current_layer("b").unwrap();
        let swap = ColorMatrix::from_rows(&[[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [2.0, 0.0, 0.0]])
            .unwrap();
        let swapped = lp.color_transform(&swap).unwrap();
        assert_eq!(swapped.pixel(1, 1).unwrap().rgb(), [10, 10, 20]);
        let plane = lp.channel_plane(Channel::Red).unwrap();
        assert_eq!(plane, vec![vec![10, 10], vec![10, 10]]);
        let window = lp
            .windowed_subset(3, Position::new(0, 0), Channel::Green)
            .unwrap();
        assert_eq!(window[1], vec![0, 10, 10]);
        assert_eq!(lp.current_image().unwrap(), &pic(2, 2, 10));
    }

    #[test]
    fn summary_lists_layers_in_order() {
        let mut lp = abc();
        lp.set_current_layer("c").unwrap();
        let summary = lp.summary();
        assert_eq!(summary.current_layer.as_deref(), Some("c"));
        assert_eq!(summary.layers[0].dimensions, None);
        assert_eq!(summary.layers[2].dimensions, Some((2, 2)));
        assert!(!summary.layers[2].visible);
    }
}
