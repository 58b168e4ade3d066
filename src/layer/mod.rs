//! Named image slots and the layered composite built from them.

pub mod stack;

pub use self::stack::{LayerSummary, LayeredPicture, LayeredSummary};

use crate::error::{Error, Result};
use crate::picture::Picture;

/// A named slot that may hold one picture and can be hidden.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layer {
    name: String,
    visible: bool,
    image: Option<Picture>,
}

impl Layer {
    /// Empty, visible layer. Fails with `InvalidArgument` on an empty name or
    /// one containing whitespace or a path separator.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::invalid_argument("layer name cannot be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::invalid_argument(format!(
                "layer name {name:?} cannot contain whitespace"
            )));
        }
        if name.contains(&['/', '\\'][..]) {
            return Err(Error::invalid_argument(format!(
                "layer name {name:?} cannot contain path separators"
            )));
        }
        Ok(Self {
            name,
            visible: true,
            image: None,
        })
    }

    /// Visible layer holding `image`.
    pub fn with_image(name: impl Into<String>, image: Picture) -> Result<Self> {
        let mut layer = Self::new(name)?;
        layer.image = Some(image);
        Ok(layer)
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn image(&self) -> Option<&Picture> {
        self.image.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// Visible and holding an image.
    pub fn is_shown(&self) -> bool {
        self.visible && self.image.is_some()
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn set_image(&mut self, image: Picture) {
        self.image = Some(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_layer_is_visible_and_empty() {
        let layer = Layer::new("background").unwrap();
        assert_eq!(layer.name(), "background");
        assert!(layer.is_visible());
        assert!(layer.is_empty());
        assert!(!layer.is_shown());
    }

    #[test]
    fn rejects_empty_or_spaced_names() {
        assert!(matches!(Layer::new(""), Err(Error::InvalidArgument(_))));
        assert!(matches!(Layer::new("two words"), Err(Error::InvalidArgument(_))));
        assert!(matches!(Layer::new("../escape"), Err(Error::InvalidArgument(_))));
        assert!(matches!(Layer::new("a\\b"), Err(Error::InvalidArgument(_))));
        assert!(Layer::new("v1.2").is_ok());
    }

    #[test]
    fn hidden_layer_with_image_is_not_shown() {
        let pic = Picture::filled(1, 1, 255, [1, 2, 3]).unwrap();
        let layer = Layer::with_image("a", pic.clone()).unwrap().visible(false);
        assert_eq!(layer.image(), Some(&pic));
        assert!(!layer.is_shown());
    }
}
