//! File formats for single pictures and layered composites.
//!
//! - [`ImageFormat`]: closed set of single-picture formats behind one
//!   `decode`/`encode` pair. PPM is handled in-crate; PNG/JPEG are delegated
//!   to the `image` crate.
//! - [`manifest`]: the layered interchange format (a text manifest plus one
//!   image file per layer).
//! - [`write_json_file`]: pretty-print a serializable value to disk.

pub mod manifest;
pub mod ppm;
pub mod raster;

use crate::error::{Error, Result};
use crate::picture::Picture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Ppm,
    Png,
    Jpeg,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Ppm, ImageFormat::Png, ImageFormat::Jpeg];

    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                Error::invalid_argument(format!("{} has no file extension", path.display()))
            })?;
        match ext.as_str() {
            "ppm" => Ok(Self::Ppm),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(Error::invalid_argument(format!(
                "unsupported image extension {other:?}"
            ))),
        }
    }

    /// Canonical extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }

    pub fn decode(self, path: &Path) -> Result<Picture> {
        match self {
            Self::Ppm => ppm::read(path),
            Self::Png | Self::Jpeg => raster::read(path),
        }
    }

    /// Encoded file contents, without touching the filesystem. `path` only
    /// labels errors.
    pub fn encode_to_vec(self, picture: &Picture, path: &Path) -> Result<Vec<u8>> {
        match self {
            Self::Ppm => Ok(ppm::encode(picture).into_bytes()),
            Self::Png => raster::encode(picture, image::ImageFormat::Png, path),
            Self::Jpeg => raster::encode(picture, image::ImageFormat::Jpeg, path),
        }
    }

    pub fn encode(self, picture: &Picture, path: &Path) -> Result<()> {
        match self {
            Self::Ppm => ppm::write(picture, path),
            Self::Png => raster::write(picture, path, image::ImageFormat::Png),
            Self::Jpeg => raster::write(picture, path, image::ImageFormat::Jpeg),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Decode `path`, choosing the format from its extension.
pub fn read_picture(path: &Path) -> Result<Picture> {
    ImageFormat::from_path(path)?.decode(path)
}

/// Encode `picture` to `path`, choosing the format from its extension.
pub fn write_picture(picture: &Picture, path: &Path) -> Result<()> {
    ImageFormat::from_path(path)?.encode(picture, path)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    fs::write(path, json).map_err(|e| Error::from_io(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::from_io(parent, e))?;
        }
    }
    Ok(())
}
