//! Error type shared by every fallible operation in the crate.
//!
//! - `InvalidArgument`: bad parameters, malformed kernels/matrices, unknown or
//!   duplicate layer names, dimension mismatches, malformed file content.
//! - `InvalidState`: an operation needs a current layer/picture that is not set.
//! - `NotFound`: decoding a file that does not exist.
//! - `Io` / `Codec`: failures reported by the filesystem or the `image` codecs.
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("codec error on {}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Map a filesystem error on `path`, promoting `NotFound` to its own variant.
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Map an `image` crate error on `path`, keeping I/O failures in the I/O categories.
    pub fn from_image(path: &Path, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(io) => Self::from_io(path, io),
            other => Self::Codec {
                path: path.to_path_buf(),
                source: other,
            },
        }
    }
}
