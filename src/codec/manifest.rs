//! Layered interchange format.
//!
//! A text manifest whose first line is `<width> <height> <maxVal>`, followed
//! by one `<layerName> <true|false> <imagePath>` line per layer, bottom-most
//! first. Each image file is encoded independently in any [`ImageFormat`].
//!
//! Relative image paths are resolved against the manifest's directory; the
//! writer stores bare file names next to the manifest.
use super::ImageFormat;
use crate::error::{Error, Result};
use crate::layer::{Layer, LayeredPicture};
use log::{debug, warn};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// One parsed layer line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub visible: bool,
    pub image_path: PathBuf,
}

/// Parsed manifest, before any image file is read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    pub width: usize,
    pub height: usize,
    pub max_val: u32,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty());

        let (_, header) = lines
            .next()
            .ok_or_else(|| Error::invalid_argument("empty layer manifest"))?;
        let fields: Vec<&str> = header.split_whitespace().collect();
        let [w, h, m] = fields[..] else {
            return Err(Error::invalid_argument(format!(
                "manifest header must be `<width> <height> <maxVal>`, got {header:?}"
            )));
        };
        let width: usize = parse_field(w, "width", 1)?;
        let height: usize = parse_field(h, "height", 1)?;
        let max_val = parse_field(m, "max value", 1)?;
        if (width == 0) != (height == 0) {
            return Err(Error::invalid_argument(format!(
                "manifest dimensions {width}×{height} must both be zero or both positive"
            )));
        }

        let mut entries = Vec::new();
        for (idx, line) in lines {
            let line_no = idx + 1;
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [name, visible, path] = fields[..] else {
                return Err(Error::invalid_argument(format!(
                    "manifest line {line_no}: expected `<name> <true|false> <path>`, got {line:?}"
                )));
            };
            let visible = parse_field(visible, "visibility", line_no)?;
            entries.push(ManifestEntry {
                name: name.to_owned(),
                visible,
                image_path: PathBuf::from(path),
            });
        }

        Ok(Self {
            width,
            height,
            max_val,
            entries,
        })
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {} {}", self.width, self.height, self.max_val);
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{} {} {}",
                entry.name,
                entry.visible,
                entry.image_path.display()
            );
        }
        out
    }
}

/// Read a layered picture from the manifest at `path` and its image files.
pub fn read(path: &Path) -> Result<LayeredPicture> {
    let text = fs::read_to_string(path).map_err(|e| Error::from_io(path, e))?;
    let manifest = Manifest::parse(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let mut layers = Vec::with_capacity(manifest.entries.len());
    for entry in &manifest.entries {
        let image_path = base.join(&entry.image_path);
        let image = ImageFormat::from_path(&image_path)?.decode(&image_path)?;
        layers.push(Layer::with_image(entry.name.as_str(), image)?.visible(entry.visible));
    }
    debug!(
        "manifest: read {} layers from {}",
        layers.len(),
        path.display()
    );
    LayeredPicture::with_layers(manifest.width, manifest.height, manifest.max_val, layers)
}

/// Write `picture` as a manifest at `path` plus one `<name>.<ext>` image per
/// non-empty layer in the same directory. Empty layers are skipped.
///
/// Every image is encoded before anything is written, and files written by
/// a failed call are removed again.
pub fn write(picture: &LayeredPicture, path: &Path, format: ImageFormat) -> Result<()> {
    super::ensure_parent_dir(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));

    let mut manifest = Manifest {
        width: picture.width(),
        height: picture.height(),
        max_val: picture.max_val(),
        entries: Vec::with_capacity(picture.layers().len()),
    };
    let mut staged = Vec::with_capacity(picture.layers().len() + 1);
    for layer in picture.layers() {
        let Some(image) = layer.image() else {
            warn!("manifest: skipping empty layer {:?}", layer.name());
            continue;
        };
        let file_name = PathBuf::from(format!("{}.{}", layer.name(), format.extension()));
        let target = base.join(&file_name);
        staged.push((format.encode_to_vec(image, &target)?, target));
        manifest.entries.push(ManifestEntry {
            name: layer.name().to_owned(),
            visible: layer.is_visible(),
            image_path: file_name,
        });
    }
    staged.push((manifest.render().into_bytes(), path.to_path_buf()));

    let mut written: Vec<&Path> = Vec::with_capacity(staged.len());
    for (bytes, target) in &staged {
        if let Err(e) = fs::write(target, bytes) {
            for done in written {
                if let Err(cleanup) = fs::remove_file(done) {
                    warn!("manifest: could not remove {}: {cleanup}", done.display());
                }
            }
            return Err(Error::from_io(target, e));
        }
        written.push(target.as_path());
    }
    debug!(
        "manifest: wrote {} layers to {}",
        manifest.entries.len(),
        path.display()
    );
    Ok(())
}

fn parse_field<T: std::str::FromStr>(token: &str, what: &str, line_no: usize) -> Result<T> {
    token.parse().map_err(|_| {
        Error::invalid_argument(format!(
            "manifest line {line_no}: invalid {what} {token:?}"
        ))
    })
}
