use crate::codec::ImageFormat;
use crate::error::Result as EditResult;
use crate::layer::LayeredPicture;
use crate::project::{Adjustment, Project};
use log::debug;
use rand::Rng;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    /// Seed for the mosaic random source. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    pub steps: Vec<Step>,
    /// Where to write the final project summary, if anywhere.
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

/// One editing step, applied to the project's current picture.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Checkerboard {
        tile_size: usize,
        num_tiles: usize,
    },
    /// Start an empty composite whose size is fixed by its first image.
    NewPicture,
    SelectPicture {
        index: usize,
    },
    CreateLayer {
        name: String,
    },
    SelectLayer {
        name: String,
    },
    RemoveLayer {
        name: String,
    },
    SetVisibility {
        visible: bool,
    },
    Load {
        path: PathBuf,
    },
    Blur,
    Sharpen,
    Monochrome,
    Sepia,
    Mosaic {
        seeds: usize,
    },
    Downsize {
        width: usize,
        height: usize,
    },
    ExportTop {
        path: PathBuf,
    },
    Save {
        path: PathBuf,
        #[serde(default = "default_layer_format")]
        format: ImageFormat,
    },
    Open {
        path: PathBuf,
    },
}

impl Step {
    /// The `op` tag this step was parsed from.
    pub fn op(&self) -> &'static str {
        match self {
            Step::Checkerboard { .. } => "checkerboard",
            Step::NewPicture => "new_picture",
            Step::SelectPicture { .. } => "select_picture",
            Step::CreateLayer { .. } => "create_layer",
            Step::SelectLayer { .. } => "select_layer",
            Step::RemoveLayer { .. } => "remove_layer",
            Step::SetVisibility { .. } => "set_visibility",
            Step::Load { .. } => "load",
            Step::Blur => "blur",
            Step::Sharpen => "sharpen",
            Step::Monochrome => "monochrome",
            Step::Sepia => "sepia",
            Step::Mosaic { .. } => "mosaic",
            Step::Downsize { .. } => "downsize",
            Step::ExportTop { .. } => "export_top",
            Step::Save { .. } => "save",
            Step::Open { .. } => "open",
        }
    }

    /// Run this step against `project`. `rng` feeds the mosaic seed picker.
    pub fn apply<R: Rng>(&self, project: &mut Project, rng: &mut R) -> EditResult<()> {
        debug!("pipeline step {}: {self:?}", self.op());
        match self {
            Step::Checkerboard {
                tile_size,
                num_tiles,
            } => project.create_checkerboard(*tile_size, *num_tiles).map(drop),
            Step::NewPicture => {
                let index = project.add_picture(LayeredPicture::default());
                project.set_current_picture(index)
            }
            Step::SelectPicture { index } => project.set_current_picture(*index),
            Step::CreateLayer { name } => project.create_layer(name),
            Step::SelectLayer { name } => project.select_layer(name),
            Step::RemoveLayer { name } => project.remove_layer(name).map(drop),
            Step::SetVisibility { visible } => project.set_visibility(*visible),
            Step::Load { path } => project.load_into_current_layer(path),
            Step::Blur => project.apply(Adjustment::Blur),
            Step::Sharpen => project.apply(Adjustment::Sharpen),
            Step::Monochrome => project.apply(Adjustment::Monochrome),
            Step::Sepia => project.apply(Adjustment::Sepia),
            Step::Mosaic { seeds } => project.mosaic(*seeds, rng),
            Step::Downsize { width, height } => project.downsize(*width, *height),
            Step::ExportTop { path } => project.export_top_most_visible(path),
            Step::Save { path, format } => project.save_current(path, *format),
            Step::Open { path } => project.open_layered(path).map(drop),
        }
    }
}

fn default_layer_format() -> ImageFormat {
    ImageFormat::Ppm
}

pub fn load_config(path: &Path) -> Result<PipelineConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<PipelineConfig, serde_json::Error> {
    serde_json::from_str(data)
}
