use layered_image::codec::write_json_file;
use layered_image::config::pipeline;
use layered_image::layer::LayeredSummary;
use layered_image::project::Project;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = pipeline::load_config(Path::new(&config_path))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut project = Project::new();
    for (idx, step) in config.steps.iter().enumerate() {
        step.apply(&mut project, &mut rng)
            .map_err(|e| format!("Step {idx} ({}) failed: {e}", step.op()))?;
    }

    let summary = PipelineSummary {
        steps_applied: config.steps.len(),
        current_picture: project.current_index(),
        pictures: project.pictures().iter().map(|p| p.summary()).collect(),
    };
    println!(
        "Applied {} steps; project holds {} picture(s)",
        summary.steps_applied,
        summary.pictures.len()
    );

    if let Some(path) = &config.summary_json {
        write_json_file(path, &summary)
            .map_err(|e| format!("Failed to write summary {}: {e}", path.display()))?;
        println!("Saved project summary to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: layer_pipeline <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PipelineSummary {
    steps_applied: usize,
    current_picture: Option<usize>,
    pictures: Vec<LayeredSummary>,
}
