mod config;
mod logging;

use anyhow::Context;
use boxcrop_dataset::NuScenes;
use boxcrop_extract::{extract_scene, ExtractionReport, PlyDirSink};
use clap::Parser;
use config::{Args, RunConfig};
use std::fs;
use std::process::ExitCode;

/// Exit code for rejected command-line input.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init(&args.log_file) {
        eprintln!("failed to set up logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match run(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunConfig) -> anyhow::Result<ExtractionReport> {
    log::debug!("{:?}", config);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating output directory {}", config.output_dir.display()))?;

    let nusc = NuScenes::load(&config.dataroot, &config.dataset_version).with_context(|| {
        format!(
            "loading {} from {}",
            config.dataset_version,
            config.dataroot.display()
        )
    })?;

    let mut sink = PlyDirSink::new(&config.output_dir, config.encoding);
    extract_scene(&nusc, config.scene_number, config.options, &mut sink)
        .with_context(|| format!("extracting scene {}", config.scene_number))
}
