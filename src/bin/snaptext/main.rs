//! snaptext CLI
//!
//! Detects text regions in images with an EAST model.
//!
//! # Usage
//!
//! ## Single image
//! ```bash
//! snaptext detect --image sign.jpg --model models/east.onnx --output sign_boxes.png
//! ```
//!
//! ## Folder
//! ```bash
//! snaptext batch --input images/ --output annotated/ --model models/east.onnx
//! snaptext batch --config batch.json
//! ```

mod cli;
mod config;

use clap::{Parser, Subcommand};
use snaptext::core::config::ConfigValidator;
use snaptext::domain::TextDetectionConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "snaptext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Text region detection with EAST models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect text regions in a single image
    Detect {
        /// Image to process
        #[arg(long)]
        image: PathBuf,

        /// Path to the EAST model
        #[arg(long, env = "SNAPTEXT_MODEL")]
        model: PathBuf,

        /// Minimum cell confidence
        #[arg(long, default_value_t = 0.5, env = "SNAPTEXT_MIN_CONFIDENCE")]
        min_confidence: f32,

        /// Suppression overlap threshold
        #[arg(long, default_value_t = 0.3, env = "SNAPTEXT_OVERLAP_THRESHOLD")]
        overlap_threshold: f32,

        /// Detector input width (multiple of 32)
        #[arg(long, default_value_t = 320)]
        width: u32,

        /// Detector input height (multiple of 32)
        #[arg(long, default_value_t = 320)]
        height: u32,

        /// Write the annotated image here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format (json, pretty)
        #[arg(long, default_value = "pretty")]
        format: String,

        /// Device to use (cpu, cuda, cuda:0, etc.)
        #[arg(long, default_value = "cpu", env = "SNAPTEXT_DEVICE")]
        device: String,
    },
    /// Annotate every image in a folder
    Batch {
        /// Folder to scan for images
        #[arg(long)]
        input: Option<PathBuf>,

        /// Folder to write annotated images to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to the EAST model
        #[arg(long, env = "SNAPTEXT_MODEL")]
        model: Option<PathBuf>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Minimum cell confidence
        #[arg(long, env = "SNAPTEXT_MIN_CONFIDENCE")]
        min_confidence: Option<f32>,

        /// Device to use (cpu, cuda, cuda:0, etc.)
        #[arg(long, env = "SNAPTEXT_DEVICE")]
        device: Option<String>,

        /// Number of worker threads (defaults to number of CPUs)
        #[arg(long, env = "SNAPTEXT_WORKERS")]
        workers: Option<usize>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    snaptext::utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            image,
            model,
            min_confidence,
            overlap_threshold,
            width,
            height,
            output,
            format,
            device,
        } => {
            let detection = TextDetectionConfig {
                min_confidence,
                overlap_threshold,
                input_width: width,
                input_height: height,
            };
            detection.validate()?;
            let config = config::DetectConfig {
                model,
                detection,
                device,
            };

            info!("Processing file: {}", image.display());
            cli::process_file(&image, &config, output.as_deref(), &format)?;
        }
        Commands::Batch {
            input,
            output,
            model,
            config: config_file,
            min_confidence,
            device,
            workers,
        } => {
            let mut batch = match config_file {
                Some(path) => {
                    info!("Loading configuration from {}", path.display());
                    config::BatchConfig::from_file(&path)?
                }
                None => config::BatchConfig::default(),
            };
            batch.input_folder = input.or(batch.input_folder);
            batch.output_folder = output.or(batch.output_folder);
            batch.model = model.or(batch.model);
            batch.device = device.or(batch.device);
            if let Some(value) = min_confidence {
                batch.detection.min_confidence = value;
            }
            if workers.is_some() {
                batch.parallel.max_threads = workers;
            }
            batch.validate()?;

            cli::process_batch(&batch)?;
        }
    }

    Ok(())
}
