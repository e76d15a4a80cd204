//! CLI workflows: single-image detection and folder batches.

use crate::config::{BatchConfig, DetectConfig};
use rayon::prelude::*;
use serde::Serialize;
use snaptext::core::config::{OrtSessionConfig, ParallelPolicy};
use snaptext::core::{OCRError, ProcessingStage, TextDetector};
use snaptext::domain::TextRegion;
use snaptext::predictors::TextRegionPredictor;
use snaptext::utils::visualization::{VisualizationConfig, draw_regions};
use snaptext::utils::{is_supported_image, load_image};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, warn};

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// JSON report for one image
#[derive(Debug, Serialize)]
struct DetectionReport<'a> {
    image: &'a Path,
    width: u32,
    height: u32,
    processing_time_ms: f64,
    regions: &'a [TextRegion],
}

/// Detects text in a single image and prints the result.
pub fn process_file(
    path: &Path,
    config: &DetectConfig,
    output_image: Option<&Path>,
    output_format: &str,
) -> CliResult<()> {
    info!("Loading image from file...");
    let image = load_image(path)?;

    info!("Loading model {}...", config.model.display());
    let predictor = TextRegionPredictor::builder()
        .with_config(config.detection.clone())
        .with_ort_config(OrtSessionConfig::from_device(&config.device)?)
        .build_east(&config.model)?;

    info!("Processing image ({}x{})...", image.width(), image.height());
    let start = Instant::now();
    let regions = predictor.predict(&image)?;
    let processing_time = start.elapsed().as_secs_f64() * 1000.0;
    info!("Detection completed in {:.2}ms", processing_time);

    if let Some(output) = output_image {
        let annotated = draw_regions(&image, &regions, &VisualizationConfig::default());
        save_image(&annotated, output)?;
        info!("Annotated image written to {}", output.display());
    }

    let report = DetectionReport {
        image: path,
        width: image.width(),
        height: image.height(),
        processing_time_ms: processing_time,
        regions: &regions,
    };
    output_result(&report, output_format)
}

/// Runs detection over every image in the configured input folder.
pub fn process_batch(config: &BatchConfig) -> CliResult<()> {
    let (Some(input), Some(output), Some(model)) =
        (&config.input_folder, &config.output_folder, &config.model)
    else {
        return Err("input folder, output folder and model are required".into());
    };

    if config.parallel.install_global_thread_pool()? {
        info!("Using {:?} worker threads", config.parallel.max_threads);
    }

    let device = config.device.as_deref().unwrap_or("cpu");
    let predictor = TextRegionPredictor::builder()
        .with_config(config.detection.clone())
        .with_ort_config(OrtSessionConfig::from_device(device)?)
        .build_east(model)?;

    let start = Instant::now();
    let summary = process_folder(
        &predictor,
        input,
        output,
        &config.parallel,
        &VisualizationConfig::default(),
    )?;
    info!(
        "Processed {}/{} images in {:.2}s",
        summary.processed,
        summary.total,
        start.elapsed().as_secs_f64()
    );

    if summary.processed < summary.total {
        return Err(format!("{} images failed", summary.total - summary.processed).into());
    }
    Ok(())
}

/// Outcome of a folder run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub processed: usize,
}

/// Lists the supported images directly inside `dir`, sorted by path.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>, OCRError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Annotates every image in `input` and writes it to `output` under the
/// same file name. A failing image is logged and skipped.
pub fn process_folder<D: TextDetector>(
    predictor: &TextRegionPredictor<D>,
    input: &Path,
    output: &Path,
    policy: &ParallelPolicy,
    style: &VisualizationConfig,
) -> Result<BatchSummary, OCRError> {
    let paths = collect_images(input)?;
    if paths.is_empty() {
        warn!("No images found in {}", input.display());
        return Ok(BatchSummary {
            total: 0,
            processed: 0,
        });
    }
    fs::create_dir_all(output)?;

    let run = |path: &PathBuf| process_one(predictor, path, output, style);
    let results: Vec<Result<(), OCRError>> = if policy.should_parallelize(paths.len()) {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    };

    let mut processed = 0;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(()) => processed += 1,
            Err(e) => error!("Failed to process {}: {}", path.display(), e),
        }
    }

    Ok(BatchSummary {
        total: paths.len(),
        processed,
    })
}

fn process_one<D: TextDetector>(
    predictor: &TextRegionPredictor<D>,
    path: &Path,
    output: &Path,
    style: &VisualizationConfig,
) -> Result<(), OCRError> {
    let file_name = path.file_name().ok_or_else(|| OCRError::InvalidInput {
        message: format!("{} has no file name", path.display()),
    })?;

    let image = load_image(path)?;
    let regions = predictor.predict(&image)?;

    let name = file_name.to_string_lossy();
    for region in &regions {
        let bbox = &region.bbox;
        info!(
            "{}: ({}, {}) - ({}, {}) confidence {:.2}",
            name, bbox.start_x, bbox.start_y, bbox.end_x, bbox.end_y, region.confidence
        );
    }

    let annotated = draw_regions(&image, &regions, style);
    save_image(&annotated, &output.join(file_name))
}

fn save_image(image: &image::RgbImage, path: &Path) -> Result<(), OCRError> {
    image.save(path).map_err(|e| {
        OCRError::processing_error(
            ProcessingStage::Visualization,
            format!("failed to write {}", path.display()),
            e,
        )
    })
}

fn output_result(report: &DetectionReport<'_>, format: &str) -> CliResult<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        _ => {
            println!("\n=== Text Regions ===");
            println!("Image: {}", report.image.display());
            println!("Image size: {}x{}", report.width, report.height);
            println!("Processing time: {:.2}ms", report.processing_time_ms);
            println!("Text regions: {}", report.regions.len());
            println!();

            if report.regions.is_empty() {
                println!("No text detected.");
            } else {
                for (idx, region) in report.regions.iter().enumerate() {
                    let bbox = &region.bbox;
                    println!(
                        "[{}] ({}, {}) - ({}, {}) {:.1}%",
                        idx + 1,
                        bbox.start_x,
                        bbox.start_y,
                        bbox.end_x,
                        bbox.end_y,
                        region.confidence * 100.0
                    );
                }
            }
        }
    }
    Ok(())
}
