//! EAST text detector backed by ONNX Runtime.
//!
//! Wraps an exported EAST network: builds the mean-subtracted input blob,
//! runs one forward pass, and hands back the score and geometry maps in
//! `[N, C, H, W]` order for [`crate::processors::decode`].

use crate::core::config::{ConfigError, ConfigValidator, OrtSessionConfig};
use crate::core::constants::{
    DEFAULT_INPUT_HEIGHT, DEFAULT_INPUT_WIDTH, EAST_MEAN_RGB, GEOMETRY_CHANNELS,
    INPUT_SIZE_DIVISOR, SCORE_CHANNELS,
};
use crate::core::inference::load_session;
use crate::core::traits::{DetectorOutput, TextDetector};
use crate::core::{OCRError, SimpleError};
use crate::processors::TensorLayout;
use image::RgbImage;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;

/// Configuration for [`EastDetector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EastDetectorConfig {
    /// Input width, a multiple of 32 (default: 320)
    pub input_width: u32,
    /// Input height, a multiple of 32 (default: 320)
    pub input_height: u32,
    /// Layout of the model's input and output tensors (default: NCHW)
    pub layout: TensorLayout,
    /// Input tensor name. Defaults to the model's first input.
    pub input_name: Option<String>,
    /// Score map output name. Defaults to whichever output has one channel.
    pub score_output: Option<String>,
    /// Geometry map output name. Defaults to whichever output has five channels.
    pub geometry_output: Option<String>,
    /// ONNX Runtime session settings.
    pub ort: Option<OrtSessionConfig>,
}

impl Default for EastDetectorConfig {
    fn default() -> Self {
        Self {
            input_width: DEFAULT_INPUT_WIDTH,
            input_height: DEFAULT_INPUT_HEIGHT,
            layout: TensorLayout::default(),
            input_name: None,
            score_output: None,
            geometry_output: None,
            ort: None,
        }
    }
}

impl ConfigValidator for EastDetectorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("input_width", self.input_width),
            ("input_height", self.input_height),
        ] {
            if value == 0 || value % INPUT_SIZE_DIVISOR != 0 {
                return Err(ConfigError::ValidationFailed {
                    message: format!(
                        "{name} must be a positive multiple of {INPUT_SIZE_DIVISOR}, got {value}"
                    ),
                });
            }
        }
        if self.score_output.is_some() != self.geometry_output.is_some() {
            return Err(ConfigError::InvalidConfig {
                message: "score_output and geometry_output must be set together".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// EAST detector running on an ONNX Runtime session.
///
/// The session is created once in [`EastDetector::new`] and reused for every
/// call; runs are serialized through a mutex.
pub struct EastDetector {
    session: Mutex<Session>,
    model_name: String,
    input_name: String,
    output_names: OutputNames,
    layout: TensorLayout,
    input_size: (u32, u32),
}

impl std::fmt::Debug for EastDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EastDetector")
            .field("model_name", &self.model_name)
            .field("input_name", &self.input_name)
            .field("layout", &self.layout)
            .field("input_size", &self.input_size)
            .finish_non_exhaustive()
    }
}

impl EastDetector {
    /// Loads the model at `model_path`.
    pub fn new(model_path: impl AsRef<Path>, config: EastDetectorConfig) -> Result<Self, OCRError> {
        config.validate()?;
        let path = model_path.as_ref();
        let session = load_session(path, config.ort.as_ref())?;

        let input_name = match config.input_name.clone() {
            Some(name) if session.inputs.iter().any(|input| input.name == name) => name,
            Some(name) => {
                return Err(ConfigError::InvalidConfig {
                    message: format!("model '{}' has no input named '{name}'", path.display()),
                }
                .into());
            }
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| OCRError::InvalidInput {
                    message: format!("model '{}' declares no inputs", path.display()),
                })?,
        };

        let available: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let output_names = resolve_output_names(&available, &config)?;

        let model_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "east".to_string());

        tracing::info!(
            "Loaded EAST model '{}' (input '{}', {}x{}, {:?})",
            model_name,
            input_name,
            config.input_width,
            config.input_height,
            config.layout
        );

        Ok(Self {
            session: Mutex::new(session),
            model_name,
            input_name,
            output_names,
            layout: config.layout,
            input_size: (config.input_width, config.input_height),
        })
    }
}

impl TextDetector for EastDetector {
    fn detect(&self, image: &RgbImage) -> Result<DetectorOutput, OCRError> {
        if image.dimensions() != self.input_size {
            return Err(OCRError::InvalidInput {
                message: format!(
                    "expected a {}x{} image, got {}x{}",
                    self.input_size.0,
                    self.input_size.1,
                    image.width(),
                    image.height()
                ),
            });
        }

        let blob = build_input_blob(image, self.layout);
        let input_tensor = TensorRef::from_array_view(blob.view()).map_err(|e| {
            OCRError::inference_error(&self.model_name, "failed to convert input blob", e)
        })?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            OCRError::inference_error(
                &self.model_name,
                "failed to acquire session lock",
                SimpleError::new("session mutex poisoned"),
            )
        })?;

        let start = Instant::now();
        let outputs = session.run(inputs).map_err(|e| {
            OCRError::inference_error(&self.model_name, "forward pass failed", e)
        })?;
        tracing::info!(
            "Detection in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );

        let extract = |name: &str| -> Result<Array4<f32>, OCRError> {
            let value = outputs.get(name).ok_or_else(|| OCRError::InvalidInput {
                message: format!("model '{}' produced no output named '{name}'", self.model_name),
            })?;
            let (shape, data) = value.try_extract_tensor::<f32>().map_err(|e| {
                OCRError::inference_error(
                    &self.model_name,
                    format!("failed to extract output '{name}' as f32"),
                    e,
                )
            })?;
            let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
            if dims.len() != 4 {
                return Err(OCRError::invalid_shape("detector output", "a 4-D tensor", &dims));
            }
            let array =
                Array4::from_shape_vec((dims[0], dims[1], dims[2], dims[3]), data.to_vec())?;
            Ok(to_nchw(array, self.layout))
        };

        let first = extract(&self.output_names.first)?;
        let second = extract(&self.output_names.second)?;
        drop(outputs);
        drop(session);

        Ok(assign_maps(first, second, self.output_names.named))
    }

    fn input_size(&self) -> (u32, u32) {
        self.input_size
    }

    fn name(&self) -> &str {
        &self.model_name
    }
}

/// The two model outputs read on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputNames {
    pub first: String,
    pub second: String,
    /// `true` when `first` is known to be the score map.
    pub named: bool,
}

/// Picks the outputs to read from the names a model declares.
///
/// Configured names must all be declared by the model. Without configured
/// names the first two declared outputs are used.
pub(crate) fn resolve_output_names(
    available: &[String],
    config: &EastDetectorConfig,
) -> Result<OutputNames, OCRError> {
    if let (Some(score), Some(geometry)) = (&config.score_output, &config.geometry_output) {
        for name in [score, geometry] {
            if !available.contains(name) {
                return Err(ConfigError::InvalidConfig {
                    message: format!(
                        "model has no output named '{name}' (outputs: {})",
                        available.join(", ")
                    ),
                }
                .into());
            }
        }
        return Ok(OutputNames {
            first: score.clone(),
            second: geometry.clone(),
            named: true,
        });
    }

    match available {
        [first, second, ..] => Ok(OutputNames {
            first: first.clone(),
            second: second.clone(),
            named: false,
        }),
        _ => Err(OCRError::InvalidInput {
            message: format!(
                "model has {} outputs, expected a score map and a geometry map",
                available.len()
            ),
        }),
    }
}

/// Builds the detector input: RGB order, per-channel mean subtracted, scale 1.
pub(crate) fn build_input_blob(image: &RgbImage, layout: TensorLayout) -> Array4<f32> {
    let (width, height) = image.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut blob = match layout {
        TensorLayout::Nchw => Array4::<f32>::zeros((1, 3, h, w)),
        TensorLayout::Nhwc => Array4::<f32>::zeros((1, h, w, 3)),
    };

    for (x, y, pixel) in image.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..3 {
            let value = pixel[c] as f32 - EAST_MEAN_RGB[c];
            match layout {
                TensorLayout::Nchw => blob[[0, c, y, x]] = value,
                TensorLayout::Nhwc => blob[[0, y, x, c]] = value,
            }
        }
    }
    blob
}

/// Converts a model output to `[N, C, H, W]`.
pub(crate) fn to_nchw(array: Array4<f32>, layout: TensorLayout) -> Array4<f32> {
    match layout {
        TensorLayout::Nchw => array,
        TensorLayout::Nhwc => array
            .permuted_axes([0, 3, 1, 2])
            .as_standard_layout()
            .into_owned(),
    }
}

/// Orders two output maps as (scores, geometry).
///
/// Explicitly named outputs are trusted as given. Otherwise the maps are
/// told apart by channel count; anything ambiguous is passed through for
/// the decoder's shape check to reject.
pub(crate) fn assign_maps(first: Array4<f32>, second: Array4<f32>, named: bool) -> DetectorOutput {
    let swapped = !named
        && first.shape()[1] == GEOMETRY_CHANNELS
        && second.shape()[1] == SCORE_CHANNELS;
    if swapped {
        DetectorOutput::new(second, first)
    } else {
        DetectorOutput::new(first, second)
    }
}
