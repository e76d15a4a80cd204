//! ONNX Runtime session loading.
//!
//! Sessions are created once by the caller and handed to a detector; there is
//! no process-wide model instance.

use crate::core::config::{OrtExecutionProvider, OrtGraphOptimizationLevel as OG, OrtSessionConfig};
use crate::core::errors::OCRError;
use ort::execution_providers::ExecutionProviderDispatch;
use ort::logging::LogLevel;
use ort::session::Session;
use ort::session::builder::{GraphOptimizationLevel as GOL, SessionBuilder};
use std::path::Path;

const SESSION_CREATION_FAILURE: &str = "failed to create ONNX session";

/// Loads a session from `model_path`, applying `config` when given.
pub fn load_session(
    model_path: impl AsRef<Path>,
    config: Option<&OrtSessionConfig>,
) -> Result<Session, OCRError> {
    let path = model_path.as_ref();
    if !path.is_file() {
        return Err(OCRError::model_load_error(
            path,
            "file not found",
            Some("verify model file exists and is readable"),
            None,
        ));
    }

    let builder = Session::builder()?;
    let builder = match config {
        Some(cfg) => apply_ort_config(builder, cfg)?,
        None => builder.with_log_level(LogLevel::Error)?,
    };
    let session = builder.commit_from_file(path).map_err(|e| {
        OCRError::model_load_error(path, SESSION_CREATION_FAILURE, None, Some(e))
    })?;

    tracing::debug!(
        "Loaded ONNX session from {} ({} inputs, {} outputs)",
        path.display(),
        session.inputs.len(),
        session.outputs.len()
    );
    Ok(session)
}

fn apply_ort_config(
    mut builder: SessionBuilder,
    cfg: &OrtSessionConfig,
) -> Result<SessionBuilder, ort::Error> {
    if let Some(intra) = cfg.intra_threads {
        builder = builder.with_intra_threads(intra)?;
    }
    if let Some(inter) = cfg.inter_threads {
        builder = builder.with_inter_threads(inter)?;
    }
    if let Some(level) = cfg.optimization_level {
        let mapped = match level {
            OG::DisableAll => GOL::Disable,
            OG::Level1 => GOL::Level1,
            OG::Level2 => GOL::Level2,
            OG::Level3 => GOL::Level3,
        };
        builder = builder.with_optimization_level(mapped)?;
    }
    // 0=Verbose, 1=Info, 2=Warning, 3=Error, 4=Fatal
    let logging_level = match cfg.log_severity_level.unwrap_or(3) {
        0 => LogLevel::Verbose,
        1 => LogLevel::Info,
        2 => LogLevel::Warning,
        3 => LogLevel::Error,
        _ => LogLevel::Fatal,
    };
    builder = builder.with_log_level(logging_level)?;

    let providers = build_execution_providers(&cfg.get_execution_providers())?;
    if !providers.is_empty() {
        builder = builder.with_execution_providers(providers)?;
    }
    Ok(builder)
}

fn build_execution_providers(
    eps: &[OrtExecutionProvider],
) -> Result<Vec<ExecutionProviderDispatch>, ort::Error> {
    let mut providers = Vec::new();

    for ep in eps {
        match ep {
            OrtExecutionProvider::CPU => {
                providers.push(ort::execution_providers::CPUExecutionProvider::default().build());
            }
            #[cfg(feature = "cuda")]
            OrtExecutionProvider::CUDA { device_id } => {
                let mut cuda_provider = ort::execution_providers::CUDAExecutionProvider::default();
                if let Some(id) = device_id {
                    cuda_provider = cuda_provider.with_device_id(*id);
                }
                providers.push(cuda_provider.build());
            }
            #[cfg(not(feature = "cuda"))]
            OrtExecutionProvider::CUDA { .. } => {
                return Err(ort::Error::new(
                    "CUDA execution provider requested but cuda feature is not enabled",
                ));
            }
        }
    }

    Ok(providers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_model_is_model_load_error() {
        let err = load_session("does/not/exist.onnx", None).unwrap_err();
        assert!(matches!(err, OCRError::ModelLoad { .. }));
    }
}
