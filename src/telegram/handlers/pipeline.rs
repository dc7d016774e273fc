//! Extract → select → upload → info chain for a single target URL.

use std::fmt;
use thiserror::Error;

use super::types::HandlerDeps;
use crate::download::{select_best_direct_format, ExtractError};
use crate::lulustream::{FileInfo, LuluError};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extracting,
    Selecting,
    Uploading,
    FetchingInfo,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extracting => "extracting",
            Stage::Selecting => "selecting",
            Stage::Uploading => "uploading",
            Stage::FetchingInfo => "fetching_info",
        };
        f.write_str(name)
    }
}

/// A failed pipeline stage. The Display text is what the admin receives.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Metadata extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("No valid direct video URL (format with video codec) found in metadata.")]
    NoDirectFormat,

    #[error("Selected format did not contain a direct URL.")]
    MissingDirectUrl,

    #[error("LuluStream upload failed: {0}")]
    Upload(#[source] LuluError),

    #[error("Failed to retrieve file info from LuluStream: {0}")]
    FileInfo(#[source] LuluError),
}

impl PipelineError {
    /// Stage at which the pipeline stopped
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Extraction(_) => Stage::Extracting,
            PipelineError::NoDirectFormat | PipelineError::MissingDirectUrl => Stage::Selecting,
            PipelineError::Upload(_) => Stage::Uploading,
            PipelineError::FileInfo(_) => Stage::FetchingInfo,
        }
    }

    /// Failure kind within the stage, for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            PipelineError::Extraction(_) => "extraction",
            PipelineError::NoDirectFormat => "no_direct_format",
            PipelineError::MissingDirectUrl => "missing_direct_url",
            PipelineError::Upload(e) | PipelineError::FileInfo(e) => e.subcategory(),
        }
    }
}

/// Mirrors `target` to LuluStream and returns the hosted file's info.
///
/// Every external call happens in order and the first failure ends the chain.
pub async fn run_pipeline(deps: &HandlerDeps, target: &str) -> Result<FileInfo, PipelineError> {
    log::info!("[{}] {}", Stage::Extracting, target);
    let metadata = deps.extractor.extract(target).await?;

    log::debug!("[{}] {} formats available", Stage::Selecting, metadata.formats().len());
    let best = select_best_direct_format(metadata.formats()).ok_or(PipelineError::NoDirectFormat)?;
    let direct_url = best
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or(PipelineError::MissingDirectUrl)?;
    log::info!(
        "[{}] picked format {} height={:?} tbr={:?}",
        Stage::Selecting,
        best.vcodec.as_deref().unwrap_or("?"),
        best.height,
        best.bitrate
    );

    let file_code = deps.lulu.upload_url(direct_url).await.map_err(PipelineError::Upload)?;

    log::debug!("[{}] {}", Stage::FetchingInfo, file_code);
    deps.lulu.file_info(&file_code).await.map_err(PipelineError::FileInfo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::YtDlpErrorType;
    use crate::lulustream::{Endpoint, TransportFailure};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reply_texts() {
        let extraction = PipelineError::from(ExtractError::Failed {
            kind: YtDlpErrorType::UnsupportedUrl,
            reason: "ERROR: Unsupported URL: x".to_string(),
        });
        assert!(extraction.to_string().starts_with("Metadata extraction failed: "));
        assert_eq!(extraction.stage(), Stage::Extracting);

        let upload = PipelineError::Upload(LuluError::Transport {
            endpoint: Endpoint::Upload,
            failure: TransportFailure::Timeout,
        });
        assert_eq!(
            upload.to_string(),
            "LuluStream upload failed: Failed to reach LuluStream upload endpoint: request timed out"
        );
        assert_eq!(upload.stage(), Stage::Uploading);
        assert_eq!(upload.subcategory(), "transport");

        let info = PipelineError::FileInfo(LuluError::MissingFields);
        assert!(info
            .to_string()
            .starts_with("Failed to retrieve file info from LuluStream: "));
        assert_eq!(info.stage().to_string(), "fetching_info");
        assert_eq!(info.subcategory(), "missing_fields");
    }

    #[test]
    fn test_selection_errors_share_stage() {
        assert_eq!(PipelineError::NoDirectFormat.stage(), Stage::Selecting);
        assert_eq!(PipelineError::MissingDirectUrl.stage(), Stage::Selecting);
    }
}
