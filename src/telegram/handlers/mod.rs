//! Message orchestration
//!
//! A message from the configured admin goes through extraction, format
//! selection, remote upload and file info lookup, then the result is posted
//! back as a photo. Everything else is ignored.

mod message;
mod pipeline;
mod types;

pub use message::{
    handle_message, pick_target, process_message, PROCESSING_NOTICE, UNEXPECTED_ERROR_NOTICE, USAGE_PROMPT,
};
pub use pipeline::{run_pipeline, PipelineError, Stage};
pub use types::HandlerDeps;
