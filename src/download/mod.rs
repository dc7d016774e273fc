//! Metadata extraction and direct format selection

pub mod formats;
pub mod ytdlp;
pub mod ytdlp_errors;

pub use formats::{select_best_direct_format, FormatDescriptor};
pub use ytdlp::{ExtractError, MetadataExtractor, VideoMetadata, YtDlpExtractor};
pub use ytdlp_errors::YtDlpErrorType;
