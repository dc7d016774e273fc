use std::fmt;
use thiserror::Error;

/// LuluStream endpoints the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Upload,
    FileInfo,
}

impl Endpoint {
    /// Path below the API base
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Upload => "upload/url",
            Endpoint::FileInfo => "file/info",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Upload => write!(f, "upload"),
            Endpoint::FileInfo => write!(f, "file/info"),
        }
    }
}

/// Transport-level failure, stripped of the request URL.
///
/// Request URLs carry the API key in their query string, so only the
/// category of the failure is ever shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Timeout,
    Connect,
    Other,
}

impl TransportFailure {
    pub fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() {
            TransportFailure::Connect
        } else {
            TransportFailure::Other
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Timeout => write!(f, "request timed out"),
            TransportFailure::Connect => write!(f, "connection failed"),
            TransportFailure::Other => write!(f, "request failed"),
        }
    }
}

/// Errors of the upload and file info calls
#[derive(Debug, Error)]
pub enum LuluError {
    #[error("LuluStream API key is not configured.")]
    MissingKey,

    #[error("Failed to reach LuluStream {endpoint} endpoint: {failure}")]
    Transport {
        endpoint: Endpoint,
        failure: TransportFailure,
    },

    #[error("LuluStream {0} response was not valid JSON.")]
    InvalidJson(Endpoint),

    #[error("LuluStream upload response missing 'result'.")]
    MissingResult,

    #[error("LuluStream upload response missing filecode.")]
    MissingFileCode,

    #[error("LuluStream file/info response missing required fields.")]
    MissingFields,
}

impl LuluError {
    /// Returns subcategory for logs
    pub fn subcategory(&self) -> &'static str {
        match self {
            LuluError::MissingKey => "missing_key",
            LuluError::Transport { .. } => "transport",
            LuluError::InvalidJson(_) => "invalid_json",
            LuluError::MissingResult => "missing_result",
            LuluError::MissingFileCode => "missing_file_code",
            LuluError::MissingFields => "missing_fields",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_messages_are_distinct() {
        let messages = [
            LuluError::MissingKey.to_string(),
            LuluError::Transport {
                endpoint: Endpoint::Upload,
                failure: TransportFailure::Timeout,
            }
            .to_string(),
            LuluError::InvalidJson(Endpoint::Upload).to_string(),
            LuluError::MissingResult.to_string(),
            LuluError::MissingFileCode.to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_transport_message() {
        let err = LuluError::Transport {
            endpoint: Endpoint::FileInfo,
            failure: TransportFailure::Connect,
        };
        assert_eq!(
            err.to_string(),
            "Failed to reach LuluStream file/info endpoint: connection failed"
        );
        assert_eq!(err.subcategory(), "transport");
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Upload.path(), "upload/url");
        assert_eq!(Endpoint::FileInfo.path(), "file/info");
    }
}
