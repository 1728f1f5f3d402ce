use thiserror::Error;

/// Failures of a single story generation call. None of them are retried.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("please enter some words to generate a story")]
    Validation,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error: HTTP {status}")]
    Status { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl RequestError {
    /// Network unreachable and non-success status codes are both transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_) | RequestError::Status { .. })
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::Validation => "validation",
            e if e.is_transport() => "transport",
            _ => "malformed_response",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error for key `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage quota exceeded for key `{0}`")]
    QuotaExceeded(String),
}

/// Clipboard, share and export integrations.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("not supported on this system")]
    Unsupported,

    #[error("could not launch handler: {0}")]
    Launch(String),

    #[error("could not write file: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_network_failures_are_transport() {
        assert_eq!(RequestError::Status { status: 500 }.kind(), "transport");
        assert_eq!(RequestError::Transport("refused".into()).kind(), "transport");
        assert_eq!(RequestError::MalformedResponse("{}".into()).kind(), "malformed_response");
        assert_eq!(RequestError::Validation.kind(), "validation");
    }
}
