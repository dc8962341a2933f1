use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal construction-time failure: the session never starts without a
/// usable credential.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("API key must not be empty")]
    EmptyApiKey,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upload rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("uploaded file handle is missing its URI")]
    InvalidHandle,
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Service { status: StatusCode, body: String },
    #[error("response contained no candidates")]
    EmptyResponse,
    #[error("failed to decode inline image data: {0}")]
    ImageDecode(#[from] base64::DecodeError),
    #[error("failed to save image to {path}: {source}")]
    SaveImage {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SummarizationError {
    #[error("failed to fetch PDF from {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },
    #[error("PDF fetch returned status {0}")]
    FetchStatus(StatusCode),
    #[error("summarization request failed: {0}")]
    Transport(reqwest::Error),
    #[error("service returned status {status}: {body}")]
    Service { status: StatusCode, body: String },
    #[error("response contained no summary text")]
    EmptyResponse,
}

/// Shared failure shape for generateContent calls, mapped into the
/// operation-specific taxonomy at each call site.
#[derive(Debug)]
pub(crate) enum RequestFailure {
    Transport(reqwest::Error),
    Status { status: StatusCode, body: String },
}

impl From<RequestFailure> for GenerationError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(e) => GenerationError::Transport(e),
            RequestFailure::Status { status, body } => GenerationError::Service { status, body },
        }
    }
}

impl From<RequestFailure> for SummarizationError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(e) => SummarizationError::Transport(e),
            RequestFailure::Status { status, body } => {
                SummarizationError::Service { status, body }
            }
        }
    }
}
