//! Client for the Gemini generative-AI service
//!
//! Three logical calls: media upload, generateContent with TEXT+IMAGE
//! response modalities, and generateContent over a fetched PDF. All calls
//! block; failures are typed per operation and handled at the menu loop.

mod client;
mod error;
mod types;

use std::path::Path;

pub use client::{
    save_response_parts, GeminiClient, DEFAULT_SUMMARY_PROMPT, IMAGE_MODEL, REQUEST_TIMEOUT,
    TEXT_MODEL,
};
pub use error::{ConfigurationError, GenerationError, SummarizationError, UploadError};
pub use types::{
    Blob, Candidate, Content, FileData, GenerateContentRequest, GenerateContentResponse,
    GeneratedArtifact, GenerationConfig, Part, UploadResponse, UploadedFile,
};

/// The generative service the session dispatches to, substitutable with a
/// fake in tests.
pub trait GenerativeService {
    /// Upload a local file, returning an opaque handle for one generation
    /// action.
    fn upload_file(&self, path: &Path) -> Result<UploadedFile, UploadError>;

    /// Generate an image (plus description text) from a free-text prompt,
    /// saving the image to `output_path`.
    fn generate_image_from_text(
        &self,
        prompt: &str,
        output_path: &Path,
    ) -> Result<GeneratedArtifact, GenerationError>;

    /// Generate an image from previously uploaded audio. Fails fast with
    /// [`GenerationError::InvalidHandle`] when the handle carries no URI.
    fn generate_image_from_audio(
        &self,
        handle: &UploadedFile,
        output_path: &Path,
    ) -> Result<GeneratedArtifact, GenerationError>;

    /// Fetch a PDF over plain HTTP and ask the text model to summarize it.
    fn summarize_pdf(&self, url: &str, prompt: &str) -> Result<String, SummarizationError>;
}
