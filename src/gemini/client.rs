use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::CONTENT_TYPE;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use super::error::{
    ConfigurationError, GenerationError, RequestFailure, SummarizationError, UploadError,
};
use super::types::{
    Content, GenerateContentRequest, GenerateContentResponse, GeneratedArtifact, GenerationConfig,
    Part, UploadResponse, UploadedFile,
};
use super::GenerativeService;

/// Multimodal model used for image generation
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
/// Text model used for PDF summarization
pub const TEXT_MODEL: &str = "gemini-2.0-flash";

pub const DEFAULT_SUMMARY_PROMPT: &str = "Summarize this document";

/// Requests block until the service responds or the transport gives up;
/// reqwest's 30-second default would cut off long image generations.
pub const REQUEST_TIMEOUT: Option<Duration> = None;

const BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Blocking client for the Gemini REST API.
///
/// Calls carry no timeout and are never retried; a slow service blocks the
/// session until it responds or errors.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Fails with [`ConfigurationError`] when the credential is empty; this
    /// is checked before any network use.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::EmptyApiKey);
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, RequestFailure> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(RequestFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RequestFailure::Status { status, body });
        }

        response.json().map_err(RequestFailure::Transport)
    }

    fn generate_image(
        &self,
        parts: Vec<Part>,
        output_path: &Path,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            }),
        };

        let response = self.generate_content(IMAGE_MODEL, &request)?;
        let parts = response_parts(response)?;
        save_response_parts(&parts, output_path)
    }
}

impl GenerativeService for GeminiClient {
    fn upload_file(&self, path: &Path) -> Result<UploadedFile, UploadError> {
        if !path.exists() {
            return Err(UploadError::FileNotFound(path.to_path_buf()));
        }

        info!("Uploading file: {}", path.display());

        let bytes = fs::read(path).map_err(|source| UploadError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let url = format!("{}/upload/v1beta/files?key={}", self.base_url, self.api_key);
        let response = self
            .http
            .post(&url)
            .header("X-Goog-Upload-Protocol", "raw")
            .header(CONTENT_TYPE, mime_for_path(path))
            .body(bytes)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(UploadError::Rejected { status, body });
        }

        let parsed: UploadResponse = response.json()?;
        info!("File uploaded: {}", parsed.file.uri);

        Ok(parsed.file)
    }

    fn generate_image_from_text(
        &self,
        prompt: &str,
        output_path: &Path,
    ) -> Result<GeneratedArtifact, GenerationError> {
        info!("Generating image from text: '{}'", prompt);
        self.generate_image(vec![Part::text(prompt)], output_path)
    }

    fn generate_image_from_audio(
        &self,
        handle: &UploadedFile,
        output_path: &Path,
    ) -> Result<GeneratedArtifact, GenerationError> {
        // Checked before any network call
        if handle.uri.is_empty() {
            return Err(GenerationError::InvalidHandle);
        }

        info!("Generating image from audio: {}", handle.uri);

        let mime_type = if handle.mime_type.is_empty() {
            "audio/wav"
        } else {
            handle.mime_type.as_str()
        };

        self.generate_image(
            vec![Part::file_data(&handle.uri, mime_type)],
            output_path,
        )
    }

    fn summarize_pdf(&self, url: &str, prompt: &str) -> Result<String, SummarizationError> {
        info!("Fetching PDF for summarization: {}", url);

        let fetched = self
            .http
            .get(url)
            .send()
            .map_err(|source| SummarizationError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = fetched.status();
        if !status.is_success() {
            return Err(SummarizationError::FetchStatus(status));
        }

        let document = fetched.bytes().map_err(|source| SummarizationError::Fetch {
            url: url.to_string(),
            source,
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::inline_data("application/pdf", BASE64.encode(&document)),
                    Part::text(prompt),
                ],
            }],
            generation_config: None,
        };

        let response = self.generate_content(TEXT_MODEL, &request)?;
        let parts = match response_parts(response) {
            Ok(parts) => parts,
            Err(_) => return Err(SummarizationError::EmptyResponse),
        };

        let summary = parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if summary.is_empty() {
            return Err(SummarizationError::EmptyResponse);
        }

        Ok(summary)
    }
}

/// Extract the response parts from the first candidate.
fn response_parts(response: GenerateContentResponse) -> Result<Vec<Part>, GenerationError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .ok_or(GenerationError::EmptyResponse)
}

/// Walk the ordered response parts once: surface every text part as a
/// description, decode and save exactly the first inline image to
/// `output_path`. Later image parts in the same response are ignored,
/// matching the service demo this tool replaces.
pub fn save_response_parts(
    parts: &[Part],
    output_path: &Path,
) -> Result<GeneratedArtifact, GenerationError> {
    let mut artifact = GeneratedArtifact::default();

    for part in parts {
        if let Some(text) = &part.text {
            artifact.descriptions.push(text.clone());
        } else if let Some(blob) = &part.inline_data {
            if artifact.image_path.is_some() {
                continue;
            }
            let bytes = BASE64.decode(&blob.data)?;
            fs::write(output_path, &bytes).map_err(|source| GenerationError::SaveImage {
                path: output_path.to_path_buf(),
                source,
            })?;
            info!("Image saved: {}", output_path.display());
            artifact.image_path = Some(output_path.to_path_buf());
        }
    }

    Ok(artifact)
}

fn mime_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_detection_covers_recorded_audio() {
        assert_eq!(mime_for_path(Path::new("kayit.wav")), "audio/wav");
        assert_eq!(mime_for_path(Path::new("out.png")), "image/png");
        assert_eq!(
            mime_for_path(Path::new("unknown.bin")),
            "application/octet-stream"
        );
    }

    #[test]
    fn response_parts_requires_a_candidate() {
        let response = GenerateContentResponse { candidates: vec![] };
        assert!(matches!(
            response_parts(response),
            Err(GenerationError::EmptyResponse)
        ));
    }
}
