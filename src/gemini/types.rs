use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One segment of a multimodal request or response: text, inline binary
/// data, or a reference to previously uploaded content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            inline_data: Some(Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
            ..Self::default()
        }
    }

    pub fn file_data(file_uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            file_data: Some(FileData {
                file_uri: file_uri.into(),
                mime_type: mime_type.into(),
            }),
            ..Self::default()
        }
    }
}

/// Inline binary payload, base64-encoded on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Reference to a file previously uploaded to the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_uri: String,
    pub mime_type: String,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Media upload response wrapper
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub file: UploadedFile,
}

/// Opaque handle to server-side uploaded content, meaningful only to the
/// issuing service. Lives for the duration of a single generation action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub mime_type: String,
}

/// Output of an image-generation call: every text part the model returned
/// plus the path the first inline image was written to, if any.
#[derive(Debug, Clone, Default)]
pub struct GeneratedArtifact {
    pub descriptions: Vec<String>,
    pub image_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text("a red fox")],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "a red fox");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "TEXT");
    }

    #[test]
    fn text_only_part_skips_binary_fields() {
        let json = serde_json::to_string(&Part::text("hello")).unwrap();
        assert!(!json.contains("inlineData"));
        assert!(!json.contains("fileData"));
    }

    #[test]
    fn response_parses_mixed_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "a description"},
                        {"inlineData": {"mimeType": "image/png", "data": "aGk="}}
                    ]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let parts = &response.candidates[0].content.as_ref().unwrap().parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].text.as_deref(), Some("a description"));
        assert_eq!(parts[1].inline_data.as_ref().unwrap().mime_type, "image/png");
    }

    #[test]
    fn upload_response_parses_file_handle() {
        let raw = r#"{
            "file": {
                "name": "files/abc123",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123",
                "mimeType": "audio/wav"
            }
        }"#;

        let response: UploadResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.file.name, "files/abc123");
        assert!(response.file.uri.ends_with("files/abc123"));
        assert_eq!(response.file.mime_type, "audio/wav");
    }
}
