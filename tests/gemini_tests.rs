// Integration tests for the Gemini client surface that is checkable without
// network access: construction, the fail-fast handle check, and the
// response-part walk shared by both image-generation operations.

use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tempfile::TempDir;

use voicesketch::gemini::{
    save_response_parts, ConfigurationError, GeminiClient, GenerationError, GenerativeService,
    Part, UploadedFile,
};

fn handle_with_uri(uri: &str) -> UploadedFile {
    UploadedFile {
        name: "files/test".to_string(),
        uri: uri.to_string(),
        mime_type: "audio/wav".to_string(),
    }
}

#[test]
fn requests_carry_no_timeout() {
    // Generation can legitimately run past reqwest's 30-second default; the
    // client must block until the service itself responds or errors.
    assert!(voicesketch::gemini::REQUEST_TIMEOUT.is_none());
}

#[test]
fn empty_api_key_is_rejected_at_construction() {
    assert!(matches!(
        GeminiClient::new(""),
        Err(ConfigurationError::EmptyApiKey)
    ));
    assert!(matches!(
        GeminiClient::new("   "),
        Err(ConfigurationError::EmptyApiKey)
    ));
    assert!(GeminiClient::new("test-key").is_ok());
}

#[test]
fn uri_less_handle_fails_before_any_network_call() -> Result<()> {
    let client = GeminiClient::new("test-key")?;
    let dir = TempDir::new()?;
    let output = dir.path().join("out.png");

    // No server is reachable in this test; an InvalidHandle result proves
    // the check happened before the request was issued.
    let result = client.generate_image_from_audio(&handle_with_uri(""), &output);
    assert!(matches!(result, Err(GenerationError::InvalidHandle)));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn first_image_part_is_saved_and_all_text_surfaced() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("generated.png");

    let parts = vec![
        Part::text("a"),
        Part::inline_data("image/png", BASE64.encode(b"image-x")),
        Part::inline_data("image/png", BASE64.encode(b"image-y")),
        Part::text("b"),
    ];

    let artifact = save_response_parts(&parts, &output)?;

    assert_eq!(artifact.descriptions, vec!["a", "b"]);
    assert_eq!(artifact.image_path.as_deref(), Some(output.as_path()));
    // Only the first image in the response is persisted
    assert_eq!(std::fs::read(&output)?, b"image-x");

    Ok(())
}

#[test]
fn text_only_response_produces_no_image() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("generated.png");

    let parts = vec![Part::text("only words")];
    let artifact = save_response_parts(&parts, &output)?;

    assert_eq!(artifact.descriptions, vec!["only words"]);
    assert!(artifact.image_path.is_none());
    assert!(!output.exists());

    Ok(())
}

#[test]
fn malformed_inline_data_is_a_decode_error() -> Result<()> {
    let dir = TempDir::new()?;
    let output = dir.path().join("generated.png");

    let parts = vec![Part::inline_data("image/png", "not base64!!")];
    let result = save_response_parts(&parts, &output);

    assert!(matches!(result, Err(GenerationError::ImageDecode(_))));
    assert!(!output.exists());

    Ok(())
}

#[test]
fn upload_of_missing_file_short_circuits() -> Result<()> {
    let client = GeminiClient::new("test-key")?;
    let result = client.upload_file(std::path::Path::new("/nonexistent/kayit.wav"));

    assert!(matches!(
        result,
        Err(voicesketch::UploadError::FileNotFound(_))
    ));

    Ok(())
}
