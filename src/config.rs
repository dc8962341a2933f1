use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::audio::RecordingConfig;
use crate::session::OutputPaths;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recording: RecordingSettings,
    pub output: OutputSettings,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RecordingSettings {
    pub file_path: String,
    pub duration_seconds: u64,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            file_path: "kayit.wav".to_string(),
            duration_seconds: 5,
            sample_rate: 44100,
            channels: 2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub text_image_path: String,
    pub audio_image_path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            text_image_path: "gemini-text-image.png".to_string(),
            audio_image_path: "gemini-audio-image.png".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Lowest-priority credential source; the CLI flag and GEMINI_API_KEY
    /// take precedence.
    pub api_key: Option<String>,
}

impl Config {
    /// Load from a config file if present, falling back to defaults.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn recording_config(&self) -> RecordingConfig {
        RecordingConfig {
            file_path: PathBuf::from(&self.recording.file_path),
            duration_seconds: self.recording.duration_seconds,
            sample_rate: self.recording.sample_rate,
            channels: self.recording.channels,
        }
    }

    pub fn output_paths(&self) -> OutputPaths {
        OutputPaths {
            text_image: PathBuf::from(&self.output.text_image_path),
            audio_image: PathBuf::from(&self.output.audio_image_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_conventions() {
        let cfg = Config::default();
        assert_eq!(cfg.recording.file_path, "kayit.wav");
        assert_eq!(cfg.recording.duration_seconds, 5);
        assert_eq!(cfg.recording.sample_rate, 44100);
        assert_eq!(cfg.recording.channels, 2);
        assert_eq!(cfg.output.text_image_path, "gemini-text-image.png");
        assert_eq!(cfg.output.audio_image_path, "gemini-audio-image.png");
        assert!(cfg.gemini.api_key.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = Config::load("/nonexistent/voicesketch").unwrap();
        assert_eq!(cfg.recording.file_path, "kayit.wav");
    }
}
