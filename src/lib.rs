pub mod audio;
pub mod config;
pub mod gemini;
pub mod session;

pub use audio::{
    AudioCapture, AudioPlayback, CaptureError, MicrophoneCapture, PlaybackError, RecordingConfig,
    SpeakerPlayback,
};
pub use config::Config;
pub use gemini::{
    ConfigurationError, GeminiClient, GeneratedArtifact, GenerationError, GenerativeService,
    SummarizationError, UploadError, UploadedFile,
};
pub use session::{MenuChoice, OutputPaths, SessionController, SessionState};
