pub mod capture;
pub mod playback;

pub use capture::{AudioCapture, CaptureError, MicrophoneCapture, RecordingConfig};
pub use playback::{
    read_wav_samples, wait_for_drain, AudioPlayback, PlaybackError, SpeakerPlayback,
};
