use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Where the next recording is written and how long it lasts.
///
/// Built once from configuration at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Output WAV path (created or overwritten on each recording)
    pub file_path: PathBuf,
    /// Fixed recording length in seconds
    pub duration_seconds: u64,
    /// Capture sample rate in Hz
    pub sample_rate: u32,
    /// Number of capture channels (2 = stereo)
    pub channels: u16,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            file_path: PathBuf::from("kayit.wav"),
            duration_seconds: 5,
            sample_rate: 44100,
            channels: 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no default input device available")]
    NoInputDevice,
    #[error("failed to create WAV file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start input stream: {0}")]
    StartStream(#[from] cpal::PlayStreamError),
    #[error("capture thread panicked while writing samples")]
    WriterPoisoned,
    #[error("failed to finalize WAV file: {0}")]
    Finalize(hound::Error),
}

/// Records a fixed-duration clip from an input device to a WAV file
pub trait AudioCapture {
    /// Block for `config.duration_seconds`, capturing from the default input
    /// device and writing 16-bit PCM to `config.file_path`.
    fn record(&mut self, config: &RecordingConfig) -> Result<(), CaptureError>;
}

/// Default-microphone capture backed by cpal
pub struct MicrophoneCapture;

impl MicrophoneCapture {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicrophoneCapture {
    fn default() -> Self {
        Self::new()
    }
}

type SharedWriter = Arc<Mutex<Option<WavWriter<BufWriter<File>>>>>;

impl AudioCapture for MicrophoneCapture {
    fn record(&mut self, config: &RecordingConfig) -> Result<(), CaptureError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(CaptureError::NoInputDevice)?;

        info!(
            "Recording started: {} ({}s, {}Hz, {} channels)",
            config.file_path.display(),
            config.duration_seconds,
            config.sample_rate,
            config.channels
        );

        let spec = WavSpec {
            channels: config.channels,
            sample_rate: config.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let writer = WavWriter::create(&config.file_path, spec).map_err(|source| {
            CaptureError::CreateFile {
                path: config.file_path.clone(),
                source,
            }
        })?;
        let writer: SharedWriter = Arc::new(Mutex::new(Some(writer)));
        let writer_cb = Arc::clone(&writer);

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let stream = device.build_input_stream(
            &stream_config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut guard) = writer_cb.lock() {
                    if let Some(writer) = guard.as_mut() {
                        for &sample in data {
                            let clamped = (sample * i16::MAX as f32)
                                .clamp(i16::MIN as f32, i16::MAX as f32);
                            // A failed write surfaces later through finalize()
                            writer.write_sample(clamped as i16).ok();
                        }
                    }
                }
            },
            |err| {
                error!("Input stream error: {}", err);
            },
            None,
        )?;

        stream.play()?;
        std::thread::sleep(Duration::from_secs(config.duration_seconds));
        drop(stream);

        let mut guard = writer.lock().map_err(|_| CaptureError::WriterPoisoned)?;
        if let Some(writer) = guard.take() {
            writer.finalize().map_err(CaptureError::Finalize)?;
        }

        info!("Recording finished: {}", config.file_path.display());

        Ok(())
    }
}
