use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::{WavReader, WavSpec};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

/// Completion poll interval while the output buffer drains
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: hound::Error,
    },
    #[error("unsupported WAV format: {bits} bit {format:?}")]
    UnsupportedFormat {
        bits: u16,
        format: hound::SampleFormat,
    },
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    StartStream(#[from] cpal::PlayStreamError),
    #[error("output stream failed during playback")]
    Stream,
    #[error("audio output subsystem already released")]
    Closed,
}

/// Plays a named audio file synchronously on an output device
pub trait AudioPlayback {
    /// Load the WAV at `path`, play it to completion, and release the stream
    /// on every exit path.
    fn play(&mut self, path: &Path) -> Result<(), PlaybackError>;

    /// Release the output subsystem. Safe to call more than once; the
    /// underlying device handle is dropped exactly once.
    fn close(&mut self);
}

/// Read a WAV file into normalized f32 samples.
///
/// Accepts 16-bit integer and 32-bit float PCM, the two formats the recorder
/// side and common tools produce.
pub fn read_wav_samples(path: &Path) -> Result<(WavSpec, Vec<f32>), PlaybackError> {
    if !path.exists() {
        return Err(PlaybackError::NotFound(path.to_path_buf()));
    }

    let decode_err = |source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();

    let samples = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, 16) => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()
            .map_err(decode_err)?,
        (hound::SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(decode_err)?,
        (format, bits) => return Err(PlaybackError::UnsupportedFormat { bits, format }),
    };

    Ok((spec, samples))
}

/// Block until the output callback has consumed `total` samples, polling at
/// the coarse interval. Returns [`PlaybackError::Stream`] as soon as the
/// stream reports a failure, so a dead device cannot stall the session.
pub fn wait_for_drain(
    position: &AtomicUsize,
    total: usize,
    stream_failed: &AtomicBool,
) -> Result<(), PlaybackError> {
    while position.load(Ordering::Acquire) < total {
        if stream_failed.load(Ordering::Acquire) {
            return Err(PlaybackError::Stream);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    Ok(())
}

/// Default-speaker playback backed by cpal.
///
/// Holds the process-wide output device handle; `close()` releases it exactly
/// once, with `Drop` as a backstop for abnormal exits.
pub struct SpeakerPlayback {
    device: Option<cpal::Device>,
}

impl SpeakerPlayback {
    pub fn new() -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoOutputDevice)?;

        info!(
            "Audio output ready: {}",
            device.name().unwrap_or_else(|_| "unknown".to_string())
        );

        Ok(Self {
            device: Some(device),
        })
    }

    fn release(&mut self) {
        if self.device.take().is_some() {
            info!("Audio output released");
        }
    }
}

impl AudioPlayback for SpeakerPlayback {
    fn play(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let device = self.device.as_ref().ok_or(PlaybackError::Closed)?;

        let (spec, samples) = read_wav_samples(path)?;
        let total = samples.len();

        info!(
            "Playing {}: {} samples, {}Hz, {} channels",
            path.display(),
            total,
            spec.sample_rate,
            spec.channels
        );

        let stream_config = cpal::StreamConfig {
            channels: spec.channels,
            sample_rate: cpal::SampleRate(spec.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        let position = Arc::new(AtomicUsize::new(0));
        let position_cb = Arc::clone(&position);
        let samples = Arc::new(samples);
        let samples_cb = Arc::clone(&samples);
        let stream_failed = Arc::new(AtomicBool::new(false));
        let stream_failed_cb = Arc::clone(&stream_failed);

        // The stream is scoped to this call: any early return below drops it
        // and releases the device resources.
        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let start = position_cb.load(Ordering::Acquire);
                for (i, out) in data.iter_mut().enumerate() {
                    *out = samples_cb.get(start + i).copied().unwrap_or(0.0);
                }
                let next = (start + data.len()).min(samples_cb.len());
                position_cb.store(next, Ordering::Release);
            },
            move |err| {
                error!("Output stream error: {}", err);
                stream_failed_cb.store(true, Ordering::Release);
            },
            None,
        )?;

        stream.play()?;

        // Coarse polling until the buffer drains or the stream dies, then
        // one extra interval so the device finishes the tail before the
        // stream is dropped. An early return drops the stream too.
        wait_for_drain(&position, total, &stream_failed)?;
        std::thread::sleep(POLL_INTERVAL);
        drop(stream);

        info!("Playback finished: {}", path.display());

        Ok(())
    }

    fn close(&mut self) {
        self.release();
    }
}

impl Drop for SpeakerPlayback {
    fn drop(&mut self) {
        self.release();
    }
}
