use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use super::menu::{MenuChoice, SessionState, CHOICE_PROMPT, MENU};
use crate::audio::{AudioCapture, AudioPlayback, RecordingConfig};
use crate::gemini::{GeneratedArtifact, GenerativeService, DEFAULT_SUMMARY_PROMPT};

/// Where generated images are written
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub text_image: PathBuf,
    pub audio_image: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            text_image: PathBuf::from("gemini-text-image.png"),
            audio_image: PathBuf::from("gemini-audio-image.png"),
        }
    }
}

/// Owns the collaborators and runs the menu loop until exit.
///
/// Every collaborator failure is caught at the dispatch boundary, reported,
/// and the loop returns to the prompt; only startup construction is fatal.
pub struct SessionController<C, P, G> {
    capture: C,
    playback: P,
    gemini: G,
    recording: RecordingConfig,
    outputs: OutputPaths,
    state: SessionState,
}

impl<C, P, G> SessionController<C, P, G>
where
    C: AudioCapture,
    P: AudioPlayback,
    G: GenerativeService,
{
    pub fn new(
        capture: C,
        playback: P,
        gemini: G,
        recording: RecordingConfig,
        outputs: OutputPaths,
    ) -> Self {
        Self {
            capture,
            playback,
            gemini,
            recording,
            outputs,
            state: SessionState::MenuPrompt,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the menu loop until the user exits or the input stream closes.
    /// Both paths release the playback subsystem before returning.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        info!("Session started");

        loop {
            self.state = SessionState::MenuPrompt;
            writeln!(output, "{}", MENU)?;
            write!(output, "{}", CHOICE_PROMPT)?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                // Input closed; treat like exit so teardown still happens
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(output, "Invalid choice. Please try again.")?;
                continue;
            };

            self.state = SessionState::Dispatching;

            if choice == MenuChoice::Exit {
                writeln!(output, "Exiting...")?;
                break;
            }

            self.dispatch(choice, input, output)?;
        }

        self.playback.close();
        self.state = SessionState::Exited;
        info!("Session ended");

        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        match choice {
            MenuChoice::Record => self.record_and_play(output),
            MenuChoice::GenerateFromText => self.generate_from_text(input, output),
            MenuChoice::GenerateFromAudio => self.generate_from_audio(output),
            MenuChoice::SummarizePdf => self.summarize_pdf(input, output),
            // Handled in run() before dispatch
            MenuChoice::Exit => Ok(()),
        }
    }

    fn record_and_play<W: Write>(&mut self, output: &mut W) -> Result<()> {
        writeln!(
            output,
            "Recording {} seconds of audio...",
            self.recording.duration_seconds
        )?;

        match self.capture.record(&self.recording) {
            Ok(()) => writeln!(
                output,
                "Recording finished: {}",
                self.recording.file_path.display()
            )?,
            Err(e) => writeln!(output, "Error during recording: {}", e)?,
        }

        // Playback is attempted even after a failed recording; an earlier
        // clip may still exist at the same path. Only announce it once a
        // clip is actually there to load.
        if self.recording.file_path.exists() {
            writeln!(output, "Playing audio...")?;
        }
        match self.playback.play(&self.recording.file_path) {
            Ok(()) => writeln!(output, "Playback finished.")?,
            Err(e) => writeln!(output, "Error playing audio: {}", e)?,
        }

        Ok(())
    }

    fn generate_from_text<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        write!(output, "Enter text for image generation: ")?;
        output.flush()?;

        let Some(prompt) = read_line(input)? else {
            return Ok(());
        };

        writeln!(output, "Generating image from text: '{}'", prompt)?;
        match self
            .gemini
            .generate_image_from_text(&prompt, &self.outputs.text_image)
        {
            Ok(artifact) => report_artifact(output, &artifact)?,
            Err(e) => writeln!(output, "Error generating image from text: {}", e)?,
        }

        Ok(())
    }

    fn generate_from_audio<W: Write>(&mut self, output: &mut W) -> Result<()> {
        // Precondition short-circuit: no recording on disk means no upload
        if !self.recording.file_path.exists() {
            writeln!(
                output,
                "Audio file not found. Please record audio first using option '1'."
            )?;
            return Ok(());
        }

        match self.gemini.upload_file(&self.recording.file_path) {
            Ok(handle) => {
                writeln!(output, "Generating image from audio...")?;
                match self
                    .gemini
                    .generate_image_from_audio(&handle, &self.outputs.audio_image)
                {
                    Ok(artifact) => report_artifact(output, &artifact)?,
                    Err(e) => writeln!(output, "Error generating image from audio: {}", e)?,
                }
            }
            Err(e) => writeln!(output, "Error uploading file: {}", e)?,
        }

        Ok(())
    }

    fn summarize_pdf<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        write!(output, "Enter the URL of the PDF document to summarize: ")?;
        output.flush()?;

        let Some(url) = read_line(input)? else {
            return Ok(());
        };

        writeln!(output, "Generating PDF summary for: {}", url)?;
        match self.gemini.summarize_pdf(&url, DEFAULT_SUMMARY_PROMPT) {
            Ok(summary) => {
                writeln!(output, "PDF Summary:")?;
                writeln!(output, "{}", summary)?;
            }
            Err(e) => writeln!(output, "Error summarizing PDF: {}", e)?,
        }

        Ok(())
    }
}

fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn report_artifact<W: Write>(output: &mut W, artifact: &GeneratedArtifact) -> std::io::Result<()> {
    for description in &artifact.descriptions {
        writeln!(output, "Model description: {}", description)?;
    }
    match &artifact.image_path {
        Some(path) => writeln!(output, "Image saved: {}", path.display())?,
        None => writeln!(output, "The response contained no image.")?,
    }
    Ok(())
}
