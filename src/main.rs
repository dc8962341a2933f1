use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use voicesketch::{
    Config, GeminiClient, MicrophoneCapture, SessionController, SpeakerPlayback,
};

#[derive(Debug, Parser)]
#[command(name = "voicesketch", about = "Record audio and sketch with Gemini")]
struct Cli {
    /// Config file path (extension optional)
    #[arg(long, default_value = "config/voicesketch")]
    config: String,

    /// Gemini API key; overrides GEMINI_API_KEY and the config file
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Voicesketch v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Recording to {} ({}s at {}Hz)",
        cfg.recording.file_path, cfg.recording.duration_seconds, cfg.recording.sample_rate
    );

    let api_key = cli
        .api_key
        .or_else(|| std::env::var("GEMINI_API_KEY").ok())
        .or_else(|| cfg.gemini.api_key.clone())
        .context(
            "No Gemini API key: pass --api-key, set GEMINI_API_KEY, \
             or add api_key under [gemini] in the config file",
        )?;

    // Startup is the only fatal boundary: a bad credential or missing output
    // device aborts before the menu loop begins.
    let client = GeminiClient::new(api_key)?;
    let playback = SpeakerPlayback::new()?;

    let mut controller = SessionController::new(
        MicrophoneCapture::new(),
        playback,
        client,
        cfg.recording_config(),
        cfg.output_paths(),
    );

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    controller.run(&mut input, &mut output)
}
