use std::path::PathBuf;

use clap::Parser;

use crate::synth::DEFAULT_TTS_ENDPOINT;

#[derive(Debug, Clone, Parser)]
#[command(name = "gt-audio")]
#[command(about = "Text-to-speech summaries for learning courses")]
pub struct AudioConfig {
    #[arg(long, env = "GT_AUDIO_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "GT_AUDIO_PORT", default_value_t = 5001)]
    pub port: u16,
    /// Root directory for generated files; also served under `/audio_summaries`.
    #[arg(long = "audio-dir", env = "GT_AUDIO_DIR", default_value = "audio_summaries")]
    pub audio_dir: PathBuf,
    #[arg(long, env = "GT_AUDIO_LANG", default_value = "ru")]
    pub lang: String,
    #[arg(long = "tts-endpoint", env = "GT_AUDIO_TTS_ENDPOINT", default_value = DEFAULT_TTS_ENDPOINT)]
    pub tts_endpoint: String,
}
