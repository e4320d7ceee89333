use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod sanitize;
mod synth;

pub use config::AudioConfig;
pub use error::AudioError;
pub use handlers::{GenerateAudioResponse, PUBLIC_PREFIX, SUMMARY_FILE};
pub use sanitize::sanitize_course_id;
pub use synth::{chunk_text, GoogleTranslateTts, SpeechSynthesizer, DEFAULT_TTS_ENDPOINT};

#[derive(Clone)]
pub struct AppState {
    pub audio_dir: PathBuf,
    pub lang: String,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn from_config(config: &AudioConfig) -> Result<Self, AudioError> {
        Ok(Self {
            audio_dir: config.audio_dir.clone(),
            lang: config.lang.clone(),
            synthesizer: Arc::new(GoogleTranslateTts::new(config.tts_endpoint.clone())?),
        })
    }
}

pub fn router(state: AppState) -> Router {
    let files = ServeDir::new(&state.audio_dir);
    Router::new()
        .route("/generate-audio", post(handlers::generate_audio))
        .nest_service(PUBLIC_PREFIX, files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gt_audio=info,tower_http=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
