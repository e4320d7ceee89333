use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{sanitize_course_id, AppState, AudioError};

pub const SUMMARY_FILE: &str = "summary.mp3";
pub const PUBLIC_PREFIX: &str = "/audio_summaries";

#[derive(Debug, Deserialize)]
struct GenerateAudioRequest {
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    course_id: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct GenerateAudioResponse {
    pub url: String,
}

/// Only a non-empty string or a non-zero number names a course. Everything else,
/// booleans and containers included, counts as missing.
fn course_id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) if !raw.is_empty() => Some(raw.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) async fn generate_audio(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateAudioResponse>, AudioError> {
    let request: GenerateAudioRequest =
        serde_json::from_slice(&body).map_err(|_| AudioError::MissingFields)?;
    let text = match request.text {
        Some(Value::String(text)) if !text.is_empty() => text,
        _ => return Err(AudioError::MissingFields),
    };
    let raw_course_id = request
        .course_id
        .as_ref()
        .and_then(course_id_text)
        .ok_or(AudioError::MissingFields)?;
    let safe_id = sanitize_course_id(&raw_course_id).ok_or(AudioError::InvalidCourseId)?;

    let course_dir = state.audio_dir.join(&safe_id);
    tokio::fs::create_dir_all(&course_dir)
        .await
        .map_err(AudioError::storage)?;

    let audio = match state.synthesizer.synthesize(&text, &state.lang).await {
        Ok(audio) => audio,
        Err(error) => {
            warn!(course_id = %safe_id, %error, "audio generation failed");
            return Err(error);
        }
    };
    tokio::fs::write(course_dir.join(SUMMARY_FILE), &audio)
        .await
        .map_err(AudioError::storage)?;

    info!(course_id = %safe_id, bytes = audio.len(), "audio summary written");
    Ok(Json(GenerateAudioResponse {
        url: format!("{}/{}/{}", PUBLIC_PREFIX, safe_id, SUMMARY_FILE),
    }))
}
