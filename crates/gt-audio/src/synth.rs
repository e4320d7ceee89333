use async_trait::async_trait;
use tracing::debug;

use crate::AudioError;

pub const DEFAULT_TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
pub const MAX_CHUNK_CHARS: usize = 100;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns MP3 bytes for `text` spoken in `lang`.
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, AudioError>;
}

/// Speaks through the Google Translate TTS endpoint, one request per chunk.
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslateTts {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, AudioError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(AudioError::synthesis)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>, AudioError> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(AudioError::Synthesis("No text to speak".to_string()));
        }

        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let idx = index.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", lang),
                    ("ttsspeed", "1"),
                    ("q", chunk.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await
                .map_err(AudioError::synthesis)?
                .error_for_status()
                .map_err(AudioError::synthesis)?;
            let bytes = response.bytes().await.map_err(AudioError::synthesis)?;
            debug!(chunk = index, bytes = bytes.len(), "tts chunk received");
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

/// Splits on whitespace into pieces of at most `max_chars` characters. Words longer than
/// the limit are cut.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word_chars: Vec<char> = word.chars().collect();
        while word_chars.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word_chars.split_off(max_chars);
            chunks.push(word_chars.into_iter().collect());
            word_chars = rest;
        }
        if word_chars.is_empty() {
            continue;
        }

        let word_len = word_chars.len();
        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word_chars);
        current_len += word_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod synth_tests {
    use super::*;

    #[test]
    fn chunks_respect_the_limit_and_keep_words_whole() {
        let text = "Добро пожаловать на платформу обучения сотрудников";
        let chunks = chunk_text(text, 20);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() <= 20));
        assert_eq!(chunks.join(" "), text);
        assert_eq!(chunks[0], "Добро пожаловать на");
    }

    #[test]
    fn oversized_words_are_cut_and_blank_text_has_no_chunks() {
        assert_eq!(chunk_text("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
        assert!(chunk_text("   \n ", 100).is_empty());
        assert_eq!(chunk_text("Hello", MAX_CHUNK_CHARS), vec!["Hello"]);
    }
}
