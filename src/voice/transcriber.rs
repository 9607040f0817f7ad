//! Speech to text

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::assistant::gemini::{GeminiClient, Part};
use crate::error::{ExpenseError, ExpenseResult};

const TRANSCRIBE_PROMPT: &str =
    "Transcribe this audio clip verbatim. Reply with the transcript only, without commentary.";

/// Turns a recorded clip into text
pub trait Transcriber: Send {
    fn transcribe(&self, clip: &Path) -> ExpenseResult<String>;
}

/// Sends the clip to a Gemini model as inline audio
pub struct GeminiTranscriber {
    api_key: String,
    model: String,
}

impl GeminiTranscriber {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Request parts for a WAV payload
    pub fn parts(wav: &[u8]) -> Vec<Part> {
        vec![
            Part::text(TRANSCRIBE_PROMPT),
            Part::inline("audio/wav", STANDARD.encode(wav)),
        ]
    }
}

impl Transcriber for GeminiTranscriber {
    fn transcribe(&self, clip: &Path) -> ExpenseResult<String> {
        let wav = fs::read(clip)
            .map_err(|e| ExpenseError::Voice(format!("Failed to read recording: {}", e)))?;
        let client = GeminiClient::new(&self.api_key, &self.model)?;
        let text = client
            .generate(&Self::parts(&wav))
            .map_err(|e| ExpenseError::Voice(format!("Could not request results; {}", e)))?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(ExpenseError::Voice("Could not understand audio.".into()));
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_encode_audio() {
        let parts = GeminiTranscriber::parts(b"RIFF");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[1], Part::inline("audio/wav", "UklGRg=="));
    }

    #[test]
    fn test_missing_clip() {
        let transcriber = GeminiTranscriber::new("key", "gemini-flash-latest");
        let err = transcriber
            .transcribe(Path::new("/nonexistent/clip.wav"))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Voice(_)));
    }
}
