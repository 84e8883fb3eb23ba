use crate::engine_trait::SpeechEngine;
use async_trait::async_trait;
use voxdesk_core::{AudioChunk, RecognitionError, TranscriptEvent};

/// Loopback engine for development and tests.
///
/// Treats the audio bytes as UTF-8 text: chunks accumulate into the pending
/// utterance and a newline finalizes it. Lets the whole session pipeline run
/// without a speech model.
pub struct NullEngine {
    buffer: String,
}

impl NullEngine {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for NullEngine {
    fn name(&self) -> &str {
        "null"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), RecognitionError> {
        Ok(())
    }

    async fn feed(&mut self, chunk: AudioChunk) -> Result<TranscriptEvent, RecognitionError> {
        self.buffer.push_str(&String::from_utf8_lossy(&chunk.pcm));

        match self.buffer.find('\n') {
            Some(pos) => {
                let text = self.buffer[..pos].trim().to_string();
                self.buffer.drain(..=pos);
                tracing::trace!(text = %text, "null engine finalized utterance");
                Ok(TranscriptEvent::Final(text))
            }
            None => Ok(TranscriptEvent::Partial(self.buffer.trim().to_string())),
        }
    }

    async fn reset(&mut self) {
        self.buffer.clear();
    }

    async fn shutdown(&mut self) -> Result<(), RecognitionError> {
        Ok(())
    }
}
