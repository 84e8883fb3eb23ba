use crate::engine_trait::SpeechEngine;
use async_trait::async_trait;
use vosk::{DecodingState, Model, Recognizer as VoskRecognizer};
use voxdesk_core::{AudioChunk, RecognitionError, TranscriptEvent};

/// Streaming recognition over a Vosk/Kaldi model (16 kHz mono S16LE).
pub struct VoskEngine {
    model: Option<Model>,
    recognizer: Option<VoskRecognizer>,
    sample_rate: f32,
}

impl VoskEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            recognizer: None,
            sample_rate: 16000.0,
        }
    }
}

impl Default for VoskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechEngine for VoskEngine {
    fn name(&self) -> &str {
        "vosk"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), RecognitionError> {
        let model_path = config
            .get("model_path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RecognitionError::InitializationFailed(
                    "missing 'model_path' in vosk config".to_string(),
                )
            })?;

        if let Some(rate) = config.get("sample_rate").and_then(|v| v.as_integer()) {
            self.sample_rate = rate as f32;
        }

        let model = Model::new(model_path).ok_or_else(|| {
            RecognitionError::InitializationFailed(format!(
                "failed to load vosk model from {model_path}"
            ))
        })?;

        let recognizer = VoskRecognizer::new(&model, self.sample_rate).ok_or_else(|| {
            RecognitionError::InitializationFailed("failed to create vosk recognizer".to_string())
        })?;

        tracing::info!(
            model_path = %model_path,
            sample_rate = self.sample_rate,
            "vosk engine initialized"
        );

        self.model = Some(model);
        self.recognizer = Some(recognizer);
        Ok(())
    }

    async fn feed(&mut self, chunk: AudioChunk) -> Result<TranscriptEvent, RecognitionError> {
        let recognizer = self.recognizer.as_mut().ok_or_else(|| {
            RecognitionError::EngineFailure("engine not initialized".to_string())
        })?;

        let samples = chunk.samples();
        match recognizer.accept_waveform(&samples) {
            DecodingState::Finalized => {
                let text = recognizer
                    .result()
                    .single()
                    .map(|r| r.text.to_string())
                    .unwrap_or_default();
                Ok(TranscriptEvent::Final(text))
            }
            DecodingState::Running => Ok(TranscriptEvent::Partial(
                recognizer.partial_result().partial.to_string(),
            )),
            DecodingState::Failed => Err(RecognitionError::EngineFailure(
                "vosk decoder failure".to_string(),
            )),
        }
    }

    async fn reset(&mut self) {
        // Rebuild the recognizer from the model; the decoder carries no
        // recoverable per-utterance reset in this wrapper.
        if let Some(ref model) = self.model {
            self.recognizer = VoskRecognizer::new(model, self.sample_rate);
        }
    }

    async fn shutdown(&mut self) -> Result<(), RecognitionError> {
        self.recognizer = None;
        self.model = None;
        Ok(())
    }
}
