use crate::engine_trait::SpeechEngine;
use crate::registry::EngineRegistry;
use voxdesk_core::{AudioChunk, RecognitionError, TranscriptEvent};

/// Session-side adapter around one exclusively-owned engine instance.
///
/// Engine failures during `feed` are not retried: the utterance in progress
/// is dropped via `reset` and the error is surfaced for the caller to log.
/// The session keeps running.
pub struct Recognizer {
    engine: Box<dyn SpeechEngine>,
}

impl Recognizer {
    /// Construct an engine by name and initialize it with its config table.
    pub async fn create(
        registry: &EngineRegistry,
        name: &str,
        config: toml::Value,
    ) -> Result<Self, RecognitionError> {
        let mut engine = registry.create(name)?;
        engine.initialize(config).await?;
        Ok(Self { engine })
    }

    /// Wrap an already-built engine (tests, custom setups).
    pub fn from_engine(engine: Box<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub async fn feed(&mut self, chunk: AudioChunk) -> Result<TranscriptEvent, RecognitionError> {
        match self.engine.feed(chunk).await {
            Ok(event) => Ok(event),
            Err(e) => {
                self.engine.reset().await;
                Err(e)
            }
        }
    }

    pub async fn shutdown(mut self) {
        if let Err(e) = self.engine.shutdown().await {
            tracing::warn!(engine = %self.engine.name(), "engine shutdown failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Fails every other feed.
    struct FlakyEngine {
        calls: usize,
    }

    #[async_trait]
    impl SpeechEngine for FlakyEngine {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn initialize(&mut self, _config: toml::Value) -> Result<(), RecognitionError> {
            Ok(())
        }

        async fn feed(
            &mut self,
            _chunk: AudioChunk,
        ) -> Result<TranscriptEvent, RecognitionError> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(RecognitionError::EngineFailure("decoder blew up".to_string()))
            } else {
                Ok(TranscriptEvent::Partial("ok".to_string()))
            }
        }

        async fn reset(&mut self) {}

        async fn shutdown(&mut self) -> Result<(), RecognitionError> {
            Ok(())
        }
    }

    fn chunk() -> AudioChunk {
        AudioChunk::new(vec![0u8; 32], 16000)
    }

    #[tokio::test]
    async fn test_recognizer_create_from_registry() {
        let registry = EngineRegistry::new();
        let recognizer =
            Recognizer::create(&registry, "null", toml::Value::Table(Default::default()))
                .await
                .unwrap();
        assert_eq!(recognizer.engine_name(), "null");
    }

    #[tokio::test]
    async fn test_recognizer_create_unknown_engine_fails() {
        let registry = EngineRegistry::new();
        let result =
            Recognizer::create(&registry, "missing", toml::Value::Table(Default::default())).await;
        assert!(matches!(result, Err(RecognitionError::EngineNotFound(_))));
    }

    #[tokio::test]
    async fn test_recognizer_feed_error_resets_engine_and_survives() {
        let mut recognizer = Recognizer::from_engine(Box::new(FlakyEngine { calls: 0 }));

        assert!(recognizer.feed(chunk()).await.is_ok());
        assert!(recognizer.feed(chunk()).await.is_err());
        // The adapter is still usable after an engine failure.
        assert!(recognizer.feed(chunk()).await.is_ok());
    }

    #[tokio::test]
    async fn test_recognizer_passes_events_through() {
        let registry = EngineRegistry::new();
        let mut recognizer =
            Recognizer::create(&registry, "null", toml::Value::Table(Default::default()))
                .await
                .unwrap();
        let event = recognizer
            .feed(AudioChunk::new(b"hello\n".to_vec(), 16000))
            .await
            .unwrap();
        assert_eq!(event, TranscriptEvent::Final("hello".to_string()));
    }
}
