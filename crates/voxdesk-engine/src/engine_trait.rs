use async_trait::async_trait;
use voxdesk_core::{AudioChunk, RecognitionError, TranscriptEvent};

/// A streaming transcription engine.
///
/// One instance serves exactly one session; `feed` takes `&mut self` so
/// overlapping calls on a shared instance are ruled out at the type level.
/// The engine accumulates waveform for the utterance in progress and decides
/// on its own when an utterance is complete.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn initialize(&mut self, config: toml::Value) -> Result<(), RecognitionError>;

    /// Consume one audio chunk and report the current hypothesis: `Partial`
    /// while the utterance is in progress (text may be empty), `Final` at an
    /// utterance boundary.
    async fn feed(&mut self, chunk: AudioChunk) -> Result<TranscriptEvent, RecognitionError>;

    /// Discard the utterance in progress.
    async fn reset(&mut self);

    async fn shutdown(&mut self) -> Result<(), RecognitionError>;
}
