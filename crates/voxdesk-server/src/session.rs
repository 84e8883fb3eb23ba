use crate::frames::{Inbound, Outbound};
use std::sync::Arc;
use voxdesk_action::Dispatcher;
use voxdesk_core::{AudioChunk, SessionError, TranscriptEvent};
use voxdesk_engine::Recognizer;

/// Per-connection state machine.
///
/// Owns the session's recognizer exclusively and turns one inbound frame
/// into at most one outbound frame. The caller drives it strictly
/// sequentially, which is what guarantees results leave in arrival order.
pub struct Session {
    id: u64,
    recognizer: Recognizer,
    dispatcher: Arc<Dispatcher>,
    sample_rate: u32,
}

impl Session {
    pub fn new(
        id: u64,
        recognizer: Recognizer,
        dispatcher: Arc<Dispatcher>,
        sample_rate: u32,
    ) -> Self {
        Self {
            id,
            recognizer,
            dispatcher,
            sample_rate,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Audio path. Empty partials are dropped; an empty final yields the
    /// empty response pair; a recognition failure drops the utterance and
    /// the session carries on.
    pub async fn on_audio(&mut self, pcm: Vec<u8>) -> Option<Outbound> {
        let chunk = AudioChunk::new(pcm, self.sample_rate);
        match self.recognizer.feed(chunk).await {
            Ok(TranscriptEvent::Partial(text)) => {
                if text.is_empty() {
                    None
                } else {
                    Some(Outbound::Partial { partial: text })
                }
            }
            Ok(TranscriptEvent::Final(text)) => {
                if text.is_empty() {
                    return Some(Outbound::Result {
                        text: String::new(),
                        response: String::new(),
                    });
                }
                let response = self.respond(&text).await;
                Some(Outbound::Result { text, response })
            }
            Err(e) => {
                tracing::warn!(
                    session_id = self.id,
                    "recognition failed, utterance dropped: {e}"
                );
                None
            }
        }
    }

    /// Typed-text path: bypasses the recognizer entirely. A frame that is
    /// not the expected JSON shape is a protocol violation and fatal.
    pub async fn on_text(&mut self, raw: &str) -> Result<Outbound, SessionError> {
        let frame: Inbound = serde_json::from_str(raw)
            .map_err(|e| SessionError::Protocol(format!("bad text frame: {e}")))?;
        let Inbound::Text { text } = frame;
        let response = self.respond(&text).await;
        Ok(Outbound::Result { text, response })
    }

    async fn respond(&self, text: &str) -> String {
        let intent = voxdesk_intent::classify(text);
        self.dispatcher.dispatch(&intent).await
    }

    pub async fn shutdown(self) {
        self.recognizer.shutdown().await;
    }
}
