use serde::{Deserialize, Serialize};

/// Structured (non-binary) client frame.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inbound {
    Text { text: String },
}

/// Server frame. Serialized shapes on the wire:
/// `{"text": ...}` (greeting), `{"partial": ...}`,
/// `{"text": ..., "response": ...}` (result).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Outbound {
    Greeting { text: String },
    Partial { partial: String },
    Result { text: String, response: String },
}

impl Outbound {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("outbound frames always serialize")
    }
}
