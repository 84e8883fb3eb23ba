pub mod engine_trait;
pub mod null_engine;
pub mod recognizer;
pub mod registry;
#[cfg(feature = "vosk")]
pub mod vosk_engine;

pub use engine_trait::SpeechEngine;
pub use null_engine::NullEngine;
pub use recognizer::Recognizer;
pub use registry::EngineRegistry;
#[cfg(feature = "vosk")]
pub use vosk_engine::VoskEngine;
