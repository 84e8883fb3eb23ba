pub mod apps;
pub mod config;
pub mod error;
pub mod types;

pub use apps::{AppEntry, Launch, APP_TABLE};
pub use config::AppConfig;
pub use error::{ActionError, ConfigError, RecognitionError, SessionError};
pub use types::{AudioChunk, Intent, IntentKind, TranscriptEvent};
