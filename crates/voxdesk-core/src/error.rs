use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),
}

/// A failure inside the wrapped transcription engine. `EngineFailure` during
/// `feed` drops the current utterance; the session keeps running.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("engine initialization failed: {0}")]
    InitializationFailed(String),

    #[error("engine failure: {0}")]
    EngineFailure(String),

    #[error("engine not found: {0}")]
    EngineNotFound(String),
}

/// A provider-level failure. Never propagates past the dispatcher boundary,
/// where it is rendered as a response string.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("launch failed: {0}")]
    LaunchFailed(String),

    #[error("process control failed: {0}")]
    ProcessControl(String),

    #[error("network request failed: {0}")]
    Network(String),

    #[error("system query failed: {0}")]
    SystemQuery(String),

    #[error("unknown application key: {0}")]
    UnknownApp(String),

    #[error("missing application parameter")]
    MissingParam,

    #[error("action timed out after {0}s")]
    TimedOut(u64),
}

/// The only error kind that is fatal to a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("protocol violation: {0}")]
    Protocol(String),
}
