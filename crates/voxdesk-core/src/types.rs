#[derive(Debug, Clone)]
pub struct AudioChunk {
    pub pcm: Vec<u8>,
    pub sample_rate: u32,
}

impl AudioChunk {
    pub fn new(pcm: Vec<u8>, sample_rate: u32) -> Self {
        Self { pcm, sample_rate }
    }

    /// View the raw buffer as little-endian 16-bit samples.
    /// A trailing odd byte is dropped.
    pub fn samples(&self) -> Vec<i16> {
        self.pcm
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect()
    }
}

/// One step of the incremental-recognition lifecycle.
///
/// A `Partial` is a best-effort hypothesis for the utterance in progress and
/// is superseded by the next event of either kind. `Final` marks an utterance
/// boundary; empty final text is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Partial(String),
    Final(String),
}

impl TranscriptEvent {
    pub fn text(&self) -> &str {
        match self {
            TranscriptEvent::Partial(t) | TranscriptEvent::Final(t) => t,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, TranscriptEvent::Final(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
    OpenApp,
    CloseApp,
    TellTime,
    TellDate,
    TellJoke,
    CheckSpeed,
    BatteryStatus,
    WifiName,
    SystemSpecs,
    TakeScreenshot,
    Unknown,
}

/// A classified command: the category plus the canonical app key for
/// `OpenApp`/`CloseApp`, `None` for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub kind: IntentKind,
    pub param: Option<String>,
}

impl Intent {
    pub fn new(kind: IntentKind) -> Self {
        Self { kind, param: None }
    }

    pub fn with_param(kind: IntentKind, param: impl Into<String>) -> Self {
        Self {
            kind,
            param: Some(param.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::new(IntentKind::Unknown)
    }
}
