use crate::engine_trait::SpeechEngine;
use std::collections::HashMap;
use voxdesk_core::RecognitionError;

/// Name → engine factory. Built once at startup; every session gets its own
/// engine instance from `create`.
pub struct EngineRegistry {
    factories: HashMap<String, fn() -> Box<dyn SpeechEngine>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("null", || Box::new(crate::null_engine::NullEngine::new()));
        #[cfg(feature = "vosk")]
        registry.register("vosk", || {
            Box::new(crate::vosk_engine::VoskEngine::new())
        });
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn SpeechEngine>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn SpeechEngine>, RecognitionError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| RecognitionError::EngineNotFound(name.to_string()))
    }

    pub fn list_engines(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
