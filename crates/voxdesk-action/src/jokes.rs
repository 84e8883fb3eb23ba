use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use voxdesk_core::ActionError;

/// Offline jokes used when the remote service is unreachable. A failed fetch
/// falls back here instead of erroring, unlike the speed test, which reports
/// its failure. The asymmetry is deliberate.
const FALLBACK_JOKES: &[&str] = &[
    "I would tell you a UDP joke, but you might not get it.",
    "There are only 10 kinds of people: those who understand binary and those who don't.",
    "I told my computer I needed a break, and it said 'no problem, I'll go to sleep.'",
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "A SQL query walks into a bar, walks up to two tables and asks: 'Can I join you?'",
];

pub struct JokeProvider {
    client: reqwest::Client,
    url: String,
    fallback_index: AtomicUsize,
}

#[derive(Debug, Deserialize)]
struct JokeBody {
    joke: String,
}

impl JokeProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            fallback_index: AtomicUsize::new(0),
        }
    }

    async fn fetch(&self) -> Result<String, ActionError> {
        let body: JokeBody = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ActionError::Network(e.to_string()))?
            .json()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;
        Ok(body.joke)
    }

    fn local_joke(&self) -> String {
        let i = self.fallback_index.fetch_add(1, Ordering::Relaxed);
        FALLBACK_JOKES[i % FALLBACK_JOKES.len()].to_string()
    }
}

#[async_trait]
impl ActionProvider for JokeProvider {
    fn name(&self) -> &str {
        "joke"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        match self.fetch().await {
            Ok(joke) => Ok(joke),
            Err(e) => {
                tracing::warn!("joke fetch failed, using local list: {e}");
                Ok(self.local_joke())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_joke_falls_back_when_unreachable() {
        // Port 1 on loopback refuses immediately.
        let provider = JokeProvider::new("http://127.0.0.1:1/joke");
        let joke = provider.perform(None).await.unwrap();
        assert!(FALLBACK_JOKES.contains(&joke.as_str()));
    }

    #[tokio::test]
    async fn test_joke_fallback_rotates() {
        let provider = JokeProvider::new("http://127.0.0.1:1/joke");
        let first = provider.perform(None).await.unwrap();
        let second = provider.perform(None).await.unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_fallback_list_is_nonempty() {
        assert!(!FALLBACK_JOKES.is_empty());
        for joke in FALLBACK_JOKES {
            assert!(!joke.is_empty());
        }
    }
}
