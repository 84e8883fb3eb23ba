use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use std::time::Instant;
use voxdesk_core::ActionError;

/// Times a single payload download. No retry and no fallback: a failure is
/// reported through the dispatcher boundary verbatim.
pub struct SpeedTestProvider {
    client: reqwest::Client,
    url: String,
}

impl SpeedTestProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl ActionProvider for SpeedTestProvider {
    fn name(&self) -> &str {
        "speed_test"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        let started = Instant::now();
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| ActionError::Network(e.to_string()))?;
        let body = response
            .bytes()
            .await
            .map_err(|e| ActionError::Network(e.to_string()))?;
        let secs = started.elapsed().as_secs_f64().max(1e-3);

        let megabytes = body.len() as f64 / 1e6;
        let mbps = megabytes * 8.0 / secs;
        Ok(format!(
            "Download speed: {mbps:.1} Mbps ({megabytes:.1} MB in {secs:.1} s)."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_speed_test_failure_is_an_error_not_a_fallback() {
        let provider = SpeedTestProvider::new("http://127.0.0.1:1/payload");
        let result = provider.perform(None).await;
        assert!(matches!(result, Err(ActionError::Network(_))));
    }
}
