use crate::apps::{CloseAppProvider, OpenAppProvider};
use crate::clock::{DateProvider, TimeProvider};
use crate::jokes::JokeProvider;
use crate::net::SpeedTestProvider;
use crate::provider_trait::ActionProvider;
use crate::screenshot::ScreenshotProvider;
use crate::system::{BatteryProvider, SpecsProvider, WifiProvider};
use std::collections::HashMap;
use std::time::Duration;
use voxdesk_core::config::ActionsConfig;
use voxdesk_core::{Intent, IntentKind};

/// Fixed response for an `Unknown` intent.
pub const UNRECOGNIZED: &str = "Command not recognized.";

/// IntentKind → provider map. Built once at startup, read-only afterwards.
pub struct ActionSet {
    providers: HashMap<IntentKind, Box<dyn ActionProvider>>,
}

impl ActionSet {
    pub fn empty() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// The full provider table.
    pub fn standard(config: &ActionsConfig) -> Self {
        let mut set = Self::empty();
        set.register(IntentKind::OpenApp, Box::new(OpenAppProvider));
        set.register(IntentKind::CloseApp, Box::new(CloseAppProvider));
        set.register(IntentKind::TellTime, Box::new(TimeProvider));
        set.register(IntentKind::TellDate, Box::new(DateProvider));
        set.register(
            IntentKind::TellJoke,
            Box::new(JokeProvider::new(config.joke_url.clone())),
        );
        set.register(
            IntentKind::CheckSpeed,
            Box::new(SpeedTestProvider::new(config.speed_test_url.clone())),
        );
        set.register(IntentKind::BatteryStatus, Box::new(BatteryProvider));
        set.register(IntentKind::WifiName, Box::new(WifiProvider));
        set.register(IntentKind::SystemSpecs, Box::new(SpecsProvider));
        set.register(
            IntentKind::TakeScreenshot,
            Box::new(ScreenshotProvider::new(config.screenshot_dir.clone())),
        );
        set
    }

    pub fn register(&mut self, kind: IntentKind, provider: Box<dyn ActionProvider>) {
        self.providers.insert(kind, provider);
    }

    pub fn get(&self, kind: IntentKind) -> Option<&dyn ActionProvider> {
        self.providers.get(&kind).map(|b| b.as_ref())
    }
}

/// Routes a classified intent to its provider and absorbs provider failures.
///
/// `dispatch` never fails: a provider error (or an elapsed optional timeout)
/// becomes a diagnostic response string, so one bad command can never drop a
/// session. Dispatch blocks its caller for as long as the provider runs;
/// that is the contract. The timeout is an opt-in bound.
pub struct Dispatcher {
    actions: ActionSet,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(actions: ActionSet) -> Self {
        Self {
            actions,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn dispatch(&self, intent: &Intent) -> String {
        if intent.kind == IntentKind::Unknown {
            return UNRECOGNIZED.to_string();
        }

        let Some(provider) = self.actions.get(intent.kind) else {
            tracing::warn!(kind = ?intent.kind, "no provider registered");
            return UNRECOGNIZED.to_string();
        };

        let call = provider.perform(intent.param.as_deref());
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(inner) => inner,
                Err(_) => Err(voxdesk_core::ActionError::TimedOut(limit.as_secs())),
            },
            None => call.await,
        };

        match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(provider = %provider.name(), "action failed: {e}");
                format!("Error performing action: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use voxdesk_core::ActionError;

    struct FailingProvider;

    #[async_trait]
    impl ActionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
            Err(ActionError::SystemQuery("it broke".to_string()))
        }
    }

    struct EchoProvider;

    #[async_trait]
    impl ActionProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn perform(&self, param: Option<&str>) -> Result<String, ActionError> {
            Ok(format!("echo:{}", param.unwrap_or("-")))
        }
    }

    struct StallingProvider;

    #[async_trait]
    impl ActionProvider for StallingProvider {
        fn name(&self) -> &str {
            "stalling"
        }

        async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_dispatch_unknown_is_sentinel() {
        let dispatcher = Dispatcher::new(ActionSet::empty());
        let response = dispatcher.dispatch(&Intent::unknown()).await;
        assert_eq!(response, UNRECOGNIZED);
    }

    #[tokio::test]
    async fn test_dispatch_provider_error_becomes_response_string() {
        let mut set = ActionSet::empty();
        set.register(IntentKind::TellTime, Box::new(FailingProvider));
        let dispatcher = Dispatcher::new(set);

        let response = dispatcher.dispatch(&Intent::new(IntentKind::TellTime)).await;
        assert_eq!(
            response,
            "Error performing action: system query failed: it broke"
        );
        // The dispatcher is still usable afterwards.
        let again = dispatcher.dispatch(&Intent::new(IntentKind::TellTime)).await;
        assert!(!again.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_passes_param_through() {
        let mut set = ActionSet::empty();
        set.register(IntentKind::OpenApp, Box::new(EchoProvider));
        let dispatcher = Dispatcher::new(set);

        let intent = Intent::with_param(IntentKind::OpenApp, "notepad");
        assert_eq!(dispatcher.dispatch(&intent).await, "echo:notepad");
    }

    #[tokio::test]
    async fn test_dispatch_unregistered_kind_is_sentinel() {
        let dispatcher = Dispatcher::new(ActionSet::empty());
        let response = dispatcher.dispatch(&Intent::new(IntentKind::TellDate)).await;
        assert_eq!(response, UNRECOGNIZED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_timeout_bounds_a_stalled_provider() {
        let mut set = ActionSet::empty();
        set.register(IntentKind::CheckSpeed, Box::new(StallingProvider));
        let dispatcher = Dispatcher::new(set).with_timeout(Duration::from_secs(30));

        let response = dispatcher
            .dispatch(&Intent::new(IntentKind::CheckSpeed))
            .await;
        assert_eq!(
            response,
            "Error performing action: action timed out after 30s"
        );
    }

    #[tokio::test]
    async fn test_dispatch_no_timeout_by_default() {
        let dispatcher = Dispatcher::new(ActionSet::empty());
        assert!(dispatcher.timeout.is_none());
    }

    #[tokio::test]
    async fn test_standard_set_covers_every_actionable_kind() {
        let set = ActionSet::standard(&ActionsConfig::default());
        for kind in [
            IntentKind::OpenApp,
            IntentKind::CloseApp,
            IntentKind::TellTime,
            IntentKind::TellDate,
            IntentKind::TellJoke,
            IntentKind::CheckSpeed,
            IntentKind::BatteryStatus,
            IntentKind::WifiName,
            IntentKind::SystemSpecs,
            IntentKind::TakeScreenshot,
        ] {
            assert!(set.get(kind).is_some(), "{kind:?} has no provider");
        }
        assert!(set.get(IntentKind::Unknown).is_none());
    }
}
