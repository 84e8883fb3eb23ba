use async_trait::async_trait;
use voxdesk_core::ActionError;

/// One real-world capability behind one intent kind.
///
/// Providers are allowed to launch processes, touch the filesystem, or make
/// network calls, and are allowed to fail: into `ActionError`, never past
/// it. The dispatcher turns any error into a response string.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Provider name used in logs (e.g. `"open_app"`, `"joke"`).
    fn name(&self) -> &str;

    /// Execute the action. `param` is the canonical app key for the
    /// open/close providers and `None` for everything else.
    async fn perform(&self, param: Option<&str>) -> Result<String, ActionError>;
}
