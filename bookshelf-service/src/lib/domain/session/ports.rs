use async_trait::async_trait;

use crate::domain::session::models::AuthOutcome;

/// Port for the per-request session check.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Run the extract, decode, resolve pipeline for one request.
    ///
    /// # Arguments
    /// * `authorization` - Raw authorization header value, if any
    ///
    /// # Returns
    /// `Attached` with the resolved identity, or `Rejected` with the first
    /// failing stage's reason. Never retries.
    async fn authenticate(&self, authorization: Option<&str>) -> AuthOutcome;
}
