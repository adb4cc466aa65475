//! `SchedulingApi` — the typed request/response seam over the backend.

use async_trait::async_trait;

use crate::error::ApiError;

use super::types::{
    EventType, EventTypeDraft, Integration, IntegrationsQuery, ProfilePatch, Schedule,
    ScheduleDraft, UserProfile,
};

/// Typed client for the scheduling API.
///
/// Implementations must be safe to share across tasks; the service holds
/// them as `Arc<dyn SchedulingApi>`.
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    /// List integrations matching the query.
    async fn integrations(
        &self,
        query: IntegrationsQuery,
    ) -> Result<Vec<Integration>, ApiError>;

    /// List the user's event types.
    async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError>;

    /// Create a new event type.
    async fn create_event_type(&self, draft: EventTypeDraft) -> Result<EventType, ApiError>;

    /// Create a new availability schedule.
    async fn create_schedule(&self, draft: ScheduleDraft) -> Result<Schedule, ApiError>;

    /// Apply a partial update to the user profile.
    async fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile, ApiError>;

    /// Fetch the current user profile.
    async fn me(&self) -> Result<UserProfile, ApiError>;
}
