//! Host capabilities injected into the onboarding workflow.
//!
//! The finalizer drives user-visible effects (toasts, navigation),
//! analytics, and cache invalidation through these seams so it can run
//! against any host — the HTTP routes, a test harness, or a future
//! desktop shell — without a real UI or analytics pipeline.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::api::types::UserProfile;

/// Telemetry event name fired when the user finishes onboarding.
pub const ONBOARDING_FINISHED: &str = "onboarding_finished";

/// User-visible notifications, rendered as toasts by the client.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Imperative client-side navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// Fire-and-forget analytics events.
///
/// Implementations must not block or fail the caller; anything slow
/// happens on a spawned task.
pub trait Telemetry: Send + Sync {
    fn event(&self, name: &str);
}

/// Telemetry sink that records events to the log stream.
pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn event(&self, name: &str) {
        tracing::info!(event = name, "Telemetry event");
    }
}

/// Invalidation capability for the cached user profile.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Drop any cached profile so the next read refetches it.
    async fn invalidate_user_profile(&self);
}

/// In-process profile cache used by the HTTP surface.
#[derive(Default)]
pub struct MemoryProfileCache {
    profile: RwLock<Option<UserProfile>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<UserProfile> {
        self.profile.read().await.clone()
    }

    pub async fn put(&self, profile: UserProfile) {
        *self.profile.write().await = Some(profile);
    }
}

#[async_trait]
impl ProfileCache for MemoryProfileCache {
    async fn invalidate_user_profile(&self) {
        *self.profile.write().await = None;
    }
}
