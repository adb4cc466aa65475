//! Onboarding finalization — the "finish" action of the wizard.
//!
//! Flow:
//! 1. Telemetry event (fire-and-forget)
//! 2. Create the default availability schedule — fatal on failure
//! 3. Seed default event types if the user has none — best-effort
//! 4. Mark the profile onboarded — fatal on failure, user-notified
//! 5. Invalidate the cached profile
//! 6. Consume the stored redirect target, toast success, navigate

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::api::client::SchedulingApi;
use crate::api::types::ProfilePatch;
use crate::error::OnboardingError;
use crate::locale::Locale;
use crate::store::ClientStore;

use super::defaults::{REDIRECT_KEY, default_event_types, default_schedule};
use super::hooks::{Navigator, Notifier, ONBOARDING_FINISHED, ProfileCache, Telemetry};

/// Where the client lands when no deep link was stored.
const ROOT_TARGET: &str = "/";

/// Collaborators the finalizer drives.
pub struct FinalizerDeps {
    pub api: Arc<dyn SchedulingApi>,
    pub store: Arc<dyn ClientStore>,
    pub cache: Arc<dyn ProfileCache>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub telemetry: Arc<dyn Telemetry>,
}

/// Orchestrates the remote calls that complete onboarding.
pub struct OnboardingFinalizer {
    deps: FinalizerDeps,
    locale: Locale,
    user_id: String,
}

impl OnboardingFinalizer {
    pub fn new(deps: FinalizerDeps, locale: Locale, user_id: impl Into<String>) -> Self {
        Self {
            deps,
            locale,
            user_id: user_id.into(),
        }
    }

    /// Run the finalization sequence.
    ///
    /// Each step runs at most once; there are no retries. A fatal failure
    /// leaves the stored redirect target in place, so re-triggering still
    /// honors the deep link.
    pub async fn finalize(&self) -> Result<(), OnboardingError> {
        self.deps.telemetry.event(ONBOARDING_FINISHED);

        // Without the default schedule nothing downstream may proceed.
        let schedule = self
            .deps
            .api
            .create_schedule(default_schedule(&self.locale))
            .await
            .map_err(OnboardingError::ScheduleCreation)?;
        info!(schedule_id = schedule.id, "Default schedule created");

        self.seed_default_event_types().await;

        let profile = match self.deps.api.update_profile(ProfilePatch::completed()).await {
            Ok(profile) => profile,
            Err(e) => {
                self.deps.notifier.error(&self.locale.profile_update_failed);
                return Err(OnboardingError::ProfileCompletion(e));
            }
        };
        info!(user = profile.id, "Profile marked onboarded");

        self.deps.cache.invalidate_user_profile().await;

        let target = self.take_redirect_target().await;
        self.deps.notifier.success(&self.locale.profile_updated);
        self.deps
            .navigator
            .navigate(target.as_deref().unwrap_or(ROOT_TARGET));
        Ok(())
    }

    /// Create the three default event types if the user has none.
    ///
    /// The count check races with any concurrent event-type creation; at
    /// worst the user ends up with duplicate defaults. Individual create
    /// failures are logged and otherwise ignored.
    async fn seed_default_event_types(&self) {
        let existing = match self.deps.api.list_event_types().await {
            Ok(list) => list.len(),
            Err(e) => {
                warn!(error = %e, "Could not list event types; skipping default seeding");
                return;
            }
        };
        if existing > 0 {
            debug!(existing, "User already has event types; not seeding defaults");
            return;
        }

        let results = join_all(default_event_types(&self.locale).into_iter().map(|draft| {
            let api = Arc::clone(&self.deps.api);
            async move {
                let slug = draft.slug.clone();
                (slug, api.create_event_type(draft).await)
            }
        }))
        .await;

        for (slug, result) in results {
            match result {
                Ok(created) => debug!(slug = %slug, id = created.id, "Default event type created"),
                Err(e) => warn!(slug = %slug, error = %e, "Default event type creation failed"),
            }
        }
    }

    /// Read and clear the stored redirect target, if any.
    async fn take_redirect_target(&self) -> Option<String> {
        let value = match self.deps.store.get_value(&self.user_id, REDIRECT_KEY).await {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Could not read stored redirect target");
                None
            }
        };
        if let Err(e) = self.deps.store.remove_value(&self.user_id, REDIRECT_KEY).await {
            warn!(error = %e, "Could not clear stored redirect target");
        }
        value.and_then(|v| v.as_str().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::types::{
        EventType, EventTypeDraft, Integration, IntegrationsQuery, Schedule, ScheduleDraft,
        UserProfile,
    };
    use crate::error::{ApiError, StorageError};

    use super::*;

    /// Shared, ordered record of everything the finalizer touched.
    type EventLog = Arc<Mutex<Vec<String>>>;

    fn log_entry(log: &EventLog, entry: impl Into<String>) {
        log.lock().unwrap().push(entry.into());
    }

    fn api_error(op: &str) -> ApiError {
        ApiError::Status {
            op: op.to_string(),
            status: 500,
            body: "boom".to_string(),
        }
    }

    struct StubApi {
        log: EventLog,
        /// Pre-existing event types returned by `list_event_types`.
        existing: Vec<EventType>,
        fail_schedule: bool,
        fail_profile: bool,
        fail_listing: bool,
        /// Slugs whose creation should fail.
        failing_slugs: Vec<String>,
        created: Mutex<Vec<EventTypeDraft>>,
    }

    impl StubApi {
        fn new(log: EventLog) -> Self {
            Self {
                log,
                existing: Vec::new(),
                fail_schedule: false,
                fail_profile: false,
                fail_listing: false,
                failing_slugs: Vec::new(),
                created: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SchedulingApi for StubApi {
        async fn integrations(
            &self,
            _query: IntegrationsQuery,
        ) -> Result<Vec<Integration>, ApiError> {
            unimplemented!("not used by the finalizer")
        }

        async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError> {
            log_entry(&self.log, "list_event_types");
            if self.fail_listing {
                return Err(api_error("list_event_types"));
            }
            Ok(self.existing.clone())
        }

        async fn create_event_type(&self, draft: EventTypeDraft) -> Result<EventType, ApiError> {
            log_entry(&self.log, format!("create_event_type:{}", draft.slug));
            if self.failing_slugs.contains(&draft.slug) {
                return Err(api_error("create_event_type"));
            }
            let created = EventType {
                id: 100,
                title: draft.title.clone(),
                slug: draft.slug.clone(),
                length: draft.length,
                hidden: draft.hidden,
            };
            self.created.lock().unwrap().push(draft);
            Ok(created)
        }

        async fn create_schedule(&self, draft: ScheduleDraft) -> Result<Schedule, ApiError> {
            log_entry(&self.log, "create_schedule");
            if self.fail_schedule {
                return Err(api_error("create_schedule"));
            }
            Ok(Schedule {
                id: 7,
                name: draft.name,
                schedule: draft.schedule,
            })
        }

        async fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile, ApiError> {
            log_entry(&self.log, "update_profile");
            if self.fail_profile {
                return Err(api_error("update_profile"));
            }
            Ok(UserProfile {
                id: 1,
                username: Some("alice".to_string()),
                email: "alice@example.com".to_string(),
                completed_onboarding: patch.completed_onboarding,
                completed_onboarding_at: None,
            })
        }

        async fn me(&self) -> Result<UserProfile, ApiError> {
            unimplemented!("not used by the finalizer")
        }
    }

    /// HashMap-backed store that also records reads and deletes.
    struct MemStore {
        log: EventLog,
        values: Mutex<HashMap<(String, String), serde_json::Value>>,
    }

    impl MemStore {
        fn new(log: EventLog) -> Self {
            Self {
                log,
                values: Mutex::new(HashMap::new()),
            }
        }

        fn with_redirect(log: EventLog, target: &str) -> Self {
            let store = Self::new(log);
            store.values.lock().unwrap().insert(
                ("alice".to_string(), REDIRECT_KEY.to_string()),
                serde_json::json!(target),
            );
            store
        }

        fn redirect_value(&self) -> Option<serde_json::Value> {
            self.values
                .lock()
                .unwrap()
                .get(&("alice".to_string(), REDIRECT_KEY.to_string()))
                .cloned()
        }
    }

    #[async_trait]
    impl ClientStore for MemStore {
        async fn get_value(
            &self,
            user_id: &str,
            key: &str,
        ) -> Result<Option<serde_json::Value>, StorageError> {
            log_entry(&self.log, format!("store_get:{key}"));
            Ok(self
                .values
                .lock()
                .unwrap()
                .get(&(user_id.to_string(), key.to_string()))
                .cloned())
        }

        async fn set_value(
            &self,
            user_id: &str,
            key: &str,
            value: &serde_json::Value,
        ) -> Result<(), StorageError> {
            self.values
                .lock()
                .unwrap()
                .insert((user_id.to_string(), key.to_string()), value.clone());
            Ok(())
        }

        async fn remove_value(&self, user_id: &str, key: &str) -> Result<bool, StorageError> {
            log_entry(&self.log, format!("store_remove:{key}"));
            Ok(self
                .values
                .lock()
                .unwrap()
                .remove(&(user_id.to_string(), key.to_string()))
                .is_some())
        }
    }

    struct RecordingNotifier {
        log: EventLog,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            log_entry(&self.log, format!("toast_success:{message}"));
        }
        fn error(&self, message: &str) {
            log_entry(&self.log, format!("toast_error:{message}"));
        }
    }

    struct RecordingNavigator {
        log: EventLog,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, target: &str) {
            log_entry(&self.log, format!("navigate:{target}"));
        }
    }

    struct RecordingTelemetry {
        log: EventLog,
    }

    impl Telemetry for RecordingTelemetry {
        fn event(&self, name: &str) {
            log_entry(&self.log, format!("telemetry:{name}"));
        }
    }

    struct RecordingCache {
        log: EventLog,
    }

    #[async_trait]
    impl ProfileCache for RecordingCache {
        async fn invalidate_user_profile(&self) {
            log_entry(&self.log, "invalidate_profile");
        }
    }

    struct Harness {
        log: EventLog,
        api: Arc<StubApi>,
        store: Arc<MemStore>,
        finalizer: OnboardingFinalizer,
    }

    fn harness_with(api: StubApi, store: MemStore, log: EventLog) -> Harness {
        let api = Arc::new(api);
        let store = Arc::new(store);
        let deps = FinalizerDeps {
            api: Arc::clone(&api) as Arc<dyn SchedulingApi>,
            store: Arc::clone(&store) as Arc<dyn ClientStore>,
            cache: Arc::new(RecordingCache { log: log.clone() }),
            notifier: Arc::new(RecordingNotifier { log: log.clone() }),
            navigator: Arc::new(RecordingNavigator { log: log.clone() }),
            telemetry: Arc::new(RecordingTelemetry { log: log.clone() }),
        };
        let finalizer = OnboardingFinalizer::new(deps, Locale::default(), "alice");
        Harness {
            log,
            api,
            store,
            finalizer,
        }
    }

    fn harness() -> Harness {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        harness_with(StubApi::new(log.clone()), MemStore::new(log.clone()), log)
    }

    fn position(log: &[String], entry: &str) -> usize {
        log.iter()
            .position(|e| e == entry)
            .unwrap_or_else(|| panic!("{entry} not in log: {log:?}"))
    }

    #[tokio::test]
    async fn seeds_three_defaults_for_new_user() {
        let h = harness();
        h.finalizer.finalize().await.unwrap();

        let created = h.api.created.lock().unwrap().clone();
        assert_eq!(created.len(), 3);
        let slugs: Vec<&str> = created.iter().map(|d| d.slug.as_str()).collect();
        assert!(slugs.contains(&"15min"));
        assert!(slugs.contains(&"30min"));
        assert!(slugs.contains(&"secret"));

        let secret = created.iter().find(|d| d.slug == "secret").unwrap();
        assert_eq!(secret.length, 15);
        assert!(secret.hidden);
    }

    #[tokio::test]
    async fn skips_seeding_when_event_types_exist() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut api = StubApi::new(log.clone());
        api.existing = vec![EventType {
            id: 5,
            title: "Intro Call".to_string(),
            slug: "intro".to_string(),
            length: 20,
            hidden: false,
        }];
        let h = harness_with(api, MemStore::new(log.clone()), log);

        h.finalizer.finalize().await.unwrap();

        assert!(h.api.created.lock().unwrap().is_empty());
        let log = h.log.lock().unwrap();
        assert!(!log.iter().any(|e| e.starts_with("create_event_type")));
        // Still completes the profile and navigates
        assert!(log.iter().any(|e| e == "update_profile"));
        assert!(log.iter().any(|e| e == "navigate:/"));
    }

    #[tokio::test]
    async fn ordering_schedule_then_profile_then_navigation() {
        let h = harness();
        h.finalizer.finalize().await.unwrap();

        let log = h.log.lock().unwrap();
        let telemetry = position(&log, "telemetry:onboarding_finished");
        let schedule = position(&log, "create_schedule");
        let profile = position(&log, "update_profile");
        let invalidate = position(&log, "invalidate_profile");
        let navigate = position(&log, "navigate:/");

        assert!(telemetry < schedule);
        assert!(schedule < profile);
        assert!(profile < invalidate);
        assert!(invalidate < navigate);
        for entry in log.iter().filter(|e| e.starts_with("create_event_type")) {
            let seed = position(&log, entry);
            assert!(schedule < seed && seed < profile);
        }
    }

    #[tokio::test]
    async fn schedule_failure_short_circuits() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut api = StubApi::new(log.clone());
        api.fail_schedule = true;
        let h = harness_with(api, MemStore::with_redirect(log.clone(), "/settings"), log);

        let err = h.finalizer.finalize().await.unwrap_err();
        assert!(matches!(err, OnboardingError::ScheduleCreation(_)));

        let log = h.log.lock().unwrap();
        assert!(!log.iter().any(|e| e == "list_event_types"));
        assert!(!log.iter().any(|e| e.starts_with("create_event_type")));
        assert!(!log.iter().any(|e| e == "update_profile"));
        assert!(!log.iter().any(|e| e.starts_with("navigate")));
        // No toast of either kind: the error only propagates
        assert!(!log.iter().any(|e| e.starts_with("toast")));
        // Deep link survives for the retry
        assert_eq!(h.store.redirect_value(), Some(serde_json::json!("/settings")));
    }

    #[tokio::test]
    async fn profile_failure_notifies_and_stops() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut api = StubApi::new(log.clone());
        api.fail_profile = true;
        let h = harness_with(api, MemStore::with_redirect(log.clone(), "/settings"), log);

        let err = h.finalizer.finalize().await.unwrap_err();
        assert!(matches!(err, OnboardingError::ProfileCompletion(_)));

        let log = h.log.lock().unwrap();
        assert!(log.iter().any(|e| e.starts_with("toast_error")));
        assert!(!log.iter().any(|e| e.starts_with("toast_success")));
        assert!(!log.iter().any(|e| e == "invalidate_profile"));
        assert!(!log.iter().any(|e| e.starts_with("navigate")));
        assert!(!log.iter().any(|e| e.starts_with("store_remove")));
        assert_eq!(h.store.redirect_value(), Some(serde_json::json!("/settings")));
    }

    #[tokio::test]
    async fn one_failed_seed_does_not_abort() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut api = StubApi::new(log.clone());
        api.failing_slugs = vec!["30min".to_string()];
        let h = harness_with(api, MemStore::new(log.clone()), log);

        h.finalizer.finalize().await.unwrap();

        let created = h.api.created.lock().unwrap().clone();
        let slugs: Vec<&str> = created.iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(created.len(), 2);
        assert!(slugs.contains(&"15min"));
        assert!(slugs.contains(&"secret"));

        let log = h.log.lock().unwrap();
        assert!(log.iter().any(|e| e == "update_profile"));
        assert!(log.iter().any(|e| e == "navigate:/"));
    }

    #[tokio::test]
    async fn listing_failure_skips_seeding_but_continues() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut api = StubApi::new(log.clone());
        api.fail_listing = true;
        let h = harness_with(api, MemStore::new(log.clone()), log);

        h.finalizer.finalize().await.unwrap();

        let log = h.log.lock().unwrap();
        assert!(!log.iter().any(|e| e.starts_with("create_event_type")));
        assert!(log.iter().any(|e| e == "update_profile"));
        assert!(log.iter().any(|e| e == "navigate:/"));
    }

    #[tokio::test]
    async fn stored_redirect_is_consumed() {
        let log: EventLog = Arc::new(Mutex::new(Vec::new()));
        let h = harness_with(
            StubApi::new(log.clone()),
            MemStore::with_redirect(log.clone(), "/settings"),
            log,
        );

        h.finalizer.finalize().await.unwrap();

        let log = h.log.lock().unwrap();
        assert!(log.iter().any(|e| e == "navigate:/settings"));
        drop(log);
        assert!(h.store.redirect_value().is_none());
    }

    #[tokio::test]
    async fn no_redirect_falls_back_to_root() {
        let h = harness();
        h.finalizer.finalize().await.unwrap();

        let log = h.log.lock().unwrap();
        assert!(log.iter().any(|e| e == "navigate:/"));
        assert!(log.iter().any(|e| e.starts_with("toast_success")));
    }

    #[tokio::test]
    async fn telemetry_fires_first_and_once() {
        let h = harness();
        h.finalizer.finalize().await.unwrap();

        let log = h.log.lock().unwrap();
        assert_eq!(log[0], "telemetry:onboarding_finished");
        assert_eq!(
            log.iter().filter(|e| e.starts_with("telemetry")).count(),
            1
        );
    }
}
