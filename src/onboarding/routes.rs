//! REST endpoints for the onboarding wizard.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::client::SchedulingApi;
use crate::locale::Locale;
use crate::store::ClientStore;

use super::defaults::REDIRECT_KEY;
use super::finalizer::{FinalizerDeps, OnboardingFinalizer};
use super::hooks::{MemoryProfileCache, Navigator, Notifier, ProfileCache, Telemetry};
use super::integrations::list_conferencing_apps;

/// Shared state for the onboarding routes.
#[derive(Clone)]
pub struct OnboardingRouteState {
    pub api: Arc<dyn SchedulingApi>,
    pub store: Arc<dyn ClientStore>,
    pub cache: Arc<MemoryProfileCache>,
    pub telemetry: Arc<dyn Telemetry>,
    pub locale: Locale,
    pub user_id: String,
}

/// A toast for the client to render.
#[derive(Debug, Clone, Serialize)]
struct Notice {
    level: String,
    message: String,
}

/// Buffers toasts raised during a single finalize call.
#[derive(Default)]
struct NoticeBuffer {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBuffer {
    fn push(&self, level: &str, message: &str) {
        self.notices
            .lock()
            .expect("notice buffer poisoned")
            .push(Notice {
                level: level.to_string(),
                message: message.to_string(),
            });
    }

    fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().expect("notice buffer poisoned"))
    }
}

impl Notifier for NoticeBuffer {
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

/// Captures the navigation target the finalizer chooses.
#[derive(Default)]
struct CapturedNavigation {
    target: Mutex<Option<String>>,
}

impl CapturedNavigation {
    fn take(&self) -> Option<String> {
        self.target.lock().expect("navigation target poisoned").take()
    }
}

impl Navigator for CapturedNavigation {
    fn navigate(&self, target: &str) {
        *self.target.lock().expect("navigation target poisoned") = Some(target.to_string());
    }
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    completed_onboarding: bool,
    event_type_count: usize,
}

#[derive(Debug, Serialize)]
struct FinalizeResponse {
    redirect_to: String,
    notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    notices: Vec<Notice>,
}

#[derive(Debug, Deserialize)]
struct RedirectRequest {
    target: String,
}

/// GET /api/onboarding/status
///
/// Reports whether onboarding is complete and how many event types the
/// user already has. The profile comes from the in-process cache when
/// warm, otherwise it is refetched.
async fn get_status(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let profile = match state.cache.get().await {
        Some(profile) => profile,
        None => match state.api.me().await {
            Ok(profile) => {
                state.cache.put(profile.clone()).await;
                profile
            }
            Err(e) => {
                warn!(error = %e, "Profile fetch failed");
                return upstream_error(e.to_string());
            }
        },
    };

    let event_type_count = match state.api.list_event_types().await {
        Ok(list) => list.len(),
        Err(e) => {
            warn!(error = %e, "Event type listing failed");
            return upstream_error(e.to_string());
        }
    };

    Json(StatusResponse {
        completed_onboarding: profile.completed_onboarding,
        event_type_count,
    })
    .into_response()
}

/// GET /api/onboarding/apps
///
/// The filtered conferencing apps the wizard step shows.
async fn get_apps(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    match list_conferencing_apps(state.api.as_ref()).await {
        Ok(apps) => Json(apps).into_response(),
        Err(e) => {
            warn!(error = %e, "Integration listing failed");
            upstream_error(e.to_string())
        }
    }
}

/// PUT /api/onboarding/redirect
///
/// Stash the deep link the client should land on after onboarding. The
/// finalizer consumes it exactly once.
async fn put_redirect(
    State(state): State<OnboardingRouteState>,
    Json(body): Json<RedirectRequest>,
) -> impl IntoResponse {
    match state
        .store
        .set_value(
            &state.user_id,
            REDIRECT_KEY,
            &serde_json::Value::String(body.target),
        )
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            warn!(error = %e, "Could not store redirect target");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                    notices: Vec::new(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/onboarding/finalize
///
/// Runs the finalization workflow. On success the response carries the
/// redirect target and any toasts; on failure the error plus whatever
/// toasts were raised before the workflow stopped.
async fn finalize(State(state): State<OnboardingRouteState>) -> impl IntoResponse {
    let notices = Arc::new(NoticeBuffer::default());
    let navigation = Arc::new(CapturedNavigation::default());

    let deps = FinalizerDeps {
        api: Arc::clone(&state.api),
        store: Arc::clone(&state.store),
        cache: Arc::clone(&state.cache) as Arc<dyn ProfileCache>,
        notifier: Arc::clone(&notices) as Arc<dyn Notifier>,
        navigator: Arc::clone(&navigation) as Arc<dyn Navigator>,
        telemetry: Arc::clone(&state.telemetry),
    };
    let finalizer = OnboardingFinalizer::new(deps, state.locale.clone(), state.user_id.clone());

    match finalizer.finalize().await {
        Ok(()) => {
            let redirect_to = navigation.take().unwrap_or_else(|| "/".to_string());
            Json(FinalizeResponse {
                redirect_to,
                notices: notices.drain(),
            })
            .into_response()
        }
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
                notices: notices.drain(),
            }),
        )
            .into_response(),
    }
}

fn upstream_error(error: String) -> axum::response::Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error,
            notices: Vec::new(),
        }),
    )
        .into_response()
}

/// Build the onboarding REST routes.
pub fn onboarding_routes(state: OnboardingRouteState) -> Router {
    Router::new()
        .route("/api/onboarding/status", get(get_status))
        .route("/api/onboarding/apps", get(get_apps))
        .route("/api/onboarding/redirect", put(put_redirect))
        .route("/api/onboarding/finalize", post(finalize))
        .with_state(state)
}
