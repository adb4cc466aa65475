//! Onboarding wizard — final step.
//!
//! The user reviews the conferencing apps they can connect, then hits
//! "finish". Finishing provisions a default availability schedule and
//! default event types against the scheduling API, marks the profile
//! onboarded, invalidates the cached profile, and hands the client its
//! redirect target.

pub mod defaults;
pub mod finalizer;
pub mod hooks;
pub mod integrations;
pub mod routes;

pub use defaults::{REDIRECT_KEY, default_event_types, default_schedule};
pub use finalizer::{FinalizerDeps, OnboardingFinalizer};
pub use hooks::{
    LogTelemetry, MemoryProfileCache, Navigator, Notifier, ONBOARDING_FINISHED, ProfileCache,
    Telemetry,
};
pub use integrations::{ConferencingApp, list_conferencing_apps};
pub use routes::{OnboardingRouteState, onboarding_routes};
