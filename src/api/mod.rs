//! Typed client for the scheduling API.

pub mod client;
pub mod http;
pub mod types;

pub use client::SchedulingApi;
pub use http::HttpApi;
pub use types::{
    EventType, EventTypeDraft, Integration, IntegrationsQuery, ProfilePatch, Schedule,
    ScheduleDraft, UserProfile,
};
