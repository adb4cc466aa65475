//! Wire types for the scheduling API.
//!
//! The remote service owns every entity here; these structs only shape
//! requests and responses. Field names follow the API's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::availability::WeeklyTemplate;

/// Query parameters for listing integrations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationsQuery {
    pub variant: String,
    pub only_installed: bool,
    pub sort_by_most_popular: bool,
}

impl IntegrationsQuery {
    /// The fixed query the onboarding wizard uses: every conferencing app,
    /// most popular first.
    pub fn conferencing() -> Self {
        Self {
            variant: "conferencing".to_string(),
            only_installed: false,
            sort_by_most_popular: true,
        }
    }
}

/// An integration descriptor returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub name: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub app_type: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dir_name: Option<String>,
    #[serde(default)]
    pub user_credential_ids: Vec<i64>,
}

/// An existing event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub id: i64,
    pub title: String,
    pub slug: String,
    /// Duration in minutes.
    pub length: u32,
    #[serde(default)]
    pub hidden: bool,
}

/// A new event type to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeDraft {
    pub title: String,
    pub slug: String,
    /// Duration in minutes.
    pub length: u32,
    #[serde(default)]
    pub hidden: bool,
}

/// A new availability schedule to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub name: String,
    pub schedule: WeeklyTemplate,
}

/// A created availability schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub name: String,
    pub schedule: WeeklyTemplate,
}

/// Partial update of the user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub completed_onboarding: bool,
}

impl ProfilePatch {
    /// The patch that marks onboarding complete.
    pub fn completed() -> Self {
        Self {
            completed_onboarding: true,
        }
    }
}

/// The user profile as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    pub email: String,
    pub completed_onboarding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_onboarding_at: Option<DateTime<Utc>>,
}
