//! User-facing strings for the onboarding wizard.
//!
//! The web client normally resolves these through its i18n layer; the
//! service only needs the strings it bakes into remote entities and
//! notifications. Fields are plain so a deployment can override any of
//! them without touching the workflow.

/// Localized strings used by the onboarding workflow. Defaults are English.
#[derive(Debug, Clone)]
pub struct Locale {
    /// Title of the seeded 15-minute event type.
    pub event_type_15min: String,
    /// Title of the seeded 30-minute event type.
    pub event_type_30min: String,
    /// Title of the seeded hidden event type.
    pub event_type_secret: String,
    /// Name of the default availability schedule.
    pub default_schedule_name: String,
    /// Success notification after finalization.
    pub profile_updated: String,
    /// Error notification when the profile update fails.
    pub profile_update_failed: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            event_type_15min: "15 Min Meeting".to_string(),
            event_type_30min: "30 Min Meeting".to_string(),
            event_type_secret: "Secret Meeting".to_string(),
            default_schedule_name: "Working Hours".to_string(),
            profile_updated: "Your user profile has been updated successfully.".to_string(),
            profile_update_failed: "There was a problem saving your user profile.".to_string(),
        }
    }
}
