//! Fixed onboarding defaults.

use crate::api::types::{EventTypeDraft, ScheduleDraft};
use crate::availability::WeeklyTemplate;
use crate::locale::Locale;

/// Storage key holding the post-onboarding deep link, consumed at most
/// once by the finalizer.
pub const REDIRECT_KEY: &str = "onBoardingRedirect";

/// The three event types seeded for a user who has none.
pub fn default_event_types(locale: &Locale) -> Vec<EventTypeDraft> {
    vec![
        EventTypeDraft {
            title: locale.event_type_15min.clone(),
            slug: "15min".to_string(),
            length: 15,
            hidden: false,
        },
        EventTypeDraft {
            title: locale.event_type_30min.clone(),
            slug: "30min".to_string(),
            length: 30,
            hidden: false,
        },
        EventTypeDraft {
            title: locale.event_type_secret.clone(),
            slug: "secret".to_string(),
            length: 15,
            hidden: true,
        },
    ]
}

/// The availability schedule created at the end of onboarding.
pub fn default_schedule(locale: &Locale) -> ScheduleDraft {
    ScheduleDraft {
        name: locale.default_schedule_name.clone(),
        schedule: WeeklyTemplate::default_working_week(),
    }
}
