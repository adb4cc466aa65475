//! Conferencing-app listing for the wizard step.

use serde::Serialize;

use crate::api::client::SchedulingApi;
use crate::api::types::{Integration, IntegrationsQuery};
use crate::error::ApiError;

/// Conferencing apps the wizard offers to connect.
const VIDEO_APPS_NEEDED: [&str; 4] = ["googlevideo", "zoomvideo", "webex", "office365video"];

/// Installed by default for every user; never shown in the wizard.
const DEFAULT_VIDEO_SLUG: &str = "daily-video";

/// A conferencing app as presented by the wizard.
#[derive(Debug, Clone, Serialize)]
pub struct ConferencingApp {
    pub name: String,
    pub slug: String,
    pub app_type: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    /// Whether the user already holds a credential for this app.
    pub installed: bool,
}

/// Fetch and filter the conferencing apps shown by the wizard step.
///
/// The API returns them popularity-sorted; that order is preserved.
pub async fn list_conferencing_apps(
    api: &dyn SchedulingApi,
) -> Result<Vec<ConferencingApp>, ApiError> {
    let items = api.integrations(IntegrationsQuery::conferencing()).await?;
    Ok(filter_video_apps(items))
}

/// Keep only the supported video apps, dropping the default one.
fn filter_video_apps(items: Vec<Integration>) -> Vec<ConferencingApp> {
    items
        .into_iter()
        .filter_map(|item| {
            let dir_name = item.dir_name.as_deref().unwrap_or("");
            if !VIDEO_APPS_NEEDED.contains(&dir_name) {
                return None;
            }
            if item.slug == DEFAULT_VIDEO_SLUG {
                return None;
            }
            Some(ConferencingApp {
                installed: !item.user_credential_ids.is_empty(),
                name: item.name,
                slug: item.slug,
                app_type: item.app_type,
                logo: item.logo,
                description: item.description,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integration(name: &str, slug: &str, dir_name: Option<&str>, credentials: &[i64]) -> Integration {
        Integration {
            name: name.to_string(),
            slug: slug.to_string(),
            app_type: format!("{slug}_video"),
            logo: Some(format!("/logos/{slug}.svg")),
            description: None,
            dir_name: dir_name.map(str::to_string),
            user_credential_ids: credentials.to_vec(),
        }
    }

    #[test]
    fn keeps_only_supported_video_apps() {
        let items = vec![
            integration("Zoom Video", "zoom", Some("zoomvideo"), &[]),
            integration("Google Meet", "google-meet", Some("googlevideo"), &[7]),
            integration("Cal Video", "daily-video", Some("dailyvideo"), &[1]),
            integration("Around", "around", Some("around"), &[]),
            integration("Webex", "webex", Some("webex"), &[]),
        ];

        let apps = filter_video_apps(items);
        let slugs: Vec<&str> = apps.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs, vec!["zoom", "google-meet", "webex"]);
    }

    #[test]
    fn drops_default_video_app_even_when_dir_matches() {
        let items = vec![integration(
            "Cal Video",
            "daily-video",
            Some("zoomvideo"),
            &[1],
        )];
        assert!(filter_video_apps(items).is_empty());
    }

    #[test]
    fn missing_dir_name_is_filtered() {
        let items = vec![integration("Mystery App", "mystery", None, &[])];
        assert!(filter_video_apps(items).is_empty());
    }

    #[test]
    fn installed_reflects_credentials() {
        let items = vec![
            integration("Zoom Video", "zoom", Some("zoomvideo"), &[42]),
            integration("Webex", "webex", Some("webex"), &[]),
        ];
        let apps = filter_video_apps(items);
        assert!(apps[0].installed);
        assert!(!apps[1].installed);
    }

    #[test]
    fn preserves_api_order() {
        let items = vec![
            integration("Webex", "webex", Some("webex"), &[]),
            integration("Zoom Video", "zoom", Some("zoomvideo"), &[]),
        ];
        let apps = filter_video_apps(items);
        assert_eq!(apps[0].slug, "webex");
        assert_eq!(apps[1].slug, "zoom");
    }
}
