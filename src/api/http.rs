//! HTTP implementation of `SchedulingApi`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;

use super::client::SchedulingApi;
use super::types::{
    EventType, EventTypeDraft, Integration, IntegrationsQuery, ProfilePatch, Schedule,
    ScheduleDraft, UserProfile,
};

/// reqwest-backed scheduling API client with bearer-token auth.
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with auth and correlation headers, mapping transport
    /// failures, non-2xx statuses, and body decode errors to `ApiError`.
    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        debug!(op, %request_id, "Scheduling API request");

        let response = request
            .bearer_auth(self.token.expose_secret())
            .header("x-request-id", request_id.to_string())
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                op: op.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                op: op.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| ApiError::Decode {
            op: op.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get<T: DeserializeOwned>(&self, op: &str, path: &str) -> Result<T, ApiError> {
        self.send(op, self.client.get(self.url(path))).await
    }

    async fn get_with_query<Q: Serialize + Sync, T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.send(op, self.client.get(self.url(path)).query(query))
            .await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(op, self.client.post(self.url(path)).json(body))
            .await
    }

    async fn patch<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        op: &str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send(op, self.client.patch(self.url(path)).json(body))
            .await
    }
}

#[async_trait]
impl SchedulingApi for HttpApi {
    async fn integrations(
        &self,
        query: IntegrationsQuery,
    ) -> Result<Vec<Integration>, ApiError> {
        self.get_with_query("integrations", "/v1/integrations", &query)
            .await
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError> {
        self.get("list_event_types", "/v1/event-types").await
    }

    async fn create_event_type(&self, draft: EventTypeDraft) -> Result<EventType, ApiError> {
        self.post("create_event_type", "/v1/event-types", &draft)
            .await
    }

    async fn create_schedule(&self, draft: ScheduleDraft) -> Result<Schedule, ApiError> {
        self.post("create_schedule", "/v1/schedules", &draft).await
    }

    async fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile, ApiError> {
        self.patch("update_profile", "/v1/me", &patch).await
    }

    async fn me(&self) -> Result<UserProfile, ApiError> {
        self.get("me", "/v1/me").await
    }
}
