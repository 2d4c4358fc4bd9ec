#![forbid(unsafe_code)]

//! `videos.update` request model and the authenticated client that sends it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, StudioError};
use crate::files::VideoText;
use crate::languages::{Localization, localizations_for};
use crate::oauth::Credentials;

pub const UPDATE_PARTS: &str = "snippet,status,localizations";
/// "People & Blogs".
pub const CATEGORY_ID: &str = "22";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub description: String,
    pub category_id: String,
    pub default_language: String,
}

/// Body of the `videos.update` call.
#[derive(Debug, Clone, Serialize)]
pub struct VideoUpdate {
    pub id: String,
    pub snippet: VideoSnippet,
    pub localizations: BTreeMap<String, Localization>,
}

impl VideoUpdate {
    pub fn new(video_id: &str, text: &VideoText) -> Self {
        Self {
            id: video_id.to_string(),
            snippet: VideoSnippet {
                title: text.title.clone(),
                description: text.description.clone(),
                category_id: CATEGORY_ID.to_string(),
                default_language: DEFAULT_LANGUAGE.to_string(),
            },
            localizations: localizations_for(text),
        }
    }
}

/// The part of the returned video resource we look at.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoResource {
    pub id: String,
    #[serde(default)]
    pub etag: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorItem {
    #[serde(default)]
    reason: Option<String>,
}

pub fn http_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Session handle bound to one set of credentials.
#[derive(Debug)]
pub struct YouTubeClient {
    agent: ureq::Agent,
    api_base: String,
    credentials: Credentials,
}

impl YouTubeClient {
    pub fn new(agent: ureq::Agent, api_base: &str, credentials: Credentials) -> Self {
        Self {
            agent,
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Sends one `videos.update` call. Blocks on the HTTP request.
    pub fn update_video(&self, update: &VideoUpdate) -> Result<VideoResource> {
        let url = format!("{}/videos", self.api_base);
        let response = self
            .agent
            .put(&url)
            .query("part", UPDATE_PARTS)
            .set("Authorization", &self.credentials.authorization_header())
            .send_json(update);

        match response {
            Ok(response) => response.into_json().map_err(|err| StudioError::Api {
                status: 200,
                reason: Some("invalidResponse".into()),
                message: err.to_string(),
            }),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(decode_api_error(status, &body))
            }
            Err(ureq::Error::Transport(transport)) => Err(StudioError::Transport {
                url,
                message: transport.to_string(),
            }),
        }
    }
}

fn decode_api_error(status: u16, body: &str) -> StudioError {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => StudioError::Api {
            status,
            reason: envelope
                .error
                .errors
                .into_iter()
                .find_map(|item| item.reason),
            message: envelope.error.message,
        },
        Err(_) => StudioError::Api {
            status,
            reason: None,
            message: body.trim().to_string(),
        },
    }
}

/// Builds the update for `video_id` and submits it through `client`, which is
/// consumed by the call.
pub async fn submit_update(
    client: YouTubeClient,
    video_id: &str,
    text: &VideoText,
) -> Result<VideoResource> {
    let update = VideoUpdate::new(video_id, text);
    info!(
        video_id,
        languages = update.localizations.len(),
        "Sending update with {} localizations",
        update.localizations.len()
    );
    let resource = tokio::task::spawn_blocking(move || client.update_video(&update))
        .await
        .map_err(|err| StudioError::Transport {
            url: "videos.update".into(),
            message: format!("update task: {err}"),
        })??;
    Ok(resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::LANGUAGE_TAGS;
    use crate::test_support::spawn_server;
    use axum::{
        Json, Router,
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::put,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;

    fn sample_text() -> VideoText {
        VideoText {
            title: "My Title".into(),
            description: "My Desc".into(),
        }
    }

    fn credentials(token: &str) -> Credentials {
        Credentials {
            access_token: token.into(),
            token_type: "Bearer".into(),
            refresh_token: None,
            scope: None,
            expires_at: None,
        }
    }

    /// Accepts the update only with the expected token and parts, and checks the
    /// body the way the real endpoint would.
    async fn videos_endpoint(
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some("Bearer good-token");
        if !authorized {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": {
                        "code": 401,
                        "message": "Request had invalid authentication credentials.",
                        "errors": [{ "reason": "authError" }]
                    }
                })),
            );
        }
        if params.get("part").map(String::as_str) != Some(UPDATE_PARTS) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": { "code": 400, "message": "bad part", "errors": [] } })),
            );
        }
        if body["id"] == "quota" {
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": {
                        "code": 403,
                        "message": "The request cannot be completed because you have exceeded your quota.",
                        "errors": [{ "domain": "youtube.quota", "reason": "quotaExceeded" }]
                    }
                })),
            );
        }
        let id = body["id"].clone();
        (
            StatusCode::OK,
            Json(json!({ "kind": "youtube#video", "etag": "etag-1", "id": id })),
        )
    }

    async fn api_server() -> String {
        spawn_server(Router::new().route("/videos", put(videos_endpoint))).await
    }

    #[test]
    fn update_body_matches_videos_resource_shape() {
        let update = VideoUpdate::new("krtVKlwt-1o", &sample_text());
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body["id"], "krtVKlwt-1o");
        assert_eq!(
            body["snippet"],
            json!({
                "title": "My Title",
                "description": "My Desc",
                "categoryId": "22",
                "defaultLanguage": "en"
            })
        );
        let localizations = body["localizations"].as_object().unwrap();
        assert_eq!(localizations.len(), LANGUAGE_TAGS.len());
        assert!(localizations.len() >= 200);
        for entry in localizations.values() {
            assert_eq!(entry, &json!({ "title": "My Title", "description": "My Desc" }));
        }
    }

    #[test]
    fn decode_api_error_reads_google_envelope() {
        let err = decode_api_error(
            404,
            r#"{"error":{"code":404,"message":"Video not found","errors":[{"reason":"videoNotFound"}]}}"#,
        );
        match err {
            StudioError::Api {
                status,
                reason,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(reason.as_deref(), Some("videoNotFound"));
                assert_eq!(message, "Video not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_api_error_keeps_raw_body() {
        let err = decode_api_error(502, "  upstream exploded ");
        assert!(matches!(
            err,
            StudioError::Api { status: 502, reason: None, ref message } if message == "upstream exploded"
        ));
    }

    #[test]
    fn client_debug_names_api_base() {
        let client = YouTubeClient::new(http_agent(), "http://api.test/", credentials("t"));
        assert!(format!("{client:?}").contains("http://api.test"));
    }

    #[tokio::test]
    async fn submit_update_returns_resource_id() {
        let base = api_server().await;
        let client = YouTubeClient::new(http_agent(), &base, credentials("good-token"));
        let resource = submit_update(client, "krtVKlwt-1o", &sample_text())
            .await
            .unwrap();
        assert_eq!(resource.id, "krtVKlwt-1o");
        assert_eq!(resource.etag.as_deref(), Some("etag-1"));
    }

    #[tokio::test]
    async fn submit_update_propagates_auth_failure() {
        let base = api_server().await;
        let client = YouTubeClient::new(http_agent(), &format!("{base}/"), credentials("stale"));
        let err = submit_update(client, "krtVKlwt-1o", &sample_text())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StudioError::Api { status: 401, ref reason, .. } if reason.as_deref() == Some("authError")
        ));
    }

    #[tokio::test]
    async fn submit_update_propagates_quota_error() {
        let base = api_server().await;
        let client = YouTubeClient::new(http_agent(), &base, credentials("good-token"));
        let err = submit_update(client, "quota", &sample_text())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("quotaExceeded"));
    }
}
