#![forbid(unsafe_code)]

//! Installed-app OAuth flow: build the consent URL, let the operator paste the
//! code back, trade it for an access token.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::error::{Result, StudioError};
use crate::prompt::{BLUE, CYAN, LineSource, ORANGE, RESET};
use crate::security::generate_state_token;
use crate::youtube::YouTubeClient;

pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// OAuth client registration as downloaded from the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

/// The console wraps the registration in `installed` or `web`.
#[derive(Deserialize)]
struct ClientSecretFile {
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>,
}

impl ClientSecret {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| StudioError::io(path, err))?;
        Self::from_json(path, &raw)
    }

    fn from_json(path: &Path, raw: &str) -> Result<Self> {
        let invalid = |reason: String| StudioError::ClientSecret {
            path: PathBuf::from(path),
            reason,
        };
        let file: ClientSecretFile =
            serde_json::from_str(raw).map_err(|err| invalid(err.to_string()))?;
        let secret = file
            .installed
            .or(file.web)
            .ok_or_else(|| invalid("expected an `installed` or `web` section".into()))?;
        if secret.client_id.trim().is_empty() {
            return Err(invalid("client_id is empty".into()));
        }
        Ok(secret)
    }

    /// Consent URL the operator opens in a browser.
    pub fn authorization_url(&self, state: &str) -> Result<String> {
        let url = Url::parse_with_params(
            &self.auth_uri,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", OOB_REDIRECT_URI),
                ("scope", YOUTUBE_SCOPE),
                ("state", state),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )
        .map_err(|err| StudioError::Authorization(format!("invalid auth_uri {}: {err}", self.auth_uri)))?;
        Ok(url.into())
    }
}

/// Access granted by the token endpoint. Only lives for the current run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_token: String,
    pub token_type: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "bearer")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

fn bearer() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Trades an authorization code for credentials. Blocks on the HTTP call.
pub fn exchange_code(agent: &ureq::Agent, secret: &ClientSecret, code: &str) -> Result<Credentials> {
    let response = agent.post(&secret.token_uri).send_form(&[
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", secret.client_id.as_str()),
        ("client_secret", secret.client_secret.as_str()),
        ("redirect_uri", OOB_REDIRECT_URI),
    ]);

    let token: TokenResponse = match response {
        Ok(response) => response.into_json().map_err(|err| StudioError::TokenExchange {
            error: "invalid_response".into(),
            description: Some(err.to_string()),
        })?,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(parsed) => StudioError::TokenExchange {
                    error: parsed.error,
                    description: parsed.error_description,
                },
                Err(_) => StudioError::TokenExchange {
                    error: format!("http_{status}"),
                    description: Some(body).filter(|body| !body.trim().is_empty()),
                },
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(StudioError::Transport {
                url: secret.token_uri.clone(),
                message: transport.to_string(),
            });
        }
    };

    Ok(Credentials {
        access_token: token.access_token,
        token_type: token.token_type,
        refresh_token: token.refresh_token,
        scope: token.scope,
        expires_at: token.expires_in.and_then(expiry_after),
    })
}

/// `None` when `seconds` does not fit in a timestamp.
fn expiry_after(seconds: i64) -> Option<DateTime<Utc>> {
    TimeDelta::try_seconds(seconds).and_then(|delta| Utc::now().checked_add_signed(delta))
}

/// Runs the consent flow on `input` and returns a client bound to the
/// resulting credentials.
pub async fn authenticate(
    secret: &ClientSecret,
    agent: ureq::Agent,
    api_base: &str,
    input: &mut impl LineSource,
) -> Result<YouTubeClient> {
    let state = generate_state_token();
    let url = secret.authorization_url(&state)?;
    info!("{CYAN}Open this link and authorize access:{RESET} {BLUE}{url}{RESET}");

    let code = input
        .read_line(&format!("{ORANGE}Paste the authorization code:{RESET} "))
        .await?
        .ok_or(StudioError::InputClosed)?;
    let code = code.trim().to_string();
    if code.is_empty() {
        return Err(StudioError::Authorization(
            "no authorization code was entered".into(),
        ));
    }

    let secret = secret.clone();
    let exchange_agent = agent.clone();
    let credentials =
        tokio::task::spawn_blocking(move || exchange_code(&exchange_agent, &secret, &code))
            .await
            .map_err(|err| StudioError::Authorization(format!("token exchange task: {err}")))??;

    if let Some(expires_at) = credentials.expires_at {
        info!(%expires_at, "Authorized; access token valid until {expires_at}");
    } else {
        info!("Authorized");
    }
    Ok(YouTubeClient::new(agent, api_base, credentials))
}
