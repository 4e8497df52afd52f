// ─── Authentication ───
// Launcher-token validation against the backend, Yggdrasil session creation,
// and the offline fallback used whenever either step fails.

pub mod identity;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::core::auth::identity::offline_uuid;
use crate::core::error::{LauncherError, LauncherResult};

/// Access token presented to the game when no backend session exists. The
/// launch assembler treats it as the "not authenticated" marker.
pub const OFFLINE_ACCESS_TOKEN: &str = "0";

/// Resolved identity for one launch.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub username: String,
    pub uuid: String,
    pub access_token: String,
    pub user_type: String,
}

impl AuthSession {
    /// Offline session: derived UUID, sentinel token, legacy user type.
    pub fn offline(username: &str) -> Self {
        Self {
            username: username.to_string(),
            uuid: offline_uuid(username),
            access_token: OFFLINE_ACCESS_TOKEN.to_string(),
            user_type: "legacy".to_string(),
        }
    }

    pub fn is_online(&self) -> bool {
        !self.access_token.is_empty() && self.access_token != OFFLINE_ACCESS_TOKEN
    }
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    registered: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YggdrasilResponse {
    access_token: String,
    #[serde(default)]
    available_profiles: Vec<YggdrasilProfile>,
}

#[derive(Debug, Deserialize)]
struct YggdrasilProfile {
    id: String,
}

/// Resolve a session for `fallback_username`.
///
/// Validates the launcher token against the backend and, when it belongs to
/// a registered account, opens a Yggdrasil session. Every failure along the
/// way degrades to an offline session rather than aborting the launch.
pub async fn authenticate(
    client: &Client,
    api_url: &str,
    token: &str,
    hwid: &str,
    fallback_username: &str,
) -> AuthSession {
    match try_authenticate(client, api_url, token, hwid).await {
        Ok(session) => {
            info!("Authenticated as {} ({})", session.username, session.user_type);
            session
        }
        Err(e) => {
            warn!("Authentication failed, launching offline: {}", e);
            AuthSession::offline(fallback_username)
        }
    }
}

async fn try_authenticate(
    client: &Client,
    api_url: &str,
    token: &str,
    hwid: &str,
) -> LauncherResult<AuthSession> {
    if api_url.is_empty() || token.is_empty() {
        return Err(LauncherError::Auth("no backend configured".into()));
    }

    let validate_url = format!("{api_url}/api/auth/validate?token={token}&hwid={hwid}");
    let validation: ValidateResponse = client
        .get(&validate_url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !validation.registered {
        return Err(LauncherError::Auth("token is not registered".into()));
    }
    let username = validation
        .username
        .filter(|name| !name.is_empty())
        .ok_or_else(|| LauncherError::Auth("backend returned no username".into()))?;

    // The backend speaks the Yggdrasil protocol with the launcher token
    // standing in for the password.
    let body = json!({
        "username": username,
        "password": token,
        "clientToken": offline_uuid(&username),
        "requestUser": true,
    });
    let session: YggdrasilResponse = client
        .post(format!("{api_url}/authserver/authenticate"))
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let uuid = session
        .available_profiles
        .first()
        .map(|profile| profile.id.clone())
        .ok_or_else(|| LauncherError::Auth("session has no profile".into()))?;

    Ok(AuthSession {
        username,
        uuid,
        access_token: session.access_token,
        user_type: "mojang".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_session_uses_derived_uuid_and_sentinel_token() {
        let session = AuthSession::offline("Notch");
        assert_eq!(session.username, "Notch");
        assert_eq!(session.uuid, "b50ad385-829d-3141-a216-7e7d7539ba7f");
        assert_eq!(session.access_token, OFFLINE_ACCESS_TOKEN);
        assert_eq!(session.user_type, "legacy");
        assert!(!session.is_online());
    }

    #[test]
    fn validate_response_tolerates_missing_fields() {
        let v: ValidateResponse = serde_json::from_str("{}").unwrap();
        assert!(!v.registered);
        assert_eq!(v.username, None);

        let v: ValidateResponse =
            serde_json::from_str(r#"{"username": "Notch", "registered": true}"#).unwrap();
        assert!(v.registered);
        assert_eq!(v.username.as_deref(), Some("Notch"));
    }

    #[test]
    fn yggdrasil_response_decodes_camel_case() {
        let raw = r#"{
            "accessToken": "abc123",
            "availableProfiles": [{"id": "deadbeef", "name": "Notch"}]
        }"#;
        let r: YggdrasilResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(r.access_token, "abc123");
        assert_eq!(r.available_profiles[0].id, "deadbeef");
    }
}
