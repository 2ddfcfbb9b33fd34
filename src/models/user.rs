//! User profile and token payloads.

use serde::{Deserialize, Deserializer, Serialize};

/// Profile returned by the user service's `/api/auth/me`.
///
/// Cached in persistent storage as JSON while the session is alive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Platform user id claim (may be absent for identity-provider-only users)
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    /// Identity provider subject
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<String>,
}

impl UserProfile {
    /// Id used in backend paths: `userId`, then `id`, then a numeric `sub`.
    pub fn resolved_id(&self) -> Option<String> {
        let non_empty = |v: &Option<String>| v.as_ref().filter(|s| !s.trim().is_empty()).cloned();

        non_empty(&self.user_id)
            .or_else(|| non_empty(&self.id))
            .or_else(|| {
                self.sub
                    .as_deref()
                    .and_then(|s| s.parse::<u64>().ok())
                    .filter(|n| *n > 0)
                    .map(|n| n.to_string())
            })
    }

    /// Full name when known, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// `/api/auth/me` envelope.
#[derive(Debug, Deserialize)]
pub struct AuthMeResponse {
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// `/api/auth/validate` response.
#[derive(Debug, Deserialize)]
pub struct ValidateResponse {
    #[serde(default)]
    pub valid: bool,
}

/// OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_id_in_preference_order() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "userId": 42, "id": 7, "sub": "99", "username": "jane"
        }))
        .unwrap();
        assert_eq!(profile.resolved_id().as_deref(), Some("42"));

        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "userId": null, "sub": "15" })).unwrap();
        assert_eq!(profile.resolved_id().as_deref(), Some("15"));

        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "sub": "f81d4fae-7dec" })).unwrap();
        assert_eq!(profile.resolved_id(), None);
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut profile = UserProfile {
            username: "jdoe".into(),
            ..Default::default()
        };
        assert_eq!(profile.display_name(), "jdoe");
        profile.full_name = Some("Jane Doe".into());
        assert_eq!(profile.display_name(), "Jane Doe");
    }
}
