//! Site user model.

use serde::{Deserialize, Serialize};

use super::{EntityId, DEFAULT_USER_ROLE};

/// A registered user of the (future) family portal.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    pub username: String,
    /// Opaque credential, kept exactly as supplied and never written to JSON.
    #[serde(skip_serializing)]
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: String,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    pub fn from_new(id: EntityId, input: NewUser) -> Self {
        Self {
            id,
            username: input.username,
            password: input.password,
            email: input.email,
            full_name: input.full_name,
            role: input.role.unwrap_or_else(|| DEFAULT_USER_ROLE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_never_serialized() {
        let user = User::from_new(
            1,
            NewUser {
                username: "frontdesk".to_string(),
                password: "hunter2".to_string(),
                email: None,
                full_name: Some("Front Desk".to_string()),
                role: None,
            },
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["fullName"], "Front Desk");
        assert_eq!(json["email"], serde_json::Value::Null);
        assert_eq!(json["role"], "user");
    }
}
