/// User domain type
use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// Account role as assigned by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular listener
    #[default]
    User,

    /// Administrator with access to `/api/admin`
    Admin,
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Login name
    pub username: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Primary role
    #[serde(default)]
    pub role: Role,

    /// Whether the account is enabled
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Account creation timestamp (ISO string)
    #[serde(default)]
    pub created_at: Option<String>,

    /// Roles decoded from the bearer token, merged in by the session store
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Whether the user may use admin endpoints.
    ///
    /// True for the `ADMIN` role or a token role of `ADMIN` / `ROLE_ADMIN`.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
            || self
                .roles
                .iter()
                .any(|r| r.eq_ignore_ascii_case("ADMIN") || r.eq_ignore_ascii_case("ROLE_ADMIN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> User {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_admin_user() {
        let user = parse(
            r#"{"id": 1, "username": "root", "email": "r@x.io", "role": "ADMIN",
                "isActive": true, "createdAt": "2024-01-01T00:00:00"}"#,
        );
        assert_eq!(user.role, Role::Admin);
        assert!(user.is_admin());
        assert!(user.roles.is_empty());
    }

    #[test]
    fn minimal_user_defaults() {
        let user = parse(r#"{"id": "u1", "username": "alice"}"#);
        assert_eq!(user.role, Role::User);
        assert!(user.is_active);
        assert!(!user.is_admin());
    }

    #[test]
    fn token_role_grants_admin() {
        let mut user = parse(r#"{"id": "u1", "username": "alice"}"#);
        user.roles = vec!["ROLE_ADMIN".to_string()];
        assert!(user.is_admin());
    }
}
