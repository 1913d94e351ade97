use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse authorization tier attached to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Dj,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Dj => "DJ",
            Self::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USER" => Some(Self::User),
            "DJ" => Some(Self::Dj),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model
#[derive(Clone, Debug)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_email_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse(" Dj "), Some(UserRole::Dj));
        assert_eq!(UserRole::parse("USER"), Some(UserRole::User));
        assert_eq!(UserRole::parse("operator"), None);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&UserRole::Dj).unwrap(), "\"DJ\"");
        let role: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, UserRole::Admin);
    }
}
