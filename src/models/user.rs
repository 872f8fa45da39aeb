use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn registered(username: &str, email: &str, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: Some(email.to_string()),
            password_hash: Some(password_hash),
            is_guest: false,
            created_at: Utc::now(),
        }
    }

    /// Anonymous session owner; has no credentials and can only hold tokens.
    pub fn guest() -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            username: format!("guest-{}", &id.simple().to_string()[..8]),
            email: None,
            password_hash: None,
            is_guest: true,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            is_guest: u.is_guest,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User::registered("sam", "sam@example.com", "$argon2id$secret".into());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "sam");
    }

    #[test]
    fn test_guest_has_no_credentials() {
        let g = User::guest();
        assert!(g.is_guest);
        assert!(g.email.is_none());
        assert!(g.password_hash.is_none());
        assert!(g.username.starts_with("guest-"));
        assert_eq!(g.username.len(), "guest-".len() + 8);
    }
}
