// src/models/team.rs - Staff accounts and restaurants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Manager,
    Chef,
    Waiter,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Manager, Role::Chef, Role::Waiter];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Chef => "Chef",
            Self::Waiter => "Waiter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: RecordId,
    pub name: String,
    pub login_id: String,
    pub role: Role,
    #[serde(default)]
    pub restaurant_id: Option<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RecordId,
    pub name: String,
}

/// Body of `POST /users/` and `PUT /users/{id}`. The password is only sent
/// when creating a member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberPayload {
    pub name: String,
    pub login_id: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("chef".parse::<Role>(), Ok(Role::Chef));
        assert_eq!(" Manager ".parse::<Role>(), Ok(Role::Manager));
        assert!("Owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_update_payload_omits_password() {
        let payload = MemberPayload {
            name: "Ana".to_string(),
            login_id: "ana".to_string(),
            role: Role::Waiter,
            password: None,
            restaurant_id: None,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "Waiter");
    }
}
