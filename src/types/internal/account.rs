use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::InternalError;
use crate::types::db::account;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = InternalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            other => Err(InternalError::parse("role", format!("unknown role: {}", other))),
        }
    }
}

/// Account record without any credential material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub role: Role,
    pub phone_number: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl TryFrom<account::Model> for Account {
    type Error = InternalError;

    fn try_from(model: account::Model) -> Result<Self, Self::Error> {
        let last_login = match model.last_login {
            Some(ts) => Some(
                Utc.timestamp_opt(ts, 0)
                    .single()
                    .ok_or_else(|| InternalError::parse("last_login", format!("out of range: {}", ts)))?,
            ),
            None => None,
        };

        Ok(Self {
            id: model.id,
            username: model.username,
            role: model.role.parse()?,
            phone_number: model.phone_number,
            last_login,
        })
    }
}
