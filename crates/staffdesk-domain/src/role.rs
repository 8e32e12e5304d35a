//! Session role types.

use serde::{Deserialize, Serialize};

/// Role carried by a session token.
///
/// Wire format: lowercase string (`"owner"` | `"employee"`), both in JWT
/// claims and in API bodies. Owner sessions are higher privilege and
/// shorter lived than employee sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Employee,
}

impl Role {
    /// Wire string for this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Employee => "employee",
        }
    }

    /// Parse a wire string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "owner" => Some(Self::Owner),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}
