use serde::{Deserialize, Serialize};
use std::fmt;

use super::Quota;

/// Tenant role, each role maps to exactly one quota.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    User,
    /// Guest accounts, the most restricted role.
    #[default]
    Invited,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::User, Role::Invited];

    /// Parse a role name as handed over by the identity provider.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            "invited" => Some(Role::Invited),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Invited => "invited",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "Developer",
            Role::Invited => "Guest",
        }
    }

    /// Quota a role gets when no override is configured.
    pub fn builtin_quota(&self) -> Quota {
        match self {
            Role::Admin => Quota::new(32768, 250),
            Role::User => Quota::new(30720, 200),
            Role::Invited => Quota::new(2048, 50),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
