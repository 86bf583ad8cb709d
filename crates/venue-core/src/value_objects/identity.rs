//! Caller identity and role, resolved once per request and passed explicitly

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Role of an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books and cancels their own reservations
    Customer,
    /// Manages reservations against the venues they own
    Owner,
    /// A role token this service does not recognise
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Get the wire token for this role
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Owner => "owner",
            Self::Unknown => "unknown",
        }
    }

    /// Map a role token to a role. Matching ignores ASCII case because
    /// issuers have used both `owner` and `OWNER`.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("customer") {
            Self::Customer
        } else if token.eq_ignore_ascii_case("owner") {
            Self::Owner
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Already-validated caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Identity {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn customer(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Customer)
    }

    pub fn owner(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Owner)
    }

    #[inline]
    pub fn is_customer(&self) -> bool {
        self.role == UserRole::Customer
    }

    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role == UserRole::Owner
    }
}
