//! Shared wire-protocol DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The server crate depends on this module directly, so the JSON schema of
//! the account API is defined exactly once. Field names follow the camelCase
//! convention of the account API (`billingAddress`, `phoneNumber`, ...).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access role of an account. Closed set: unknown roles fail to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Wire/display string for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
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
        match s.trim() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Profile of a signed-in account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Opaque account identifier.
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Tax (VAT) identifier for billing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl UserProfile {
    /// Apply every field present in `patch`, leaving the rest unchanged.
    ///
    /// Optional contact fields are cleared when the patch carries a blank
    /// value. Required fields (`name`, `email`) are copied as given; the
    /// account backend is responsible for rejecting blank values there.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            name.trim().clone_into(&mut self.name);
        }
        if let Some(email) = &patch.email {
            email.trim().clone_into(&mut self.email);
        }
        apply_optional(&mut self.address, patch.address.as_deref());
        apply_optional(&mut self.billing_address, patch.billing_address.as_deref());
        apply_optional(&mut self.phone_number, patch.phone_number.as_deref());
        apply_optional(&mut self.location, patch.location.as_deref());
        apply_optional(&mut self.vat_number, patch.vat_number.as_deref());
    }

    /// Return a copy of this profile with `patch` applied.
    #[must_use]
    pub fn merged(&self, patch: &ProfilePatch) -> Self {
        let mut next = self.clone();
        next.apply(patch);
        next
    }
}

fn apply_optional(field: &mut Option<String>, value: Option<&str>) {
    let Some(value) = value else {
        return;
    };
    let value = value.trim();
    *field = if value.is_empty() { None } else { Some(value.to_owned()) };
}

/// Partial profile update. Only `Some` fields are applied.
///
/// `id` and `role` are deliberately absent: identity is fixed and roles are
/// changed through the admin endpoint only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl ProfilePatch {
    /// True when the patch would not change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of `POST /api/login` and `POST /api/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Successful login/registration response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque session token to present as a bearer credential.
    pub token: String,
    pub user: UserProfile,
}

/// `{ "user": ... }` envelope used by the profile endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

/// `{ "users": [...] }` envelope returned by the admin user listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListEnvelope {
    pub users: Vec<UserProfile>,
}

/// Body of `PUT /api/users/{id}/role`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleUpdate {
    pub role: Role,
}

/// Error body returned by the account API on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
