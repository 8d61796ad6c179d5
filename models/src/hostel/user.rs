// models/src/hostel/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, required};
use crate::errors::{HostelError, HostelResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Administrator,
    #[default]
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Administrator => "Administrator",
            Role::Staff => "Staff",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Administrator)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Disabled,
}

// --- Stored User Struct ---
// Holds the password hash, never the plaintext password. Responses go
// through `UserProfile` so the hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

// --- DTO for account creation ---
// Temporarily holds the plaintext password until it is hashed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
    pub created_at: DateTime<Utc>,
}

/// Lower-cases and checks the rough `local@domain` shape.
pub fn normalize_email(email: &str) -> HostelResult<String> {
    let email = required("email", email)?.to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(email),
        _ => Err(HostelError::validation("email is not a valid address")),
    }
}

fn check_password(password: Option<&str>) -> HostelResult<&str> {
    match password {
        Some(p) if !p.trim().is_empty() => Ok(p),
        _ => Err(HostelError::validation("password is required")),
    }
}

impl NewUser {
    /// Checks required fields; the plaintext password is returned for hashing.
    pub fn validate(&self) -> HostelResult<&str> {
        required("name", &self.name)?;
        normalize_email(&self.email)?;
        check_password(self.password.as_deref())
    }
}

impl UserUpdate {
    /// Returns the new plaintext password, if one was supplied.
    pub fn validate(&self) -> HostelResult<Option<&str>> {
        if let Some(name) = &self.name {
            required("name", name)?;
        }
        if let Some(email) = &self.email {
            normalize_email(email)?;
        }
        match &self.password {
            Some(p) => check_password(Some(p.as_str())).map(Some),
            None => Ok(None),
        }
    }
}

impl User {
    /// Creates the stored account; `password_hash` is produced by the caller.
    pub fn from_new_user(new_user: NewUser, password_hash: String, now: DateTime<Utc>) -> HostelResult<Self> {
        new_user.validate()?;
        Ok(User {
            id: new_id(),
            name: required("name", &new_user.name)?,
            email: normalize_email(&new_user.email)?,
            password_hash,
            role: new_user.role.unwrap_or_default(),
            status: new_user.status.unwrap_or_default(),
            created_at: now,
        })
    }

    pub fn apply_update(&mut self, update: UserUpdate, password_hash: Option<String>) -> HostelResult<()> {
        update.validate()?;
        if let Some(name) = update.name {
            self.name = required("name", &name)?;
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email)?;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}
