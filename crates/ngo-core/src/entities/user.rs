//! User entity - a registered account with a role-specific profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization role, derived from the profile variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Organiser,
    Member,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Organiser => "organiser",
            Self::Member => "member",
        }
    }

    /// Admins and organisers run events and approve volunteers
    #[inline]
    pub const fn manages_events(self) -> bool {
        matches!(self, Self::Admin | Self::Organiser)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "organiser" => Ok(Self::Organiser),
            "member" => Ok(Self::Member),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Role-specific profile data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum UserProfile {
    Admin,
    Member {
        photo_url: Option<String>,
    },
    Organiser {
        org_name: String,
        org_address: String,
        org_phone: String,
    },
}

impl UserProfile {
    pub const fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Member { .. } => Role::Member,
            Self::Organiser { .. } => Role::Organiser,
        }
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub profile: UserProfile,
    pub joined_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, name: String, profile: UserProfile) -> Self {
        Self {
            email,
            name,
            profile,
            joined_at: Utc::now(),
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Name to show publicly, falling back to the e-mail
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
