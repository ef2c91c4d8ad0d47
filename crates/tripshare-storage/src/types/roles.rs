//! Collaborator roles stored on memberships and invitations.
//!
//! The trip owner is deliberately absent here: ownership lives on the trip row and is
//! never persisted as a role.

use std::str::FromStr;

/// Role granted to an explicit (non-owner) collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberRole {
    Editor,
    Viewer,
}

/// Error type for parsing MemberRole from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl std::fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid role: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for MemberRole {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "editor" => Ok(MemberRole::Editor),
            "viewer" => Ok(MemberRole::Viewer),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Editor => "editor",
            MemberRole::Viewer => "viewer",
        }
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, MemberRole::Editor)
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
