//! Membership roles.

use serde::{Deserialize, Serialize};

/// A role a user holds on a collective.
///
/// Roles are attached per collective id; holding `Admin` on one collective
/// says nothing about any other.
///
/// | Role | Typical powers |
/// |------|----------------|
/// | `Admin` | Approve, pay (when host), edit, see private data |
/// | `Accountant` | Read private financial data, comment |
/// | `Member` | Core contributor, no financial powers |
/// | `Backer` | Financial contributor |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Accountant,
    Member,
    Backer,
}

impl Role {
    /// Returns the role name as stored by the platform.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Accountant => "ACCOUNTANT",
            Self::Member => "MEMBER",
            Self::Backer => "BACKER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_matches_platform_names() {
        let json = serde_json::to_string(&Role::Accountant).expect("serialize");
        assert_eq!(json, "\"ACCOUNTANT\"");
        let parsed: Role = serde_json::from_str("\"ADMIN\"").expect("deserialize");
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Role::Backer.to_string(), "BACKER");
    }
}
