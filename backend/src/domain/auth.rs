//! Acting-user identity and role capabilities.
//!
//! Identity is asserted upstream (by the deployment gateway) and carried
//! into the domain explicitly. No domain operation reads ambient session
//! state; every command receives the acting user and role as arguments.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of roles recognised by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular member: places bookings and keeps favorites.
    User,
    /// Administrator: manages the catalogue and moderates bookings, but
    /// does not place bookings or hold favorites.
    Admin,
}

impl Role {
    /// Canonical lowercase form, matching the wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may confirm, reject or complete any booking and
    /// list bookings across users.
    pub fn can_manage_bookings(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may create, maintain and delete catalogue entries.
    pub fn can_manage_catalogue(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role may place bookings and keep favorites.
    ///
    /// Administrators moderate the system rather than participate in it.
    pub fn can_place_bookings(self) -> bool {
        matches!(self, Self::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {value}")]
pub struct ParseRoleError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(ParseRoleError {
                value: other.to_owned(),
            }),
        }
    }
}

/// The authenticated caller of a domain operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    user_id: Uuid,
    role: Role,
}

impl AuthContext {
    /// Bundle an already-verified identity.
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Identifier of the acting user.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Role of the acting user.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the acting user is the given user or a booking manager.
    pub fn acts_for(&self, user_id: Uuid) -> bool {
        self.user_id == user_id || self.role.can_manage_bookings()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("user", Role::User)]
    #[case("admin", Role::Admin)]
    fn parses_known_roles(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(input.parse::<Role>().ok(), Some(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "student".parse::<Role>().expect_err("unknown role");
        assert_eq!(err.value, "student");
    }

    #[rstest]
    #[case(Role::User, false, false, true)]
    #[case(Role::Admin, true, true, false)]
    fn capabilities_follow_role(
        #[case] role: Role,
        #[case] manage_bookings: bool,
        #[case] manage_catalogue: bool,
        #[case] place_bookings: bool,
    ) {
        assert_eq!(role.can_manage_bookings(), manage_bookings);
        assert_eq!(role.can_manage_catalogue(), manage_catalogue);
        assert_eq!(role.can_place_bookings(), place_bookings);
    }

    #[test]
    fn acts_for_covers_owner_and_admin() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        assert!(AuthContext::new(owner, Role::User).acts_for(owner));
        assert!(!AuthContext::new(other, Role::User).acts_for(owner));
        assert!(AuthContext::new(other, Role::Admin).acts_for(owner));
    }
}
