//! Permission tiers of room participants.

use std::{fmt, str::FromStr};

use super::error::ValueObjectError;

/// Ordered permission tier: `Host > SubHost > Moderator > Member`.
///
/// A tier holds the capabilities of every tier below it. Checks go through
/// [`Role::satisfies_at_least`], which looks the requested tier up in the
/// role's capability list instead of comparing ranks, so a tier that does
/// not sit on a straight line can be added by editing [`Role::tiers`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Host,
    SubHost,
    Moderator,
    Member,
}

impl Role {
    /// Tiers whose capabilities this role holds, highest first.
    pub fn tiers(self) -> &'static [Role] {
        match self {
            Role::Host => &[Role::Host, Role::SubHost, Role::Moderator, Role::Member],
            Role::SubHost => &[Role::SubHost, Role::Moderator, Role::Member],
            Role::Moderator => &[Role::Moderator, Role::Member],
            Role::Member => &[Role::Member],
        }
    }

    pub fn satisfies_at_least(self, tier: Role) -> bool {
        self.tiers().contains(&tier)
    }

    pub fn is_host(self) -> bool {
        self == Role::Host
    }

    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Host => "host",
            Role::SubHost => "sub-host",
            Role::Moderator => "moderator",
            Role::Member => "member",
        }
    }

    /// Label used in action log texts.
    pub fn label(self) -> &'static str {
        match self {
            Role::Host => "Host",
            Role::SubHost => "SubHost",
            Role::Moderator => "Moderator",
            Role::Member => "Member",
        }
    }
}

impl FromStr for Role {
    type Err = ValueObjectError;

    /// Parses a wire role name. The deprecated `promoted` tier maps to
    /// [`Role::Moderator`].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "host" => Ok(Role::Host),
            "sub-host" => Ok(Role::SubHost),
            "moderator" | "promoted" => Ok(Role::Moderator),
            "member" => Ok(Role::Member),
            other => Err(ValueObjectError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
