//! Which role may send which command.

use super::{command::CommandKind, role::Role};

/// Minimum tier required for each command.
///
/// Tiers are additive: a role may send every command listed for the tiers it
/// satisfies.
pub const PERMISSION_TABLE: &[(Role, &[CommandKind])] = &[
    (
        Role::Host,
        &[
            CommandKind::SetRoleMember,
            CommandKind::SetRoleModerator,
            CommandKind::SetRoleSubHost,
        ],
    ),
    (
        Role::SubHost,
        &[
            CommandKind::Play,
            CommandKind::Pause,
            CommandKind::Seek,
            CommandKind::SetPlaybackRate,
        ],
    ),
    (
        Role::Moderator,
        &[
            CommandKind::Autoplay,
            CommandKind::PlayVideo,
            CommandKind::AddToQueue,
            CommandKind::RemoveFromQueue,
        ],
    ),
    (Role::Member, &[CommandKind::Reaction]),
];

/// Minimum tier for `kind`. Commands missing from the table are host-only.
pub fn required_role(kind: CommandKind) -> Role {
    PERMISSION_TABLE
        .iter()
        .find(|(_, kinds)| kinds.contains(&kind))
        .map(|(role, _)| *role)
        .unwrap_or(Role::Host)
}

pub fn is_permitted(role: Role, kind: CommandKind) -> bool {
    role.satisfies_at_least(required_role(kind))
}
