//! Authorization and execution of client commands against a room.

use std::collections::HashSet;

use serde_json::Value;

use super::{
    action_log::ActionLog,
    command::{Command, CommandKind},
    entity::{Client, VideoState},
    error::CommandError,
    event::RoomEvent,
    permission,
    room::Room,
    value_object::ConnectionId,
};

/// What happened to a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The mutation took effect and was announced in the action log.
    Executed,
    /// Authorized, but nothing changed.
    NoChange,
    /// A reaction was relayed to the other clients.
    Reacted,
    /// Denied; the sender was resynced to the authoritative state.
    Resynced,
    /// Denied; the sender is host and gets no feedback.
    Ignored,
}

pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Authorize and run one inbound command.
    ///
    /// An unknown action or a command the sender's role does not cover is
    /// not an error. A non-host sender is resynced instead; a host sender is
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`CommandError::UnknownSender`] if `sender` is not enrolled in `room`
    /// - [`CommandError::InvalidPayload`] if an authorized command's payload
    ///   cannot be decoded (the room is left untouched)
    pub fn dispatch(
        room: &mut Room,
        sender: &ConnectionId,
        action: &str,
        data: &Value,
    ) -> Result<DispatchOutcome, CommandError> {
        let client = room
            .find_by_connection_id(sender)
            .cloned()
            .ok_or_else(|| CommandError::UnknownSender(sender.to_string()))?;

        let kind = match CommandKind::from_action(action) {
            Some(kind) if permission::is_permitted(client.role, kind) => kind,
            _ => return Ok(Self::deny(room, &client, action)),
        };

        let command = Command::decode(kind, data)?;
        Ok(Self::execute(room, &client, command))
    }

    fn deny(room: &mut Room, sender: &Client, action: &str) -> DispatchOutcome {
        if sender.role.is_host() {
            tracing::debug!(
                "Ignoring '{}' from host '{}' in room '{}'",
                action,
                sender.connection_id,
                room.session_id()
            );
            return DispatchOutcome::Ignored;
        }

        tracing::debug!(
            "Denied '{}' from '{}' ({}) in room '{}', resyncing",
            action,
            sender.connection_id,
            sender.role,
            room.session_id()
        );
        room.resync(&sender.connection_id, false, false);
        DispatchOutcome::Resynced
    }

    fn execute(room: &mut Room, sender: &Client, command: Command) -> DispatchOutcome {
        let applied = match &command {
            Command::SetRole { target, role } => room.change_role(target, *role),
            Command::Play { position } => {
                Self::apply_playback(room, sender, VideoState::Playing, *position)
            }
            Command::Pause { position } => {
                Self::apply_playback(room, sender, VideoState::Paused, *position)
            }
            Command::Seek { position } => {
                room.set_time(*position, true);
                true
            }
            Command::SetPlaybackRate { rate } => {
                room.set_playback_rate(*rate);
                true
            }
            Command::Autoplay { enabled } => {
                room.set_autoplay(*enabled);
                true
            }
            Command::PlayVideo { video_id } => room.set_current_video(video_id),
            Command::AddToQueue { entry } => room.add_to_queue(entry.clone()),
            Command::RemoveFromQueue { video_id } => room.remove_from_queue(video_id),
            Command::Reaction { payload } => {
                room.broadcast(
                    RoomEvent::Reaction {
                        payload: payload.clone(),
                    },
                    &HashSet::from([sender.connection_id.clone()]),
                );
                return DispatchOutcome::Reacted;
            }
        };

        if !applied {
            tracing::debug!(
                "'{}' from '{}' changed nothing in room '{}'",
                command.kind().as_str(),
                sender.connection_id,
                room.session_id()
            );
            return DispatchOutcome::NoChange;
        }

        let target = match &command {
            Command::SetRole { target, .. } => room.find_by_connection_id(target),
            _ => None,
        };
        let text = ActionLog::describe(&command, target);
        ActionLog::record(room, &sender.display_name, text);
        DispatchOutcome::Executed
    }

    /// The position is always taken; the state only broadcasts on a transition.
    fn apply_playback(
        room: &mut Room,
        sender: &Client,
        state: VideoState,
        position: f64,
    ) -> bool {
        room.set_time(position, false);
        if room.state() == state {
            return false;
        }
        room.set_playback_state(state, &sender.connection_id);
        true
    }
}
