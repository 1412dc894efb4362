//! Human-readable activity feed.
//!
//! Every effective command is announced to the room as an ACTION_LOG event.
//! Nothing is stored.

use std::collections::HashSet;

use super::{
    command::Command,
    entity::Client,
    event::RoomEvent,
    room::Room,
    value_object::DisplayName,
};

pub struct ActionLog;

impl ActionLog {
    /// Text describing `command`. `target` is the client a role change was
    /// applied to.
    pub fn describe(command: &Command, target: Option<&Client>) -> String {
        match command {
            Command::SetRole {
                target: target_id,
                role,
            } => {
                let target_name = target
                    .map(|c| c.display_name.to_string())
                    .unwrap_or_else(|| target_id.to_string());
                format!("Set role for {} to {}", target_name, role.label())
            }
            Command::Play { .. } => "Resumed the playback".to_string(),
            Command::Pause { .. } => "Paused the playback".to_string(),
            Command::Seek { position } => format!("Seeked to {position}"),
            Command::SetPlaybackRate { rate } => format!("Set the playback speed to {rate}"),
            Command::Autoplay { enabled } => format!("Set autoplay to {enabled}"),
            Command::PlayVideo { video_id } => format!("Started to play video {video_id}"),
            Command::AddToQueue { entry } => format!("Added to Queue {}", entry.title),
            Command::RemoveFromQueue { .. } => "Removed video from Queue".to_string(),
            Command::Reaction { .. } => "Reacted".to_string(),
        }
    }

    pub fn record(room: &mut Room, client_name: &DisplayName, action_text: String) {
        tracing::debug!(
            "Action log in room '{}': {} {}",
            room.session_id(),
            client_name,
            action_text
        );
        room.broadcast(
            RoomEvent::ActionLog {
                client_name: client_name.clone(),
                action_text,
            },
            &HashSet::new(),
        );
    }
}
