//! Outbound room events and their delivery records.

use super::{
    entity::{Client, QueueEntry, VideoState},
    value_object::{ConnectionId, DisplayName, VideoId},
};

/// Something a room tells its clients.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    Play { position: f64 },
    Pause { position: f64 },
    Seek { position: f64 },
    SetPlaybackRate { rate: f64 },
    PlayVideo { video_id: VideoId },
    AddToQueue { entry: QueueEntry },
    RemoveFromQueue { entry: QueueEntry },
    Queue {
        videos: Vec<QueueEntry>,
        current: Option<QueueEntry>,
    },
    Autoplay { enabled: bool },
    Clients { clients: Vec<Client> },
    ClientConnect { client: Client },
    ClientDisconnect { connection_id: ConnectionId },
    Reaction { payload: serde_json::Value },
    ActionLog {
        client_name: DisplayName,
        action_text: String,
    },
}

impl RoomEvent {
    /// PLAY or PAUSE message announcing `state` at `position`.
    pub fn for_state(state: VideoState, position: f64) -> Self {
        match state {
            VideoState::Playing => RoomEvent::Play { position },
            VideoState::Paused => RoomEvent::Pause { position },
        }
    }

    /// Wire action name of the event.
    pub fn action(&self) -> &'static str {
        match self {
            RoomEvent::Play { .. } => "play",
            RoomEvent::Pause { .. } => "pause",
            RoomEvent::Seek { .. } => "seek",
            RoomEvent::SetPlaybackRate { .. } => "set-playback-rate",
            RoomEvent::PlayVideo { .. } => "play-video",
            RoomEvent::AddToQueue { .. } => "add-to-queue",
            RoomEvent::RemoveFromQueue { .. } => "remove-from-queue",
            RoomEvent::Queue { .. } => "queue",
            RoomEvent::Autoplay { .. } => "autoplay",
            RoomEvent::Clients { .. } => "clients",
            RoomEvent::ClientConnect { .. } => "client-connect",
            RoomEvent::ClientDisconnect { .. } => "client-disconnect",
            RoomEvent::Reaction { .. } => "reaction",
            RoomEvent::ActionLog { .. } => "action-log",
        }
    }
}

/// One event addressed to a set of connections.
///
/// Deliveries are produced in emission order; pushing them in that order
/// keeps per-connection ordering equal to mutation ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub targets: Vec<ConnectionId>,
    pub event: RoomEvent,
}

impl Delivery {
    pub fn is_addressed_to(&self, connection_id: &ConnectionId) -> bool {
        self.targets.contains(connection_id)
    }
}
