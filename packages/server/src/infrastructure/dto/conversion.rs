//! Conversion logic between DTOs and domain entities.

use crate::domain::{
    entity::{Client, QueueEntry},
    error::ValueObjectError,
    event::RoomEvent,
    role::Role,
    value_object::{ConnectionId, DisplayName},
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Client> for dto::ClientDto {
    fn from(model: &Client) -> Self {
        Self {
            connection_id: model.connection_id.to_string(),
            display_name: model.display_name.to_string(),
            role: model.role.as_str().to_string(),
        }
    }
}

impl From<&QueueEntry> for dto::QueueEntryDto {
    fn from(model: &QueueEntry) -> Self {
        Self {
            video_id: model.video_id.to_string(),
            title: model.title.clone(),
            byline: model.byline.clone(),
        }
    }
}

impl From<&RoomEvent> for dto::OutboundMessage {
    fn from(event: &RoomEvent) -> Self {
        use dto::OutboundMessage as Out;

        match event {
            RoomEvent::Play { position } => Out::Play(position.to_string()),
            RoomEvent::Pause { position } => Out::Pause(position.to_string()),
            RoomEvent::Seek { position } => Out::Seek(position.to_string()),
            RoomEvent::SetPlaybackRate { rate } => Out::SetPlaybackRate(*rate),
            RoomEvent::PlayVideo { video_id } => Out::PlayVideo(video_id.to_string()),
            RoomEvent::AddToQueue { entry } => Out::AddToQueue(entry.into()),
            RoomEvent::RemoveFromQueue { entry } => Out::RemoveFromQueue(entry.into()),
            RoomEvent::Queue { videos, current } => Out::Queue(dto::QueueDto {
                videos: videos.iter().map(Into::into).collect(),
                video: current.as_ref().map(Into::into),
            }),
            RoomEvent::Autoplay { enabled } => Out::Autoplay(*enabled),
            RoomEvent::Clients { clients } => {
                Out::Clients(clients.iter().map(Into::into).collect())
            }
            RoomEvent::ClientConnect { client } => Out::ClientConnect(client.into()),
            RoomEvent::ClientDisconnect { connection_id } => {
                Out::ClientDisconnect(connection_id.to_string())
            }
            RoomEvent::Reaction { payload } => Out::Reaction(payload.clone()),
            RoomEvent::ActionLog {
                client_name,
                action_text,
            } => Out::ActionLog(dto::ActionLogDto {
                client_name: client_name.to_string(),
                action_text: action_text.clone(),
            }),
        }
    }
}

// ========================================
// DTO → Domain Entity
// ========================================

impl TryFrom<dto::ClientDto> for Client {
    type Error = ValueObjectError;

    /// Accepts the deprecated `promoted` role name as MODERATOR.
    fn try_from(dto: dto::ClientDto) -> Result<Self, Self::Error> {
        let connection_id = ConnectionId::try_from(dto.connection_id)?;
        let display_name = DisplayName::new(dto.display_name)?;
        let role = dto.role.parse::<Role>()?;
        Ok(Client::new(connection_id, display_name, role))
    }
}
