//! WebSocket message DTOs.
//!
//! Every frame is a JSON envelope `{"action": ..., "data": ...}` in both
//! directions.

use serde::{Deserialize, Serialize};

/// Envelope received from a client.
///
/// `data` is decoded later, once the action is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub action: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Envelope sent to clients.
///
/// Positions of `play`, `pause` and `seek` travel as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "kebab-case")]
pub enum OutboundMessage {
    Play(String),
    Pause(String),
    Seek(String),
    SetPlaybackRate(f64),
    PlayVideo(String),
    AddToQueue(QueueEntryDto),
    RemoveFromQueue(QueueEntryDto),
    Queue(QueueDto),
    Autoplay(bool),
    Clients(Vec<ClientDto>),
    ClientConnect(ClientDto),
    ClientDisconnect(String),
    Reaction(serde_json::Value),
    ActionLog(ActionLogDto),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDto {
    pub connection_id: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryDto {
    pub video_id: String,
    pub title: String,
    pub byline: String,
}

/// Whole queue plus the entry currently selected for playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDto {
    pub videos: Vec<QueueEntryDto>,
    pub video: Option<QueueEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLogDto {
    pub client_name: String,
    pub action_text: String,
}
