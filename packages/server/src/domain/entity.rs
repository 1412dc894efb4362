//! Passive data records owned by a room.

use super::{
    role::Role,
    value_object::{ConnectionId, DisplayName, VideoId},
};

/// A roster entry binding a connection to a display name and a role.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub role: Role,
}

impl Client {
    pub fn new(connection_id: ConnectionId, display_name: DisplayName, role: Role) -> Self {
        Self {
            connection_id,
            display_name,
            role,
        }
    }
}

/// One video in a room's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub video_id: VideoId,
    pub title: String,
    pub byline: String,
}

impl QueueEntry {
    pub fn new(video_id: VideoId, title: String, byline: String) -> Self {
        Self {
            video_id,
            title,
            byline,
        }
    }
}

/// Playback state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoState {
    Playing,
    #[default]
    Paused,
}
