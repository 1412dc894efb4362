//! Room aggregate: the authoritative state of one watch session.
//!
//! A room owns its roster, its video queue and its virtual playback clock.
//! Mutations never talk to the transport. Every message a mutation wants to
//! send is queued as a [`Delivery`] in the room's outbox and drained by the
//! caller with [`Room::take_outbox`] once the mutation returns.

use std::{collections::HashSet, sync::Arc};

use ytsync_shared::time::Clock;

use super::{
    entity::{Client, QueueEntry, VideoState},
    event::{Delivery, RoomEvent},
    role::Role,
    value_object::{ConnectionId, DisplayName, SessionId, Timestamp, VideoId},
    virtual_clock::ClockSync,
};

pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

/// Per-session state machine.
pub struct Room {
    session_id: SessionId,
    /// Insertion order decides host failover.
    clients: Vec<Client>,
    /// Insertion order is playback order.
    queue: Vec<QueueEntry>,
    current_video: Option<VideoId>,
    state: VideoState,
    sync: ClockSync,
    playback_rate: f64,
    autoplay: bool,
    clock: Arc<dyn Clock>,
    outbox: Vec<Delivery>,
}

impl Room {
    /// Create an empty, paused room.
    pub fn new(session_id: SessionId, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_id,
            clients: Vec::new(),
            queue: Vec::new(),
            current_video: None,
            state: VideoState::Paused,
            sync: ClockSync::default(),
            playback_rate: DEFAULT_PLAYBACK_RATE,
            autoplay: true,
            clock,
            outbox: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn queue(&self) -> &[QueueEntry] {
        &self.queue
    }

    /// The queue entry currently selected for playback.
    pub fn current_video(&self) -> Option<&QueueEntry> {
        let video_id = self.current_video.as_ref()?;
        self.queue.iter().find(|e| &e.video_id == video_id)
    }

    pub fn state(&self) -> VideoState {
        self.state
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn sync(&self) -> ClockSync {
        self.sync
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn find_by_connection_id(&self, connection_id: &ConnectionId) -> Option<&Client> {
        self.clients.iter().find(|c| &c.connection_id == connection_id)
    }

    pub fn role_of(&self, connection_id: &ConnectionId) -> Option<Role> {
        self.find_by_connection_id(connection_id).map(|c| c.role)
    }

    pub fn host(&self) -> Option<&Client> {
        self.clients.iter().find(|c| c.role.is_host())
    }

    // ========================================
    // Roster
    // ========================================

    /// Enroll a connection as a new client.
    ///
    /// Joining twice is a no-op. A second HOST is never created: if the room
    /// already has one, the client is enrolled as MEMBER instead.
    ///
    /// Broadcasts CLIENT_CONNECT to every client, the new one included.
    ///
    /// # Returns
    ///
    /// `true` if the client was added
    pub fn add_client(
        &mut self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        role: Role,
    ) -> bool {
        if self.find_by_connection_id(&connection_id).is_some() {
            return false;
        }

        let role = if role.is_host() && self.host().is_some() {
            tracing::warn!(
                "Room '{}' already has a host, enrolling '{}' as member",
                self.session_id,
                connection_id
            );
            Role::Member
        } else {
            role
        };

        let client = Client::new(connection_id, display_name, role);
        tracing::info!(
            "Added client '{}' ({}) to room '{}' as {}",
            client.connection_id,
            client.display_name,
            self.session_id,
            client.role
        );
        self.clients.push(client.clone());
        self.broadcast_all(RoomEvent::ClientConnect { client });
        true
    }

    /// Remove a client from the roster.
    ///
    /// If the client was HOST and others remain, the earliest-joined remaining
    /// client becomes HOST and the roster is broadcast. CLIENT_DISCONNECT is
    /// always broadcast to the remaining clients.
    ///
    /// # Returns
    ///
    /// The removed client, or `None` if the connection was not enrolled
    pub fn remove_client(&mut self, connection_id: &ConnectionId) -> Option<Client> {
        let index = self
            .clients
            .iter()
            .position(|c| &c.connection_id == connection_id)?;
        let removed = self.clients.remove(index);
        tracing::info!(
            "Removed client '{}' from room '{}'",
            removed.connection_id,
            self.session_id
        );

        if removed.role.is_host()
            && let Some(successor) = self.clients.first_mut()
        {
            successor.role = Role::Host;
            tracing::info!(
                "New host of room '{}' is '{}' (previous host left)",
                self.session_id,
                successor.connection_id
            );
            self.broadcast_roster();
        }

        self.broadcast_all(RoomEvent::ClientDisconnect {
            connection_id: removed.connection_id.clone(),
        });
        Some(removed)
    }

    /// Change the role of an enrolled client and broadcast the roster.
    ///
    /// The HOST cannot be targeted and nobody can be made HOST this way, so
    /// the room keeps exactly one host.
    pub fn change_role(&mut self, target: &ConnectionId, new_role: Role) -> bool {
        if new_role.is_host() {
            return false;
        }
        let Some(client) = self
            .clients
            .iter_mut()
            .find(|c| &c.connection_id == target)
        else {
            return false;
        };
        if client.role.is_host() {
            return false;
        }

        tracing::info!(
            "Changing role of '{}' in room '{}': {} => {}",
            client.connection_id,
            self.session_id,
            client.role,
            new_role
        );
        client.role = new_role;
        self.broadcast_roster();
        true
    }

    // ========================================
    // Virtual clock & playback
    // ========================================

    /// Current estimated video position in seconds.
    pub fn video_time(&self) -> f64 {
        self.sync.estimate(self.state, self.playback_rate, self.now())
    }

    /// Record an authoritative position taken now.
    ///
    /// With `notify_all`, SEEK is broadcast to every client with the
    /// recomputed position.
    pub fn set_time(&mut self, position: f64, notify_all: bool) {
        self.sync = ClockSync::new(position, self.now());
        tracing::debug!(
            "Updated time of room '{}': position={} at={}",
            self.session_id,
            self.sync.position,
            self.sync.at.value()
        );

        if notify_all {
            let position = self.video_time();
            self.broadcast_all(RoomEvent::Seek { position });
        }
    }

    /// Switch between PLAYING and PAUSED.
    ///
    /// Broadcasts PLAY or PAUSE with the current position to every client
    /// except `triggering`, which already holds that state locally.
    pub fn set_playback_state(&mut self, state: VideoState, triggering: &ConnectionId) {
        self.reanchor();
        tracing::info!(
            "Updating video state of room '{}': {:?} => {:?}",
            self.session_id,
            self.state,
            state
        );
        self.state = state;

        let position = self.video_time();
        self.broadcast(
            RoomEvent::for_state(state, position),
            &HashSet::from([triggering.clone()]),
        );
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        self.reanchor();
        tracing::info!(
            "Setting playback rate of room '{}': {} => {}",
            self.session_id,
            self.playback_rate,
            rate
        );
        self.playback_rate = rate;
        self.broadcast_all(RoomEvent::SetPlaybackRate { rate });
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
        tracing::info!(
            "Setting autoplay of room '{}' to {}",
            self.session_id,
            enabled
        );
        self.broadcast_all(RoomEvent::Autoplay { enabled });
    }

    // ========================================
    // Queue
    // ========================================

    /// Append an entry unless its video id is already queued.
    pub fn add_to_queue(&mut self, entry: QueueEntry) -> bool {
        if self.queue.iter().any(|e| e.video_id == entry.video_id) {
            tracing::debug!(
                "Video '{}' already queued in room '{}'",
                entry.video_id,
                self.session_id
            );
            return false;
        }

        tracing::info!(
            "Added video to queue of room '{}': videoId='{}' title='{}' byline='{}'",
            self.session_id,
            entry.video_id,
            entry.title,
            entry.byline
        );
        self.queue.push(entry.clone());
        self.broadcast_all(RoomEvent::AddToQueue { entry });
        true
    }

    /// Remove an entry from the queue.
    ///
    /// Refused while the queue holds a single entry. Removing the current
    /// video advances playback to the new first entry of the queue.
    pub fn remove_from_queue(&mut self, video_id: &VideoId) -> bool {
        if self.queue.len() <= 1 {
            tracing::debug!(
                "Refusing to remove '{}' from room '{}': last entry",
                video_id,
                self.session_id
            );
            return false;
        }
        let Some(index) = self.queue.iter().position(|e| &e.video_id == video_id) else {
            return false;
        };

        let removed = self.queue.remove(index);
        tracing::info!(
            "Removed video from queue of room '{}': videoId='{}'",
            self.session_id,
            removed.video_id
        );
        self.broadcast_all(RoomEvent::RemoveFromQueue {
            entry: removed.clone(),
        });

        if self.current_video.as_ref() == Some(&removed.video_id)
            && let Some(next) = self.queue.first().map(|e| e.video_id.clone())
        {
            self.set_current_video(&next);
        }
        true
    }

    /// Select a queued video for playback and broadcast PLAY_VIDEO.
    pub fn set_current_video(&mut self, video_id: &VideoId) -> bool {
        if !self.queue.iter().any(|e| &e.video_id == video_id) {
            return false;
        }

        self.current_video = Some(video_id.clone());
        tracing::info!(
            "Setting current video of room '{}': videoId='{}'",
            self.session_id,
            video_id
        );
        self.broadcast_all(RoomEvent::PlayVideo {
            video_id: video_id.clone(),
        });
        true
    }

    // ========================================
    // Delivery
    // ========================================

    /// Re-send the full authoritative state to one client.
    ///
    /// Order: QUEUE (optional), PLAY_VIDEO (optional, only with a current
    /// video), PLAY/PAUSE with the position, AUTOPLAY, CLIENTS,
    /// SET_PLAYBACK_RATE.
    pub fn resync(
        &mut self,
        connection_id: &ConnectionId,
        include_queue: bool,
        include_play_video: bool,
    ) {
        if self.find_by_connection_id(connection_id).is_none() {
            return;
        }
        tracing::debug!(
            "Syncing client '{}' to room '{}' (queue: {}, play-video: {})",
            connection_id,
            self.session_id,
            include_queue,
            include_play_video
        );

        if include_queue {
            let event = RoomEvent::Queue {
                videos: self.queue.clone(),
                current: self.current_video().cloned(),
            };
            self.send_to(connection_id, event);
        }
        if include_play_video && let Some(video_id) = self.current_video.clone() {
            self.send_to(connection_id, RoomEvent::PlayVideo { video_id });
        }

        let position = self.video_time();
        self.send_to(connection_id, RoomEvent::for_state(self.state, position));
        self.send_to(
            connection_id,
            RoomEvent::Autoplay {
                enabled: self.autoplay,
            },
        );
        self.send_to(
            connection_id,
            RoomEvent::Clients {
                clients: self.clients.clone(),
            },
        );
        self.send_to(
            connection_id,
            RoomEvent::SetPlaybackRate {
                rate: self.playback_rate,
            },
        );
    }

    /// Queue `event` for every enrolled client not in `excluding`.
    pub fn broadcast(&mut self, event: RoomEvent, excluding: &HashSet<ConnectionId>) {
        let targets: Vec<ConnectionId> = self
            .clients
            .iter()
            .map(|c| &c.connection_id)
            .filter(|id| !excluding.contains(*id))
            .cloned()
            .collect();
        if targets.is_empty() {
            return;
        }
        self.outbox.push(Delivery { targets, event });
    }

    /// Drain the deliveries queued since the last call, in emission order.
    pub fn take_outbox(&mut self) -> Vec<Delivery> {
        std::mem::take(&mut self.outbox)
    }

    fn broadcast_all(&mut self, event: RoomEvent) {
        self.broadcast(event, &HashSet::new());
    }

    fn broadcast_roster(&mut self) {
        let clients = self.clients.clone();
        self.broadcast_all(RoomEvent::Clients { clients });
    }

    fn send_to(&mut self, connection_id: &ConnectionId, event: RoomEvent) {
        self.outbox.push(Delivery {
            targets: vec![connection_id.clone()],
            event,
        });
    }

    /// Move the sync point to now without changing the estimated position.
    fn reanchor(&mut self) {
        let now = self.now();
        let position = self.sync.estimate(self.state, self.playback_rate, now);
        self.sync = ClockSync::new(position, now);
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}
