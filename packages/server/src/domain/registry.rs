//! Directory of live rooms keyed by session id.

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use ytsync_shared::time::Clock;

use super::{
    event::Delivery,
    name_generator::NameGenerator,
    role::Role,
    room::Room,
    value_object::{ConnectionId, SessionId},
};

/// Owns every room of the server.
///
/// A room exists exactly as long as it has at least one client: it is
/// created by the first [`RoomRegistry::resolve`] for its session id and
/// released by the [`RoomRegistry::evict`] that empties it.
pub struct RoomRegistry {
    rooms: HashMap<SessionId, Room>,
    clock: Arc<dyn Clock>,
    names: Arc<dyn NameGenerator>,
}

impl RoomRegistry {
    pub fn new(clock: Arc<dyn Clock>, names: Arc<dyn NameGenerator>) -> Self {
        Self {
            rooms: HashMap::new(),
            clock,
            names,
        }
    }

    /// Enroll `connection_id` in the room for `session_id`.
    ///
    /// The first connection creates the room and becomes its host. Later
    /// connections join as members and are resynced with the full state,
    /// queue and current video included.
    pub fn resolve(&mut self, session_id: SessionId, connection_id: ConnectionId) -> &mut Room {
        let display_name = self.names.generate();

        match self.rooms.entry(session_id) {
            Entry::Occupied(entry) => {
                let room = entry.into_mut();
                room.add_client(connection_id.clone(), display_name, Role::Member);
                room.resync(&connection_id, true, true);
                room
            }
            Entry::Vacant(entry) => {
                let session_id = entry.key().clone();
                tracing::info!("Creating room '{}'", session_id);
                let room = entry.insert(Room::new(session_id, Arc::clone(&self.clock)));
                room.add_client(connection_id, display_name, Role::Host);
                room
            }
        }
    }

    /// Drop a room from the directory. Releasing an unknown session is a no-op.
    pub fn release(&mut self, session_id: &SessionId) {
        if self.rooms.remove(session_id).is_some() {
            tracing::info!("Released room '{}'", session_id);
        }
    }

    /// Remove a client from its room and release the room if it became empty.
    ///
    /// # Returns
    ///
    /// The deliveries produced by the removal, or `None` if the session is
    /// unknown
    pub fn evict(
        &mut self,
        session_id: &SessionId,
        connection_id: &ConnectionId,
    ) -> Option<Vec<Delivery>> {
        let room = self.rooms.get_mut(session_id)?;
        room.remove_client(connection_id);
        let deliveries = room.take_outbox();

        if room.is_empty() {
            self.release(session_id);
        }
        Some(deliveries)
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Room> {
        self.rooms.get(session_id)
    }

    pub fn get_mut(&mut self, session_id: &SessionId) -> Option<&mut Room> {
        self.rooms.get_mut(session_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Clients enrolled across all rooms.
    pub fn client_count(&self) -> usize {
        self.rooms.values().map(|room| room.clients().len()).sum()
    }
}
