//! Builders shared by the domain unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    entity::QueueEntry,
    event::Delivery,
    name_generator::NameGenerator,
    value_object::{ConnectionId, DisplayName, SessionId, VideoId},
};

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn session(id: &str) -> SessionId {
    SessionId::new(id.to_string()).unwrap()
}

pub fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

pub fn video(id: &str) -> VideoId {
    VideoId::new(id.to_string()).unwrap()
}

pub fn entry(id: &str) -> QueueEntry {
    QueueEntry::new(video(id), format!("Title {id}"), format!("Byline {id}"))
}

pub fn actions(deliveries: &[Delivery]) -> Vec<&'static str> {
    deliveries.iter().map(|d| d.event.action()).collect()
}

/// Deliveries addressed to `connection_id`, in emission order.
pub fn received_by<'a>(
    deliveries: &'a [Delivery],
    connection_id: &ConnectionId,
) -> Vec<&'a Delivery> {
    deliveries
        .iter()
        .filter(|d| d.is_addressed_to(connection_id))
        .collect()
}

/// Actions of the deliveries addressed to `connection_id`, in emission order.
pub fn actions_for(deliveries: &[Delivery], connection_id: &ConnectionId) -> Vec<&'static str> {
    received_by(deliveries, connection_id)
        .into_iter()
        .map(|d| d.event.action())
        .collect()
}

/// Yields "Guest 1", "Guest 2", ...
#[derive(Default)]
pub struct SequentialNames {
    counter: AtomicUsize,
}

impl NameGenerator for SequentialNames {
    fn generate(&self) -> DisplayName {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        name(&format!("Guest {n}"))
    }
}
