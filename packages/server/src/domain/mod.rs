//! Domain layer: rooms, roles, commands and the virtual playback clock.
//!
//! Nothing here touches the transport. Rooms queue their outbound events as
//! [`Delivery`] records, and the usecase layer hands them to a
//! [`MessagePusher`].

pub mod action_log;
pub mod command;
pub mod dispatcher;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod name_generator;
pub mod permission;
pub mod registry;
pub mod role;
pub mod room;
pub mod value_object;
pub mod virtual_clock;

#[cfg(test)]
pub(crate) mod test_support;

pub use action_log::ActionLog;
pub use command::{Command, CommandKind, LEGACY_ACTIONS};
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use entity::{Client, QueueEntry, VideoState};
pub use error::{CommandError, MessagePushError, ValueObjectError};
pub use event::{Delivery, RoomEvent};
pub use factory::ConnectionIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use name_generator::NameGenerator;
pub use registry::RoomRegistry;
pub use role::Role;
pub use room::Room;
pub use value_object::{ConnectionId, DisplayName, SessionId, Timestamp, VideoId};
pub use virtual_clock::ClockSync;
