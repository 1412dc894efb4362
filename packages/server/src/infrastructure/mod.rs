//! Infrastructure layer: wire formats and transport-facing implementations
//! of the domain traits.

pub mod dto;
pub mod message_pusher;
pub mod name_generator;
