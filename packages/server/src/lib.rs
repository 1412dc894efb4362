//! Watch-together room server library.
//!
//! Clients joining the same session share one room: a roster with a role
//! hierarchy, a video queue and a virtual playback clock. The server is the
//! authority and pushes every change to the room's clients over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
