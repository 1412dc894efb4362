//! WebSocket room server: routing and connection handling.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
