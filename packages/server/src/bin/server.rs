//! Watch-together room server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin ytsync-server
//! cargo run --bin ytsync-server -- --host 0.0.0.0 --port 3000
//! YTSYNC_SERVER_PORT=3000 cargo run --bin ytsync-server
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;
use ytsync_server::{
    domain::RoomRegistry,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, name_generator::RandomNameGenerator,
    },
    ui::Server,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServerStatusUseCase,
        HandleCommandUseCase,
    },
};
use ytsync_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "ytsync-server")]
#[command(about = "Watch-together room server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "YTSYNC_SERVER_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "YTSYNC_SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, env = "YTSYNC_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Clock / RoomRegistry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create the room registry (in-memory)
    let clock = Arc::new(SystemClock);
    let registry = Arc::new(Mutex::new(RoomRegistry::new(
        clock.clone(),
        Arc::new(RandomNameGenerator::new()),
    )));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create UseCases
    let connect_participant_usecase = Arc::new(ConnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let disconnect_participant_usecase = Arc::new(DisconnectParticipantUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let handle_command_usecase = Arc::new(HandleCommandUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let get_server_status_usecase =
        Arc::new(GetServerStatusUseCase::new(registry.clone(), clock));

    // 4. Create and run the server
    let server = Server::new(
        connect_participant_usecase,
        disconnect_participant_usecase,
        handle_command_usecase,
        get_server_status_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
