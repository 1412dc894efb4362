//! UseCase 層
//!
//! ## 責務
//!
//! - ドメイン層（RoomRegistry / Room / CommandDispatcher）の操作を 1 つの処理単位にまとめる
//! - Room が積んだ配信（Delivery）を MessagePusher に渡す
//!
//! ## 設計ノート
//!
//! Registry のロックは、ドメインの変更から配信の送出まで保持し続けます。
//! これにより、各接続に届くメッセージの順序はドメインの変更順と一致します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_server_status;
mod handle_command;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{Delivery, MessagePusher, RoomRegistry};

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{DisconnectError, HandleCommandError};
pub use get_server_status::{GetServerStatusUseCase, ServerStatus};
pub use handle_command::HandleCommandUseCase;

/// 全ての UseCase で共有する Room の一覧
pub type SharedRegistry = Arc<Mutex<RoomRegistry>>;

/// Room が積んだ配信を、積まれた順に送出する
///
/// 宛先が 1 つなら `push_to`、それ以外は `broadcast` を使う。
/// 送信の失敗はログに残して続行する。
async fn deliver(message_pusher: &dyn MessagePusher, deliveries: Vec<Delivery>) {
    for delivery in deliveries {
        let result = match delivery.targets.as_slice() {
            [target] => message_pusher.push_to(target, &delivery.event).await,
            targets => message_pusher.broadcast(targets, &delivery.event).await,
        };
        if let Err(e) = result {
            tracing::warn!("Failed to deliver '{}': {}", delivery.event.action(), e);
        }
    }
}
