//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 最初の接続で Room が作られ HOST になること、2 人目以降が再同期を受け取ること
//!
//! ### なぜこのテストが必要か
//! - 新規参加者が Room の正しい状態から視聴を始められることを保証する
//! - 接続 ID が毎回新しく発行されることを確認する

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel, SessionId};

use super::{SharedRegistry, deliver};

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Room の一覧
    registry: SharedRegistry,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加するセッションの ID
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 新しく発行した接続 ID
    pub async fn execute(&self, session_id: SessionId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();

        // 1. 自分宛ての client-connect も届くよう、先に送信チャンネルを登録
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 2. Room に参加（なければ作成）
        let mut registry = self.registry.lock().await;
        let deliveries = registry
            .resolve(session_id, connection_id.clone())
            .take_outbox();

        // 3. ロックを保持したまま配信
        deliver(self.message_pusher.as_ref(), deliveries).await;

        connection_id
    }
}
