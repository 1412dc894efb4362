//! UseCase: クライアントからのコマンド処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleCommandUseCase::execute() メソッド
//! - 認可されたコマンドの配信、権限不足の再同期、不正なペイロード
//!
//! ### なぜこのテストが必要か
//! - 受信したメッセージが Room を正しく変更し、正しい宛先に届くことを保証する
//! - 不正な入力で Room が壊れないことを確認する

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{CommandDispatcher, ConnectionId, DispatchOutcome, MessagePusher, SessionId};

use super::{SharedRegistry, deliver, error::HandleCommandError};

/// コマンド処理のユースケース
pub struct HandleCommandUseCase {
    /// Room の一覧
    registry: SharedRegistry,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl HandleCommandUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// コマンドを実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信者が参加しているセッション
    /// * `sender` - 送信者の接続 ID
    /// * `action` - コマンド名（旧コマンド名を含む）
    /// * `data` - コマンドのペイロード
    ///
    /// # Returns
    ///
    /// * `Ok(DispatchOutcome)` - 処理結果（権限不足による再同期を含む）
    /// * `Err(HandleCommandError)` - セッションが存在しない、またはペイロードが不正
    pub async fn execute(
        &self,
        session_id: &SessionId,
        sender: &ConnectionId,
        action: &str,
        data: &Value,
    ) -> Result<DispatchOutcome, HandleCommandError> {
        let mut registry = self.registry.lock().await;
        let room = registry
            .get_mut(session_id)
            .ok_or_else(|| HandleCommandError::RoomNotFound(session_id.to_string()))?;

        let outcome = CommandDispatcher::dispatch(room, sender, action, data);
        let deliveries = room.take_outbox();
        deliver(self.message_pusher.as_ref(), deliveries).await;

        let outcome = outcome?;
        tracing::debug!(
            "Handled '{}' from '{}' in room '{}': {:?}",
            action,
            sender,
            session_id,
            outcome
        );
        Ok(outcome)
    }
}
