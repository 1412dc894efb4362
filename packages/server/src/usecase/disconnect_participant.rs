//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退出の通知、HOST の引き継ぎ、最後の 1 人が抜けた Room の削除
//!
//! ### どのような状況を想定しているか
//! - 正常系：MEMBER / HOST の退出
//! - 異常系：存在しない Room からの退出
//! - エッジケース：最後のクライアントの退出

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, SessionId};

use super::{SharedRegistry, deliver, error::DisconnectError};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Room の一覧
    registry: SharedRegistry,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(registry: SharedRegistry, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Room に残っているクライアント数（Room が削除された場合は 0）
    /// * `Err(DisconnectError)` - セッションが存在しない
    pub async fn execute(
        &self,
        session_id: &SessionId,
        connection_id: &ConnectionId,
    ) -> Result<usize, DisconnectError> {
        // 1. 送信チャンネルを登録解除
        self.message_pusher.unregister_client(connection_id).await;

        // 2. Room から削除（空になれば Room も削除）
        let mut registry = self.registry.lock().await;
        let deliveries = registry
            .evict(session_id, connection_id)
            .ok_or_else(|| DisconnectError::RoomNotFound(session_id.to_string()))?;
        let remaining = registry
            .get(session_id)
            .map_or(0, |room| room.clients().len());

        // 3. 残りのクライアントに通知
        deliver(self.message_pusher.as_ref(), deliveries).await;

        Ok(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        MessagePushError, RoomEvent, RoomRegistry,
        message_pusher::MockMessagePusher,
        test_support::{SequentialNames, conn, session},
    };
    use mockall::predicate::*;
    use tokio::sync::Mutex;
    use ytsync_shared::time::FixedClock;

    fn create_test_registry() -> SharedRegistry {
        Arc::new(Mutex::new(RoomRegistry::new(
            Arc::new(FixedClock::new(1_000_000)),
            Arc::new(SequentialNames::default()),
        )))
    }

    async fn join(registry: &SharedRegistry, session_id: &str, connection_id: &str) {
        let mut registry = registry.lock().await;
        registry
            .resolve(session(session_id), conn(connection_id))
            .take_outbox();
    }

    #[tokio::test]
    async fn test_disconnect_member_notifies_remaining_clients() {
        // テスト項目: MEMBER の退出は残りのクライアントに client-disconnect として通知される
        // given (前提条件):
        let registry = create_test_registry();
        join(&registry, "s1", "a").await;
        join(&registry, "s1", "b").await;

        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_unregister_client()
            .with(eq(conn("b")))
            .times(1)
            .returning(|_| ());
        pusher
            .expect_push_to()
            .withf(|id, event| {
                *id == conn("a")
                    && *event
                        == RoomEvent::ClientDisconnect {
                            connection_id: conn("b"),
                        }
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&session("s1"), &conn("b")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn test_disconnect_host_promotes_and_broadcasts_roster() {
        // テスト項目: HOST の退出で次のクライアントが HOST になり、名簿と退出が通知される
        // given (前提条件):
        let registry = create_test_registry();
        join(&registry, "s1", "a").await;
        join(&registry, "s1", "b").await;
        join(&registry, "s1", "c").await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().returning(|_| ());
        let mut sequence = mockall::Sequence::new();
        pusher
            .expect_broadcast()
            .withf(|targets, event| {
                targets == [conn("b"), conn("c")] && matches!(event, RoomEvent::Clients { .. })
            })
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(()));
        pusher
            .expect_broadcast()
            .withf(|_, event| matches!(event, RoomEvent::ClientDisconnect { .. }))
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_, _| Ok(()));
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&session("s1"), &conn("a")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        let registry = registry.lock().await;
        let host = registry.get(&session("s1")).and_then(|room| room.host().cloned());
        assert_eq!(host.map(|c| c.connection_id), Some(conn("b")));
    }

    #[tokio::test]
    async fn test_disconnect_last_client_removes_room() {
        // テスト項目: 最後のクライアントが抜けると Room が削除され、通知は送られない
        // given (前提条件):
        let registry = create_test_registry();
        join(&registry, "s1", "a").await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().returning(|_| ());
        pusher.expect_push_to().never();
        pusher.expect_broadcast().never();
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&session("s1"), &conn("a")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
        assert_eq!(registry.lock().await.room_count(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_unknown_session() {
        // テスト項目: 存在しないセッションからの退出はエラー
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().returning(|_| ());
        let usecase = DisconnectParticipantUseCase::new(create_test_registry(), Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&session("missing"), &conn("a")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(DisconnectError::RoomNotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_disconnect_tolerates_push_failure() {
        // テスト項目: 通知の送信に失敗しても切断処理は成功する
        // given (前提条件):
        let registry = create_test_registry();
        join(&registry, "s1", "a").await;
        join(&registry, "s1", "b").await;

        let mut pusher = MockMessagePusher::new();
        pusher.expect_unregister_client().returning(|_| ());
        pusher
            .expect_push_to()
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.to_string())));
        let usecase = DisconnectParticipantUseCase::new(registry.clone(), Arc::new(pusher));

        // when (操作):
        let result = usecase.execute(&session("s1"), &conn("b")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
    }
}
