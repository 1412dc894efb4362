//! UseCase: サーバー状態の取得

use std::sync::Arc;

use ytsync_shared::time::Clock;

use crate::domain::Timestamp;

use super::SharedRegistry;

/// サーバーの稼働状況
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    /// 起動からの経過秒数
    pub uptime_secs: i64,
    pub version: &'static str,
    pub room_count: usize,
    pub client_count: usize,
}

/// サーバー状態取得のユースケース
pub struct GetServerStatusUseCase {
    registry: SharedRegistry,
    clock: Arc<dyn Clock>,
    /// 起動時刻（ユースケース生成時）
    started_at: Timestamp,
}

impl GetServerStatusUseCase {
    pub fn new(registry: SharedRegistry, clock: Arc<dyn Clock>) -> Self {
        let started_at = Timestamp::new(clock.now_millis());
        Self {
            registry,
            clock,
            started_at,
        }
    }

    pub async fn execute(&self) -> ServerStatus {
        let now = Timestamp::new(self.clock.now_millis());
        let registry = self.registry.lock().await;
        ServerStatus {
            uptime_secs: now.millis_since(self.started_at) / 1000,
            version: env!("CARGO_PKG_VERSION"),
            room_count: registry.room_count(),
            client_count: registry.client_count(),
        }
    }
}
