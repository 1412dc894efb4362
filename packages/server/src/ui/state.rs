//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetServerStatusUseCase,
    HandleCommandUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// HandleCommandUseCase（コマンド処理のユースケース）
    pub handle_command_usecase: Arc<HandleCommandUseCase>,
    /// GetServerStatusUseCase（サーバー状態取得のユースケース）
    pub get_server_status_usecase: Arc<GetServerStatusUseCase>,
}
