//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::CommandError;

/// 参加者切断時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DisconnectError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// コマンド処理時のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandleCommandError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error(transparent)]
    Command(#[from] CommandError),
}
