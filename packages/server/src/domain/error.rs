//! Domain error types.

use thiserror::Error;

/// Value Object の生成時エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    #[error("SessionId cannot be empty")]
    SessionIdEmpty,

    #[error("SessionId is too long: {0} characters (max {1})")]
    SessionIdTooLong(usize, usize),

    #[error("VideoId cannot be empty")]
    VideoIdEmpty,

    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    #[error("Unknown role: '{0}'")]
    UnknownRole(String),
}

/// コマンド処理時のエラー
///
/// 権限不足は「エラー」ではなく再同期で処理されるため、ここには含まれない。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// 送信者が Room に登録されていない
    #[error("Connection '{0}' is not enrolled in this room")]
    UnknownSender(String),

    /// ペイロードをコマンドとして解釈できない
    #[error("Invalid payload for '{action}': {reason}")]
    InvalidPayload {
        action: &'static str,
        reason: String,
    },
}

/// メッセージ送信（通知）時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to serialize message: {0}")]
    SerializationFailed(String),
}
