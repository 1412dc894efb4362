//! Client commands and their payload decoding.

use serde::Deserialize;
use serde_json::Value;

use super::{
    entity::QueueEntry,
    error::CommandError,
    role::Role,
    value_object::{ConnectionId, VideoId},
};

/// Deprecated action names and the commands they stand for.
///
/// Applied at the boundary before the permission table is consulted.
pub const LEGACY_ACTIONS: &[(&str, CommandKind)] = &[
    ("promote", CommandKind::SetRoleModerator),
    ("unpromote", CommandKind::SetRoleMember),
];

/// Every command a client may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    SetRoleMember,
    SetRoleModerator,
    SetRoleSubHost,
    Play,
    Pause,
    Seek,
    SetPlaybackRate,
    Autoplay,
    PlayVideo,
    AddToQueue,
    RemoveFromQueue,
    Reaction,
}

impl CommandKind {
    pub const ALL: [CommandKind; 12] = [
        CommandKind::SetRoleMember,
        CommandKind::SetRoleModerator,
        CommandKind::SetRoleSubHost,
        CommandKind::Play,
        CommandKind::Pause,
        CommandKind::Seek,
        CommandKind::SetPlaybackRate,
        CommandKind::Autoplay,
        CommandKind::PlayVideo,
        CommandKind::AddToQueue,
        CommandKind::RemoveFromQueue,
        CommandKind::Reaction,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::SetRoleMember => "set-role-member",
            CommandKind::SetRoleModerator => "set-role-moderator",
            CommandKind::SetRoleSubHost => "set-role-sub-host",
            CommandKind::Play => "play",
            CommandKind::Pause => "pause",
            CommandKind::Seek => "seek",
            CommandKind::SetPlaybackRate => "set-playback-rate",
            CommandKind::Autoplay => "autoplay",
            CommandKind::PlayVideo => "play-video",
            CommandKind::AddToQueue => "add-to-queue",
            CommandKind::RemoveFromQueue => "remove-from-queue",
            CommandKind::Reaction => "reaction",
        }
    }

    /// Resolve a wire action name, legacy aliases included.
    pub fn from_action(action: &str) -> Option<Self> {
        LEGACY_ACTIONS
            .iter()
            .find(|(alias, _)| *alias == action)
            .map(|(_, kind)| *kind)
            .or_else(|| Self::ALL.into_iter().find(|kind| kind.as_str() == action))
    }

    /// Role assigned by a role-change command.
    pub fn assigned_role(self) -> Option<Role> {
        match self {
            CommandKind::SetRoleMember => Some(Role::Member),
            CommandKind::SetRoleModerator => Some(Role::Moderator),
            CommandKind::SetRoleSubHost => Some(Role::SubHost),
            _ => None,
        }
    }
}

/// A decoded, typed client command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetRole { target: ConnectionId, role: Role },
    Play { position: f64 },
    Pause { position: f64 },
    Seek { position: f64 },
    SetPlaybackRate { rate: f64 },
    Autoplay { enabled: bool },
    PlayVideo { video_id: VideoId },
    AddToQueue { entry: QueueEntry },
    RemoveFromQueue { video_id: VideoId },
    Reaction { payload: Value },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToQueuePayload {
    video_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    byline: String,
}

impl Command {
    /// Decode the `data` field of an envelope as a command of `kind`.
    ///
    /// # Errors
    ///
    /// [`CommandError::InvalidPayload`] if the payload has the wrong shape or
    /// a number is out of range.
    pub fn decode(kind: CommandKind, data: &Value) -> Result<Self, CommandError> {
        let invalid = |reason: String| CommandError::InvalidPayload {
            action: kind.as_str(),
            reason,
        };

        let command = match kind {
            CommandKind::SetRoleMember
            | CommandKind::SetRoleModerator
            | CommandKind::SetRoleSubHost => {
                let target = ConnectionId::new(decode_string(data).map_err(invalid)?)
                    .map_err(|e| invalid(e.to_string()))?;
                let role = kind
                    .assigned_role()
                    .ok_or_else(|| invalid("not a role change".to_string()))?;
                Command::SetRole { target, role }
            }
            CommandKind::Play => Command::Play {
                position: decode_position(data).map_err(invalid)?,
            },
            CommandKind::Pause => Command::Pause {
                position: decode_position(data).map_err(invalid)?,
            },
            CommandKind::Seek => Command::Seek {
                position: decode_position(data).map_err(invalid)?,
            },
            CommandKind::SetPlaybackRate => {
                let rate = decode_number(data).map_err(invalid)?;
                if rate <= 0.0 {
                    return Err(invalid(format!("rate must be positive, got {rate}")));
                }
                Command::SetPlaybackRate { rate }
            }
            CommandKind::Autoplay => Command::Autoplay {
                enabled: data
                    .as_bool()
                    .ok_or_else(|| invalid(format!("expected a boolean, got {data}")))?,
            },
            CommandKind::PlayVideo => Command::PlayVideo {
                video_id: decode_video_id(data).map_err(invalid)?,
            },
            CommandKind::RemoveFromQueue => Command::RemoveFromQueue {
                video_id: decode_video_id(data).map_err(invalid)?,
            },
            CommandKind::AddToQueue => {
                let payload = AddToQueuePayload::deserialize(data)
                    .map_err(|e| invalid(e.to_string()))?;
                let video_id =
                    VideoId::new(payload.video_id).map_err(|e| invalid(e.to_string()))?;
                Command::AddToQueue {
                    entry: QueueEntry::new(video_id, payload.title, payload.byline),
                }
            }
            CommandKind::Reaction => Command::Reaction {
                payload: data.clone(),
            },
        };
        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::SetRole { role, .. } => match role {
                Role::SubHost => CommandKind::SetRoleSubHost,
                Role::Moderator => CommandKind::SetRoleModerator,
                Role::Host | Role::Member => CommandKind::SetRoleMember,
            },
            Command::Play { .. } => CommandKind::Play,
            Command::Pause { .. } => CommandKind::Pause,
            Command::Seek { .. } => CommandKind::Seek,
            Command::SetPlaybackRate { .. } => CommandKind::SetPlaybackRate,
            Command::Autoplay { .. } => CommandKind::Autoplay,
            Command::PlayVideo { .. } => CommandKind::PlayVideo,
            Command::AddToQueue { .. } => CommandKind::AddToQueue,
            Command::RemoveFromQueue { .. } => CommandKind::RemoveFromQueue,
            Command::Reaction { .. } => CommandKind::Reaction,
        }
    }
}

fn decode_string(data: &Value) -> Result<String, String> {
    data.as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("expected a string, got {data}"))
}

fn decode_video_id(data: &Value) -> Result<VideoId, String> {
    VideoId::new(decode_string(data)?).map_err(|e| e.to_string())
}

/// Numbers arrive either as JSON numbers or as decimal strings.
fn decode_number(data: &Value) -> Result<f64, String> {
    let number = match data {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("expected a number, got {data}"))?;

    if !number.is_finite() {
        return Err(format!("expected a finite number, got {data}"));
    }
    Ok(number)
}

fn decode_position(data: &Value) -> Result<f64, String> {
    let position = decode_number(data)?;
    if position < 0.0 {
        return Err(format!("position must not be negative, got {position}"));
    }
    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_action_resolves_current_names() {
        // テスト項目: 全てのコマンド名が対応する種別に解決される
        // given (前提条件):
        // when (操作):
        // then (期待する結果):
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_action(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_from_action_maps_legacy_aliases() {
        // テスト項目: 旧コマンド名は互換テーブルを通して現在の種別に変換される
        // given (前提条件):
        // when (操作):
        let promote = CommandKind::from_action("promote");
        let unpromote = CommandKind::from_action("unpromote");

        // then (期待する結果):
        assert_eq!(promote, Some(CommandKind::SetRoleModerator));
        assert_eq!(unpromote, Some(CommandKind::SetRoleMember));
    }

    #[test]
    fn test_from_action_rejects_unknown_and_outbound_only_names() {
        // テスト項目: 未知の名前やサーバー送信専用の名前はコマンドにならない
        // given (前提条件):
        // when (操作):
        // then (期待する結果):
        assert_eq!(CommandKind::from_action("dance"), None);
        assert_eq!(CommandKind::from_action("clients"), None);
        assert_eq!(CommandKind::from_action("action-log"), None);
    }

    #[test]
    fn test_decode_position_accepts_string_and_number() {
        // テスト項目: 位置は数値文字列と JSON 数値のどちらでも受け付ける
        // given (前提条件):
        // when (操作):
        let from_string = Command::decode(CommandKind::Play, &json!("42.5"));
        let from_number = Command::decode(CommandKind::Seek, &json!(10));

        // then (期待する結果):
        assert_eq!(from_string, Ok(Command::Play { position: 42.5 }));
        assert_eq!(from_number, Ok(Command::Seek { position: 10.0 }));
    }

    #[test]
    fn test_decode_rejects_invalid_positions() {
        // テスト項目: 負の値・非数値・NaN の位置は不正なペイロード
        // given (前提条件):
        let inputs = [json!("-1"), json!("abc"), json!("NaN"), json!(null), json!({})];

        // when (操作) / then (期待する結果):
        for input in inputs {
            let result = Command::decode(CommandKind::Pause, &input);
            assert!(
                matches!(result, Err(CommandError::InvalidPayload { action: "pause", .. })),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_decode_playback_rate_must_be_positive() {
        // テスト項目: 再生速度は正の有限数のみ
        // given (前提条件):
        // when (操作):
        let ok = Command::decode(CommandKind::SetPlaybackRate, &json!(1.5));
        let zero = Command::decode(CommandKind::SetPlaybackRate, &json!(0));

        // then (期待する結果):
        assert_eq!(ok, Ok(Command::SetPlaybackRate { rate: 1.5 }));
        assert!(zero.is_err());
    }

    #[test]
    fn test_decode_autoplay_requires_boolean() {
        // テスト項目: 自動再生は真偽値のみ
        // given (前提条件):
        // when (操作):
        let ok = Command::decode(CommandKind::Autoplay, &json!(false));
        let bad = Command::decode(CommandKind::Autoplay, &json!("false"));

        // then (期待する結果):
        assert_eq!(ok, Ok(Command::Autoplay { enabled: false }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_decode_add_to_queue_payload() {
        // テスト項目: キュー追加のペイロードは {videoId, title, byline}
        // given (前提条件):
        let data = json!({"videoId": "v1", "title": "T", "byline": "B"});

        // when (操作):
        let command = Command::decode(CommandKind::AddToQueue, &data);

        // then (期待する結果):
        let expected = QueueEntry::new(
            VideoId::new("v1".to_string()).unwrap(),
            "T".to_string(),
            "B".to_string(),
        );
        assert_eq!(command, Ok(Command::AddToQueue { entry: expected }));
    }

    #[test]
    fn test_decode_add_to_queue_requires_video_id() {
        // テスト項目: videoId のないキュー追加は不正なペイロード
        // given (前提条件):
        // when (操作):
        let missing = Command::decode(CommandKind::AddToQueue, &json!({"title": "T"}));
        let empty = Command::decode(CommandKind::AddToQueue, &json!({"videoId": ""}));

        // then (期待する結果):
        assert!(missing.is_err());
        assert!(empty.is_err());
    }

    #[test]
    fn test_decode_set_role_carries_assigned_role() {
        // テスト項目: ロール変更コマンドは対象の接続 ID と付与するロールを持つ
        // given (前提条件):
        // when (操作):
        let command = Command::decode(CommandKind::SetRoleSubHost, &json!("conn-2"));

        // then (期待する結果):
        let command = command.unwrap();
        assert_eq!(
            command,
            Command::SetRole {
                target: ConnectionId::new("conn-2".to_string()).unwrap(),
                role: Role::SubHost,
            }
        );
        assert_eq!(command.kind(), CommandKind::SetRoleSubHost);
    }

    #[test]
    fn test_decode_reaction_keeps_payload_opaque() {
        // テスト項目: リアクションのペイロードはそのまま保持される
        // given (前提条件):
        let data = json!({"emoji": "🎉", "x": 0.3});

        // when (操作):
        let command = Command::decode(CommandKind::Reaction, &data);

        // then (期待する結果):
        assert_eq!(command, Ok(Command::Reaction { payload: data }));
    }
}
