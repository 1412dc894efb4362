//! Playback position estimation.
//!
//! A room does not receive a continuous stream of positions. It remembers the
//! last authoritative `(position, wall clock)` pair and extrapolates from it.

use super::{entity::VideoState, value_object::Timestamp};

/// Last authoritative playback position and the wall-clock time it was taken.
///
/// Both halves are always replaced together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockSync {
    /// Video position in seconds.
    pub position: f64,
    /// Wall-clock time of the sync.
    pub at: Timestamp,
}

impl ClockSync {
    pub fn new(position: f64, at: Timestamp) -> Self {
        Self { position, at }
    }

    /// Estimated video position (seconds) at wall-clock time `now`.
    ///
    /// While paused the stored position is returned unchanged; while playing
    /// the elapsed wall time is scaled by `playback_rate`.
    pub fn estimate(&self, state: VideoState, playback_rate: f64, now: Timestamp) -> f64 {
        match state {
            VideoState::Paused => self.position,
            VideoState::Playing => {
                let elapsed_secs = now.millis_since(self.at) as f64 / 1000.0;
                self.position + elapsed_secs * playback_rate
            }
        }
    }
}

impl Default for ClockSync {
    fn default() -> Self {
        Self::new(0.0, Timestamp::new(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paused_position_ignores_elapsed_time() {
        // テスト項目: 一時停止中は経過時間に関係なく同期時の位置を返す
        // given (前提条件):
        let sync = ClockSync::new(30.0, Timestamp::new(1_000));

        // when (操作):
        let position = sync.estimate(VideoState::Paused, 2.0, Timestamp::new(3_600_000));

        // then (期待する結果):
        assert_eq!(position, 30.0);
    }

    #[test]
    fn test_playing_position_scales_with_rate() {
        // テスト項目: 再生中は経過時間 × 再生速度だけ位置が進む
        // given (前提条件):
        let sync = ClockSync::new(30.0, Timestamp::new(10_000));

        // when (操作): 5 秒経過
        let position = sync.estimate(VideoState::Playing, 2.0, Timestamp::new(15_000));

        // then (期待する結果): 30 + 5 × 2 = 40
        assert!((position - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_playing_position_handles_sub_second_elapsed() {
        // テスト項目: 1 秒未満の経過時間も秒の小数として反映される
        // given (前提条件):
        let sync = ClockSync::new(0.0, Timestamp::new(0));

        // when (操作):
        let position = sync.estimate(VideoState::Playing, 1.0, Timestamp::new(250));

        // then (期待する結果):
        assert!((position - 0.25).abs() < 1e-9);
    }
}
