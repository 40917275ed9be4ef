//! セッション表示更新タイマーの抽象
//!
//! 実際のコールバック登録はフロントエンド側（gloo Interval等）が担当し、
//! コアは開始/停止のみを指示する。

/// セッションタイマーの更新間隔
pub const SESSION_TICK_MS: u32 = 1000;

/// 繰り返しタイマー
///
/// `start` は既に動いているタイマーを置き換えること。
pub trait SessionTicker {
    fn start(&mut self, period_ms: u32);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
}

/// 何もしないタイマー（ライブ更新のないフロントエンド用）
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTicker;

impl SessionTicker for NullTicker {
    fn start(&mut self, _period_ms: u32) {}

    fn stop(&mut self) {}

    fn is_running(&self) -> bool {
        false
    }
}

/// テスト用タイマー
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    running: bool,
    pub period_ms: Option<u32>,
    pub starts: usize,
    pub stops: usize,
    /// 停止せずに start された回数（0であるべき）
    pub overlapping_starts: usize,
}

impl SessionTicker for ManualTicker {
    fn start(&mut self, period_ms: u32) {
        if self.running {
            self.overlapping_starts += 1;
        }
        self.running = true;
        self.period_ms = Some(period_ms);
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.stops += 1;
        }
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
