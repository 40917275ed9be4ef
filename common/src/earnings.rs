//! 稼働時間から報酬額（USD/GBP）を計算する

use serde::{Deserialize, Serialize};

/// 時給（USD）
pub const USD_RATE_PER_HOUR: f64 = 16.0;

/// 固定換算レート USD → GBP
pub const USD_TO_GBP: f64 = 0.79;

/// 初回補填エントリの時間数
pub const COMPENSATION_HOURS: u64 = 3;

const MS_PER_HOUR: f64 = 3_600_000.0;

/// 報酬スナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Earnings {
    pub usd: f64,
    pub gbp: f64,
}

impl Earnings {
    pub fn zero() -> Self {
        Self::default()
    }

    /// 表示用（小数2桁）
    pub fn usd_display(&self) -> String {
        format!("{:.2}", self.usd)
    }

    pub fn gbp_display(&self) -> String {
        format!("{:.2}", self.gbp)
    }
}

/// 経過ミリ秒から報酬を計算
pub fn compute_earnings(elapsed_ms: u64) -> Earnings {
    let hours = elapsed_ms as f64 / MS_PER_HOUR;
    let usd = hours * USD_RATE_PER_HOUR;
    Earnings {
        usd,
        gbp: usd * USD_TO_GBP,
    }
}

/// 補填エントリ用の固定スナップショット
pub fn compensation_earnings() -> Earnings {
    compute_earnings(COMPENSATION_HOURS * 3_600_000)
}

/// 経過時間を `HH:MM:SS` 形式に整形（24時間で折り返さない）
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
