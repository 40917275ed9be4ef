//! 時計: 現在時刻の取得と `Mon DD, YYYY, HH:MM:SS` 形式への整形

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use std::cell::Cell;

/// 時計表示の更新間隔
pub const CLOCK_PERIOD_MS: u32 = 1000;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 時刻ソース
///
/// ブラウザでは `js_sys::Date`、CLIでは `chrono::Local`、テストでは [`ManualClock`]。
pub trait Clock {
    /// UNIXエポックからのミリ秒
    fn now_ms(&self) -> i64;

    /// 利用者のタイムゾーンでの現在時刻
    fn local_now(&self) -> NaiveDateTime {
        DateTime::from_timestamp_millis(self.now_ms())
            .unwrap_or_default()
            .naive_utc()
    }
}

/// テスト用の手動時計
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self { now: Cell::new(now_ms) }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }

    fn local_now(&self) -> NaiveDateTime {
        (**self).local_now()
    }
}

/// 日時を `Oct 19, 2026, 14:03:07` 形式に整形（24時間表記）
pub fn format_datetime<T: Datelike + Timelike>(dt: &T) -> String {
    format!(
        "{} {:02}, {}, {:02}:{:02}:{:02}",
        MONTHS[dt.month0() as usize],
        dt.day(),
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// 1回分の時計表示文字列
pub fn tick<C: Clock + ?Sized>(clock: &C) -> String {
    format_datetime(&clock.local_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_datetime() {
        let dt = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 3, 7)
            .unwrap();
        assert_eq!(format_datetime(&dt), "Oct 19, 2026, 14:03:07");
    }

    #[test]
    fn test_format_datetime_pads_and_uses_24h() {
        let dt = NaiveDate::from_ymd_opt(2025, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 9)
            .unwrap();
        assert_eq!(format_datetime(&dt), "Jan 05, 2025, 00:00:09");

        let dt = NaiveDate::from_ymd_opt(2025, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(format_datetime(&dt), "Dec 31, 2025, 23:59:59");
    }

    #[test]
    fn test_tick_reads_clock() {
        // 2024-02-29T12:00:00Z
        let clock = ManualClock::new(1_709_208_000_000);
        assert_eq!(tick(&clock), "Feb 29, 2024, 12:00:00");
        clock.advance(1000);
        assert_eq!(tick(&clock), "Feb 29, 2024, 12:00:01");
    }
}
