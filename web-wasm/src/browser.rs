//! ブラウザ実装: localStorage・Date・setInterval

use chrono::{NaiveDate, NaiveDateTime};
use gloo::timers::callback::Interval;
use primedash_common::{Clock, SessionTicker, StorageBackend, StorageError};
use std::rc::Rc;

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("window not available".to_string()))?;
    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
}

/// `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError もここで返る
        local_storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// `Date` による時計（ローカルタイムゾーン）
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }

    fn local_now(&self) -> NaiveDateTime {
        let date = js_sys::Date::new_0();
        NaiveDate::from_ymd_opt(date.get_full_year() as i32, date.get_month() + 1, date.get_date())
            .and_then(|day| day.and_hms_opt(date.get_hours(), date.get_minutes(), date.get_seconds()))
            .unwrap_or_default()
    }
}

/// gloo `Interval` によるセッションタイマー
///
/// `Interval` はdropでキャンセルされるため、差し替え時に古いものは自動で止まる。
pub struct IntervalTicker {
    interval: Option<Interval>,
    on_tick: Rc<dyn Fn()>,
}

impl IntervalTicker {
    pub fn new(on_tick: Rc<dyn Fn()>) -> Self {
        Self {
            interval: None,
            on_tick,
        }
    }
}

impl SessionTicker for IntervalTicker {
    fn start(&mut self, period_ms: u32) {
        let on_tick = Rc::clone(&self.on_tick);
        self.interval = Some(Interval::new(period_ms, move || on_tick()));
    }

    fn stop(&mut self) {
        if let Some(interval) = self.interval.take() {
            interval.cancel();
        }
    }

    fn is_running(&self) -> bool {
        self.interval.is_some()
    }
}
