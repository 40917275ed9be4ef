//! ダッシュボード本体
//!
//! セッション・台帳・設定・ストレージ・時計・タイマーをまとめて所有し、
//! 状態遷移のたびに永続化と変更通知を行う。

use crate::clock::Clock;
use crate::config::DashboardConfig;
use crate::earnings::Earnings;
use crate::error::{StorageError, ValidationError};
use crate::ledger::{Ledger, SubmissionEntry};
use crate::persistence::{load_or_default, save, PersistedState, StorageBackend};
use crate::presenter::DashboardView;
use crate::session::SessionState;
use crate::ticker::{SessionTicker, SESSION_TICK_MS};
use tracing::{debug, info, warn};

/// 変更通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Session,
    Ledger,
    Tick,
}

/// ログアウト結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoutOutcome {
    pub earnings: Earnings,
    /// ファイル選択を促す
    pub prompt_upload: bool,
}

/// ログインボタン/Enterキーの結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toggled {
    LoggedIn,
    LoggedOut(LogoutOutcome),
}

type Listener = Box<dyn FnMut(Change)>;

pub struct Dashboard<B, C, T> {
    config: DashboardConfig,
    backend: B,
    clock: C,
    ticker: T,
    session: SessionState,
    ledger: Ledger,
    login_error: Option<ValidationError>,
    listeners: Vec<Listener>,
}

impl<B, C, T> Dashboard<B, C, T>
where
    B: StorageBackend,
    C: Clock,
    T: SessionTicker,
{
    /// 保存済み状態から起動する
    pub fn init(config: DashboardConfig, backend: B, clock: C, ticker: T) -> Self {
        let (session, ledger) = if config.persistence_enabled {
            load_or_default(&backend).into_parts()
        } else {
            (SessionState::default(), Ledger::default())
        };

        let mut dashboard = Self {
            config,
            backend,
            clock,
            ticker,
            session,
            ledger,
            login_error: None,
            listeners: Vec::new(),
        };

        if dashboard.config.seed_compensation {
            dashboard.seed_compensation_if_absent();
        }
        if dashboard.session.is_logged_in() {
            info!(
                user_id = dashboard.session.current_user_id().unwrap_or_default(),
                "resuming session"
            );
            dashboard.restart_ticker();
        }
        dashboard
    }

    /// 変更通知を購読
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(Change) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn login(&mut self, input: &str) -> Result<(), ValidationError> {
        let now = self.clock.now_ms();
        let required = self.config.require_fixed_user_id.as_deref();
        if let Err(e) = self.session.login(input, required, now) {
            debug!(error = %e, "login rejected");
            self.login_error = Some(e.clone());
            self.notify(Change::Session);
            return Err(e);
        }

        self.login_error = None;
        self.restart_ticker();
        self.persist_logged();
        self.notify(Change::Session);
        Ok(())
    }

    /// ログアウト。ログアウト済みなら `None`
    pub fn logout(&mut self) -> Option<LogoutOutcome> {
        let now = self.clock.now_ms();
        let earnings = self.session.logout(now)?;

        self.ticker.stop();
        self.login_error = None;
        self.persist_logged();
        self.notify(Change::Session);
        Some(LogoutOutcome {
            earnings,
            prompt_upload: true,
        })
    }

    /// ログインボタン・Enterキー共通の動作
    pub fn toggle(&mut self, input: &str) -> Result<Toggled, ValidationError> {
        if let Some(outcome) = self.logout() {
            return Ok(Toggled::LoggedOut(outcome));
        }
        self.login(input)?;
        Ok(Toggled::LoggedIn)
    }

    /// `.zip` の提出を記録し、未提出報酬を消し込む
    pub fn record_submission(&mut self, filename: &str) -> Result<SubmissionEntry, ValidationError> {
        let entry = SubmissionEntry::upload(
            filename,
            self.session.pending_earnings(),
            self.session.current_user_id(),
            self.clock.now_ms(),
        )?;

        let recorded = self.ledger.record(entry).clone();
        self.session.take_pending();
        debug!(filename, "submission recorded");
        self.persist_logged();
        self.notify(Change::Ledger);
        Ok(recorded)
    }

    /// 補填エントリが無ければ1件だけ追加する。追加した場合 true
    pub fn seed_compensation_if_absent(&mut self) -> bool {
        if self.session.compensation_applied() {
            return false;
        }

        let seeded = if self.ledger.has_compensation() {
            false
        } else {
            let entry = SubmissionEntry::compensation(
                self.session.current_user_id(),
                self.clock.now_ms(),
            );
            self.ledger.record(entry);
            true
        };
        self.session.mark_compensation_applied();
        self.persist_logged();
        if seeded {
            info!("compensation entry seeded");
            self.notify(Change::Ledger);
        }
        seeded
    }

    /// 現在の状態を保存（永続化無効時は何もしない）
    pub fn persist(&mut self) -> Result<(), StorageError> {
        if !self.config.persistence_enabled {
            return Ok(());
        }
        let state = self.snapshot_state();
        save(&mut self.backend, &state)
    }

    /// タイマーからの呼び出し（経過時間表示の再描画）
    pub fn on_tick(&mut self) {
        self.notify(Change::Tick);
    }

    /// ページ離脱時などの最終保存
    pub fn shutdown(&mut self) {
        self.persist_logged();
    }

    pub fn snapshot(&self) -> DashboardView {
        DashboardView::build(
            &self.session,
            &self.ledger,
            self.clock.now_ms(),
            self.login_error.as_ref().map(ToString::to_string),
        )
    }

    pub fn snapshot_state(&self) -> PersistedState {
        PersistedState::capture(&self.session, &self.ledger)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn login_error(&self) -> Option<&ValidationError> {
        self.login_error.as_ref()
    }

    fn restart_ticker(&mut self) {
        self.ticker.stop();
        self.ticker.start(SESSION_TICK_MS);
    }

    fn persist_logged(&mut self) {
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist dashboard state");
        }
    }

    fn notify(&mut self, change: Change) {
        for listener in self.listeners.iter_mut() {
            listener(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::ledger::SubmissionKind;
    use crate::persistence::{load, MemoryStorage, STORAGE_KEY};
    use crate::ticker::ManualTicker;
    use std::cell::RefCell;
    use std::rc::Rc;

    const HOUR: i64 = 3_600_000;
    const T0: i64 = 1_760_000_000_000;

    type TestDashboard = Dashboard<MemoryStorage, ManualClock, ManualTicker>;

    fn no_seed() -> DashboardConfig {
        DashboardConfig {
            seed_compensation: false,
            ..Default::default()
        }
    }

    fn fresh(config: DashboardConfig) -> TestDashboard {
        Dashboard::init(config, MemoryStorage::new(), ManualClock::new(T0), ManualTicker::default())
    }

    fn reopen(previous: TestDashboard, config: DashboardConfig) -> TestDashboard {
        let now = previous.clock().now_ms();
        Dashboard::init(config, previous.backend.clone(), ManualClock::new(now), ManualTicker::default())
    }

    #[test]
    fn test_empty_login_does_not_transition() {
        let mut dash = fresh(no_seed());
        assert_eq!(dash.login("  "), Err(ValidationError::EmptyUserId));
        assert!(!dash.session().is_logged_in());
        assert!(!dash.ticker().is_running());
        assert!(dash.snapshot().message_is_error);
        // 失敗したログインは保存しない
        assert!(dash.backend().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_logout_when_logged_out_is_noop() {
        let mut dash = fresh(no_seed());
        assert_eq!(dash.logout(), None);
        assert_eq!(dash.ticker().stops, 0);
        assert!(dash.backend().raw(STORAGE_KEY).is_none());
    }

    #[test]
    fn test_login_logout_two_hours() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        assert!(dash.ticker().is_running());
        assert_eq!(dash.ticker().period_ms, Some(SESSION_TICK_MS));

        dash.clock().advance(2 * HOUR);
        let outcome = dash.logout().unwrap();
        assert!(outcome.prompt_upload);
        assert_eq!(outcome.earnings.usd_display(), "32.00");
        assert_eq!(outcome.earnings.gbp_display(), "25.28");

        let pending = dash.session().pending_earnings().unwrap();
        assert!((pending.usd - 32.0).abs() < 1e-9);
        assert!((pending.gbp - 25.28).abs() < 1e-9);
        assert!(!dash.ticker().is_running());
        assert!(dash.snapshot().show_upload);
    }

    #[test]
    fn test_relogin_keeps_single_ticker() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        dash.clock().advance(HOUR);
        dash.login("alice").unwrap();
        assert_eq!(dash.ticker().overlapping_starts, 0);
        assert_eq!(dash.ticker().starts, 2);
        assert_eq!(dash.session().session_start(), Some(T0 + HOUR));
    }

    #[test]
    fn test_toggle_switches_states() {
        let mut dash = fresh(no_seed());
        assert_eq!(dash.toggle("alice").unwrap(), Toggled::LoggedIn);
        dash.clock().advance(HOUR / 2);
        match dash.toggle("ignored").unwrap() {
            Toggled::LoggedOut(outcome) => assert_eq!(outcome.earnings.usd_display(), "8.00"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(dash.toggle(""), Err(ValidationError::EmptyUserId));
    }

    #[test]
    fn test_submission_clears_pending() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        dash.clock().advance(2 * HOUR);
        dash.logout();

        let entry = dash.record_submission("report.ZIP").unwrap();
        assert_eq!(entry.kind, SubmissionKind::Upload);
        assert_eq!(entry.user_id.as_deref(), Some("alice"));
        assert_eq!(entry.earnings.unwrap().usd_display(), "32.00");
        assert_eq!(dash.session().pending_earnings(), None);
        assert_eq!(dash.ledger().len(), 1);
        assert!(!dash.snapshot().show_upload);
    }

    #[test]
    fn test_non_zip_rejected_without_change() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        dash.logout();
        let before = dash.snapshot_state();

        let err = dash.record_submission("report.rar").unwrap_err();
        assert_eq!(err, ValidationError::NotZip("report.rar".to_string()));
        assert_eq!(dash.snapshot_state(), before);
        assert!(dash.session().pending_earnings().is_some());
    }

    #[test]
    fn test_seed_twice_yields_one_entry() {
        let mut dash = fresh(DashboardConfig::default());
        assert_eq!(dash.ledger().len(), 1);
        assert!(!dash.seed_compensation_if_absent());
        assert!(!dash.seed_compensation_if_absent());
        let count = dash
            .ledger()
            .entries()
            .iter()
            .filter(|e| e.kind == SubmissionKind::Compensation)
            .count();
        assert_eq!(count, 1);
        assert!(dash.session().compensation_applied());

        // 再起動しても増えない
        let dash = reopen(dash, DashboardConfig::default());
        assert_eq!(dash.ledger().len(), 1);
    }

    #[test]
    fn test_existing_compensation_only_sets_flag() {
        let mut storage = MemoryStorage::new();
        let state = PersistedState {
            submissions: vec![SubmissionEntry::compensation(Some("alice"), 1)],
            ..Default::default()
        };
        save(&mut storage, &state).unwrap();

        let dash = Dashboard::init(
            DashboardConfig::default(),
            storage,
            ManualClock::new(T0),
            ManualTicker::default(),
        );
        assert_eq!(dash.ledger().len(), 1);
        assert!(dash.session().compensation_applied());
        assert!(load(dash.backend()).unwrap().compensation_applied);
    }

    #[test]
    fn test_session_resumes_after_reload() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        dash.clock().advance(HOUR);

        let mut dash = reopen(dash, no_seed());
        assert!(dash.session().is_logged_in());
        assert!(dash.ticker().is_running());
        assert_eq!(dash.snapshot().timer, "01:00:00");

        dash.clock().advance(HOUR);
        let outcome = dash.logout().unwrap();
        assert_eq!(outcome.earnings.usd_display(), "32.00");
    }

    #[test]
    fn test_persistence_disabled_never_touches_backend() {
        let storage = MemoryStorage::with_item(
            STORAGE_KEY,
            r#"{"loggedIn": true, "sessionStart": 1, "currentUserId": "old"}"#,
        );
        let mut dash = Dashboard::init(
            DashboardConfig::single_user("ops-7"),
            storage,
            ManualClock::new(T0),
            ManualTicker::default(),
        );
        assert!(!dash.session().is_logged_in());
        assert!(dash.ledger().is_empty());

        assert_eq!(dash.login("alice"), Err(ValidationError::UserIdMismatch));
        dash.login("ops-7").unwrap();
        let raw = dash.backend().raw(STORAGE_KEY).unwrap();
        assert!(raw.contains("\"old\""));
    }

    #[test]
    fn test_storage_failures_do_not_block() {
        let mut dash = Dashboard::init(
            DashboardConfig::default(),
            MemoryStorage::unavailable(),
            ManualClock::new(T0),
            ManualTicker::default(),
        );
        assert_eq!(dash.ledger().len(), 1);
        dash.login("alice").unwrap();
        assert!(dash.logout().is_some());
        assert!(dash.record_submission("a.zip").is_ok());
        assert!(dash.persist().is_err());
    }

    #[test]
    fn test_ledger_capped_through_dashboard() {
        let mut dash = fresh(no_seed());
        for n in 0..55 {
            dash.clock().advance(1);
            dash.record_submission(&format!("{n}.zip")).unwrap();
        }
        assert_eq!(dash.ledger().len(), 50);
        assert_eq!(dash.snapshot().rows.len(), 6);
        assert_eq!(dash.snapshot().rows[0].filename, "54.zip");
        assert_eq!(load(dash.backend()).unwrap().submissions.len(), 50);
    }

    #[test]
    fn test_observers_notified() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dash = fresh(no_seed());
        let sink = Rc::clone(&seen);
        dash.subscribe(move |change| sink.borrow_mut().push(change));

        dash.login("alice").unwrap();
        dash.on_tick();
        dash.logout();
        dash.record_submission("x.zip").unwrap();
        let _ = dash.login("");

        assert_eq!(
            *seen.borrow(),
            vec![
                Change::Session,
                Change::Tick,
                Change::Session,
                Change::Ledger,
                Change::Session
            ]
        );
    }

    #[test]
    fn test_shutdown_persists_latest_state() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        dash.shutdown();
        let stored = load(dash.backend()).unwrap();
        assert!(stored.logged_in);
        assert_eq!(stored.session_start, Some(T0));
        assert_eq!(stored.current_user_id.as_deref(), Some("alice"));
    }

    #[test]
    fn test_persist_writes_current_state() {
        let mut dash = fresh(no_seed());
        dash.login("alice").unwrap();
        // 端数の出る経過時間でも保存内容と一致する
        dash.clock().advance(55_446);
        dash.logout();
        dash.persist().unwrap();
        assert_eq!(load(dash.backend()).unwrap(), dash.snapshot_state());
    }
}
