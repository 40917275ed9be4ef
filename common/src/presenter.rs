//! 表示用の文字列・ビューモデル（各フロントエンド共通）

use crate::earnings::{compute_earnings, format_duration, Earnings};
use crate::ledger::{Ledger, SubmissionEntry, SubmissionKind};
use crate::session::SessionState;

pub const MSG_ENTER_USER_ID: &str = "Enter user ID to begin.";
pub const MSG_PENDING_UPLOAD: &str = "Pending upload from last session. Click Upload .zip to log it.";
pub const MSG_ZIP_ONLY: &str = "Only .zip files are accepted.";
pub const LEDGER_PLACEHOLDER: &str = "—";

/// 台帳の1行
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRow {
    pub filename: String,
    /// `$12.00 → £9.48`（報酬なしの場合None）
    pub earnings: Option<String>,
    pub is_compensation: bool,
}

impl SubmissionRow {
    fn from_entry(entry: &SubmissionEntry) -> Self {
        Self {
            filename: entry.filename.clone(),
            earnings: entry.earnings.as_ref().map(earnings_line),
            is_compensation: entry.kind == SubmissionKind::Compensation,
        }
    }
}

/// ダッシュボード全体の表示状態
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub logged_in: bool,
    pub button_label: &'static str,
    pub message: String,
    pub message_is_error: bool,
    pub timer: String,
    pub usd: String,
    pub gbp: String,
    pub show_upload: bool,
    pub rows: Vec<SubmissionRow>,
}

impl DashboardView {
    pub fn build(session: &SessionState, ledger: &Ledger, now: i64, error: Option<String>) -> Self {
        let logged_in = session.is_logged_in();
        let (timer, live) = if logged_in {
            let elapsed = session.elapsed_ms(now);
            (format_duration(elapsed), compute_earnings(elapsed))
        } else {
            (format_duration(0), Earnings::zero())
        };
        let message_is_error = error.is_some();
        let message = error.unwrap_or_else(|| login_message(session));

        Self {
            logged_in,
            button_label: if logged_in { "Logout" } else { "Login" },
            message,
            message_is_error,
            timer,
            usd: live.usd_display(),
            gbp: live.gbp_display(),
            show_upload: session.upload_owed(),
            rows: ledger.visible().iter().map(SubmissionRow::from_entry).collect(),
        }
    }

    /// 台帳が空の場合はプレースホルダを表示する
    pub fn placeholder(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(LEDGER_PLACEHOLDER)
    }
}

/// ログイン欄のメッセージ
pub fn login_message(session: &SessionState) -> String {
    if session.is_logged_in() {
        match session.current_user_id() {
            Some(id) => format!("Logged in as {id}."),
            None => "Logged in.".to_string(),
        }
    } else if session.pending_earnings().is_some() {
        MSG_PENDING_UPLOAD.to_string()
    } else {
        MSG_ENTER_USER_ID.to_string()
    }
}

/// `$32.00 → £25.28`
pub fn earnings_line(earnings: &Earnings) -> String {
    format!("${} → £{}", earnings.usd_display(), earnings.gbp_display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_out_view() {
        let view = DashboardView::build(&SessionState::default(), &Ledger::default(), 0, None);
        assert!(!view.logged_in);
        assert_eq!(view.button_label, "Login");
        assert_eq!(view.message, MSG_ENTER_USER_ID);
        assert_eq!(view.timer, "00:00:00");
        assert_eq!(view.usd, "0.00");
        assert!(!view.show_upload);
        assert_eq!(view.placeholder(), Some("—"));
    }

    #[test]
    fn test_logged_in_view_shows_live_earnings() {
        let mut session = SessionState::default();
        session.login("alice", None, 0).unwrap();
        let view = DashboardView::build(&session, &Ledger::default(), 90 * 60 * 1000, None);
        assert_eq!(view.button_label, "Logout");
        assert_eq!(view.message, "Logged in as alice.");
        assert_eq!(view.timer, "01:30:00");
        assert_eq!(view.usd, "24.00");
        assert_eq!(view.gbp, "18.96");
    }

    #[test]
    fn test_pending_view_offers_upload() {
        let mut session = SessionState::default();
        session.login("alice", None, 0).unwrap();
        session.logout(1_000);
        let view = DashboardView::build(&session, &Ledger::default(), 5_000, None);
        assert_eq!(view.message, MSG_PENDING_UPLOAD);
        assert!(view.show_upload);
        assert_eq!(view.timer, "00:00:00");
    }

    #[test]
    fn test_error_message_overrides() {
        let view = DashboardView::build(
            &SessionState::default(),
            &Ledger::default(),
            0,
            Some("Enter a user ID to begin.".to_string()),
        );
        assert!(view.message_is_error);
        assert_eq!(view.message, "Enter a user ID to begin.");
    }

    #[test]
    fn test_earnings_line() {
        let line = earnings_line(&Earnings { usd: 32.0, gbp: 25.28 });
        assert_eq!(line, "$32.00 → £25.28");
    }
}
