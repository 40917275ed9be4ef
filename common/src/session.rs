//! ログイン/ログアウトの状態機械

use crate::earnings::{compute_earnings, Earnings};
use crate::error::ValidationError;
use tracing::{debug, warn};

/// ログイン状態（開始時刻はログイン中のみ存在する）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    LoggedOut,
    LoggedIn { started_at: i64 },
}

/// セッション状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    phase: SessionPhase,
    current_user_id: Option<String>,
    pending_earnings: Option<Earnings>,
    compensation_applied: bool,
}

impl SessionState {
    /// 永続化レコードの各フィールドから復元
    ///
    /// 開始時刻のないログイン状態はログアウト扱い、
    /// ログイン中の未提出報酬は破棄する。
    pub fn from_parts(
        logged_in: bool,
        session_start: Option<i64>,
        current_user_id: Option<String>,
        pending_earnings: Option<Earnings>,
        compensation_applied: bool,
    ) -> Self {
        let phase = match (logged_in, session_start) {
            (true, Some(started_at)) => SessionPhase::LoggedIn { started_at },
            _ => SessionPhase::LoggedOut,
        };
        let pending_earnings = match phase {
            SessionPhase::LoggedOut => pending_earnings,
            SessionPhase::LoggedIn { .. } => None,
        };
        Self {
            phase,
            current_user_id,
            pending_earnings,
            compensation_applied,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.phase, SessionPhase::LoggedIn { .. })
    }

    pub fn session_start(&self) -> Option<i64> {
        match self.phase {
            SessionPhase::LoggedIn { started_at } => Some(started_at),
            SessionPhase::LoggedOut => None,
        }
    }

    pub fn current_user_id(&self) -> Option<&str> {
        self.current_user_id.as_deref()
    }

    pub fn pending_earnings(&self) -> Option<Earnings> {
        self.pending_earnings
    }

    pub fn compensation_applied(&self) -> bool {
        self.compensation_applied
    }

    /// 提出待ちの報酬があるか
    pub fn upload_owed(&self) -> bool {
        !self.is_logged_in() && self.pending_earnings.is_some()
    }

    /// ログイン開始からの経過ミリ秒（時計が巻き戻っても0未満にしない）
    pub fn elapsed_ms(&self, now: i64) -> u64 {
        match self.phase {
            SessionPhase::LoggedIn { started_at } => now.saturating_sub(started_at).max(0) as u64,
            SessionPhase::LoggedOut => 0,
        }
    }

    /// ログイン
    ///
    /// 入力は前後の空白を除いて扱う。ログイン中に呼ばれた場合は開始時刻を振り直す。
    pub fn login(
        &mut self,
        input: &str,
        required_user_id: Option<&str>,
        now: i64,
    ) -> Result<(), ValidationError> {
        let entered = input.trim();
        if entered.is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        if let Some(required) = required_user_id {
            if entered != required {
                return Err(ValidationError::UserIdMismatch);
            }
        }

        if let Some(forfeited) = self.pending_earnings.take() {
            warn!(
                usd = forfeited.usd,
                gbp = forfeited.gbp,
                "pending earnings dropped by a new login before upload"
            );
        }

        self.current_user_id = Some(entered.to_string());
        self.phase = SessionPhase::LoggedIn { started_at: now };
        debug!(user_id = entered, started_at = now, "logged in");
        Ok(())
    }

    /// ログアウト。ログアウト済みなら何もせず `None`
    pub fn logout(&mut self, now: i64) -> Option<Earnings> {
        if !self.is_logged_in() {
            return None;
        }
        let earnings = compute_earnings(self.elapsed_ms(now));
        self.phase = SessionPhase::LoggedOut;
        self.pending_earnings = Some(earnings);
        debug!(usd = earnings.usd, gbp = earnings.gbp, "logged out");
        Some(earnings)
    }

    /// 提出により未提出報酬を消し込む
    pub fn take_pending(&mut self) -> Option<Earnings> {
        self.pending_earnings.take()
    }

    pub fn mark_compensation_applied(&mut self) {
        self.compensation_applied = true;
    }
}
