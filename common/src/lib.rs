//! Primedash Common Library
//!
//! CLIとWeb(WASM)で共有されるセッション・台帳・永続化のコア

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod earnings;
pub mod error;
pub mod ledger;
pub mod persistence;
pub mod presenter;
pub mod session;
pub mod ticker;

pub use clock::{format_datetime, tick, Clock, ManualClock, CLOCK_PERIOD_MS};
pub use config::DashboardConfig;
pub use dashboard::{Change, Dashboard, LogoutOutcome, Toggled};
pub use earnings::{compute_earnings, format_duration, Earnings};
pub use error::{Error, Result, StorageError, ValidationError};
pub use ledger::{is_zip, Ledger, SubmissionEntry, SubmissionKind};
pub use persistence::{load, load_or_default, save, MemoryStorage, PersistedState, StorageBackend, STORAGE_KEY};
pub use presenter::{DashboardView, SubmissionRow};
pub use session::SessionState;
pub use ticker::{ManualTicker, NullTicker, SessionTicker, SESSION_TICK_MS};
