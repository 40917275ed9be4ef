//! primedash - 端末版ダッシュボード
//!
//! 共通コアをファイル保存とOS時計で動かす。

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod terminal;

use clock::SystemClock;
use primedash_common::{Clock, Dashboard, DashboardConfig, NullTicker, StorageBackend};
use store::FileStorage;

/// CLIで使うダッシュボード
pub type CliDashboard = Dashboard<FileStorage, SystemClock, NullTicker>;

pub fn open_dashboard(config: DashboardConfig, storage: FileStorage) -> CliDashboard {
    open_with(config, storage, SystemClock)
}

/// 任意の時計で開く（テスト用）
pub fn open_with<C: Clock, B: StorageBackend>(
    config: DashboardConfig,
    storage: B,
    clock: C,
) -> Dashboard<B, C, NullTicker> {
    Dashboard::init(config, storage, clock, NullTicker)
}
