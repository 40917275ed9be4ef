use anyhow::Context;
use clap::Parser;
use primedash::{cli, clock::SystemClock, config, error, open_dashboard, store::FileStorage, terminal};
use cli::{Cli, Commands};
use config::Config;
use error::PrimedashError;
use primedash_common::{clock, presenter::earnings_line, CLOCK_PERIOD_MS};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    let state_dir = match cli.state_dir.clone() {
        Some(dir) => dir,
        None => config.state_dir()?,
    };
    debug!(state_dir = %state_dir.display(), "using state directory");

    match cli.command {
        Commands::Status => {
            let dash = open_dashboard(config.effective_dashboard(), FileStorage::new(&state_dir));
            print!("{}", terminal::render(&clock::tick(&SystemClock), &dash.snapshot()));
        }

        Commands::Login { user_id } => {
            let mut dash = open_dashboard(config.effective_dashboard(), FileStorage::new(&state_dir));
            dash.login(&user_id).map_err(PrimedashError::from)?;
            println!("✔ {}", dash.snapshot().message);
        }

        Commands::Logout => {
            let mut dash = open_dashboard(config.effective_dashboard(), FileStorage::new(&state_dir));
            match dash.logout() {
                Some(outcome) => {
                    println!("✔ ログアウトしました: {}", earnings_line(&outcome.earnings));
                    if outcome.prompt_upload {
                        println!("  提出してください: primedash submit <file.zip>");
                    }
                }
                None => println!("ログインしていません"),
            }
        }

        Commands::Submit { file } => {
            if !file.is_file() {
                return Err(PrimedashError::FileNotFound(file.display().to_string()).into());
            }
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            let mut dash = open_dashboard(config.effective_dashboard(), FileStorage::new(&state_dir));
            let entry = dash.record_submission(&name).map_err(PrimedashError::from)?;
            match entry.earnings {
                Some(earnings) => println!("✔ 提出を記録: {} ({})", entry.filename, earnings_line(&earnings)),
                None => println!("✔ 提出を記録: {}", entry.filename),
            }
        }

        Commands::Watch => {
            let mut dash = open_dashboard(config.effective_dashboard(), FileStorage::new(&state_dir));
            let mut interval = tokio::time::interval(Duration::from_millis(CLOCK_PERIOD_MS as u64));
            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        dash.on_tick();
                        // 画面クリアして再描画
                        print!("\x1B[2J\x1B[H{}", terminal::render(&clock::tick(&SystemClock), &dash.snapshot()));
                    }
                    _ = &mut ctrl_c => {
                        dash.shutdown();
                        println!();
                        break;
                    }
                }
            }
        }

        Commands::Clock => {
            println!("{}", clock::tick(&SystemClock));
        }

        Commands::Config { require_user, clear_require_user, persistence, show } => {
            let mut changed = false;

            if let Some(user) = require_user {
                let user = user.trim().to_string();
                if user.is_empty() {
                    return Err(PrimedashError::Config("ユーザーIDが空です".into()).into());
                }
                config.dashboard.require_fixed_user_id = Some(user);
                changed = true;
            }
            if clear_require_user {
                config.dashboard.require_fixed_user_id = None;
                changed = true;
            }
            if let Some(toggle) = persistence {
                config.dashboard.persistence_enabled = toggle.enabled();
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                let effective = config.effective_dashboard();
                println!("設定:");
                println!(
                    "  固定ユーザーID: {}",
                    effective.require_fixed_user_id.as_deref().unwrap_or("なし")
                );
                println!("  状態の保存: {}", if effective.persistence_enabled { "有効" } else { "無効" });
                println!("  補填エントリ: {}", if effective.seed_compensation { "有効" } else { "無効" });
                println!("  保存先: {}", state_dir.display());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
