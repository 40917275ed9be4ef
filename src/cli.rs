use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "primedash")]
#[command(about = "セッションタイマー・報酬計算・.zip提出台帳", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 状態ファイルの保存先（設定より優先）
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 現在の状態を表示
    Status,

    /// セッションを開始
    Login {
        /// ユーザーID
        #[arg(required = true)]
        user_id: String,
    },

    /// セッションを終了して報酬を確定
    Logout,

    /// .zipファイルを提出
    Submit {
        /// 提出するファイル
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 1秒ごとに表示を更新（Ctrl-Cで終了）
    Watch,

    /// 現在時刻を表示
    Clock,

    /// 設定を表示/編集
    Config {
        /// ログインできるユーザーIDを固定
        #[arg(long)]
        require_user: Option<String>,

        /// 固定ユーザーIDを解除
        #[arg(long, conflicts_with = "require_user")]
        clear_require_user: bool,

        /// 状態の保存 (on/off)
        #[arg(long)]
        persistence: Option<Toggle>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(&self) -> bool {
        matches!(self, Toggle::On)
    }
}
