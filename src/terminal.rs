//! 端末へのダッシュボード表示

use primedash_common::DashboardView;
use std::fmt::Write;

/// ダッシュボードを複数行のテキストに整形
pub fn render(clock_line: &str, view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{clock_line}");
    let _ = writeln!(out, "[{}] {}", view.button_label, view.message);
    let _ = writeln!(out, "Session {}  ${}  £{}", view.timer, view.usd, view.gbp);
    if view.show_upload {
        let _ = writeln!(out, "Upload owed: primedash submit <file.zip>");
    }
    let _ = writeln!(out, "Submissions:");
    match view.placeholder() {
        Some(placeholder) => {
            let _ = writeln!(out, "  {placeholder}");
        }
        None => {
            for row in &view.rows {
                let marker = if row.is_compensation { "*" } else { " " };
                match &row.earnings {
                    Some(line) => {
                        let _ = writeln!(out, " {marker}{}  {line}", row.filename);
                    }
                    None => {
                        let _ = writeln!(out, " {marker}{}", row.filename);
                    }
                }
            }
        }
    }
    out
}
