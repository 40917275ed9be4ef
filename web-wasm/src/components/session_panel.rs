//! セッションタイマー・報酬表示

use leptos::prelude::*;
use primedash_common::DashboardView;

#[component]
pub fn SessionPanel(view_model: Memo<DashboardView>) -> impl IntoView {
    view! {
        <div class="session-panel">
            <div id="sessionTimer" class="session-timer">{move || view_model.get().timer}</div>
            <div class="earnings">
                <span class="currency">"$"</span>
                <span id="usdEarned">{move || view_model.get().usd}</span>
                <span class="currency">" £"</span>
                <span id="gbpEarned">{move || view_model.get().gbp}</span>
            </div>
        </div>
    }
}
