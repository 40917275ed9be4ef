//! メインアプリケーションコンポーネント

use crate::browser::{BrowserClock, BrowserStorage, IntervalTicker};
use crate::components::{
    header::Header,
    login_panel::LoginPanel,
    session_panel::SessionPanel,
    submission_list::SubmissionList,
    upload_control::UploadControl,
};
use gloo::events::EventListener;
use leptos::html::Input;
use leptos::prelude::*;
use primedash_common::presenter::MSG_ZIP_ONLY;
use primedash_common::{Dashboard, DashboardConfig, Toggled};
use std::rc::Rc;
use web_sys::HtmlInputElement;

pub type BrowserDashboard = Dashboard<BrowserStorage, BrowserClock, IntervalTicker>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 状態変更・タイマーで再描画する
    let (revision, set_revision) = signal(0u64);
    let (session_tick, set_session_tick) = signal(0u64);

    let on_tick: Rc<dyn Fn()> = Rc::new(move || set_session_tick.update(|t| *t = t.wrapping_add(1)));
    let mut dashboard: BrowserDashboard = Dashboard::init(
        DashboardConfig::default(),
        BrowserStorage,
        BrowserClock,
        IntervalTicker::new(on_tick),
    );
    dashboard.subscribe(move |_| set_revision.update(|r| *r = r.wrapping_add(1)));
    let dashboard = StoredValue::new_local(dashboard);

    let view_model = Memo::new(move |_| {
        revision.track();
        session_tick.track();
        dashboard.with_value(|d| d.snapshot())
    });

    // ページ離脱時の最終保存
    if let Some(window) = web_sys::window() {
        EventListener::new(&window, "beforeunload", move |_| {
            if let Some(Err(e)) = dashboard.try_update_value(|d| d.persist()) {
                gloo::console::warn!(format!("final persist failed: {}", e));
            }
        })
        .forget();
    }

    let (user_input, set_user_input) = signal(String::new());
    let file_input = NodeRef::<Input>::new();

    let open_picker = move || {
        if let Some(input) = file_input.get_untracked() {
            input.set_value("");
            input.click();
        }
    };

    let on_toggle = move || {
        let entered = user_input.get_untracked();
        match dashboard.try_update_value(|d| d.toggle(&entered)) {
            Some(Ok(Toggled::LoggedOut(outcome))) if outcome.prompt_upload => open_picker(),
            Some(Err(e)) => gloo::console::log!(format!("login rejected: {}", e)),
            _ => {}
        }
    };

    let on_file_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let file_name = input
            .files()
            .and_then(|files| files.get(0))
            .map(|file| file.name());

        if let Some(name) = file_name {
            if let Some(Err(e)) = dashboard.try_update_value(|d| d.record_submission(&name)) {
                gloo::console::warn!(e.to_string());
                gloo::dialogs::alert(MSG_ZIP_ONLY);
            }
        }
        input.set_value("");
    };

    view! {
        <div class="terminal">
            <Header />

            <LoginPanel
                view_model=view_model
                user_input=user_input
                set_user_input=set_user_input
                on_toggle=on_toggle
            />

            <SessionPanel view_model=view_model />

            <UploadControl
                view_model=view_model
                file_input=file_input
                on_upload=open_picker
                on_file_change=on_file_change
            />

            <SubmissionList view_model=view_model />
        </div>
    }
}
