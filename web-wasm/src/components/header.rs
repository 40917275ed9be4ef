//! ヘッダーコンポーネント（時計表示）

use crate::browser::BrowserClock;
use gloo::timers::callback::Interval;
use leptos::prelude::*;
use primedash_common::{clock, CLOCK_PERIOD_MS};

#[component]
pub fn Header() -> impl IntoView {
    let (now, set_now) = signal(clock::tick(&BrowserClock));

    // 時計は止めない
    Interval::new(CLOCK_PERIOD_MS, move || set_now.set(clock::tick(&BrowserClock))).forget();

    view! {
        <header class="header">
            <h1>"PRIMEDASH"</h1>
            <div id="datetime" class="datetime">{move || now.get()}</div>
        </header>
    }
}
