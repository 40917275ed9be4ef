//! ログイン欄コンポーネント

use leptos::prelude::*;
use primedash_common::DashboardView;

#[component]
pub fn LoginPanel<F>(
    view_model: Memo<DashboardView>,
    user_input: ReadSignal<String>,
    set_user_input: WriteSignal<String>,
    on_toggle: F,
) -> impl IntoView
where
    F: Fn() + Copy + Send + Sync + 'static,
{
    view! {
        <div class="login-panel">
            <div class="form-group">
                <label for="loginInput">"User ID"</label>
                <input
                    type="text"
                    id="loginInput"
                    placeholder="user id..."
                    prop:value=move || user_input.get()
                    on:input=move |ev| {
                        set_user_input.set(event_target_value(&ev));
                    }
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            on_toggle();
                        }
                    }
                />
                <button
                    id="loginButton"
                    class="btn"
                    class:active=move || view_model.get().logged_in
                    on:click=move |_| on_toggle()
                >
                    {move || view_model.get().button_label}
                </button>
            </div>
            <p
                id="loginMessage"
                class="login-message"
                class:error=move || view_model.get().message_is_error
            >
                {move || view_model.get().message}
            </p>
        </div>
    }
}
