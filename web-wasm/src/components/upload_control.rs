//! `.zip` アップロード操作

use leptos::html::Input;
use leptos::prelude::*;
use primedash_common::DashboardView;

#[component]
pub fn UploadControl<FU, FC>(
    view_model: Memo<DashboardView>,
    file_input: NodeRef<Input>,
    on_upload: FU,
    on_file_change: FC,
) -> impl IntoView
where
    FU: Fn() + Copy + Send + Sync + 'static,
    FC: Fn(web_sys::Event) + Copy + Send + Sync + 'static,
{
    view! {
        <div class="upload-control">
            <input
                type="file"
                id="zipFileInput"
                accept=".zip"
                style="display: none"
                node_ref=file_input
                on:change=move |ev| on_file_change(ev)
            />
            <Show when=move || view_model.get().show_upload>
                <button id="uploadButton" class="btn btn-secondary" on:click=move |_| on_upload()>
                    "Upload .zip"
                </button>
            </Show>
        </div>
    }
}
