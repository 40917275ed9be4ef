//! 提出台帳リスト（最新6件）

use leptos::prelude::*;
use primedash_common::{DashboardView, SubmissionRow};

#[component]
pub fn SubmissionList(view_model: Memo<DashboardView>) -> impl IntoView {
    view! {
        <ul id="submissionList" class="submission-list">
            {move || {
                let view = view_model.get();
                match view.placeholder() {
                    Some(placeholder) => {
                        view! { <li class="submission-placeholder">{placeholder}</li> }.into_any()
                    }
                    None => view.rows.into_iter().map(row_view).collect_view().into_any(),
                }
            }}
        </ul>
    }
}

fn row_view(row: SubmissionRow) -> impl IntoView {
    let SubmissionRow { filename, earnings, is_compensation } = row;
    view! {
        <li class:compensation=is_compensation>
            <span class="submission-name">{filename}</span>
            {earnings.map(|line| view! { <span class="submission-earnings">{line}</span> })}
        </li>
    }
}
