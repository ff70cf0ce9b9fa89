use crate::shared::icons::icon;
use leptos::prelude::*;

/// Prev / "Page X of Y" / Next
///
/// Buttons are disabled at the edges, so navigation never leaves `1..=total_pages`.
#[component]
pub fn PaginationControls(
    /// Current page (1-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages, at least 1
    #[prop(into)]
    total_pages: Signal<usize>,

    on_prev: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if !at_first() {
                        on_prev.run(());
                    }
                }
                disabled=at_first
                title="Previous page"
            >
                {icon("chevron-left")}
                "Prev"
            </button>
            <span class="pagination-info">
                {move || format!("Page {} of {}", current_page.get(), total_pages.get().max(1))}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if !at_last() {
                        on_next.run(());
                    }
                }
                disabled=at_last
                title="Next page"
            >
                "Next"
                {icon("chevron-right")}
            </button>
        </div>
    }
}
