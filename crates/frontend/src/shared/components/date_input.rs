use leptos::prelude::*;

/// DateInput component with native date picker
/// Browser displays the date in its own locale format
#[component]
pub fn DateInput(
    /// The date value in yyyy-mm-dd format
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes (receives yyyy-mm-dd format)
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <input
            type="date"
            class="date-input"
            prop:value=value
            on:input=move |ev| on_change.run(event_target_value(&ev))
        />
    }
}
