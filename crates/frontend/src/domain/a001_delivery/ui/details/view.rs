use super::view_model::{DeliveryDetailsViewModel, SaveOutcome};
use crate::domain::a001_delivery::ui::list::view_model::EditorMode;
use crate::shared::config::config;
use crate::shared::notify::use_notifications;
use contracts::domain::a001_delivery::Building;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DeliveryDetails(
    mode: EditorMode,
    on_saved: Callback<SaveOutcome>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = DeliveryDetailsViewModel::new(&mode, use_notifications());
    let buildings = config().catalog.buildings();

    view! {
        <div class="details-form">
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="form-group">
                <label for="building">"Building"</label>
                <select
                    id="building"
                    prop:value=move || vm.form.with(|f| f.building.map(|b| b.as_str()).unwrap_or_default().to_string())
                    on:change=move |ev| vm.select_building(Building::from_name(&event_target_value(&ev)))
                >
                    {buildings.into_iter().map(|b| view! {
                        <option value=b.as_str()>{b.as_str()}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="flat_number">"Flat Number"</label>
                <select
                    id="flat_number"
                    prop:value=move || vm.form.with(|f| f.flat_number.clone())
                    on:change=move |ev| vm.set_flat(event_target_value(&ev))
                >
                    <option value="">"Select"</option>
                    {move || vm.flat_options().into_iter().map(|flat| {
                        let value = flat.clone();
                        let current = flat.clone();
                        view! {
                            <option
                                value=value
                                selected=move || vm.form.with(|f| f.flat_number == current)
                            >
                                {flat}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="amount">"Amount"</label>
                <input
                    type="number"
                    id="amount"
                    min="0"
                    step="any"
                    prop:value=move || vm.form.with(|f| f.amount.clone())
                    on:input=move |ev| vm.set_amount(event_target_value(&ev))
                />
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || vm.saving.get())
                    on_click=move |_| vm.save_command(on_saved)
                >
                    {move || if vm.is_edit_mode() { "Update" } else { "Save" }}
                </Button>
            </div>
        </div>
    }
}
