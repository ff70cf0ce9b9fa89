use contracts::domain::a001_delivery::PaymentStatus;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_delivery::ui::list::view_model::DeliveryListViewModel;

/// Radio choice between Paid and Unpaid for the record in `vm.payment`
#[component]
pub fn PaymentDialog(vm: DeliveryListViewModel) -> impl IntoView {
    let selected = move || vm.payment.with(|p| p.as_ref().map(|s| s.status));

    view! {
        <div class="payment-form">
            <div class="form__radio-group">
                {PaymentStatus::ALL.into_iter().map(|status| {
                    let id = format!("payment-{}", status.label().to_lowercase());
                    view! {
                        <div class="form__radio-wrapper">
                            <input
                                id=id.clone()
                                type="radio"
                                class="form__radio"
                                name="paymentStatus"
                                value=status.label()
                                prop:checked=move || selected() == Some(status)
                                on:change=move |_| vm.select_payment(status)
                            />
                            <label class="form__radio-label" for=id>
                                {status.label()}
                            </label>
                        </div>
                    }
                }).collect_view()}
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| vm.close_payment()
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm.save_payment()
                >
                    "Save"
                </Button>
            </div>
        </div>
    }
}
