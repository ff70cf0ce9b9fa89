pub mod view_model;

use crate::domain::a001_delivery::ui::details::{DeliveryDetails, SaveOutcome};
use crate::domain::a001_delivery::ui::payment::PaymentDialog;
use crate::domain::a001_delivery::ui::timer::DeliveryTimer;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::date_utils::{format_currency, format_time, from_input_value, to_input_value};
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::notify::use_notifications;
use contracts::domain::a001_delivery::{BuildingFilter, Delivery, DeliveryStatus};
use leptos::prelude::*;
use thaw::*;
use view_model::{DeliveryListViewModel, EditorMode, StatusSelection};

#[component]
#[allow(non_snake_case)]
pub fn DeliveryList() -> impl IntoView {
    let vm = DeliveryListViewModel::new(use_notifications());
    let dashboard = &config().dashboard;

    // Owned by the list so it outlives the form that triggers it.
    let on_saved = Callback::new(move |outcome: SaveOutcome| match outcome {
        SaveOutcome::Created(delivery) => vm.on_created(delivery),
        SaveOutcome::Updated => vm.on_edited(),
    });
    let on_cancel = Callback::new(move |_: ()| vm.close_editor());

    vm.fetch();

    view! {
        <div class="page">
            <div class="header">
                <h1 class="header__title">{dashboard.title.clone()}</h1>
            </div>

            <div class="toolbar">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.open_create()>
                    {icon("plus")}
                    "Add"
                </Button>

                <div class="filter-chips">
                    {BuildingFilter::options().into_iter().map(|filter| view! {
                        <button
                            class="filter-chip"
                            class:filter-chip--active=move || vm.query.with(|q| q.building() == filter)
                            on:click=move |_| vm.set_building(filter)
                        >
                            {filter.label()}
                        </button>
                    }).collect_view()}
                </div>

                <DateInput
                    value=Signal::derive(move || to_input_value(vm.query.with(|q| q.date())))
                    on_change=Callback::new(move |value: String| {
                        // Clearing the native picker yields an empty string; keep the current date.
                        if let Some(date) = from_input_value(&value) {
                            vm.set_date(date);
                        }
                    })
                />

                <button class="button button--secondary" on:click=move |_| vm.fetch() title="Refresh">
                    {icon("refresh")}
                </button>
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Actions"</th>
                            <th class="table__header-cell">"Building"</th>
                            <th class="table__header-cell">"Flat"</th>
                            <th class="table__header-cell">"Amount"</th>
                            <th class="table__header-cell">"Status"</th>
                            <th class="table__header-cell">"Payment"</th>
                            <th class="table__header-cell">"Timer"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let page = vm.page.get();
                            if page.items.is_empty() {
                                view! {
                                    <tr>
                                        <td class="table__cell table__cell--empty" colspan="7">
                                            "No deliveries for this day"
                                        </td>
                                    </tr>
                                }.into_any()
                            } else {
                                page.items
                                    .into_iter()
                                    .map(|row| view! { <DeliveryRow row=row vm=vm /> })
                                    .collect_view()
                                    .into_any()
                            }
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || vm.page.with(|p| p.page))
                total_pages=Signal::derive(move || vm.page.with(|p| p.total_pages))
                on_prev=Callback::new(move |_| vm.prev_page())
                on_next=Callback::new(move |_| vm.next_page())
            />

            {move || vm.editor.get().map(|mode| {
                let title = match mode {
                    EditorMode::Create => "Add Delivery",
                    EditorMode::Edit(_) => "Edit Delivery",
                };
                view! {
                    <Modal title=title.to_string() on_close=on_cancel>
                        <DeliveryDetails mode=mode on_saved=on_saved on_cancel=on_cancel />
                    </Modal>
                }
            })}

            <Show when=move || vm.payment.with(Option::is_some)>
                <Modal title="Update Payment".to_string() on_close=Callback::new(move |_| vm.close_payment())>
                    <PaymentDialog vm=vm />
                </Modal>
            </Show>
        </div>
    }
}

#[component]
fn DeliveryRow(row: Delivery, vm: DeliveryListViewModel) -> impl IntoView {
    let currency = config().dashboard.currency_symbol.as_str();
    let baseline = row.effective_time();
    let id_for_status = row.id.clone();
    let id_for_delete = row.id.clone();
    let row_for_edit = row.clone();
    let row_for_payment = row.clone();
    let paid = row.is_paid();
    let current_status = row.delivery_status;
    let selection = StatusSelection::new(current_status);

    view! {
        <tr class="table__row">
            <td class="table__cell table__cell--actions">
                <button
                    class="button button--icon button--edit"
                    title="Edit"
                    on:click=move |_| vm.open_edit(row_for_edit.clone())
                >
                    {icon("pencil")}
                </button>
                <button
                    class="button button--icon button--delete"
                    title="Delete"
                    on:click=move |_| vm.remove(id_for_delete.clone())
                >
                    {icon("trash")}
                </button>
            </td>
            <td class="table__cell">{row.building.as_str()}</td>
            <td class="table__cell">{row.flat_number.clone()}</td>
            <td class="table__cell table__cell--amount">{format_currency(row.amount, currency)}</td>
            <td class="table__cell">
                <select
                    class="status-select"
                    prop:value=move || selection.shown().label()
                    on:change=move |ev| {
                        if let Some(status) = DeliveryStatus::from_label(&event_target_value(&ev)) {
                            vm.change_status(id_for_status.clone(), status, selection);
                        }
                    }
                >
                    {DeliveryStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.label() selected=move || selection.shown() == s>{s.label()}</option>
                    }).collect_view()}
                </select>
            </td>
            <td class="table__cell">
                <span class="payment-badge" on:click=move |_| vm.open_payment(&row_for_payment)>
                    <span class="payment-badge__dot" class:payment-badge__dot--paid=paid>"●"</span>
                    <span>{row.payment_status.label()}</span>
                </span>
            </td>
            <td class="table__cell">
                <DeliveryTimer status=current_status start=baseline />
                <div class="table__cell-hint">
                    {baseline.map(format_time).unwrap_or_default()}
                </div>
            </td>
        </tr>
    }
}
