use chrono::{Local, NaiveDate, Utc};
use contracts::domain::a001_delivery::{
    BuildingFilter, Delivery, DeliveryId, DeliveryListQuery, DeliveryPage, DeliveryPatch,
    DeliveryStatus, PaymentStatus, RevisionGuard,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_delivery::api;
use crate::shared::config::config;
use crate::shared::date_utils::today;
use crate::shared::notify::NotificationService;

/// Which record the add/edit form works on
#[derive(Clone, Debug, PartialEq)]
pub enum EditorMode {
    Create,
    Edit(Delivery),
}

/// Payment popup state: target record and the radio selection
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentSelection {
    pub id: DeliveryId,
    pub status: PaymentStatus,
}

/// Status dropdown value of one row
///
/// Shows the user's choice while the update is in flight and returns to the
/// stored status if the service rejects it.
#[derive(Clone, Copy)]
pub struct StatusSelection {
    shown: RwSignal<DeliveryStatus>,
    stored: DeliveryStatus,
}

impl StatusSelection {
    pub fn new(stored: DeliveryStatus) -> Self {
        Self {
            shown: RwSignal::new(stored),
            stored,
        }
    }

    pub fn shown(&self) -> DeliveryStatus {
        self.shown.get()
    }

    pub fn choose(&self, status: DeliveryStatus) {
        self.shown.set(status);
    }

    /// The row may already be gone when a failed update returns
    pub fn revert(&self) {
        let _ = self.shown.try_set(self.stored);
    }
}

/// ViewModel for the delivery table
///
/// Holds the full record set and the filter query; the visible page is
/// derived. Every change of records or filters resets to page 1.
#[derive(Clone, Copy)]
pub struct DeliveryListViewModel {
    pub records: RwSignal<Vec<Delivery>>,
    pub query: RwSignal<DeliveryListQuery>,
    pub page: Memo<DeliveryPage>,
    pub editor: RwSignal<Option<EditorMode>>,
    pub payment: RwSignal<Option<PaymentSelection>>,
    revision: StoredValue<RevisionGuard>,
    notifications: NotificationService,
}

impl DeliveryListViewModel {
    pub fn new(notifications: NotificationService) -> Self {
        Self::with_date(notifications, today())
    }

    pub fn with_date(notifications: NotificationService, date: NaiveDate) -> Self {
        let records = RwSignal::new(Vec::<Delivery>::new());
        let query = RwSignal::new(
            DeliveryListQuery::new(date).with_page_size(config().dashboard.page_size),
        );
        let page = Memo::new(move |_| query.with(|q| records.with(|r| q.apply(r, &Local))));

        Self {
            records,
            query,
            page,
            editor: RwSignal::new(None),
            payment: RwSignal::new(None),
            revision: StoredValue::new(RevisionGuard::new()),
            notifications,
        }
    }

    // ------------------------------------------------------------------
    // Filters and paging
    // ------------------------------------------------------------------

    pub fn set_building(&self, building: BuildingFilter) {
        self.query.update(|q| q.set_building(building));
    }

    pub fn set_date(&self, date: NaiveDate) {
        self.query.update(|q| q.set_date(date));
    }

    pub fn next_page(&self) {
        let total = self.page.get_untracked().total_pages;
        self.query.update(|q| q.next_page(total));
    }

    pub fn prev_page(&self) {
        self.query.update(|q| q.prev_page());
    }

    fn replace_records(&self, records: Vec<Delivery>) {
        self.records.set(records);
        self.query.update(|q| q.reset_page());
    }

    /// Apply a local change that a concurrent fetch must not overwrite
    fn mutate_records(&self, f: impl FnOnce(&mut Vec<Delivery>)) {
        self.revision.update_value(|g| g.record_mutation());
        self.records.update(f);
        self.query.update(|q| q.reset_page());
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Load all deliveries. Failures are logged and the current list kept.
    pub fn fetch(&self) {
        let vm = *self;
        let mut ticket = None;
        self.revision.update_value(|g| ticket = Some(g.issue()));

        spawn_local(async move {
            match api::fetch_deliveries().await {
                Ok(records) => {
                    let current = ticket
                        .map(|t| vm.revision.with_value(|g| g.accepts(t)))
                        .unwrap_or(false);
                    if current {
                        log::debug!("Loaded {} deliveries", records.len());
                        vm.replace_records(records);
                    } else {
                        log::debug!("Discarding stale delivery list");
                    }
                }
                Err(e) => log::error!("Error fetching deliveries: {}", e),
            }
        });
    }

    /// Dropdown status change. Going out for delivery restarts the timer.
    pub fn change_status(
        &self,
        id: DeliveryId,
        status: DeliveryStatus,
        selection: StatusSelection,
    ) {
        selection.choose(status);
        let previous = self.records.with_untracked(|records| {
            records
                .iter()
                .find(|r| r.id == id)
                .and_then(|r| r.delivery_time)
        });
        let patch = DeliveryPatch::status_change(status, previous, Utc::now());
        let vm = *self;

        spawn_local(async move {
            match api::update_delivery(&id, &patch).await {
                Ok(()) => {
                    log::info!("Delivery {} set to {}", id, status.label());
                    vm.notifications.success("Delivery status updated");
                    vm.fetch();
                }
                Err(e) => {
                    log::error!("Error updating status of {}: {}", id, e);
                    selection.revert();
                    vm.notifications.error("Failed to update status");
                }
            }
        });
    }

    /// Delete after browser confirmation; the row disappears once the service agrees
    pub fn remove(&self, id: DeliveryId) {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message("Are you sure you want to delete this delivery?")
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let vm = *self;
        spawn_local(async move {
            match api::delete_delivery(&id).await {
                Ok(()) => {
                    log::info!("Delivery {} deleted", id);
                    vm.mutate_records(|records| records.retain(|r| r.id != id));
                    vm.notifications.success("Delivery deleted successfully");
                    vm.fetch();
                }
                Err(e) => {
                    log::error!("Delete of {} failed: {}", id, e);
                    vm.notifications.error("Failed to delete delivery");
                }
            }
        });
    }

    // ------------------------------------------------------------------
    // Add / edit form
    // ------------------------------------------------------------------

    pub fn open_create(&self) {
        self.editor.set(Some(EditorMode::Create));
    }

    pub fn open_edit(&self, delivery: Delivery) {
        self.editor.set(Some(EditorMode::Edit(delivery)));
    }

    pub fn close_editor(&self) {
        self.editor.set(None);
    }

    /// Form saved a new record: show it right away, then resync
    pub fn on_created(&self, delivery: Delivery) {
        self.mutate_records(|records| records.push(delivery));
        self.close_editor();
        self.fetch();
    }

    pub fn on_edited(&self) {
        self.close_editor();
        self.fetch();
    }

    // ------------------------------------------------------------------
    // Payment popup
    // ------------------------------------------------------------------

    pub fn open_payment(&self, delivery: &Delivery) {
        self.payment.set(Some(PaymentSelection {
            id: delivery.id.clone(),
            status: delivery.payment_status,
        }));
    }

    pub fn select_payment(&self, status: PaymentStatus) {
        self.payment.update(|p| {
            if let Some(selection) = p {
                selection.status = status;
            }
        });
    }

    pub fn close_payment(&self) {
        self.payment.set(None);
    }

    /// Send the selected payment status. The popup closes whatever the outcome.
    pub fn save_payment(&self) {
        let Some(selection) = self.payment.get_untracked() else {
            return;
        };
        self.close_payment();

        let vm = *self;
        spawn_local(async move {
            let patch = DeliveryPatch::payment(selection.status);
            match api::update_delivery(&selection.id, &patch).await {
                Ok(()) => {
                    log::info!(
                        "Payment of {} set to {}",
                        selection.id,
                        selection.status.label()
                    );
                    vm.notifications.success("Payment status updated");
                    vm.fetch();
                }
                Err(e) => {
                    log::error!("Error updating payment of {}: {}", selection.id, e);
                    vm.notifications.error("Failed to update payment status");
                }
            }
        });
    }
}
