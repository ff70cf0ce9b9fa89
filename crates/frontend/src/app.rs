use crate::domain::a001_delivery::ui::list::DeliveryList;
use crate::shared::notify::{NotificationHost, NotificationService};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Toasts are shared by every view below.
    provide_context(NotificationService::new());

    view! {
        <ConfigProvider>
            <DeliveryList />
            <NotificationHost />
        </ConfigProvider>
    }
}
