use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use uuid::Uuid;

/// How long a notification stays on screen
const DISMISS_AFTER_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
}

/// Сервис всплывающих уведомлений (toast)
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message.into());
    }

    fn push(&self, kind: NotificationKind, message: String) {
        let id = Uuid::new_v4();
        self.items.update(|items| items.push(Notification { id, kind, message }));

        let service = *self;
        Timeout::new(DISMISS_AFTER_MS, move || service.dismiss(id)).forget();
    }

    pub fn dismiss(&self, id: Uuid) {
        // The host may already be gone when a timeout fires.
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }

    pub fn items(&self) -> Vec<Notification> {
        self.items.get()
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

/// Renders the current notifications in the top-right corner
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="toast-host">
            <For
                each=move || service.items()
                key=|n| n.id
                children=move |n| {
                    let class = match n.kind {
                        NotificationKind::Success => "toast toast--success",
                        NotificationKind::Error => "toast toast--error",
                    };
                    let id = n.id;
                    view! {
                        <div class=class role="status" on:click=move |_| service.dismiss(id)>
                            {n.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
