use chrono::{DateTime, Utc};
use contracts::domain::a001_delivery::{DeliveryCountdown, DeliveryStatus, TimerView};
use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::shared::config::config;

const TICK_MS: u32 = 1_000;

/// What the row shows on first paint, before the effect starts ticking
fn first_view(
    status: DeliveryStatus,
    start: Option<DateTime<Utc>>,
    limit_secs: i64,
    now: DateTime<Utc>,
) -> TimerView {
    DeliveryCountdown::new(status, start)
        .with_limit(limit_secs)
        .tick(now)
}

/// Live elapsed-time display for one table row.
///
/// The ticker exists only while the row is out for delivery. It is dropped
/// (and the browser interval cleared) whenever `status` or `start` change and
/// when the row leaves the page.
#[component]
pub fn DeliveryTimer(
    #[prop(into)] status: Signal<DeliveryStatus>,
    #[prop(into)] start: Signal<Option<DateTime<Utc>>>,
) -> impl IntoView {
    let limit_secs = config().dashboard.timer_limit_secs;
    let state = RwSignal::new(first_view(
        status.get_untracked(),
        start.get_untracked(),
        limit_secs,
        Utc::now(),
    ));
    let ticker = StoredValue::new_local(None::<Interval>);

    Effect::new(move |_| {
        let mut countdown = DeliveryCountdown::new(status.get(), start.get()).with_limit(limit_secs);

        let initial = countdown.tick(Utc::now());
        let keep_ticking = countdown.needs_ticking() && !initial.is_terminal();
        state.set(initial);

        if keep_ticking {
            let interval = Interval::new(TICK_MS, move || {
                let next = countdown.tick(Utc::now());
                if state.get_untracked() != next {
                    state.set(next);
                }
            });
            ticker.set_value(Some(interval));
        }

        // Runs before the next evaluation and on unmount.
        on_cleanup(move || {
            let _ = ticker.try_update_value(|t| *t = None);
        });
    });

    view! {
        <div class="delivery-timer">
            {move || match state.get() {
                TimerView::Delivered => view! {
                    <span class="delivery-timer__done">"Delivered"</span>
                }.into_any(),
                TimerView::Idle => view! {
                    <span class="delivery-timer__idle">"—"</span>
                }.into_any(),
                active @ (TimerView::Running { .. } | TimerView::Exceeded) => {
                    let exceeded = active == TimerView::Exceeded;
                    let width = format!("width: {:.2}%", active.progress_percent());
                    let label = active.elapsed_label().unwrap_or_else(|| "⏰ Time Exceeded".to_string());
                    view! {
                        <div>
                            <span
                                class="delivery-timer__elapsed"
                                class:delivery-timer__elapsed--exceeded=exceeded
                            >
                                {label}
                            </span>
                            <div class="delivery-timer__track">
                                <div
                                    class="delivery-timer__bar"
                                    class:delivery-timer__bar--exceeded=exceeded
                                    style=width
                                ></div>
                            </div>
                        </div>
                    }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_running_row_mounts_with_elapsed_time() {
        let start = now() - Duration::seconds(75);
        let view = first_view(DeliveryStatus::OutForDelivery, Some(start), 300, now());

        assert!(matches!(view, TimerView::Running { elapsed_secs: 75, .. }));
        assert_eq!(view.elapsed_label().as_deref(), Some("01:15"));
    }

    #[test]
    fn test_first_view_terminal_states() {
        let start = now() - Duration::seconds(400);
        assert_eq!(
            first_view(DeliveryStatus::OutForDelivery, Some(start), 300, now()),
            TimerView::Exceeded
        );
        assert_eq!(
            first_view(DeliveryStatus::Delivered, Some(start), 300, now()),
            TimerView::Delivered
        );
        assert_eq!(
            first_view(DeliveryStatus::OutForDelivery, None, 300, now()),
            TimerView::Idle
        );
    }
}
