//! Countdown shown next to deliveries that are out for delivery.
//!
//! The state machine is clock-agnostic: the caller supplies `now` on each
//! tick, so the browser ticker and the tests drive it the same way.

use chrono::{DateTime, Utc};

use super::aggregate::DeliveryStatus;

/// Service-level limit for a delivery run (5 minutes)
pub const DELIVERY_TIME_LIMIT_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub enum TimerView {
    /// Out for delivery but no baseline timestamp to count from
    Idle,
    Delivered,
    Running { elapsed_secs: i64, progress: f64 },
    Exceeded,
}

impl TimerView {
    /// `MM:SS` while running, nothing otherwise
    pub fn elapsed_label(&self) -> Option<String> {
        match self {
            TimerView::Running { elapsed_secs, .. } => Some(format_elapsed(*elapsed_secs)),
            _ => None,
        }
    }

    /// Bar width in percent, pinned at 100 once exceeded
    pub fn progress_percent(&self) -> f64 {
        match self {
            TimerView::Running { progress, .. } => progress * 100.0,
            TimerView::Exceeded => 100.0,
            TimerView::Idle | TimerView::Delivered => 0.0,
        }
    }

    /// No further tick can change what is displayed
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TimerView::Running { .. })
    }
}

/// Total minutes and seconds; minutes keep growing past 59
pub fn format_elapsed(elapsed_secs: i64) -> String {
    let secs = elapsed_secs.max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// One countdown instance; rebuild it when status or start time change
#[derive(Debug, Clone)]
pub struct DeliveryCountdown {
    status: DeliveryStatus,
    start: Option<DateTime<Utc>>,
    limit_secs: i64,
    exceeded: bool,
}

impl DeliveryCountdown {
    pub fn new(status: DeliveryStatus, start: Option<DateTime<Utc>>) -> Self {
        Self {
            status,
            start,
            limit_secs: DELIVERY_TIME_LIMIT_SECS,
            exceeded: false,
        }
    }

    pub fn with_limit(mut self, limit_secs: i64) -> Self {
        self.limit_secs = limit_secs.max(1);
        self
    }

    /// Only a running delivery with a known start needs a ticker
    pub fn needs_ticking(&self) -> bool {
        self.status == DeliveryStatus::OutForDelivery && self.start.is_some()
    }

    pub fn tick(&mut self, now: DateTime<Utc>) -> TimerView {
        let start = match (self.status, self.start) {
            (DeliveryStatus::Delivered, _) => return TimerView::Delivered,
            (DeliveryStatus::OutForDelivery, None) => return TimerView::Idle,
            (DeliveryStatus::OutForDelivery, Some(start)) => start,
        };

        // A start in the future (clock skew) counts as zero elapsed.
        let elapsed_secs = (now - start).num_seconds().max(0);
        if elapsed_secs >= self.limit_secs {
            self.exceeded = true;
        }
        if self.exceeded {
            return TimerView::Exceeded;
        }

        TimerView::Running {
            elapsed_secs,
            progress: (elapsed_secs as f64 / self.limit_secs as f64).min(1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn after(secs: i64) -> DateTime<Utc> {
        start() + Duration::seconds(secs)
    }

    #[test]
    fn test_running_at_299_seconds() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(start()));
        let view = countdown.tick(after(299));
        assert_eq!(view.elapsed_label().as_deref(), Some("04:59"));
        assert!((view.progress_percent() - 99.666).abs() < 0.01);
        assert!(!view.is_terminal());
    }

    #[test]
    fn test_exceeded_is_monotonic() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(start()));
        assert!(matches!(countdown.tick(after(0)), TimerView::Running { elapsed_secs: 0, .. }));
        assert_eq!(countdown.tick(after(300)), TimerView::Exceeded);
        for secs in [301, 400, 1000] {
            assert_eq!(countdown.tick(after(secs)), TimerView::Exceeded);
        }
        // Clock jumping back does not revive the countdown.
        assert_eq!(countdown.tick(after(10)), TimerView::Exceeded);
        assert_eq!(countdown.tick(after(1000)).progress_percent(), 100.0);
    }

    #[test]
    fn test_sub_second_elapsed_is_floored() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(start()));
        let view = countdown.tick(start() + Duration::milliseconds(1999));
        assert_eq!(view.elapsed_label().as_deref(), Some("00:01"));
    }

    #[test]
    fn test_delivered_is_static() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::Delivered, Some(start()));
        assert!(!countdown.needs_ticking());
        assert_eq!(countdown.tick(after(10)), TimerView::Delivered);
        assert_eq!(countdown.tick(after(10_000)), TimerView::Delivered);
        assert_eq!(TimerView::Delivered.progress_percent(), 0.0);
    }

    #[test]
    fn test_reset_to_delivered_mid_count() {
        let mut running = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(start()));
        assert!(running.needs_ticking());
        assert!(matches!(running.tick(after(120)), TimerView::Running { .. }));

        let mut replaced = DeliveryCountdown::new(DeliveryStatus::Delivered, Some(start()));
        for secs in [121, 300, 900] {
            let view = replaced.tick(after(secs));
            assert_eq!(view, TimerView::Delivered);
            assert!(view.is_terminal());
        }
    }

    #[test]
    fn test_missing_start_is_idle() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, None);
        assert!(!countdown.needs_ticking());
        assert_eq!(countdown.tick(after(5)), TimerView::Idle);
    }

    #[test]
    fn test_future_start_counts_as_zero() {
        let mut countdown = DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(after(30)));
        assert_eq!(countdown.tick(start()).elapsed_label().as_deref(), Some("00:00"));
    }

    #[test]
    fn test_custom_limit() {
        let mut countdown =
            DeliveryCountdown::new(DeliveryStatus::OutForDelivery, Some(start())).with_limit(60);
        assert!((countdown.tick(after(30)).progress_percent() - 50.0).abs() < f64::EPSILON);
        assert_eq!(countdown.tick(after(60)), TimerView::Exceeded);
    }

    #[test]
    fn test_format_elapsed_minutes_unbounded() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(3600 + 61), "61:01");
    }
}
