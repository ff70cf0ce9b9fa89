//! Delivery records: wire types, the building catalog, and the pure logic the
//! dashboard runs on top of them (filtering, pagination, countdown).

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod sync;
pub mod timer;

pub use aggregate::{
    Building, Delivery, DeliveryDraft, DeliveryId, DeliveryPatch, DeliveryStatus, NewDeliveryDto,
    PaymentStatus, ValidatedDraft, ValidationError,
};
pub use catalog::FlatCatalog;
pub use filter::{BuildingFilter, DeliveryListQuery, DeliveryPage, DEFAULT_PAGE_SIZE};
pub use sync::{FetchTicket, RevisionGuard};
pub use timer::{DeliveryCountdown, TimerView, DELIVERY_TIME_LIMIT_SECS};
