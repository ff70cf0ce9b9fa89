//! Add/Edit Delivery UI Module
//!
//! MVVM pattern:
//! - view_model.rs: form state, validation and save command
//! - view.rs: Leptos component (pure UI)

mod view;
pub mod view_model;

pub use view::DeliveryDetails;
pub use view_model::{DeliveryDetailsViewModel, SaveOutcome};
