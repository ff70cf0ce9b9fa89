pub mod details;
pub mod list;
pub mod payment;
pub mod timer;
