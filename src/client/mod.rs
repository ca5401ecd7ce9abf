//! Quote form logic as it runs on the visitor's side: validation, the
//! submitting lifecycle, and delivery to the mail relay.

pub mod form_controller;
pub mod notifier;
pub mod transport;
