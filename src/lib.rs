//! Quote request pipeline for a cleaning business: the form-side controller
//! (`client`) and the mail relay endpoint (`handler`, `router`, `service`).
//!
//! Runnable demos are kept in `demos/` and registered as cargo examples, so
//! `cargo run --example submit_quote` and `cargo run --example send_email`
//! work as usual.

pub mod app;
pub mod client;
pub mod config;
pub mod dto;
pub mod handler;
pub mod model;
pub mod router;
pub mod service;
pub mod util;
