//! Platform glue
//!
//! Browser hosts drive the scheduler from `requestAnimationFrame` through
//! [`web::WebGame`]. Native hosts use [`crate::Scheduler::run`] directly.

#[cfg(target_arch = "wasm32")]
pub mod web;
