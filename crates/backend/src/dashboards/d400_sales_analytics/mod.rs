//! D400: sales analytics dashboard.
//!
//! Pipeline per request: date filter -> KPI summary + one page view ->
//! `RenderModel`. Everything here is pure and synchronous over the
//! already-loaded `Dataset`.

pub mod error;
pub mod filter;
pub mod kpi;
pub mod service;
pub mod views;

#[cfg(test)]
pub(crate) mod test_support;
