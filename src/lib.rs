//! A backend for managing the catalog items and invoices of a pharmacy.

pub mod app;
pub mod feature;
pub mod infra;
