//! Invoices, which can only be created.

pub mod invoice_api;
pub mod invoice_repository;
pub mod invoice_service;
