//! Catalog items: list, create, update and soft delete.

pub mod item_api;
pub mod item_repository;
pub mod item_service;
