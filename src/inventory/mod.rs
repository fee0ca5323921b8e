//! Inventory Module
//! Mission: Electronics item catalog with role-gated CRUD

pub mod api;
pub mod models;
pub mod store;

pub use api::ItemsState;
pub use models::Item;
pub use store::ItemStore;
