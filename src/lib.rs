//! VoltBin Backend Library
//!
//! Exposes the full module tree so the binary and the black-box tests can
//! assemble the application router.

pub mod auth;
pub mod db;
pub mod inventory;
pub mod middleware;
pub mod models;
pub mod server;
