//! SIT: Server Inventory Toolkit
//!
//! A console for a server inventory service: CSV import with column
//! mapping, bulk updates, and connectivity testing against the storage API.

pub mod api;
pub mod cli;
pub mod core;
pub mod import;
