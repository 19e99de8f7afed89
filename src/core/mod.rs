//! Core module - fundamental types and local state

pub mod bulk;
pub mod config;
pub mod entity;
pub mod inventory;
pub mod selection;

pub use bulk::{AppAssignment, BulkError, BulkPatch};
pub use config::Config;
pub use entity::{
    Application, ApplicationOutcome, ChildResult, EntityKind, Server, TestAllEntry, TestOutcome,
};
pub use inventory::{Inventory, ServerStats};
pub use selection::Selection;
