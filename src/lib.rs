//! # Dashboard Core
//!
//! Collection view and kanban board logic for admin dashboards.
//!
//! This crate turns caller-owned record lists into searchable, sortable,
//! paginated table views and groups status-tagged items into board columns
//! with drag-and-drop status moves. Every operation is a pure function over
//! its inputs; the caller owns the data and commits the results.

pub mod domain;
pub mod error;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardConfig, BoardItem, DragIntent, ItemId, Status},
    record::{Record, Value},
    sorting::SortDirection,
    view::{Page, ViewConfig},
};
pub use error::{DashboardError, Result};
