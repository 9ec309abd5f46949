use crate::domain::record::{Record, Value};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Unique identifier of a board item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Status tag of a board item (e.g. `todo`, `in-progress`, `done`)
///
/// The set of valid tags is whatever the board's columns declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(status: impl Into<String>) -> Self {
        Self(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Status {
    fn from(status: &str) -> Self {
        Self::new(status)
    }
}

/// A draggable card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItem {
    pub id: ItemId,
    pub status: Status,
    #[serde(flatten)]
    fields: Record,
}

impl BoardItem {
    pub fn new(id: impl Into<ItemId>, status: impl Into<Status>) -> Self {
        Self {
            id: id.into(),
            status: status.into(),
            fields: Record::new(),
        }
    }

    /// Payload keys that would collide with `id` and `status` in JSON
    pub const RESERVED_FIELDS: [&'static str; 2] = ["id", "status"];

    /// Builder-style payload field
    ///
    /// Reserved keys are skipped; set `id` and `status` through the item itself.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if Self::RESERVED_FIELDS.contains(&key.as_str()) {
            warn!(item = %self.id, key = %key, "ignoring reserved payload field");
            return self;
        }
        self.fields.insert(key, value);
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Record {
        &self.fields
    }

    /// Parses a list of items from a JSON array
    pub fn list_from_json_str(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for a kanban board column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    /// Drop-target id of the column
    pub id: String,
    pub title: String,
    pub status: Status,
}

impl BoardColumn {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: impl Into<Status>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            status: status.into(),
        }
    }

    /// Column whose drop-target id is the status tag itself
    pub fn for_status(status: &str, title: impl Into<String>) -> Self {
        Self::new(status, title, status)
    }
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<BoardColumn>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Tasks".to_string(),
            columns: vec![
                BoardColumn::for_status("todo", "To Do"),
                BoardColumn::for_status("in-progress", "In Progress"),
                BoardColumn::for_status("done", "Done"),
            ],
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DashboardError::InvalidConfiguration(
                "board needs at least one column".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut statuses = HashSet::new();
        for col in &self.columns {
            if !ids.insert(col.id.as_str()) {
                return Err(DashboardError::InvalidConfiguration(format!(
                    "duplicate column id '{}'",
                    col.id
                )));
            }
            if !statuses.insert(&col.status) {
                return Err(DashboardError::InvalidConfiguration(format!(
                    "duplicate column status '{}'",
                    col.status
                )));
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// What the user dropped, and onto what
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragIntent {
    pub dragged_id: ItemId,
    /// Column id or item id under the pointer on release, if any
    pub over_target_id: Option<String>,
}

impl DragIntent {
    pub fn new(dragged_id: impl Into<ItemId>, over_target_id: Option<&str>) -> Self {
        Self {
            dragged_id: dragged_id.into(),
            over_target_id: over_target_id.map(str::to_string),
        }
    }
}

/// Tab filter over board items
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, item: &BoardItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => &item.status == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(DashboardError::InvalidConfiguration(
                "empty status filter".to_string(),
            )),
            "all" => Ok(Self::All),
            status => Ok(Self::Only(Status::new(status))),
        }
    }
}

/// Partitions items into one column per status in `status_order`.
///
/// Columns keep the relative order of `items`; empty columns are included.
/// Items whose status is not in `status_order` are left out.
pub fn columns_of<'a>(
    items: &'a [BoardItem],
    status_order: &[Status],
) -> Vec<(Status, Vec<&'a BoardItem>)> {
    for item in items {
        if !status_order.contains(&item.status) {
            warn!(item = %item.id, status = %item.status, "item status has no column");
        }
    }

    status_order
        .iter()
        .map(|status| {
            let members: Vec<&BoardItem> =
                items.iter().filter(|item| &item.status == status).collect();
            (status.clone(), members)
        })
        .collect()
}

/// Works out which status a drop lands in.
///
/// A known column id wins; otherwise an item id resolves to that item's
/// status; anything else leaves the dragged item where it is.
///
/// # Errors
/// Returns `ItemNotFound` when the dragged item is not in `items`.
pub fn resolve_drop_target(
    items: &[BoardItem],
    intent: &DragIntent,
    columns: &[BoardColumn],
) -> Result<Status> {
    let dragged = find_item(items, &intent.dragged_id)?;

    let Some(over) = intent.over_target_id.as_deref() else {
        return Ok(dragged.status.clone());
    };

    if let Some(col) = columns.iter().find(|col| col.id == over) {
        return Ok(col.status.clone());
    }

    let target = items
        .iter()
        .find(|item| item.id.as_str() == over)
        .map(|item| item.status.clone())
        .unwrap_or_else(|| dragged.status.clone());

    Ok(target)
}

/// Sets the dragged item's status, appending it to the end of its new column.
///
/// Returns the items unchanged when the status already matches. Every other
/// item keeps its relative order.
///
/// # Errors
/// Returns `ItemNotFound` when `dragged_id` is not in `items`.
pub fn move_item(
    items: &[BoardItem],
    dragged_id: &ItemId,
    target: &Status,
) -> Result<Vec<BoardItem>> {
    let position = items
        .iter()
        .position(|item| &item.id == dragged_id)
        .ok_or_else(|| DashboardError::ItemNotFound(dragged_id.to_string()))?;

    if &items[position].status == target {
        return Ok(items.to_vec());
    }

    let mut moved = items[position].clone();
    debug!(item = %moved.id, from = %moved.status, to = %target, "moving board item");
    moved.status = target.clone();

    let mut next: Vec<BoardItem> = items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, item)| item.clone())
        .collect();
    next.push(moved);

    Ok(next)
}

/// Items visible under a status tab, in their original order
pub fn filter_by_status<'a>(
    items: &'a [BoardItem],
    filter: &StatusFilter,
) -> Vec<&'a BoardItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

fn find_item<'a>(items: &'a [BoardItem], id: &ItemId) -> Result<&'a BoardItem> {
    items
        .iter()
        .find(|item| &item.id == id)
        .ok_or_else(|| DashboardError::ItemNotFound(id.to_string()))
}

/// One rendered board column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub status: &'a Status,
    pub items: Vec<&'a BoardItem>,
}

/// Kanban board: a validated column layout over caller-owned items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Statuses in column display order
    pub fn status_order(&self) -> Vec<Status> {
        self.config
            .columns
            .iter()
            .map(|col| col.status.clone())
            .collect()
    }

    /// Gets the column configuration for a status
    pub fn column_for_status(&self, status: &Status) -> Option<&BoardColumn> {
        self.config.columns.iter().find(|col| &col.status == status)
    }

    /// Groups `items` into this board's columns
    pub fn columns<'a>(&'a self, items: &'a [BoardItem]) -> Vec<ColumnView<'a>> {
        let status_order = self.status_order();
        self.config
            .columns
            .iter()
            .zip(columns_of(items, &status_order))
            .map(|(col, (_, members))| ColumnView {
                id: &col.id,
                title: &col.title,
                status: &col.status,
                items: members,
            })
            .collect()
    }

    /// Number of items per status, in column order
    pub fn column_counts(&self, items: &[BoardItem]) -> Vec<(Status, usize)> {
        self.config
            .columns
            .iter()
            .map(|col| {
                let count = items.iter().filter(|item| item.status == col.status).count();
                (col.status.clone(), count)
            })
            .collect()
    }

    pub fn resolve_drop_target(&self, items: &[BoardItem], intent: &DragIntent) -> Result<Status> {
        resolve_drop_target(items, intent, &self.config.columns)
    }

    /// Like [`move_item`], but rejects statuses the board has no column for
    pub fn move_item(
        &self,
        items: &[BoardItem],
        dragged_id: &ItemId,
        target: &Status,
    ) -> Result<Vec<BoardItem>> {
        if self.column_for_status(target).is_none() {
            return Err(DashboardError::UnknownStatus(target.to_string()));
        }
        move_item(items, dragged_id, target)
    }

    /// Drag-end handler: resolve the drop, then move
    pub fn apply_drag(&self, items: &[BoardItem], intent: &DragIntent) -> Result<Vec<BoardItem>> {
        let target = self.resolve_drop_target(items, intent)?;
        self.move_item(items, &intent.dragged_id, &target)
    }

    /// The status one column to the right, `None` from the last column
    pub fn next_status(&self, status: &Status) -> Option<Status> {
        let columns = &self.config.columns;
        let index = columns.iter().position(|col| &col.status == status)?;
        columns.get(index + 1).map(|col| col.status.clone())
    }
}
