use crate::domain::record::{Record, Value};
use crate::domain::sorting::{toggle_sort, SortDirection};
use crate::domain::view::ViewConfig;
use std::fmt;
use std::sync::Arc;

/// Render-time formatter turning a field value into display text
pub type Formatter = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// A table column definition
#[derive(Clone)]
pub struct TableColumn {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub formatter: Option<Formatter>,
}

impl TableColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: false,
            formatter: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn with_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Display text for this column's cell in `record`
    ///
    /// Missing fields render as an empty string and skip the formatter.
    pub fn render(&self, record: &Record) -> String {
        match (record.get(&self.key), &self.formatter) {
            (None, _) => String::new(),
            (Some(value), Some(formatter)) => formatter(value),
            (Some(value), None) => value.to_text(),
        }
    }
}

impl fmt::Debug for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Ordered set of columns a data table renders
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    pub columns: Vec<TableColumn>,
}

impl TableLayout {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self { columns }
    }

    pub fn column(&self, key: &str) -> Option<&TableColumn> {
        self.columns.iter().find(|col| col.key == key)
    }

    pub fn header_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.label.as_str()).collect()
    }

    /// Renders one table row, one cell per column
    pub fn render_row(&self, record: &Record) -> Vec<String> {
        self.columns.iter().map(|col| col.render(record)).collect()
    }

    /// Header click handler: only sortable columns change the config
    pub fn toggle_sort(&self, current: &ViewConfig, key: &str) -> ViewConfig {
        match self.column(key) {
            Some(col) if col.sortable => toggle_sort(current, key),
            _ => current.clone(),
        }
    }

    /// Direction arrow to show on the header of `key`, if it is the active sort
    pub fn sort_indicator(&self, current: &ViewConfig, key: &str) -> Option<SortDirection> {
        let col = self.column(key)?;
        if col.sortable && current.sort_key.as_deref() == Some(key) {
            Some(current.sort_direction)
        } else {
            None
        }
    }
}
