pub mod board;
pub mod record;
pub mod sorting;
pub mod table;
pub mod view;

pub use board::{
    columns_of, filter_by_status, move_item, resolve_drop_target, Board, BoardColumn, BoardConfig,
    BoardItem, ColumnView, DragIntent, ItemId, Status, StatusFilter,
};
pub use record::{Record, Value};
pub use sorting::{compare_values, sort_records, toggle_sort, SortDirection};
pub use table::{Formatter, TableColumn, TableLayout};
pub use view::{filter, page_window, paginate, view, Page, ViewConfig};
