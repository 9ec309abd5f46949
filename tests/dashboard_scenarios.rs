use dashboard_core::domain::table::{TableColumn, TableLayout};
use dashboard_core::domain::{columns_of, filter_by_status, move_item, view, StatusFilter};
use dashboard_core::{
    Board, BoardItem, DashboardError, DragIntent, ItemId, Record, SortDirection, Status, Value,
    ViewConfig,
};

fn users(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new()
                .with("id", i as i64)
                .with("name", format!("User {:02}", i))
                .with("role", if i % 3 == 0 { "Admin" } else { "Editor" })
        })
        .collect()
}

fn ids(page: &[&Record]) -> Vec<i64> {
    page.iter()
        .filter_map(|r| match r.get("id") {
            Some(Value::Int(n)) => Some(*n),
            _ => None,
        })
        .collect()
}

#[test]
fn test_twenty_five_records_paginate_into_three_pages() {
    let records = users(25);
    let config = ViewConfig::default();

    let first = view(&records, &config).unwrap();
    assert_eq!(first.total_pages, 3);
    assert_eq!(ids(&first.items), (0..10).collect::<Vec<_>>());
    assert_eq!((first.range_start, first.range_end), (1, 10));

    let clamped = view(&records, &config.clone().with_page(5)).unwrap();
    assert_eq!(clamped.page_number, 3);
    assert_eq!(ids(&clamped.items), (20..25).collect::<Vec<_>>());
    assert_eq!(clamped.range_end, 25);
    assert_eq!(clamped.summary(), "Showing 21 to 25 of 25 results");
}

#[test]
fn test_search_report_matches_case_insensitively() {
    let records = vec![
        Record::new().with("title", "Monthly Report").with("pages", 12),
        Record::new().with("title", "Budget").with("pages", 3),
    ];

    let hit = view(&records, &ViewConfig::default().with_query("report")).unwrap();
    assert_eq!(hit.items, vec![&records[0]]);

    let miss = view(&records, &ViewConfig::default().with_query("xyz")).unwrap();
    assert!(miss.items.is_empty());
    assert_eq!(miss.total_pages, 1);
    assert_eq!((miss.range_start, miss.range_end), (0, 0));
}

#[test]
fn test_header_clicks_drive_sorting() {
    let records = users(12);
    let layout = TableLayout::new(vec![
        TableColumn::new("name", "Name").sortable(),
        TableColumn::new("role", "Role").sortable(),
    ]);

    let config = layout.toggle_sort(&ViewConfig::default(), "name");
    let config = layout.toggle_sort(&config, "name");
    assert_eq!(config.sort_direction, SortDirection::Descending);

    let page = view(&records, &config).unwrap();
    assert_eq!(ids(&page.items)[0], 11);

    let by_role = layout.toggle_sort(&config, "role");
    let page = view(&records, &by_role.with_page_size(20)).unwrap();
    let admins: Vec<i64> = ids(&page.items).into_iter().take(4).collect();
    assert_eq!(admins, vec![0, 3, 6, 9]);
}

#[test]
fn test_search_then_sort_then_page() {
    let records = users(30);
    let config = ViewConfig::default()
        .with_query("admin")
        .with_sort("id", SortDirection::Descending)
        .with_page_size(4);

    let page = view(&records, &config).unwrap();

    assert_eq!(page.total_count, 10);
    assert_eq!(page.total_pages, 3);
    assert_eq!(ids(&page.items), vec![27, 24, 21, 18]);

    let last = view(&records, &config.next_page(page.total_pages).next_page(3)).unwrap();
    assert_eq!(ids(&last.items), vec![3, 0]);
    assert_eq!(last.window(), vec![1, 2, 3]);
}

#[test]
fn test_records_from_json_feed_the_view() {
    let records = Record::list_from_json_str(
        r#"[
            {"name": "Ann", "lastLogin": "2024-03-01", "visits": 4},
            {"name": "Bob", "lastLogin": "2024-01-15"},
            {"name": "Cy", "lastLogin": "2024-02-10", "visits": 9}
        ]"#,
    )
    .unwrap();

    let config = ViewConfig::default().with_sort("visits", SortDirection::Descending);
    let page = view(&records, &config).unwrap();

    let names: Vec<String> = page
        .items
        .iter()
        .filter_map(|r| r.get("name").map(Value::to_text))
        .collect();
    assert_eq!(names, vec!["Cy", "Ann", "Bob"]);
}

#[test]
fn test_kanban_move_appends_to_done_column() {
    let items = vec![BoardItem::new("1", "todo"), BoardItem::new("2", "done")];
    let order = vec![Status::from("todo"), Status::from("done")];

    let moved = move_item(&items, &ItemId::from("1"), &Status::from("done")).unwrap();

    let columns = columns_of(&moved, &order);
    let done: Vec<&str> = columns[1].1.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(done, vec!["2", "1"]);
    assert_eq!(moved[1].status, Status::from("done"));
}

#[test]
fn test_kanban_drag_session() {
    let board = Board::default();
    let mut items = BoardItem::list_from_json_str(
        r#"[
            {"id": "t1", "status": "todo", "title": "Design review", "priority": "high"},
            {"id": "t2", "status": "in-progress", "title": "API docs", "priority": "low"},
            {"id": "t3", "status": "todo", "title": "Bug bash", "priority": "medium"}
        ]"#,
    )
    .unwrap();

    items = board
        .apply_drag(&items, &DragIntent::new("t1", Some("in-progress")))
        .unwrap();
    items = board
        .apply_drag(&items, &DragIntent::new("t3", Some("t2")))
        .unwrap();

    let columns = board.columns(&items);
    assert!(columns[0].items.is_empty());
    let in_progress: Vec<&str> = columns[1].items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(in_progress, vec!["t2", "t1", "t3"]);

    let unchanged = board
        .apply_drag(&items, &DragIntent::new("t2", None))
        .unwrap();
    assert_eq!(unchanged, items);

    let missing = board.apply_drag(&items, &DragIntent::new("t9", Some("done")));
    assert!(matches!(missing, Err(DashboardError::ItemNotFound(_))));
}

#[test]
fn test_task_list_tabs_and_advance() {
    let board = Board::default();
    let items = vec![
        BoardItem::new("1", "todo"),
        BoardItem::new("2", "in-progress"),
        BoardItem::new("3", "todo"),
    ];

    let todo = filter_by_status(&items, &StatusFilter::Only(Status::from("todo")));
    assert_eq!(todo.len(), 2);

    let next = board.next_status(&items[0].status).unwrap();
    let advanced = board.move_item(&items, &items[0].id, &next).unwrap();

    let counts: Vec<usize> = board
        .column_counts(&advanced)
        .into_iter()
        .map(|(_, n)| n)
        .collect();
    assert_eq!(counts, vec![1, 2, 0]);
}
