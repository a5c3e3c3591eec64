use client::grid::{
    filters_label, page_items, parse_go_to_page, ActionsLayout, EmptyState, GridQuery, PageItem,
    Selection, SortState,
};

fn render(items: &[PageItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_page_window() {
    assert_eq!(render(&page_items(1, 20)), "1 2 3 4 5 ... 20");
    assert_eq!(render(&page_items(18, 20)), "1 ... 16 17 18 19 20");
    assert_eq!(render(&page_items(10, 20)), "1 ... 9 10 11 ... 20");
    assert_eq!(render(&page_items(3, 7)), "1 2 3 4 5 6 7");
    assert_eq!(render(&page_items(1, 0)), "1");
}

#[test]
fn test_sort_toggle() {
    let mut sort = SortState::new("name");
    sort.toggle("name");
    assert!(sort.descending);

    sort.toggle("email");
    assert_eq!(sort.sort_by, "email");
    assert!(!sort.descending);
}

#[test]
fn test_select_all_covers_current_page() {
    let page_one = vec!["a".to_string(), "b".to_string()];
    let page_two = vec!["c".to_string()];
    let mut selection = Selection::default();

    selection.set_page(&page_one, true);
    assert!(selection.covers(&page_one));
    assert!(!selection.covers(&page_two));

    selection.toggle("a");
    assert!(!selection.is_selected("a"));
    assert_eq!(selection.len(), 1);

    selection.set_page(&page_one, false);
    assert!(selection.is_empty());
}

#[test]
fn test_actions_layout() {
    assert_eq!(ActionsLayout::for_count(0), ActionsLayout::None);
    assert_eq!(ActionsLayout::for_count(1), ActionsLayout::Single);
    assert_eq!(ActionsLayout::for_count(3), ActionsLayout::Menu);
}

#[test]
fn test_go_to_page_accepts_only_valid_pages() {
    assert_eq!(parse_go_to_page("3", 5), Some(3));
    assert_eq!(parse_go_to_page(" 5 ", 5), Some(5));
    assert_eq!(parse_go_to_page("0", 5), None);
    assert_eq!(parse_go_to_page("6", 5), None);
    assert_eq!(parse_go_to_page("two", 5), None);
}

#[test]
fn test_query_resets_page_on_search_and_limit() {
    let mut query = GridQuery::new("name");
    query.set_total_pages(4);

    assert!(query.go_to(3));
    assert!(!query.go_to(5));
    assert_eq!(query.page, 3);

    query.set_search("ana");
    assert_eq!(query.page, 1);
    assert_eq!(query.search_term().as_deref(), Some("ana"));

    query.go_to(2);
    query.set_limit(50);
    assert_eq!(query.page, 1);
    assert_eq!(query.limit, 50);
}

#[test]
fn test_empty_state_and_filters_label() {
    assert_eq!(EmptyState::new("", 0), EmptyState::NoRecordsToDisplay);
    assert_eq!(EmptyState::new("x", 0), EmptyState::NoMatchingRecords);
    assert_eq!(EmptyState::new(" ", 1), EmptyState::NoMatchingRecords);
    assert_eq!(filters_label(0), "Filters");
    assert_eq!(filters_label(2), "Filters (2)");
}
