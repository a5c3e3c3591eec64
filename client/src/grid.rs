use std::collections::BTreeSet;
use std::fmt;

pub const RESULTS_PER_PAGE_OPTIONS: [u32; 4] = [10, 25, 50, 100];
pub const DEFAULT_RESULTS_PER_PAGE: u32 = 10;

/// Pager windows wider than this collapse into ellipses.
const FULL_PAGER_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(page) => write!(f, "{page}"),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Buttons rendered by the pager for `current` out of `total` pages.
pub fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    let total = total.max(1);
    if total <= FULL_PAGER_LIMIT {
        return (1..=total).map(PageItem::Page).collect();
    }
    let mut items = Vec::with_capacity(7);
    if current <= 4 {
        items.extend((1..=5).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    } else if current > total - 4 {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((total - 4..=total).map(PageItem::Page));
    } else {
        items.push(PageItem::Page(1));
        items.push(PageItem::Ellipsis);
        items.extend((current - 1..=current + 1).map(PageItem::Page));
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(total));
    }
    items
}

/// "Go to page" input. Anything but an integer within range is ignored.
pub fn parse_go_to_page(input: &str, total_pages: u32) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|page| (1..=total_pages).contains(page))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub sort_by: String,
    pub descending: bool,
}

impl SortState {
    pub fn new(sort_by: impl Into<String>) -> Self {
        SortState {
            sort_by: sort_by.into(),
            descending: false,
        }
    }

    /// Same column flips direction, a new column sorts ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.sort_by == column {
            self.descending = !self.descending;
        } else {
            self.sort_by = column.to_owned();
            self.descending = false;
        }
    }
}

/// Selected row ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    pub fn toggle(&mut self, id: &str) {
        if !self.0.remove(id) {
            self.0.insert(id.to_owned());
        }
    }

    /// Select-all only ever covers the rows of the current page.
    pub fn set_page(&mut self, page_ids: &[String], checked: bool) {
        self.0.clear();
        if checked {
            self.0.extend(page_ids.iter().cloned());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn covers(&self, page_ids: &[String]) -> bool {
        !page_ids.is_empty() && page_ids.iter().all(|id| self.0.contains(id))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionsLayout {
    None,
    /// A single icon button.
    Single,
    /// A dropdown menu.
    Menu,
}

impl ActionsLayout {
    pub fn for_count(actions: usize) -> Self {
        match actions {
            0 => ActionsLayout::None,
            1 => ActionsLayout::Single,
            _ => ActionsLayout::Menu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoMatchingRecords,
    NoRecordsToDisplay,
}

impl EmptyState {
    pub fn new(search: &str, applied_filters: usize) -> Self {
        if !search.trim().is_empty() || applied_filters > 0 {
            EmptyState::NoMatchingRecords
        } else {
            EmptyState::NoRecordsToDisplay
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoMatchingRecords => "No matching records found",
            EmptyState::NoRecordsToDisplay => "No records to display",
        }
    }
}

pub fn filters_label(applied_filters: usize) -> String {
    if applied_filters == 0 {
        "Filters".to_owned()
    } else {
        format!("Filters ({applied_filters})")
    }
}

/// Paging, search and sort state behind a data grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridQuery {
    pub search: String,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub sort: SortState,
}

impl GridQuery {
    pub fn new(sort_by: impl Into<String>) -> Self {
        GridQuery {
            search: String::new(),
            page: 1,
            limit: DEFAULT_RESULTS_PER_PAGE,
            total_pages: 1,
            sort: SortState::new(sort_by),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Moves to `page`, returning whether it was within range.
    pub fn go_to(&mut self, page: u32) -> bool {
        if (1..=self.total_pages).contains(&page) {
            self.page = page;
            true
        } else {
            false
        }
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
        self.page = 1;
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }

    pub fn search_term(&self) -> Option<String> {
        let search = self.search.trim();
        (!search.is_empty()).then(|| search.to_owned())
    }
}
