use serde::Serialize;

const LEFT_EDGE: usize = 2;
const LEFT_CURRENT: usize = 2;
const RIGHT_CURRENT: usize = 4;
const RIGHT_EDGE: usize = 2;

fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + LEFT_EDGE).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(LEFT_CURRENT));
    let mid_end = (current_page + RIGHT_CURRENT + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(RIGHT_EDGE) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Facts derived from (total, limit, page). `has_next`/`has_prev` are always
/// recomputed from these three inputs, never read off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    /// 1-based inclusive bounds of the rows on display, `(0, 0)` when the
    /// result set is empty.
    pub first_row: usize,
    pub last_row: usize,
    pub is_empty: bool,
}

impl PageInfo {
    pub fn new(total: usize, limit: usize, page: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 1 } else { total.div_ceil(limit) };
        let (first_row, last_row) = if total == 0 {
            (0, 0)
        } else {
            ((page - 1) * limit + 1, (page * limit).min(total))
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
            first_row,
            last_row,
            is_empty: total == 0,
        }
    }

    /// Pager links with `None` marking an ellipsis gap.
    pub fn links(&self) -> Vec<Option<usize>> {
        page_links(self.total_pages, self.page)
    }
}

/// One page of results as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: usize, limit: usize, total: usize) -> Self {
        let page = if page == 0 { 1 } else { page };

        Self {
            items,
            page,
            limit,
            total,
        }
    }

    pub fn info(&self) -> PageInfo {
        PageInfo::new(self.total, self.limit, self.page)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
