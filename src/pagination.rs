//! Page links shown under the product grid.

/// Pages always shown at the start of the list.
const LEFT_EDGE: usize = 2;
/// Pages shown before the current one.
const LEFT_CURRENT: usize = 2;
/// Pages shown after the current one.
const RIGHT_CURRENT: usize = 4;
/// Pages always shown at the end of the list.
const RIGHT_EDGE: usize = 2;

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page numbers to link to, `None` marking a gap.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let current_page = current_page.clamp(1, total_pages.max(1));
    get_pages(
        total_pages,
        current_page,
        LEFT_EDGE,
        LEFT_CURRENT,
        RIGHT_CURRENT,
        RIGHT_EDGE,
    )
}
