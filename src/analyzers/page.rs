use crate::analyzers::types::{Page, StudentRecord};

/// Students per page of the list view.
pub const PAGE_SIZE: usize = 20;

/// Returns the 1-based `page` of `records` in load order.
///
/// Pages past the end, and page 0, yield an empty slice rather than an error.
pub fn paginate(records: &[StudentRecord], page: usize) -> Page<'_> {
    let total_pages = records.len().div_ceil(PAGE_SIZE);

    let students = match page.checked_sub(1) {
        Some(idx) => {
            let start = idx.saturating_mul(PAGE_SIZE);
            if start >= records.len() {
                &records[..0]
            } else {
                &records[start..(start + PAGE_SIZE).min(records.len())]
            }
        }
        None => &records[..0],
    };

    Page {
        page,
        page_size: PAGE_SIZE,
        total_pages,
        total_students: records.len(),
        students,
    }
}
