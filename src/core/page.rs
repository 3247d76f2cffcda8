//! Fixed-size pagination over the filtered, sorted row set.

use crate::models::PatientRecord;

/// Rows shown per page, matching the table's single rows-per-page option.
pub const PAGE_SIZE: usize = 10;

/// Slice `rows` into the requested zero-based page.
///
/// This does no clamping: callers are responsible for resetting their page
/// index to 0 whenever the row set or any filter changes, and an
/// out-of-range request simply yields an empty page.
pub fn page_slice<'r, 'a>(
    rows: &'r [&'a PatientRecord],
    page: usize,
    page_size: usize,
) -> &'r [&'a PatientRecord] {
    let start = page.saturating_mul(page_size);
    if start >= rows.len() {
        return &[];
    }
    let end = (start + page_size).min(rows.len());
    &rows[start..end]
}

/// Number of pages needed to list `row_count` rows.
pub fn page_count(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}
