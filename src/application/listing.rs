//! The filtered listing pipeline.
//!
//! The page fetch and the total count are independent queries sharing the
//! same search predicate. They run concurrently and outside a transaction, so
//! under concurrent writes the count may disagree slightly with the page.

use std::future::Future;

use crate::domain::listing::{ListQuery, Page, SortField};
use crate::error::AppError;

/// Runs the page fetch and the count together and assembles a [`Page`].
///
/// If either query fails the whole operation fails; no partial page is
/// returned.
pub async fn fetch_page<T, F, I, C>(
    query: &ListQuery<F>,
    items: I,
    total: C,
) -> Result<Page<T>, AppError>
where
    F: SortField,
    I: Future<Output = Result<Vec<T>, AppError>>,
    C: Future<Output = Result<i64, AppError>>,
{
    let (items, total_count) = tokio::try_join!(items, total)?;

    Ok(Page::new(items, query.page, query.page_size, total_count))
}
