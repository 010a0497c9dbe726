//! Shared SQL builders for filtered, paginated listings.

use sqlx::{Postgres, QueryBuilder};

use crate::domain::listing::{ListQuery, SortField};

/// Appends `WHERE <column> LIKE <pattern>` when the query carries search text.
pub(crate) fn push_search<'a, F: SortField>(
    builder: &mut QueryBuilder<'a, Postgres>,
    search_column: &'static str,
    query: &ListQuery<F>,
) {
    if let Some(pattern) = query.like_pattern() {
        builder
            .push(" WHERE ")
            .push(search_column)
            .push(" LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

/// Appends ordering, offset and limit.
///
/// `id` is used as a tiebreaker so rows with equal sort keys do not move
/// between pages.
pub(crate) fn push_order_and_page<'a, F: SortField>(
    builder: &mut QueryBuilder<'a, Postgres>,
    query: &ListQuery<F>,
) {
    let direction = query.direction.as_sql();

    builder
        .push(" ORDER BY ")
        .push(query.sort_by.column())
        .push(" ")
        .push(direction)
        .push(", id ")
        .push(direction)
        .push(" LIMIT ")
        .push_bind(query.limit())
        .push(" OFFSET ")
        .push_bind(query.offset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::listing::{ShortLinkSort, SortDirection};

    #[test]
    fn test_list_sql_without_search() {
        let query = ListQuery::<ShortLinkSort>::page(2, 10);
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM short_links");
        push_search(&mut builder, "short_code", &query);
        push_order_and_page(&mut builder, &query);

        assert_eq!(
            builder.sql(),
            "SELECT id FROM short_links ORDER BY created_at ASC, id ASC LIMIT $1 OFFSET $2"
        );
    }

    #[test]
    fn test_list_sql_with_search_and_sort() {
        let query = ListQuery::<ShortLinkSort>::page(1, 10)
            .with_search("promo")
            .with_sort(ShortLinkSort::TargetUrl, SortDirection::Desc);
        let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM short_links");
        push_search(&mut builder, "short_code", &query);
        push_order_and_page(&mut builder, &query);

        assert_eq!(
            builder.sql(),
            "SELECT id FROM short_links WHERE short_code LIKE $1 ESCAPE '\\' \
             ORDER BY target_url DESC, id DESC LIMIT $2 OFFSET $3"
        );
    }
}
