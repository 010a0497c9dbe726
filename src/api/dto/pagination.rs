//! Listing query parameters.

use serde::Deserialize;
use serde_json::json;
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::domain::listing::{
    ListQuery, MAX_SEARCH_LEN, PageLimits, SortDirection, SortField,
};
use crate::error::AppError;

/// Query string of every paginated listing endpoint.
///
/// `page` and `page_size` are lenient: values that do not parse as positive
/// integers fall back to the defaults instead of failing the request.
///
/// `order_by`, `order_type` and `limit` are accepted as older names for
/// `sort_by`, `sort_order` and `page_size`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default, alias = "order_by")]
    pub sort_by: Option<String>,

    #[serde(default, alias = "order_type")]
    pub sort_order: Option<String>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default, alias = "limit")]
    pub page_size: Option<u32>,
}

impl ListParams {
    /// Normalises the parameters for sort field type `F`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `sort_by` names a column outside
    /// `F`'s allow-list or `search` is too long.
    pub fn into_query<F: SortField>(self, limits: &PageLimits) -> Result<ListQuery<F>, AppError> {
        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            None | Some("") => F::default(),
            Some(raw) => F::parse(raw).ok_or_else(|| {
                AppError::bad_request(
                    "Invalid sort field",
                    json!({ "sort_by": raw, "allowed": F::ALLOWED }),
                )
            })?,
        };

        let search = self.search.unwrap_or_default();
        if search.chars().count() > MAX_SEARCH_LEN {
            return Err(AppError::bad_request(
                "Search text is too long",
                json!({ "max": MAX_SEARCH_LEN }),
            ));
        }

        let direction = SortDirection::parse_lenient(self.sort_order.as_deref());
        let page_size = limits.resolve_page_size(self.page_size);

        Ok(ListQuery::page(self.page.unwrap_or(1), page_size)
            .with_search(search)
            .with_sort(sort_by, direction))
    }
}
