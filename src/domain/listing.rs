//! Filtered, sorted and paginated listing primitives.
//!
//! A [`ListQuery`] is the normalised form of a page request: search text,
//! a sort column taken from a per-entity allow-list, a direction, and
//! page/page-size already clamped to valid values. Repositories turn it into
//! SQL; services wrap the results in a [`Page`].

use serde::Serialize;

/// Upper bound on search text length.
pub const MAX_SEARCH_LEN: usize = 255;

/// A column a listing may be ordered by.
///
/// Implemented by small enums, one per listable entity. Only the variants of
/// the enum can reach the SQL layer, so the column name is never user input.
pub trait SortField: Copy + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Accepted external names, in the order they are advertised.
    const ALLOWED: &'static [&'static str];

    /// Parses an external name (case-insensitive).
    fn parse(raw: &str) -> Option<Self>;

    /// The SQL column this field sorts by.
    fn column(self) -> &'static str;
}

/// Sort direction. Anything unrecognised falls back to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Lenient parse: `desc` in any case is descending, everything else
    /// (including empty or missing input) is ascending.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Page size bounds applied while normalising a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl PageLimits {
    /// Resolves a requested page size: missing or zero means the default,
    /// anything above the maximum is clamped.
    pub fn resolve_page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => self.default_page_size,
            Some(size) => size.min(self.max_page_size),
        }
    }
}

/// A normalised page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F: SortField> {
    /// Substring to look for in the entity's search column. `None` means no filter.
    pub search: Option<String>,
    pub sort_by: F,
    pub direction: SortDirection,
    /// 1-indexed.
    pub page: u32,
    pub page_size: u32,
}

impl<F: SortField> Default for ListQuery<F> {
    fn default() -> Self {
        let limits = PageLimits::default();
        Self {
            search: None,
            sort_by: F::default(),
            direction: SortDirection::Asc,
            page: 1,
            page_size: limits.default_page_size,
        }
    }
}

impl<F: SortField> ListQuery<F> {
    /// Creates a query for the given page with default ordering and no filter.
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.is_empty()).then_some(search);
        self
    }

    pub fn with_sort(mut self, sort_by: F, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.direction = direction;
        self
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    /// `LIKE` pattern matching the search text anywhere in the column.
    ///
    /// `%`, `_` and `\` in the search text are escaped, so they match
    /// literally. The match is case-sensitive.
    pub fn like_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_contains)
    }
}

/// Builds a case-sensitive "contains" pattern for `LIKE ... ESCAPE '\'`.
pub fn like_contains(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: i64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: i64) -> Self {
        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages: total_pages(total_count, page_size),
        }
    }

    /// Converts the items while keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / page_size)`, zero when there is nothing to show.
pub fn total_pages(total_count: i64, page_size: u32) -> u32 {
    if total_count <= 0 || page_size == 0 {
        return 0;
    }
    let page_size = i64::from(page_size);
    u32::try_from((total_count + page_size - 1) / page_size).unwrap_or(u32::MAX)
}

/// Sort columns for users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSort {
    Username,
    Email,
    #[default]
    CreatedAt,
}

impl SortField for UserSort {
    const ALLOWED: &'static [&'static str] = &["username", "email", "created_at"];

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Email => "email",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sort columns for short links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShortLinkSort {
    ShortCode,
    TargetUrl,
    #[default]
    CreatedAt,
}

impl SortField for ShortLinkSort {
    const ALLOWED: &'static [&'static str] = &["short_code", "target_url", "created_at"];

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "short_code" => Some(Self::ShortCode),
            "target_url" => Some(Self::TargetUrl),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::ShortCode => "short_code",
            Self::TargetUrl => "target_url",
            Self::CreatedAt => "created_at",
        }
    }
}

/// Sort columns for banned domains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannedDomainSort {
    Url,
    #[default]
    CreatedAt,
}

impl SortField for BannedDomainSort {
    const ALLOWED: &'static [&'static str] = &["url", "created_at"];

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "url" => Some(Self::Url),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::CreatedAt => "created_at",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_limit() {
        let q = ListQuery::<ShortLinkSort>::page(2, 10);
        assert_eq!(q.offset(), 10);
        assert_eq!(q.limit(), 10);

        let first = ListQuery::<ShortLinkSort>::page(1, 25);
        assert_eq!(first.offset(), 0);
    }

    #[test]
    fn test_page_zero_becomes_first_page() {
        let q = ListQuery::<UserSort>::page(0, 10);
        assert_eq!(q.page, 1);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1; 10], 2, 10, 25);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page::new(vec![1, 2, 3], 1, 3, 7).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20, 30]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_sort_direction_is_case_insensitive() {
        assert_eq!(SortDirection::parse_lenient(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse_lenient(Some("AsC")), SortDirection::Asc);
    }

    #[test]
    fn test_sort_direction_falls_back_to_ascending() {
        assert_eq!(SortDirection::parse_lenient(None), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("")), SortDirection::Asc);
        assert_eq!(SortDirection::parse_lenient(Some("sideways")), SortDirection::Asc);
    }

    #[test]
    fn test_sort_fields_default_to_creation_time() {
        assert_eq!(ShortLinkSort::default().column(), "created_at");
        assert_eq!(BannedDomainSort::default().column(), "created_at");
        assert_eq!(UserSort::default().column(), "created_at");
    }

    #[test]
    fn test_sort_field_allow_list() {
        assert_eq!(ShortLinkSort::parse("TARGET_URL"), Some(ShortLinkSort::TargetUrl));
        assert_eq!(ShortLinkSort::parse("user_id"), None);
        assert_eq!(BannedDomainSort::parse("url"), Some(BannedDomainSort::Url));
        assert_eq!(BannedDomainSort::parse("short_code"), None);
        for name in ShortLinkSort::ALLOWED {
            assert!(ShortLinkSort::parse(name).is_some());
        }
    }

    #[test]
    fn test_empty_search_means_no_filter() {
        let q = ListQuery::<ShortLinkSort>::default().with_search("");
        assert!(q.search.is_none());
        assert!(q.like_pattern().is_none());
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_contains("abc"), "%abc%");
        assert_eq!(like_contains("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_contains("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_page_size_resolution() {
        let limits = PageLimits {
            default_page_size: 10,
            max_page_size: 100,
        };
        assert_eq!(limits.resolve_page_size(None), 10);
        assert_eq!(limits.resolve_page_size(Some(0)), 10);
        assert_eq!(limits.resolve_page_size(Some(25)), 25);
        assert_eq!(limits.resolve_page_size(Some(5000)), 100);
    }
}
