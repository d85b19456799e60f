//! Query Parameter Normalization
//!
//! Turns the raw, untrusted list query into a validated [`QueryParams`].
//! Nothing here ever fails: out-of-range numbers are clamped and unknown
//! sort options fall back to their defaults.

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

// == Sort Field ==
/// Customer attribute a result set can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    #[default]
    Name,
    Email,
    Status,
    Revenue,
    OrderCount,
    CreatedAt,
}

impl SortField {
    /// Exact, case-sensitive match on the wire name; anything else is `Name`.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "name" => SortField::Name,
            "email" => SortField::Email,
            "status" => SortField::Status,
            "revenue" => SortField::Revenue,
            "orderCount" => SortField::OrderCount,
            "createdAt" => SortField::CreatedAt,
            _ => SortField::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Status => "status",
            SortField::Revenue => "revenue",
            SortField::OrderCount => "orderCount",
            SortField::CreatedAt => "createdAt",
        }
    }
}

// == Sort Order ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// `desc` selects descending; every other value is ascending.
    pub fn parse_or_default(value: &str) -> Self {
        if value == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

// == Raw Query ==
/// Query string of `GET /api/customers`, exactly as the caller sent it.
#[derive(Debug, Clone, Default)]
pub struct ListCustomersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub search: Option<String>,
}

impl ListCustomersQuery {
    // == From Pairs ==
    /// Builds the raw query from decoded `key=value` pairs.
    ///
    /// The first occurrence of a key wins and unknown keys are ignored, so a
    /// repeated or stray parameter never discards the others.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "sortBy" => &mut query.sort_by,
                "order" => &mut query.order,
                "search" => &mut query.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    // == Normalize ==
    /// Applies the defaulting and clamping policy.
    pub fn normalize(&self) -> QueryParams {
        let page = self
            .page
            .as_deref()
            .and_then(parse_leading_int)
            .map(|n| n.max(1) as usize)
            .unwrap_or(DEFAULT_PAGE);

        let limit = self
            .limit
            .as_deref()
            .and_then(parse_leading_int)
            .map(|n| n.clamp(1, MAX_LIMIT as i64) as usize)
            .unwrap_or(DEFAULT_LIMIT);

        QueryParams {
            page,
            limit,
            sort_field: self
                .sort_by
                .as_deref()
                .map(SortField::parse_or_default)
                .unwrap_or_default(),
            sort_order: self
                .order
                .as_deref()
                .map(SortOrder::parse_or_default)
                .unwrap_or_default(),
            search: self
                .search
                .as_deref()
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default(),
        }
    }
}

// == Query Params ==
/// Validated list query.
///
/// `page >= 1`, `1 <= limit <= 100`, `search` is trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub page: usize,
    pub limit: usize,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub search: String,
}

impl Default for QueryParams {
    fn default() -> Self {
        ListCustomersQuery::default().normalize()
    }
}

impl QueryParams {
    /// Key of the cached result set. Page and limit are not part of it.
    pub fn cache_key(&self) -> QueryKey {
        QueryKey {
            search: self.search.clone(),
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        }
    }
}

// == Query Key ==
/// Identity of a filtered and sorted result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub search: String,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.search,
            self.sort_field.as_str(),
            self.sort_order.as_str()
        )
    }
}

/// Parses the leading integer of `value`, ignoring any trailing text.
///
/// `"12"`, `" 12abc"` and `"12.9"` all give 12. Returns `None` when no digits
/// lead the string. Values too large for `i64` saturate.
fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
