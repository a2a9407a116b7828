//! Collection queries in json-server form.
//!
//! A [`Query`] is a list of exact-match field filters plus an optional sort,
//! rendered as `field=value` pairs and `_sort`/`_order` parameters.

/// Sort direction for `_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filter and sort parameters for listing a collection.
///
/// ```
/// use snapshare::remote::Query;
///
/// let query = Query::new().eq("userId", "7").sort_desc("createdAt");
/// assert_eq!(
///     query.to_pairs(),
///     vec![
///         ("userId".to_string(), "7".to_string()),
///         ("_sort".to_string(), "createdAt".to_string()),
///         ("_order".to_string(), "desc".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<(String, String)>,
    sort: Option<(String, Order)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact-match filter. All filters must match.
    #[must_use]
    pub fn eq(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((field.into(), value.to_string()));
        self
    }

    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: Order) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    #[must_use]
    pub fn sort_desc(self, field: impl Into<String>) -> Self {
        self.sort(field, Order::Desc)
    }

    #[must_use]
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    #[must_use]
    pub fn sort_key(&self) -> Option<(&str, Order)> {
        self.sort.as_ref().map(|(field, order)| (field.as_str(), *order))
    }

    /// Query-string pairs in the order json-server expects them.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some((field, order)) = &self.sort {
            pairs.push(("_sort".to_string(), field.clone()));
            pairs.push(("_order".to_string(), order.as_str().to_string()));
        }
        pairs
    }
}
