//! Result ordering.

/// Sort direction of one ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// An ordered list of `(column, direction)` terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBy {
    terms: Vec<(String, SortOrder)>,
}

impl OrderBy {
    /// Orders by `column` ascending.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::default().then_asc(column)
    }

    /// Orders by `column` descending.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::default().then_desc(column)
    }

    /// Adds an ascending tie-breaker.
    pub fn then_asc(self, column: impl Into<String>) -> Self {
        self.then(column, SortOrder::Asc)
    }

    /// Adds a descending tie-breaker.
    pub fn then_desc(self, column: impl Into<String>) -> Self {
        self.then(column, SortOrder::Desc)
    }

    /// Adds a tie-breaker with an explicit direction.
    pub fn then(mut self, column: impl Into<String>, direction: SortOrder) -> Self {
        self.terms.push((column.into(), direction));
        self
    }

    /// The ordering terms, most significant first.
    pub fn terms(&self) -> &[(String, SortOrder)] {
        &self.terms
    }

    /// Returns `true` when no term is set.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SortOrder)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (S, SortOrder)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(OrderBy::default(), |order, (column, direction)| {
                order.then(column, direction)
            })
    }
}
