//! Category filtering and text search over listed cards.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(String),
}

impl CategoryFilter {
    /// Value of a filter button's `data-category`; a missing one means `all`.
    pub fn from_button(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(other) => CategoryFilter::Category(other.to_owned()),
        }
    }

    /// Whether a card tagged with `category` stays visible.
    ///
    /// Untagged cards only show under `All`.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// Case-insensitive substring search over a sermon's title and series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SermonQuery {
    needle: String,
}

impl SermonQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    pub fn matches(&self, title: Option<&str>, series: Option<&str>) -> bool {
        let title = title.unwrap_or_default().to_lowercase();
        let series = series.unwrap_or_default().to_lowercase();
        title.contains(&self.needle) || series.contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shows_everything() {
        let f = CategoryFilter::from_button(Some("all"));
        assert!(f.matches(Some("youth")));
        assert!(f.matches(None));
        assert_eq!(CategoryFilter::from_button(None), CategoryFilter::All);
    }

    #[test]
    fn category_matches_exactly() {
        let f = CategoryFilter::from_button(Some("youth"));
        assert!(f.matches(Some("youth")));
        assert!(!f.matches(Some("Youth")));
        assert!(!f.matches(Some("worship")));
        assert!(!f.matches(None));
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_series() {
        let q = SermonQuery::new("GRACE");
        assert!(q.matches(Some("Amazing Grace"), None));
        assert!(q.matches(Some("Faith"), Some("grace & truth")));
        assert!(!q.matches(Some("Faith"), Some("Hope")));
        assert!(!q.matches(None, None));
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = SermonQuery::new("");
        assert!(q.matches(None, None));
        assert!(q.matches(Some("Anything"), None));
    }
}
