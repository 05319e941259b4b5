// src/utils/search.rs

/// Case-insensitive substring containment. No tokenising, no ranking.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Anything that can be matched by the free-text search.
pub trait Searchable {
    /// Every text field the query is matched against (OR-combined).
    fn search_fields(&self) -> Vec<&str>;

    /// Audience bucket, if the record has one.
    fn age_group(&self) -> Option<&str>;
}

/// Text query plus optional exact age-group filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub age_group: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from raw request values; blank values are ignored.
    pub fn new(query: Option<&str>, age_group: Option<&str>) -> Self {
        let clean = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
        Self {
            query: clean(query),
            age_group: clean(age_group),
        }
    }

    pub fn has_query(&self) -> bool {
        self.query.is_some()
    }

    /// Text match first, then the age group as a conjunction.
    /// Without a query every record passes the text stage.
    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let text_ok = match &self.query {
            Some(q) => item.search_fields().into_iter().any(|f| contains_ci(f, q)),
            None => true,
        };
        let age_ok = match &self.age_group {
            Some(age) => item.age_group() == Some(age.as_str()),
            None => true,
        };
        text_ok && age_ok
    }

    pub fn apply<T: Searchable>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doc {
        fields: Vec<String>,
        age: Option<String>,
    }

    impl Searchable for Doc {
        fn search_fields(&self) -> Vec<&str> {
            self.fields.iter().map(String::as_str).collect()
        }

        fn age_group(&self) -> Option<&str> {
            self.age.as_deref()
        }
    }

    fn doc(fields: &[&str], age: Option<&str>) -> Doc {
        Doc {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            age: age.map(String::from),
        }
    }

    #[test]
    fn matching_ignores_case_including_non_ascii() {
        assert!(contains_ci("Farben lernen", "FARBEN"));
        assert!(contains_ci("ŽIVOTINJE", "živo"));
        assert!(!contains_ci("Colors", "shapes"));
    }

    #[test]
    fn any_field_can_match() {
        let d = doc(&["Colors", "", "Farben"], Some("4-5"));
        assert!(SearchFilter::new(Some("farb"), None).matches(&d));
    }

    #[test]
    fn age_group_is_a_conjunction() {
        let d = doc(&["Colors"], Some("4-5"));
        assert!(SearchFilter::new(Some("col"), Some("4-5")).matches(&d));
        assert!(!SearchFilter::new(Some("col"), Some("6-7")).matches(&d));
        assert!(!SearchFilter::new(Some("col"), Some("4-5")).matches(&doc(&["Colors"], None)));
    }

    #[test]
    fn blank_values_are_ignored() {
        let f = SearchFilter::new(Some("   "), Some(""));
        assert_eq!(f, SearchFilter::default());
        assert!(f.matches(&doc(&["anything"], None)));
    }
}
