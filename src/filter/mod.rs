use crate::model::SchoolRecord;

/// How the search text is matched against a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// One query matched against school name or region name.
    #[default]
    NameOrRegion,
    /// Independent name and city filters, both optional, combined with AND.
    NameAndCity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub name: String,
    /// Only consulted in [`SearchMode::NameAndCity`]; matched against the
    /// county field.
    pub city: String,
}

impl SearchQuery {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: String::new(),
        }
    }

    pub fn fields(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }

    pub fn is_empty(&self, mode: SearchMode) -> bool {
        match mode {
            SearchMode::NameOrRegion => self.name.trim().is_empty(),
            SearchMode::NameAndCity => self.name.trim().is_empty() && self.city.trim().is_empty(),
        }
    }
}

fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn matches(record: &SchoolRecord, query: &SearchQuery, mode: SearchMode) -> bool {
    let name = query.name.trim().to_lowercase();
    match mode {
        SearchMode::NameOrRegion => {
            name.is_empty()
                || contains_folded(&record.name, &name)
                || contains_folded(&record.region, &name)
        }
        SearchMode::NameAndCity => {
            let city = query.city.trim().to_lowercase();
            (name.is_empty() || contains_folded(&record.name, &name))
                && (city.is_empty() || contains_folded(&record.county, &city))
        }
    }
}

/// Indices into `records` that match, in source order. The collection itself
/// is never touched.
pub fn filter_indices(records: &[SchoolRecord], query: &SearchQuery, mode: SearchMode) -> Vec<usize> {
    if query.is_empty(mode) {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches(r, query, mode))
        .map(|(idx, _)| idx)
        .collect()
}
