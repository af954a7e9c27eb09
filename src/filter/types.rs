/// Raw list criteria as they arrive on the query string (`?active=&search=`)
#[derive(Debug, Clone, Default)]
pub struct FilterData {
    pub active: Option<String>,
    pub search: Option<String>,
}

impl FilterData {
    /// Collect criteria from decoded query pairs. The first occurrence of a key wins;
    /// unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut data = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "active" if data.active.is_none() => data.active = Some(value),
                "search" if data.search.is_none() => data.search = Some(value),
                _ => {}
            }
        }
        data
    }
}

/// Columns the free-text search looks in
pub const SEARCH_COLUMNS: &[&str] = &["first_name", "last_name", "email"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCondition {
    /// `is_active` equals the normalized flag
    Active(bool),
    /// Case-insensitive substring match over [`SEARCH_COLUMNS`]
    Search(String),
}

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Bool(bool),
    Text(String),
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

/// Forgiving boolean parse for the active flag.
///
/// "true", "1" and "yes" in any case are true; every other string, including the
/// empty string, is false. Never fails.
pub fn parse_active_flag(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "true" | "1" | "yes")
}
