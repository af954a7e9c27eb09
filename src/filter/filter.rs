use super::filter_where::FilterWhere;
use super::types::{parse_active_flag, FilterCondition, FilterData, SqlResult};

/// Selection over the employees table built from optional list criteria
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<FilterCondition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, data: FilterData) -> &mut Self {
        if let Some(active) = data.active {
            self.active(&active);
        }
        if let Some(search) = data.search {
            self.search(&search);
        }
        self
    }

    /// Present-but-unrecognized values (including "") select inactive records.
    pub fn active(&mut self, raw: &str) -> &mut Self {
        self.conditions.push(FilterCondition::Active(parse_active_flag(raw)));
        self
    }

    /// An empty search term adds no condition.
    pub fn search(&mut self, term: &str) -> &mut Self {
        if !term.is_empty() {
            self.conditions.push(FilterCondition::Search(term.to_string()));
        }
        self
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn to_sql(&self, select_clause: &str) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.conditions);
        SqlResult {
            query: format!("{} WHERE {}", select_clause, where_clause),
            params,
        }
    }
}

impl From<FilterData> for Filter {
    fn from(data: FilterData) -> Self {
        let mut filter = Filter::new();
        filter.assign(data);
        filter
    }
}
