use super::types::{FilterCondition, SqlParam, SEARCH_COLUMNS};

/// Escape character used in generated LIKE patterns
const LIKE_ESCAPE: char = '\\';

pub struct FilterWhere {
    param_values: Vec<SqlParam>,
}

impl FilterWhere {
    /// Render conditions as a WHERE body (without the keyword) plus bound parameters.
    /// No conditions yields `1=1`.
    pub fn generate(conditions: &[FilterCondition]) -> (String, Vec<SqlParam>) {
        let mut filter_where = Self { param_values: vec![] };
        let sql_conditions: Vec<String> = conditions
            .iter()
            .map(|c| filter_where.build_sql_condition(c))
            .collect();

        let where_clause = if sql_conditions.is_empty() {
            "1=1".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        (where_clause, filter_where.param_values)
    }

    fn build_sql_condition(&mut self, condition: &FilterCondition) -> String {
        match condition {
            FilterCondition::Active(flag) => {
                format!("\"is_active\" = {}", self.param(SqlParam::Bool(*flag)))
            }
            FilterCondition::Search(term) => {
                // Pattern and column both fold through SQLite's lower()
                let pattern = format!("%{}%", escape_like(term));
                let parts: Vec<String> = SEARCH_COLUMNS
                    .iter()
                    .map(|column| {
                        format!(
                            "lower(\"{}\") LIKE lower({}) ESCAPE '{}'",
                            column,
                            self.param(SqlParam::Text(pattern.clone())),
                            LIKE_ESCAPE
                        )
                    })
                    .collect();
                format!("({})", parts.join(" OR "))
            }
        }
    }

    fn param(&mut self, value: SqlParam) -> &'static str {
        self.param_values.push(value);
        "?"
    }
}

/// Make `%`, `_` and the escape character match literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
