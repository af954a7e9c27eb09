use chrono::NaiveDate;

use crate::config::DatabaseConfig;
use crate::database::{DatabaseError, DatabaseManager, Employee, EmployeeRepository, NewEmployee};

/// Test utilities: a private in-memory record store per context
pub struct TestContext {
    pub repository: EmployeeRepository,
}

impl TestContext {
    /// Fresh, empty store with the schema bootstrapped
    pub async fn new() -> anyhow::Result<Self> {
        let pool = DatabaseManager::connect(&Self::memory_config())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open in-memory store: {}", e))?;

        Ok(Self {
            repository: EmployeeRepository::new(pool),
        })
    }

    pub fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            connection_timeout: 5,
            enable_query_logging: false,
        }
    }

    /// Insert an employee with a fixed date of birth and no middle name
    pub async fn insert(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        is_active: bool,
    ) -> Result<Employee, DatabaseError> {
        self.repository
            .create(NewEmployee {
                first_name: first_name.to_string(),
                middle_name: None,
                last_name: last_name.to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
                email: email.to_string(),
                is_active,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn contexts_do_not_share_data() {
        let a = TestContext::new().await.unwrap();
        let b = TestContext::new().await.unwrap();

        a.insert("Ann", "Lee", "ann@x.com", true).await.unwrap();
        assert_eq!(a.repository.count().await.unwrap(), 1);
        assert_eq!(b.repository.count().await.unwrap(), 0);
    }
}
