use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::query::QueryAs;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::Employee;
use crate::database::record::{EmployeePayload, NewEmployee};
use crate::filter::{Filter, SqlParam};

const SELECT_EMPLOYEES: &str = "SELECT id, first_name, middle_name, last_name, date_of_birth, email, is_active FROM employees";
const RETURNING_EMPLOYEE: &str = "RETURNING id, first_name, middle_name, last_name, date_of_birth, email, is_active";

/// Record store access for the `employees` table.
///
/// Reads go straight to the pool; every write runs in its own transaction, which is
/// rolled back when dropped uncommitted (including on a constraint failure).
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn select_any(&self, filter: &Filter) -> Result<Vec<Employee>, DatabaseError> {
        let sql = filter.to_sql(SELECT_EMPLOYEES);
        debug!("employee list query: {} ({} params)", sql.query, sql.params.len());

        let mut q = sqlx::query_as::<_, Employee>(&sql.query);
        for p in sql.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<Employee>, DatabaseError> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut *conn, id).await
    }

    pub async fn select_404(&self, id: i64) -> Result<Employee, DatabaseError> {
        self.select_one(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("employee {}", id)))
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Insert a new record; the store assigns the id.
    pub async fn create(&self, new: NewEmployee) -> Result<Employee, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO employees (first_name, middle_name, last_name, date_of_birth, email, is_active) \
             VALUES (?, ?, ?, ?, ?, ?) {}",
            RETURNING_EMPLOYEE
        );
        let inserted = sqlx::query_as::<_, Employee>(&sql)
            .bind(&new.first_name)
            .bind(&new.middle_name)
            .bind(&new.last_name)
            .bind(new.date_of_birth)
            .bind(&new.email)
            .bind(new.is_active)
            .fetch_one(&mut *tx)
            .await;

        let employee = match inserted {
            Ok(employee) => employee,
            Err(e) => {
                tx.rollback().await?;
                return Err(log_write_failure("create", e.into()));
            }
        };
        tx.commit().await?;

        info!("Created employee {} <{}>", employee.id, employee.email);
        Ok(employee)
    }

    /// Apply a partial payload to an existing record.
    ///
    /// Lookup, validation and write share one transaction; any failure leaves the
    /// stored row exactly as it was.
    pub async fn update(&self, id: i64, payload: EmployeePayload) -> Result<Employee, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let mut employee = fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("employee {}", id)))?;
        payload.apply_to(&mut employee)?;

        let sql = format!(
            "UPDATE employees SET first_name = ?, middle_name = ?, last_name = ?, \
             date_of_birth = ?, email = ?, is_active = ? WHERE id = ? {}",
            RETURNING_EMPLOYEE
        );
        let updated = sqlx::query_as::<_, Employee>(&sql)
            .bind(&employee.first_name)
            .bind(&employee.middle_name)
            .bind(&employee.last_name)
            .bind(employee.date_of_birth)
            .bind(&employee.email)
            .bind(employee.is_active)
            .bind(id)
            .fetch_one(&mut *tx)
            .await;

        let employee = match updated {
            Ok(employee) => employee,
            Err(e) => {
                tx.rollback().await?;
                return Err(log_write_failure("update", e.into()));
            }
        };
        tx.commit().await?;

        info!("Updated employee {}", employee.id);
        Ok(employee)
    }

    /// Physically remove a record, returning its state from just before removal.
    pub async fn delete(&self, id: i64) -> Result<Employee, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let employee = fetch_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("employee {}", id)))?;

        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Deleted employee {} ({})", employee.id, employee.display_name());
        Ok(employee)
    }
}

async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Employee>, DatabaseError> {
    let sql = format!("{} WHERE id = ?", SELECT_EMPLOYEES);
    let row = sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(row)
}

fn log_write_failure(operation: &str, err: DatabaseError) -> DatabaseError {
    match &err {
        DatabaseError::UniqueViolation(msg) => warn!("employee {} rejected: {}", operation, msg),
        other => warn!("employee {} failed: {}", operation, other),
    }
    err
}

fn bind_param_query_as<'q, O>(
    q: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    p: &SqlParam,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    match p {
        SqlParam::Bool(b) => q.bind(*b),
        SqlParam::Text(s) => q.bind(s.clone()),
    }
}
