// Route handlers.
//
// public    → service root and health probe
// employees → /api/employees CRUD
pub mod employees;
pub mod public;

use crate::database::EmployeeRepository;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeRepository,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            employees: EmployeeRepository::new(pool),
        }
    }
}
