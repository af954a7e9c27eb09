pub mod manager;
pub mod models;
pub mod record;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::Employee;
pub use record::{EmployeePayload, Field, NewEmployee, RecordError};
pub use repository::EmployeeRepository;
