//! Record store for student rows: the trait seam, its PostgreSQL and in-memory
//! implementations, and database bootstrap.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::{ensure_database_exists, ensure_student_table, PgStudentStore};

use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;

/// Table holding student rows.
pub const STUDENT_TABLE: &str = "student";

/// Persistence contract for students. Implementations must be safe to share across request tasks.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Every row. Callers must not rely on ordering.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    /// Row with primary key `id`, or `AppError::NotFound`.
    async fn find_by_id(&self, id: i32) -> Result<Student, AppError>;

    /// Rows whose name equals `name` exactly (case-sensitive). Empty when nothing matches.
    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError>;

    /// Upsert by id. An unassigned id inserts with a fresh id; an existing id replaces every
    /// column; an unknown id inserts a row with exactly that id. Returns the stored row.
    async fn save(&self, student: &Student) -> Result<Student, AppError>;

    /// Remove the row if present. Absent ids are not an error.
    async fn delete_by_id(&self, id: i32) -> Result<(), AppError>;

    /// Cheap reachability check used by readiness probes.
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
