//! Persistence boundary for student rows.
//!
//! A [`StudentStore`] hands out [`StudentSession`]s. Mutations made through a session
//! are visible to that session only until [`StudentSession::commit`] is called;
//! dropping a session without committing discards them.

mod memory;
mod postgres;

pub use memory::MemoryStudentStore;
pub use postgres::{ensure_database_exists, ensure_students_table, PgStudentStore, STUDENTS_TABLE};

use crate::error::AppError;
use crate::model::Student;
use async_trait::async_trait;

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Open a unit of work.
    async fn begin(&self) -> Result<Box<dyn StudentSession>, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait StudentSession: Send {
    /// All rows, ordered by id.
    async fn list(&mut self) -> Result<Vec<Student>, AppError>;

    async fn get_by_id(&mut self, id: i32) -> Result<Option<Student>, AppError>;

    /// Fails with `AppError::Conflict` when `student.id` is already taken.
    async fn insert(&mut self, student: &Student) -> Result<(), AppError>;

    /// Replace every field of row `id` with `student`. Returns false when no such row exists.
    async fn update(&mut self, id: i32, student: &Student) -> Result<bool, AppError>;

    /// Returns false (and changes nothing) when no such row exists.
    async fn delete(&mut self, id: i32) -> Result<bool, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}
