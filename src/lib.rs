//! Student API: CRUD over student records, backed by PostgreSQL or an in-memory store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Backend, Settings};
pub use error::{AppError, ConfigError};
pub use model::Student;
pub use routes::{app, common_routes_with_ready, docs_routes, student_routes, ApiDoc};
pub use service::StudentService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_students_table, MemoryStudentStore, PgStudentStore, StudentSession, StudentStore,
};
