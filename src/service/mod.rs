//! StudentService: request-level student operations, one unit of work each.

mod crud;
pub use crud::StudentService;
