//! Student CRUD against any [`StudentStore`].

use crate::error::AppError;
use crate::model::Student;
use crate::store::StudentStore;

pub struct StudentService;

impl StudentService {
    /// Every committed student, ordered by id.
    pub async fn list(store: &dyn StudentStore) -> Result<Vec<Student>, AppError> {
        let mut session = store.begin().await?;
        session.list().await
    }

    pub async fn read(store: &dyn StudentStore, id: i32) -> Result<Student, AppError> {
        let mut session = store.begin().await?;
        session
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))
    }

    /// Insert and commit. Returns the stored row.
    pub async fn create(store: &dyn StudentStore, student: Student) -> Result<Student, AppError> {
        let mut session = store.begin().await?;
        if let Err(e) = session.insert(&student).await {
            if let AppError::Conflict(_) = e {
                tracing::warn!(id = student.id, "insert rejected: id already exists");
            }
            return Err(e);
        }
        if let Err(e) = session.commit().await {
            if let AppError::Conflict(_) = e {
                tracing::warn!(id = student.id, "commit rejected: id already exists");
            }
            return Err(e);
        }
        tracing::info!(id = student.id, "student created");
        Ok(student)
    }

    /// Full replacement of row `id`. The body's id must equal `id`; nothing is touched otherwise.
    pub async fn update(store: &dyn StudentStore, id: i32, student: Student) -> Result<(), AppError> {
        if student.id != id {
            return Err(AppError::BadRequest(format!(
                "path id {} does not match body id {}",
                id, student.id
            )));
        }
        let mut session = store.begin().await?;
        if !session.update(id, &student).await? {
            return Err(AppError::NotFound(format!("student {}", id)));
        }
        session.commit().await?;
        tracing::info!(id, "student updated");
        Ok(())
    }

    pub async fn delete(store: &dyn StudentStore, id: i32) -> Result<(), AppError> {
        let mut session = store.begin().await?;
        if session.get_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("student {}", id)));
        }
        if !session.delete(id).await? {
            return Err(AppError::NotFound(format!("student {}", id)));
        }
        session.commit().await?;
        tracing::info!(id, "student deleted");
        Ok(())
    }
}
